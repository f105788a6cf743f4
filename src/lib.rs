//! Heuristic extraction of named product page sections.
//!
//! Given a DOM-like tree of an unlabeled product page, the extractor finds
//! a handful of length-bounded text sections (description, specs, reviews,
//! box contents and so on) plus a short list of image URLs.
//!
//! ```
//! use page_sections::SectionExtractor;
//!
//! let html = "<html><body><h2>About this item</h2>\
//!     <p>Lightweight aluminium frame with a twelve hour battery.</p>\
//!     <p>Ships with a sleeve and a charger.</p></body></html>";
//! let page = SectionExtractor::new().extract_html("https://shop.example/p/1", html);
//! assert!(page.structured_content.get("about_item").is_some());
//! ```

// Re-export modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod responder;
pub mod results;
pub mod sections;
pub mod tree;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ExtractorConfig, SectionSpec, SectionStrategy};
pub use error::{ConfigError, TreeError};
pub use extractor::SectionExtractor;
pub use results::{ExtractionResult, PageData};
pub use tree::{DocumentTree, HtmlTree, NodePattern};
