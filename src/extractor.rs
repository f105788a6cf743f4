use crate::config::ExtractorConfig;
use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink, LogSink};
use crate::error::{ConfigError, TreeError};
use crate::results::{ExtractionResult, PageData};
use crate::sections;
use crate::tree::{DocumentTree, HtmlTree, NodePattern};
use crate::utils::{char_len, preview, truncate_chars};
use std::path::Path;
use std::sync::Arc;

/// Outcome of one section's strategy chain
enum SectionOutcome {
    Found(String),
    Missing,
    Failed(TreeError),
}

/// Assembles [`PageData`] from a document tree
///
/// Extraction never fails: a traversal error inside one section only
/// empties that section, and a failed snapshot or image scan degrades the
/// whole record to [`PageData::minimal`].
#[derive(Clone)]
pub struct SectionExtractor {
    config: ExtractorConfig,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionExtractor {
    /// Extractor for the seven default sections, logging through `log`
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
            sink: Arc::new(LogSink),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = ExtractorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ConfigError> {
        let config = ExtractorConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Route diagnostic events to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parses `html` and extracts page data from it
    pub fn extract_html(&self, url: &str, html: &str) -> PageData {
        self.extract(&HtmlTree::parse(url, html))
    }

    /// Extracts page data from `tree`
    pub fn extract<T: DocumentTree + ?Sized>(&self, tree: &T) -> PageData {
        let url = tree.url().to_string();

        let (dom_snapshot, images) = match self.capture(tree) {
            Ok(captured) => captured,
            Err(e) => {
                self.sink.record(&DiagnosticEvent::ExtractionDegraded {
                    error: e.to_string(),
                });
                let dom_snapshot = tree.serialize().unwrap_or_default();
                return PageData::minimal(url, dom_snapshot, self.config.extension_version.clone());
            }
        };
        ::log::debug!("Collected {} images from {}", images.len(), url);

        let mut structured_content = ExtractionResult::new();
        let mut outcomes = Vec::with_capacity(self.config.sections.len());
        for spec in &self.config.sections {
            let outcome = match sections::find_section(tree, spec) {
                Ok(Some(found)) => {
                    SectionOutcome::Found(truncate_chars(&found, spec.max_length).to_string())
                }
                Ok(None) => SectionOutcome::Missing,
                Err(e) => SectionOutcome::Failed(e),
            };
            let value = match &outcome {
                SectionOutcome::Found(text) => Some(text.clone()),
                SectionOutcome::Missing | SectionOutcome::Failed(_) => None,
            };
            structured_content.insert(&spec.key, value);
            outcomes.push((spec.key.as_str(), outcome));
        }

        let page = PageData::new(
            url,
            dom_snapshot,
            images,
            structured_content,
            self.config.extension_version.clone(),
        );
        self.report(&outcomes);
        page
    }

    /// Serializes the document and collects image sources
    fn capture<T: DocumentTree + ?Sized>(
        &self,
        tree: &T,
    ) -> Result<(String, Vec<String>), TreeError> {
        let dom_snapshot = tree.serialize()?;
        let images = collect_images(tree, self.config.max_images)?;
        Ok((dom_snapshot, images))
    }

    fn report(&self, outcomes: &[(&str, SectionOutcome)]) {
        for (key, outcome) in outcomes {
            let event = match outcome {
                SectionOutcome::Found(text) => DiagnosticEvent::SectionFound {
                    key: key.to_string(),
                    chars: char_len(text),
                    preview: preview(text),
                },
                SectionOutcome::Missing => DiagnosticEvent::SectionMissing {
                    key: key.to_string(),
                },
                SectionOutcome::Failed(e) => DiagnosticEvent::SectionFailed {
                    key: key.to_string(),
                    error: e.to_string(),
                },
            };
            self.sink.record(&event);
        }
    }
}

/// Image sources that start with `http`, in document order, capped at `limit`
///
/// Inline `data:` and protocol-relative sources are skipped without using
/// up a slot.
pub fn collect_images<T: DocumentTree + ?Sized>(
    tree: &T,
    limit: usize,
) -> Result<Vec<String>, TreeError> {
    let images = tree
        .query(&NodePattern::tag("img"))?
        .into_iter()
        .filter_map(|img| tree.attr(img, "src"))
        .filter(|src| src.starts_with("http"))
        .take(limit)
        .map(str::to_string)
        .collect();
    Ok(images)
}
