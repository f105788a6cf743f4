use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Strategy chain used to fill one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStrategy {
    /// Header scan, then container fallback
    #[default]
    Standard,
    /// Review block scan first, then the standard chain
    ReviewsFirst,
}

/// Describes one named section of the structured output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Key the section is stored under
    pub key: String,

    /// Lowercase phrases matched against node text, in priority order
    pub keywords: Vec<String>,

    /// Maximum number of characters kept for the section
    pub max_length: usize,

    #[serde(default)]
    pub strategy: SectionStrategy,
}

impl SectionSpec {
    pub fn new(key: &str, keywords: &[&str], max_length: usize) -> Self {
        Self {
            key: key.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            max_length,
            strategy: SectionStrategy::Standard,
        }
    }

    pub fn with_strategy(mut self, strategy: SectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Configuration for the page data assembler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Sections to extract, in output order
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionSpec>,

    /// Maximum number of image URLs reported
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Version string stamped on every PageData
    #[serde(default = "default_extension_version")]
    pub extension_version: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            max_images: default_max_images(),
            extension_version: default_extension_version(),
        }
    }
}

impl ExtractorConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks section invariants and lowercases every keyword
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for section in &mut self.sections {
            let invalid = |reason: &str| ConfigError::InvalidSection {
                key: section.key.clone(),
                reason: reason.to_string(),
            };
            if section.key.is_empty() {
                return Err(invalid("key must not be empty"));
            }
            if section.max_length == 0 {
                return Err(invalid("max_length must be greater than zero"));
            }
            if section.keywords.is_empty() {
                return Err(invalid("at least one keyword is required"));
            }
            if !seen.insert(section.key.clone()) {
                return Err(invalid("duplicate key"));
            }
            for keyword in &mut section.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        Ok(())
    }

    /// Looks up a section spec by key
    pub fn section(&self, key: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.key == key)
    }
}

/// Default value for max_images
fn default_max_images() -> usize {
    10
}

/// Default value for extension_version
fn default_extension_version() -> String {
    "1.3".to_string()
}

/// The seven product page sections
pub fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new(
            "about_item",
            &[
                "about this item",
                "about this product",
                "product overview",
                "feature bullets",
                "features",
                "key features",
                "product features",
                "highlights",
            ],
            4000,
        ),
        SectionSpec::new(
            "technical_details",
            &[
                "technical details",
                "technical specifications",
                "tech specs",
                "product information",
                "specifications",
                "spec sheet",
                "product specs",
                "details",
                "product details",
            ],
            4000,
        ),
        SectionSpec::new(
            "reviews",
            &[
                "customer reviews",
                "top reviews",
                "reviews",
                "customer ratings",
                "what customers say",
                "verified purchase reviews",
            ],
            5000,
        )
        .with_strategy(SectionStrategy::ReviewsFirst),
        SectionSpec::new(
            "whats_in_box",
            &[
                "what's in the box",
                "what's included",
                "included components",
                "package contents",
                "in the box",
                "box contents",
            ],
            2000,
        ),
        SectionSpec::new(
            "manufacturer",
            &[
                "from the manufacturer",
                "product description",
                "manufacturer description",
                "brand story",
                "about the brand",
            ],
            3000,
        ),
        SectionSpec::new(
            "additional_info",
            &[
                "additional information",
                "product information",
                "more details",
                "other details",
                "warranty",
                "warranty information",
            ],
            2000,
        ),
        SectionSpec::new(
            "dimensions",
            &[
                "dimensions",
                "product dimensions",
                "size",
                "weight",
                "package dimensions",
            ],
            1000,
        ),
    ]
}
