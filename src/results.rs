use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Section values keyed by section name, in a fixed order
///
/// A section that yielded nothing is stored as `None` and serialized as
/// `null`; keys are never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    entries: Vec<(String, Option<String>)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the value for `key`, replacing an earlier value in place
    pub fn insert(&mut self, key: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Value for `key`; `None` when the key is absent or the section is empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of sections that produced content
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ExtractionResult;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section names to strings or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut result = ExtractionResult::new();
                while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
                    result.insert(&key, value);
                }
                Ok(result)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Everything extracted from one page, as handed back to the requester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    /// URL of the page
    pub url: String,

    /// Serialized markup of the document element
    #[serde(alias = "dom_html")]
    pub dom_snapshot: String,

    /// Absolute image URLs, in document order
    pub images: Vec<String>,

    /// Named sections harvested from the page
    pub structured_content: ExtractionResult,

    /// Version of the extractor that produced this record
    pub extension_version: String,
}

impl PageData {
    /// Create a new page data instance
    pub fn new(
        url: String,
        dom_snapshot: String,
        images: Vec<String>,
        structured_content: ExtractionResult,
        extension_version: String,
    ) -> Self {
        Self {
            url,
            dom_snapshot,
            images,
            structured_content,
            extension_version,
        }
    }

    /// Fallback record used when the page could not be walked at all
    pub fn minimal(url: String, dom_snapshot: String, extension_version: String) -> Self {
        Self::new(
            url,
            dom_snapshot,
            Vec::new(),
            ExtractionResult::new(),
            extension_version,
        )
    }
}
