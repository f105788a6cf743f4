/// Failure raised while querying or reading the document tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A node query could not be evaluated
    #[error("tree query failed: {0}")]
    Query(String),

    /// Reading the text of a node failed
    #[error("text read failed: {0}")]
    TextRead(String),

    /// The document could not be serialized
    #[error("snapshot capture failed: {0}")]
    Snapshot(String),
}

/// Failure raised while loading or validating an extractor configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A section spec violates its invariants
    #[error("invalid section '{key}': {reason}")]
    InvalidSection { key: String, reason: String },
}
