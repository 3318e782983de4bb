#[derive(Debug, thiserror::Error)]
pub enum TradelineError {
    #[error("failed to read bureau XML: {0}")]
    Xml(String),

    #[error("input is not a traversable report tree: {0}")]
    NotATree(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
