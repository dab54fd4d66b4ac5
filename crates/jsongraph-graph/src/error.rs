use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown preset: {0} (expected flat, deep or api)")]
    UnknownPreset(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
