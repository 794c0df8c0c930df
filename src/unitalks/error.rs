use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// Import was handed a file whose name does not end in `.json`.
    #[error("not a .json file")]
    InvalidFile,

    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed JSON that is not a recognized script document (no `sections`).
    #[error("not a valid script")]
    NotAScript,

    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ScriptError>;
