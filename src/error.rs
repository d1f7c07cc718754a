use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid layout '{layout}': {reason}")]
    InvalidLayout { layout: String, reason: String },

    #[error("Frequency Model Error: {0}")]
    Model(String),
}

pub type KfResult<T> = Result<T, KeyForgeError>;
