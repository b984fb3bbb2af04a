use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionLogError {
    #[error("Failed to read or write the execution log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize or parse the execution log: {0}")]
    Serde(#[from] serde_json::Error),
}
