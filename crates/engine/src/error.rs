use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] configuration::error::ConfigError),

    #[error("Execution log persistence failed: {0}")]
    Log(#[from] execution_log::ExecutionLogError),

    #[error("Failed to read or write the portfolio state file: {0}")]
    StateIo(#[from] std::io::Error),

    #[error("Failed to serialize or parse the portfolio state: {0}")]
    StateSerde(#[from] serde_json::Error),
}
