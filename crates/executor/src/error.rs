use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Not enough cash available to settle trade. Required: {required}, Available: {available}")]
    InsufficientCash { required: String, available: String },

    #[error("Not enough position available to settle trade. Requested: {requested}, Available: {available}")]
    InsufficientPosition { requested: String, available: String },
}
