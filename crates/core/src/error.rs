use thiserror::Error;

pub type RagaResult<T> = Result<T, RagaError>;

#[derive(Error, Debug)]
pub enum RagaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for RagaError {
    fn from(err: config::ConfigError) -> Self {
        RagaError::Config(err.to_string())
    }
}
