use logrelay_core::InitError;
use thiserror::Error;

/// Errors raised while initializing the adapter
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unsupported pre-built logger type: {type_name}")]
    UnsupportedLogger { type_name: &'static str },
}

impl From<ConfigurationError> for InitError {
    fn from(err: ConfigurationError) -> Self {
        InitError::Configuration {
            logger: crate::ADAPTER_NAME,
            source: Box::new(err),
        }
    }
}
