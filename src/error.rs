//! Errors surfaced by the optimizer core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptimizeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// ai-powered method without a credential, or a method nobody recognises
    #[error("Missing API key or invalid method")]
    InvalidConfiguration,

    /// The external optimizer failed to produce a result
    #[error("{0}")]
    TransformationFailure(String),
}

impl OptimizeError {
    pub fn transformation(message: impl Into<String>) -> Self {
        Self::TransformationFailure(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            OptimizeError::InvalidConfiguration.to_string(),
            "Missing API key or invalid method"
        );
        assert_eq!(
            OptimizeError::transformation("upstream timed out").to_string(),
            "upstream timed out"
        );
    }
}
