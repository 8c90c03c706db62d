use thiserror::Error;

/// Errors raised by networks, datasets and the training loop.
///
/// Every error is local to the call that produced it: a rejected call leaves
/// the network exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("dataset has no examples")]
    EmptyDataset,

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Fails with [`NetworkError::ShapeMismatch`] unless `actual == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}
