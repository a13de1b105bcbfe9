//! Crate error type.
//!
//! Configuration problems (item types, colors, dice descriptors, grid dimensions) all
//! surface as [`Error::InvalidConfig`] with a message naming the offending value;
//! reading configuration files can additionally fail with [`Error::Io`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_prefixed() {
        let err = Error::config("no items defined");
        assert_eq!(err.to_string(), "invalid configuration: no items defined");
    }

    #[test]
    fn io_errors_are_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "read-only");
    }
}
