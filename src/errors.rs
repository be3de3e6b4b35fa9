use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for configuration and storage failures around the booking core.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, BookingError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BookingError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_json_failures_map_to_storage_and_config() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(matches!(BookingError::from(io), BookingError::Storage(_)));

        let json = serde_json::from_str::<u32>("{").unwrap_err();
        let err = BookingError::from(json);
        assert!(matches!(err, BookingError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
