// src/error.rs
//! Error types for NMEA log replay
//!
//! Only loading and exporting can fail. Malformed sentences inside a log are
//! skipped during decoding and never surface here.

use std::fmt;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
    Other(String),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "IO error: {}", e),
            ReplayError::Json(e) => write!(f, "JSON error: {}", e),
            ReplayError::Config(msg) => write!(f, "Config error: {}", msg),
            ReplayError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(e) => Some(e),
            ReplayError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(error: std::io::Error) -> Self {
        ReplayError::Io(error)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(error: serde_json::Error) -> Self {
        ReplayError::Json(error)
    }
}

impl From<anyhow::Error> for ReplayError {
    fn from(error: anyhow::Error) -> Self {
        ReplayError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: ReplayError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.nmea").into();
        assert_eq!(err.to_string(), "IO error: missing.nmea");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_other_error_display() {
        let err = ReplayError::Other("No fixes to export".to_string());
        assert_eq!(err.to_string(), "Error: No fixes to export");
    }
}
