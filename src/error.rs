//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RabotError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("http error: {0}")]
    Http(String),

    /// The remote site has no page (or no section) for the query.
    #[error("not found: {0}")]
    NotFound(String),

    /// The page did not have the shape the parser relies on. This is our fault.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("language {0} is not supported")]
    UnsupportedLanguage(String),

    #[error("discord error: {0}")]
    Discord(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RabotError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = RabotError::Config("missing TOKEN".into());
        assert!(e.to_string().contains("config error"));
        assert!(e.to_string().contains("missing TOKEN"));
    }

    #[test]
    fn parse_error_display() {
        let e = RabotError::Parse("rows not a multiple of 8".into());
        assert!(e.to_string().contains("rows not a multiple of 8"));
    }

    #[test]
    fn unsupported_language_display() {
        let e = RabotError::UnsupportedLanguage("klingon".into());
        assert_eq!(e.to_string(), "language klingon is not supported");
    }

    #[test]
    fn not_found_is_detected() {
        assert!(RabotError::NotFound("x".into()).is_not_found());
        assert!(!RabotError::Http("x".into()).is_not_found());
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: RabotError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
