//! Error types for fx2d.
//!
//! Only building an emitter and loading or saving configuration can fail.
//! Simulation itself never returns errors.

use std::fmt;

/// Errors that can occur while building an emitter or handling its configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Pool capacity must be between 1 and `u32::MAX` particles.
    InvalidQuantity(usize),
    /// Emission rate must be finite and non-negative.
    InvalidEmissionRate(f32),
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// Failed to parse or serialize JSON configuration.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidQuantity(q) => write!(f, "Invalid particle quantity {}: must be between 1 and {}", q, u32::MAX),
            ConfigError::InvalidEmissionRate(r) => write!(f, "Invalid emission rate {}: must be finite and >= 0", r),
            ConfigError::Io(e) => write!(f, "Failed to access configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid configuration JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_mentions_value() {
        assert!(ConfigError::InvalidQuantity(0).to_string().contains('0'));
        assert!(ConfigError::InvalidEmissionRate(-2.0).to_string().contains("-2"));
    }

    #[test]
    fn test_source() {
        let io = ConfigError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.source().is_some());
        assert!(ConfigError::InvalidQuantity(0).source().is_none());
    }
}
