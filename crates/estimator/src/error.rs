// ---------------------------------------------------------------------------
// ImpactError / ConfigError: typed failures for estimator operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors produced by the pure estimator operations.
///
/// Every failure is local to a single computation and returned to the caller,
/// which decides how to present it. Nothing is clamped to zero on the way out.
#[derive(Debug, Clone, PartialEq)]
pub enum ImpactError {
    /// A quantity, distance, limit or table definition was out of range
    /// (negative quantity, non-positive distance or limit, NaN, ...).
    InvalidInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    /// A category key did not resolve to any emission factor.
    UnknownCategory(String),
}

impl ImpactError {
    /// Shorthand for building an `InvalidInput` from a numeric value.
    pub fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        ImpactError::InvalidInput {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// Shorthand for building an `InvalidInput` from a textual value.
    pub fn invalid_text(field: &'static str, value: &str, reason: &'static str) -> Self {
        ImpactError::InvalidInput {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

impl fmt::Display for ImpactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactError::InvalidInput {
                field,
                value,
                reason,
            } => write!(f, "Invalid input: {field} = {value:?} ({reason})"),
            ImpactError::UnknownCategory(key) => write!(f, "Unknown category: {key:?}"),
        }
    }
}

impl std::error::Error for ImpactError {}

/// Errors that can occur while loading an [`crate::config::EstimatorConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config file is not valid JSON for the config schema.
    Parse(serde_json::Error),
    /// The config parsed but one of its values is out of range.
    Invalid(ImpactError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "Config parse error: {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
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

impl From<ImpactError> for ConfigError {
    fn from(e: ImpactError) -> Self {
        ConfigError::Invalid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = ImpactError::invalid("quantity", -3.0, "must be >= 0");
        let msg = format!("{err}");
        assert!(msg.contains("Invalid input"), "got: {msg}");
        assert!(msg.contains("quantity"), "got: {msg}");
        assert!(msg.contains("-3"), "got: {msg}");
        assert!(msg.contains("must be >= 0"), "got: {msg}");
    }

    #[test]
    fn test_unknown_category_display() {
        let err = ImpactError::UnknownCategory("hovercraft".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("Unknown category"), "got: {msg}");
        assert!(msg.contains("hovercraft"), "got: {msg}");
    }

    #[test]
    fn test_config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_from_parse() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ConfigError = parse_err.into();
        let msg = format!("{err}");
        assert!(msg.contains("Config parse error"), "got: {msg}");
    }

    #[test]
    fn test_config_error_wraps_impact_error() {
        let err: ConfigError = ImpactError::invalid("daily_carbon_kg", 0.0, "must be > 0").into();
        let msg = format!("{err}");
        assert!(msg.contains("Invalid config"), "got: {msg}");
        assert!(msg.contains("daily_carbon_kg"), "got: {msg}");
    }
}
