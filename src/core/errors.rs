//! Shared error types for the application

use thiserror::Error;

/// Main error type for forestwatch operations
#[derive(Debug, Error)]
pub enum Error {
    /// A time series was too short for the requested statistic
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A ratio with a zero denominator was requested
    #[error("Undefined ratio: {what}")]
    UndefinedRatio { what: String },

    /// A region name not present in the dataset or configuration
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// A year missing from a region's observation range
    #[error("Missing year {year} for region {region}")]
    MissingYear { region: String, year: i32 },

    /// Malformed persisted data (bad year keys, wrong shape)
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an insufficient-data error for a series
    pub fn insufficient_data(needed: usize, got: usize) -> Self {
        Self::InsufficientData { needed, got }
    }

    /// Create an undefined-ratio error naming the offending denominator
    pub fn undefined_ratio(what: impl Into<String>) -> Self {
        Self::UndefinedRatio { what: what.into() }
    }

    /// Create a data format error
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_both_counts() {
        let err = Error::insufficient_data(2, 1);
        assert_eq!(
            err.to_string(),
            "Insufficient data: need at least 2 observations, got 1"
        );
    }

    #[test]
    fn undefined_ratio_message_names_denominator() {
        let err = Error::undefined_ratio("total loss is zero");
        assert_eq!(err.to_string(), "Undefined ratio: total loss is zero");
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
