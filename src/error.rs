//! Error types for `dialex`

use thiserror::Error;

/// The error type for `dialex` operations.
///
/// Loader errors are fatal for the run they occur in: nothing is extracted
/// from a document that failed to load. Extraction and scheduling never
/// fail once a document has parsed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The input exceeds the maximum accepted size.
    ///
    /// Checked against the raw byte length before any parse attempt.
    #[error("file too large: {size} bytes (limit is 100 MiB)")]
    FileTooLarge {
        /// The rejected input size in bytes.
        size: u64,
    },

    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid JSON text.
    #[error("JSON error: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// The fixed, user-facing message for this error's category.
    ///
    /// The underlying diagnostic (parser position, OS error) is carried by
    /// the variant for logging; hosts surface only these generic strings.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::FileTooLarge { .. } => {
                "File too large. Please use a file smaller than 100MB."
            }
            Error::Io(_) => "Error reading file. Please try again.",
            Error::InvalidJson(_) => {
                "Error parsing JSON file. Please ensure it's valid JSON."
            }
            _ => "An unexpected error occurred.",
        }
    }
}

/// A specialized Result type for `dialex` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_fixed_strings() {
        let too_large = Error::FileTooLarge { size: 200_000_000 };
        assert_eq!(
            too_large.user_message(),
            "File too large. Please use a file smaller than 100MB."
        );

        let io = Error::Io(std::io::Error::other("boom"));
        assert_eq!(io.user_message(), "Error reading file. Please try again.");

        let json = Error::InvalidJson(
            serde_json::from_str::<serde_json::Value>("{,}").unwrap_err(),
        );
        assert_eq!(
            json.user_message(),
            "Error parsing JSON file. Please ensure it's valid JSON."
        );
    }

    #[test]
    fn test_display_carries_diagnostics() {
        let too_large = Error::FileTooLarge { size: 123 };
        assert_eq!(
            too_large.to_string(),
            "file too large: 123 bytes (limit is 100 MiB)"
        );
    }
}
