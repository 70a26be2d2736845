use std::fmt;

/// Custom error types for ArduPilot log parsing
#[derive(Debug)]
pub enum LogError {
    /// I/O errors
    Io(std::io::Error),
    /// No FMT record was found anywhere in the log
    EmptyFormatTable,
    /// Frame header argument could not be interpreted
    InvalidHeader(String),
    /// Export format error
    Export(String),
    /// CSV writer errors
    #[cfg(feature = "csv")]
    Csv(csv::Error),
    /// JSON serialization errors
    #[cfg(feature = "json")]
    Json(serde_json::Error),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Io(err) => write!(f, "I/O error: {}", err),
            LogError::EmptyFormatTable => {
                write!(f, "No FMT messages found in log (empty format table)")
            }
            LogError::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
            LogError::Export(msg) => write!(f, "Export error: {}", msg),
            #[cfg(feature = "csv")]
            LogError::Csv(err) => write!(f, "CSV error: {}", err),
            #[cfg(feature = "json")]
            LogError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Io(err) => Some(err),
            #[cfg(feature = "csv")]
            LogError::Csv(err) => Some(err),
            #[cfg(feature = "json")]
            LogError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::Io(err)
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for LogError {
    fn from(err: csv::Error) -> Self {
        LogError::Csv(err)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
