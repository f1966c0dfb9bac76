use thiserror::Error;

/// Errors raised by the parsing and comparison core. Everything is
/// fail-fast: callers propagate these up to `main`, which alone decides
/// to terminate the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open {path}: {message}")]
    NotFound { path: String, message: String },

    #[error("invalid input in {path}: {message}")]
    Format { path: String, message: String },

    #[error("comparison failed: {message}")]
    Comparison { message: String },
}

impl Error {
    pub fn not_found(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::NotFound {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn comparison(message: impl Into<String>) -> Self {
        Error::Comparison {
            message: message.into(),
        }
    }
}
