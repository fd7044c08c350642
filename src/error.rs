use thiserror::Error;

/// Error surfaced at the binary boundary, carrying the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to retrieve the raw dataset text.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered, but not with a 2xx status.
    #[error("http status {status} for {url}")]
    Transport { status: u16, url: String },
    /// The connection failed or the body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Document-level ingest failure (row-level problems are rejections, not errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("dataset document is empty (no header line)")]
    EmptyDocument,
}

/// Any failure that makes the pipeline fall back to synthetic data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}
