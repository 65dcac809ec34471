use std::error::Error as StdError;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Mandatory configuration is missing; the caller should print usage.
    #[error("usage error: {0}")]
    Usage(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("serde error")]
    Serde(#[from] serde_json::Error),
    #[error("http error")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint")]
    Endpoint(#[from] url::ParseError),
    #[error("remote error ({status}): {message}")]
    Remote { status: u16, message: String },
    #[error("cache pool {0} already exists")]
    PoolExists(String),
    #[error("cache admin client is closed")]
    ClientClosed,
}

impl CoreError {
    pub fn is_usage(&self) -> bool {
        matches!(self, CoreError::Usage(_) | CoreError::Config(_))
    }
}

/// Formats an error together with every `source` beneath it.
///
/// ```
/// use hdfs_cache_core::error::{format_error_chain, CoreError};
///
/// let err = CoreError::ClientClosed;
/// assert_eq!(format_error_chain(&err), "cache admin client is closed");
/// ```
pub fn format_error_chain<E: StdError + ?Sized>(error: &E) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();

    while let Some(err) = source {
        chain.push(format!("  caused by: {}", err));
        source = err.source();
    }

    chain.join("\n")
}

/// Logs an error and its cause chain at warn level without propagating it.
pub fn log_error<E: StdError + ?Sized>(context: &str, error: &E) {
    let error_chain = format_error_chain(error);
    tracing::warn!(
        context = context,
        error = %error_chain,
        "error occurred"
    );
}
