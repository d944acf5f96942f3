use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the data pipeline and the image fetch.
///
/// Every variant is scoped to the request that produced it; callers decide
/// how to degrade (empty chart, placeholder image, status message).
#[derive(Error, Debug)]
pub enum SunDashError {
    /// A source file is missing or cannot be parsed.
    #[error("data unavailable ({}): {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A parameter is outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The solar image request failed or returned something that is not an image.
    #[error("remote fetch failed: {0}")]
    RemoteFetchFailure(String),
}

impl SunDashError {
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SunDashError::DataUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SunDashError>;
