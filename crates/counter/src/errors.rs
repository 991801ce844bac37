//! Error type for reading and summarising a data package.
//!
//! [`CounterError`] covers every condition that stops a scan. Conditions that
//! only affect a single channel (an unreadable `messages.json`, say) do not
//! stop it: the scanner logs the error, skips the channel, and records it in
//! [`crate::Scan::skipped`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading, or interpreting a data package.
#[derive(Debug, Error)]
pub enum CounterError {
    /// A filesystem operation failed.
    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document in the package could not be parsed.
    #[error("Failed to parse JSON in '{}': {source}", .path.display())]
    Json {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A report could not be serialised.
    #[error("Failed to serialise report: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The ZIP archive could not be opened or extracted.
    #[cfg(feature = "zip")]
    #[error("Failed to process ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The input path is neither a package folder nor a supported archive.
    ///
    /// Without the `zip` feature, any regular file lands here.
    #[error("Invalid input path: {0}")]
    InvalidInputPath(String),

    /// The data root has no `messages/` folder.
    #[error("No 'messages' folder found under '{}'", .0.display())]
    MissingMessagesFolder(PathBuf),

    /// A channel directory name is not valid UTF-8 (or is empty).
    ///
    /// The scanner logs this and skips the directory.
    #[error("Invalid channel ID in path: {}", .0.display())]
    InvalidChannelDirectory(PathBuf),
}

impl CounterError {
    /// Wraps a [`serde_json::Error`] with the path of the offending file.
    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
