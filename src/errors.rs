use std::{io, path::PathBuf};

/// Shared error type used by the trash engine and the `trash` binary.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    /// File system I/O failure.
    #[error("I/O error while accessing {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    /// The absolute path of an argument could not be computed.
    #[error("find absolute path of {path}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The trashinfo sidecar record could not be created or written.
    #[error("create trashinfo: {0}")]
    MetadataWrite(#[source] Box<CoreError>),

    /// Neither a rename nor the copy-and-delete fallback relocated the payload.
    #[error("move to trash: {0}")]
    Move(#[source] Box<CoreError>),

    /// An entry that is neither a regular file, a symlink, nor a directory.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(PathBuf),

    /// A path is invalid for the current operation.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A required input is missing.
    #[error("missing required value: {0}")]
    MissingValue(String),
}

impl CoreError {
    pub fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Io(path.into(), error)
    }

    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingValue(message.into())
    }

    pub fn metadata_write(error: CoreError) -> Self {
        Self::MetadataWrite(Box::new(error))
    }

    pub fn move_failed(error: CoreError) -> Self {
        Self::Move(Box::new(error))
    }
}

/// Shared result alias for the crate.
pub type Result<T> = std::result::Result<T, CoreError>;
