use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpongeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to {action} {}: {source}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON input: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid JSON input: expected an object at the top level, found {0}")]
    NotAnObject(&'static str),
    #[error("JSON input is missing data.private_key or data.certificate fields. Aborting")]
    MissingFields,
    #[error("file {} already exists and -f (force) flag not specified", path.display())]
    AlreadyExists { path: PathBuf },
}

/// Coarse classification of a [`SpongeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Validation,
    Overwrite,
}

impl SpongeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpongeError::Io(_) | SpongeError::File { .. } => ErrorKind::Io,
            SpongeError::Parse(_) | SpongeError::NotAnObject(_) => ErrorKind::Parse,
            SpongeError::MissingFields => ErrorKind::Validation,
            SpongeError::AlreadyExists { .. } => ErrorKind::Overwrite,
        }
    }

    pub(crate) fn file(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        SpongeError::File {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpongeError>;
