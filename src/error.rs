use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the update engine.
///
/// Precondition failures ([`Error::InvalidPackage`], [`Error::InvalidPackages`])
/// are reported before any file is touched and abort the whole batch. I/O
/// failures are reported per file. The absence of an annotation or version
/// token is never an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid package {package}: {reason}")]
    InvalidPackage { package: String, reason: String },

    #[error("invalid packages: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    InvalidPackages(Vec<Error>),

    #[error("cannot read file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write updated content to {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot access {}: {}", .path.display(), .source)]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no updater found for file: {}", .path.display())]
    NoUpdater { path: PathBuf },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
