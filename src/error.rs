use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures produced by a conversion, split by the step that failed so
/// callers can tell a bad source apart from an unwritable target.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode ICO: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
