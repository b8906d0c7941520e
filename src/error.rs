use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single subtitle rename.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("target {0:?} already exists")]
    TargetExists(PathBuf),

    #[error("failed to rename {from:?} -> {to:?}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
