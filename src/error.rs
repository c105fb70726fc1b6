use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NextbgError {
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("cannot write config file {} (new state was not saved): {source}", path.display())]
    ConfigWrite { path: PathBuf, source: io::Error },

    #[error("invalid file pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("cannot scan {}: {reason}", root.display())]
    Scan { root: PathBuf, reason: String },

    #[error("{failed} of {total} directories could not be scanned; index left unchanged")]
    ScanAborted { failed: usize, total: usize },

    #[error("no images configured. Use \"nextbg --dir <DIRECTORY>\" to scan a directory for image files")]
    EmptyIndex,

    #[error("failed to delete {}: {source}", path.display())]
    Delete { path: PathBuf, source: io::Error },

    #[error("failed to set background using command `{command}`: {reason}")]
    ExternalCommand { command: String, reason: String },
}

pub type Result<T> = std::result::Result<T, NextbgError>;
