use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("listing a directory")]
    List,
    #[error("creating a directory")]
    Mkdir,
    #[error("copying a file")]
    Copy,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(assetkiln::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: PathBuf, error: io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

/// One entry that could not be listed or copied.
///
/// Failures are recorded in discovery order and never abort the walk; see
/// [`crate::asset::AssetCopier::errors`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{operation} failed on '{path}': {message}")]
#[diagnostic(
    code(assetkiln::asset::failure),
    help("The remaining assets were still copied; fix this entry and run the copy again.")
)]
pub struct FailureRecord {
    /// Source path for listing failures, destination path for write failures.
    pub path: PathBuf,
    pub operation: FileOperation,
    pub kind: io::ErrorKind,
    pub message: String,
}
impl FailureRecord {
    pub fn new(operation: FileOperation, path: PathBuf, error: &io::Error) -> Self {
        Self {
            path,
            operation,
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Converts a traversal error. `walkdir` only fails while reading a
    /// directory or following a link, so these are always listing failures.
    pub(crate) fn from_walk(error: &walkdir::Error, fallback: &std::path::Path) -> Self {
        let path = error.path().unwrap_or(fallback).to_path_buf();
        let kind = error
            .io_error()
            .map(io::Error::kind)
            .unwrap_or(io::ErrorKind::Other);

        Self {
            path,
            operation: FileOperation::List,
            kind,
            message: error.to_string(),
        }
    }
}
