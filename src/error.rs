use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures raised by the note store and the path resolver.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        StoreError::Io { op, path: path.to_path_buf(), source }
    }

    /// Returns the underlying I/O error kind, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            StoreError::Io { source, .. } => Some(source.kind()),
            StoreError::InvalidState(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found; set TENOTE_DIR and TENOTE_CONFIG")]
    NoHome,

    #[error("read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("sections must include trash")]
    MissingTrash,
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("EDITOR is empty")]
    EmptyCommand,

    #[error("launch editor {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("editor {program:?} exited with {status}")]
    Failed { program: String, status: std::process::ExitStatus },

    #[error("terminal hand-off: {0}")]
    Terminal(#[source] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
