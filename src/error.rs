//! Error types for mappability loading and scratch space handling.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while building a [`crate::mappability::MappabilityMask`]
#[derive(Debug, Error)]
pub enum MappabilityError {
    /// The mappability file could not be opened or read
    #[error("Could not read mappability file {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line did not split into chromosome, start and stop
    #[error("Malformed mappability record at line {line}: expected 3 tab separated fields, found {found}")]
    MalformedRecord { line: usize, found: usize },

    /// Coordinates of a record for the target chromosome are invalid
    #[error("Invalid coordinates in mappability record at line {line}")]
    CoordinateRange {
        line: usize,
        #[source]
        source: CoordinateError,
    },

    /// The mask for a contig of `length` bases could not be allocated
    #[error("Could not allocate a mappability mask for {length} bases")]
    Allocation { length: usize },

    #[error("Error reading mappability input")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    #[error("start ({0}) is negative")]
    NegativeStart(i64),

    #[error("start ({start}) > stop ({stop})")]
    StartAfterStop { start: i64, stop: i64 },

    #[error("stop ({stop}) is beyond the contig length ({length})")]
    StopBeyondLength { stop: i64, length: usize },
}

/// Errors from creating or removing scratch directories
#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("Could not create scratch directory")]
    Create(#[source] io::Error),

    /// Failure to remove a scratch directory. This is always fatal: callers
    /// that cannot tolerate process termination must check the directory
    /// is empty before removing it.
    #[error("Could not remove scratch directory {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScratchError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }
}

/// Result type alias for mappability operations
pub type MappabilityResult<T> = Result<T, MappabilityError>;
