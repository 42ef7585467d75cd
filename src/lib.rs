//! Utilities for a read mapping pipeline: per base mappability masks,
//! tab delimited output, run progress reporting and scratch directories.

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod contig;
pub mod error;
pub mod format;
pub mod mappability;
pub mod metadata;
pub mod run_clock;
pub mod scratch;

pub use error::{CoordinateError, MappabilityError, ScratchError};
pub use format::{tabout, TabField};
pub use mappability::{read_mq_map, MappabilityMask, MaskSummary};
pub use run_clock::RunClock;
