use std::path::PathBuf;

use compress_io::compress_type::CompressType;
use mqmap_utils::RunClock;

mod getters;
mod make_config;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CompressOpt {
    #[default]
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl CompressOpt {
    /// File name suffix for output compressed with this option
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gzip => Some("gz"),
            Self::Bzip2 => Some("bz2"),
            Self::Xz => Some("xz"),
            Self::Zstd => Some("zst"),
        }
    }

    pub fn compress_type(&self) -> Option<CompressType> {
        match self {
            Self::None => None,
            Self::Gzip => Some(CompressType::Gzip),
            Self::Bzip2 => Some(CompressType::Bzip2),
            Self::Xz => Some(CompressType::Xz),
            Self::Zstd => Some(CompressType::Zstd),
        }
    }
}

pub struct Config {
    mappability: PathBuf,

    // Target contig and its length
    chromosome: String,
    length: usize,

    // Output Options
    prefix: String,
    dir: Option<PathBuf>,
    compress: CompressOpt,

    // Started at program startup; used for progress reporting
    clock: RunClock,
}
