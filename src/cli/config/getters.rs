use std::path::Path;

use mqmap_utils::RunClock;

use super::{CompressOpt, Config};

impl Config {
    pub fn mappability(&self) -> &Path {
        self.mappability.as_ref()
    }

    pub fn chromosome(&self) -> &str {
        self.chromosome.as_str()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn compress(&self) -> CompressOpt {
        self.compress
    }

    pub fn clock(&self) -> &RunClock {
        &self.clock
    }
}
