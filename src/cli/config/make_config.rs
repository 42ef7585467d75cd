use std::path::PathBuf;

use anyhow::Context;
use clap::ArgMatches;
use mqmap_utils::{
    contig::{fai_contig_length, parse_contig_name},
    RunClock,
};

use super::{CompressOpt, Config};

impl Config {
    pub fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let clock = RunClock::new();
        let mappability = m
            .get_one::<PathBuf>("mappability")
            .expect("Missing mappability file")
            .to_owned();

        let chromosome = m
            .get_one::<String>("chromosome")
            .expect("Missing chromosome");

        let chromosome = parse_contig_name(chromosome)
            .ok_or_else(|| {
                anyhow!(
                    "Illegal contig name {} (names containing ':' must be enclosed in braces)",
                    chromosome
                )
            })?
            .to_owned();

        let length = if let Some(x) = m.get_one::<u64>("length") {
            usize::try_from(*x)
                .with_context(|| format!("Length {} is too large for this platform", x))?
        } else {
            let fai = m.get_one::<PathBuf>("fai").expect("Missing length or fai");
            fai_contig_length(fai, &chromosome)
                .with_context(|| format!("Could not get length of {}", chromosome))?
        };
        debug!("Length of {}: {}", chromosome, length);

        let prefix = m.get_one::<String>("prefix").unwrap().to_owned();
        let dir = m.get_one::<PathBuf>("dir").map(|p| p.to_owned());

        let compress = if m.get_flag("compress_gzip") {
            CompressOpt::Gzip
        } else if m.get_flag("compress_bzip2") {
            CompressOpt::Bzip2
        } else if m.get_flag("compress_zstd") {
            CompressOpt::Zstd
        } else if m.get_flag("compress_xz") {
            CompressOpt::Xz
        } else {
            CompressOpt::None
        };

        Ok(Self {
            mappability,
            chromosome,
            length,
            prefix,
            dir,
            compress,
            clock,
        })
    }
}
