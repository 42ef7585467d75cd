use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, ArgGroup, Command};

use super::LogLevel;

pub(crate) fn cli_model() -> Command {
    command!()
        .arg(
            Arg::new("mappability")
                .value_parser(value_parser!(PathBuf))
                .value_name("MAPPABILITY")
                .required(true)
                .help("Mappability file (chrom, start, stop; tab separated)"),
        )
        .next_help_heading("Genome")
        .arg(
            Arg::new("chromosome")
                .short('c')
                .long("chromosome")
                .value_parser(value_parser!(String))
                .value_name("CHROM")
                .required(true)
                .help("Chromosome to build the mappability mask for (VCF contig name; enclose names containing ':' in braces, e.g. {HLA-A*01:01})"),
        )
        .arg(
            Arg::new("length")
                .short('L')
                .long("length")
                .value_parser(value_parser!(u64))
                .value_name("INT")
                .help("Length of chromosome"),
        )
        .arg(
            Arg::new("fai")
                .short('f')
                .long("fai")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILE")
                .help("FASTA index file to take the chromosome length from"),
        )
        .group(
            ArgGroup::new("contig_length")
                .args(["length", "fai"])
                .required(true)
                .multiple(false),
        )
        .next_help_heading("Output")
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .value_parser(value_parser!(String))
                .value_name("STRING")
                .default_value("mqmap")
                .help("Prefix for output files"),
        )
        .arg(
            Arg::new("compress_gzip")
                .action(ArgAction::SetTrue)
                .long("compress-gzip")
                .short('z')
                .help("Compress regions file with gzip"),
        )
        .arg(
            Arg::new("compress_bzip2")
                .action(ArgAction::SetTrue)
                .long("compress-bzip2")
                .short('j')
                .help("Compress regions file with bzip2"),
        )
        .arg(
            Arg::new("compress_zstd")
                .action(ArgAction::SetTrue)
                .long("compress-zstd")
                .short('Z')
                .help("Compress regions file with zstd"),
        )
        .arg(
            Arg::new("compress_xz")
                .action(ArgAction::SetTrue)
                .long("compress-xz")
                .short('x')
                .help("Compress regions file with xz"),
        )
        .group(
            ArgGroup::new("compress")
                .args(["compress_gzip", "compress_bzip2", "compress_zstd", "compress_xz"])
                .multiple(false),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .short('d')
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .help("Output directory [default: current directory]"),
        )
        .next_help_heading("Misc")
        .arg(
            Arg::new("timestamp")
                .short('X')
                .long("timestamp")
                .value_parser(value_parser!(stderrlog::Timestamp))
                .value_name("GRANULARITY")
                .default_value("none")
                .help("Prepend log entries with a timestamp"),
        )
        .arg(
            Arg::new("loglevel")
                .short('l')
                .long("loglevel")
                .value_name("LOGLEVEL")
                .value_parser(value_parser!(LogLevel))
                .ignore_case(true)
                .default_value("info")
                .help("Set log level"),
        )
        .arg(
            Arg::new("quiet")
                .action(ArgAction::SetTrue)
                .long("quiet")
                .conflicts_with("loglevel")
                .help("Silence all output"),
        )
}
