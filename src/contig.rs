use std::{io::BufRead, path::Path};

use anyhow::Context;
use compress_io::compress;
use lazy_static::lazy_static;
use regex::RegexSet;

lazy_static! {
    // Valid contig names as given by the VCF4.3 spec, optionally enclosed in brackets i.e., {chr2}
    static ref RE_SET_CONTIG: RegexSet = RegexSet::new([
        r"^[{]([0-9A-Za-z!#$%&+./:;?@^_|~-][0-9A-Za-z!#$%&*+./:;=?@^_|~-]*)[}]$",
        r"^([0-9A-Za-z!#$%&+./:;?@^_|~-][0-9A-Za-z!#$%&*+./;=?@^_|~-]*)$"
    ]).unwrap();
}

pub fn is_valid_contig_name<S: AsRef<str>>(name: S) -> bool {
    RE_SET_CONTIG.is_match(name.as_ref())
}

/// Validate a contig name, returning it with any enclosing brackets removed
pub fn parse_contig_name(name: &str) -> Option<&str> {
    if is_valid_contig_name(name) {
        Some(
            name.strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .unwrap_or(name),
        )
    } else {
        None
    }
}

/// Look up the length of `ctg` in a FASTA index (.fai) file
pub fn fai_contig_length<P: AsRef<Path>, S: AsRef<str>>(fai: P, ctg: S) -> anyhow::Result<usize> {
    let fname = fai.as_ref();
    let ctg = ctg.as_ref();
    let f = compress::CompressIo::new()
        .path(fname)
        .bufreader()
        .with_context(|| format!("Could not open FASTA index {}", fname.display()))?;
    contig_length_from_reader(f, ctg)
        .with_context(|| format!("Error reading FASTA index {}", fname.display()))
}

fn contig_length_from_reader<R: BufRead>(mut rdr: R, ctg: &str) -> anyhow::Result<usize> {
    let mut buf = String::new();
    loop {
        buf.clear();

        if rdr.read_line(&mut buf)? == 0 {
            break;
        }
        let mut fd = buf.trim_end().split('\t');
        if fd.next() == Some(ctg) {
            return fd
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| anyhow!("Invalid length for contig {}: {}", ctg, buf.trim_end()));
        }
    }
    Err(anyhow!("Contig {:?} not found", ctg))
}
