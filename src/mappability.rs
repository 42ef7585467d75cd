use std::{
    io::{self, BufRead},
    path::Path,
};

use bitvec::prelude::*;
use compress_io::compress;
use serde::Serialize;

use crate::error::{CoordinateError, MappabilityError, MappabilityResult};

/// One line of a mappability file, split but not yet interpreted.
///
/// The coordinate fields are kept as text so that records for other
/// chromosomes are never checked numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappabilityRecord<'a> {
    chrom: &'a str,
    start: &'a str,
    stop: &'a str,
}

impl<'a> MappabilityRecord<'a> {
    /// Split a line into its three tab separated fields. On failure the
    /// number of fields found is returned.
    pub fn parse(line: &'a str) -> Result<Self, usize> {
        let fd: Vec<_> = line.trim().split('\t').collect();
        match fd.as_slice() {
            &[chrom, start, stop] => Ok(Self { chrom, start, stop }),
            _ => Err(fd.len()),
        }
    }

    pub fn chrom(&self) -> &'a str {
        self.chrom
    }

    /// Half open range `[start, stop)` covered by the record, checked
    /// against a contig of `length` bases
    pub fn range(&self, length: usize) -> Result<(usize, usize), CoordinateError> {
        let start = parse_coord(self.start)?;
        let stop = parse_coord(self.stop)?;
        if start < 0 {
            Err(CoordinateError::NegativeStart(start))
        } else if start > stop {
            Err(CoordinateError::StartAfterStop { start, stop })
        } else if stop as u64 > length as u64 {
            Err(CoordinateError::StopBeyondLength { stop, length })
        } else {
            Ok((start as usize, stop as usize))
        }
    }
}

fn parse_coord(s: &str) -> Result<i64, CoordinateError> {
    s.parse::<i64>()
        .map_err(|_| CoordinateError::NotAnInteger(s.to_owned()))
}

/// Per base mappability flags for a single contig
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappabilityMask {
    bits: BitVec<u64, Lsb0>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaskSummary {
    pub length: usize,
    pub mappable: usize,
    pub n_regions: usize,
    pub fraction: Option<f64>,
}

impl MappabilityMask {
    /// Create a mask of `length` bases, none of them mappable
    pub fn new(length: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 0; length],
        }
    }

    /// Create a mask of `length` bases, failing instead of aborting if the
    /// storage cannot be allocated
    pub fn try_new(length: usize) -> MappabilityResult<Self> {
        if length > BitSlice::<u64, Lsb0>::MAX_BITS {
            return Err(MappabilityError::Allocation { length });
        }
        let words = length.div_ceil(u64::BITS as usize);
        let mut v: Vec<u64> = Vec::new();
        v.try_reserve_exact(words)
            .map_err(|_| MappabilityError::Allocation { length })?;
        v.resize(words, 0);
        let mut bits = BitVec::from_vec(v);
        bits.truncate(length);
        Ok(Self { bits })
    }

    /// Read the mappability regions for `chromosome` from an open stream.
    ///
    /// Every line must have exactly three fields, but only lines for
    /// `chromosome` have their coordinates checked.
    pub fn from_reader<R: BufRead, S: AsRef<str>>(
        mut rdr: R,
        chromosome: S,
        length: usize,
    ) -> MappabilityResult<Self> {
        let chromosome = chromosome.as_ref();
        let mut mask = Self::try_new(length)?;
        let mut buf = String::new();
        let mut line = 0;
        let mut nreg = 0;
        loop {
            buf.clear();

            if rdr.read_line(&mut buf)? == 0 {
                break;
            }
            line += 1;
            let rec = MappabilityRecord::parse(&buf)
                .map_err(|found| MappabilityError::MalformedRecord { line, found })?;

            if rec.chrom() == chromosome {
                let (start, stop) = rec
                    .range(length)
                    .map_err(|source| MappabilityError::CoordinateRange { line, source })?;
                mask.bits[start..stop].fill(true);
                nreg += 1;
            }
        }
        debug!(
            "Mappability input read: {} lines, {} regions for {}",
            line, nreg, chromosome
        );
        Ok(mask)
    }

    /// Set positions `[start, stop)` as mappable
    pub fn set_range(&mut self, start: usize, stop: usize) -> Result<(), CoordinateError> {
        if start > stop {
            Err(CoordinateError::StartAfterStop {
                start: start as i64,
                stop: stop as i64,
            })
        } else if stop > self.len() {
            Err(CoordinateError::StopBeyondLength {
                stop: stop as i64,
                length: self.len(),
            })
        } else {
            self.bits[start..stop].fill(true);
            Ok(())
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<bool> {
        self.bits.get(pos).map(|b| *b)
    }

    /// Positions outside the contig are never mappable
    pub fn is_mappable(&self, pos: usize) -> bool {
        self.get(pos).unwrap_or(false)
    }

    pub fn count_mappable(&self) -> usize {
        self.bits.count_ones()
    }

    /// Maximal runs of mappable positions as `[start, stop)` pairs
    pub fn regions(&self) -> Regions<'_> {
        Regions {
            bits: self.bits.as_bitslice(),
            pos: 0,
        }
    }

    pub fn summary(&self) -> MaskSummary {
        let length = self.len();
        let mappable = self.count_mappable();
        MaskSummary {
            length,
            mappable,
            n_regions: self.regions().count(),
            fraction: if length > 0 {
                Some(mappable as f64 / length as f64)
            } else {
                None
            },
        }
    }

    pub fn as_bitslice(&self) -> &BitSlice<u64, Lsb0> {
        self.bits.as_bitslice()
    }
}

pub struct Regions<'a> {
    bits: &'a BitSlice<u64, Lsb0>,
    pos: usize,
}

impl Iterator for Regions<'_> {
    type Item = [usize; 2];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos + self.bits[self.pos..].first_one()?;
        let rest = &self.bits[start..];
        let stop = start + rest.first_zero().unwrap_or(rest.len());
        self.pos = stop;
        Some([start, stop])
    }
}

/// Build the mappability mask for `chromosome` (of `length` bases) from the
/// file `name`. Compressed input is handled transparently.
pub fn read_mq_map<P: AsRef<Path>, S: AsRef<str>>(
    name: P,
    chromosome: S,
    length: usize,
) -> MappabilityResult<MappabilityMask> {
    let fname = name.as_ref();
    debug!(
        "Reading in mappability regions from file {}",
        fname.display()
    );
    let file_access = |source: io::Error| MappabilityError::FileAccess {
        path: fname.to_owned(),
        source,
    };
    let f = compress::CompressIo::new()
        .path(fname)
        .bufreader()
        .map_err(file_access)?;

    MappabilityMask::from_reader(f, chromosome, length).map_err(|e| match e {
        MappabilityError::Io(source) => file_access(source),
        e => e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use compress_io::compress_type::CompressType;
    use std::io::{Cursor, Write};

    fn mask_from(s: &str, chrom: &str, length: usize) -> MappabilityResult<MappabilityMask> {
        MappabilityMask::from_reader(Cursor::new(s), chrom, length)
    }

    fn flags(mask: &MappabilityMask) -> Vec<bool> {
        mask.as_bitslice().iter().map(|b| *b).collect()
    }

    #[test]
    fn test_selects_target_chromosome() {
        let mask = mask_from("chr1\t0\t3\nchr2\t5\t8\nchr1\t5\t7\n", "chr1", 10).unwrap();
        assert_eq!(
            flags(&mask),
            vec![true, true, true, false, false, true, true, false, false, false]
        );
    }

    #[test]
    fn test_empty_input() {
        let mask = mask_from("", "chr1", 5).unwrap();
        assert_eq!(mask.len(), 5);
        assert_eq!(mask.count_mappable(), 0);
    }

    #[test]
    fn test_zero_width_range() {
        let mask = mask_from("chr1\t3\t3\n", "chr1", 5).unwrap();
        assert_eq!(mask.count_mappable(), 0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mask = mask_from("chr1\t1\t2\r\nchr1\t3\t4\r\n", "chr1", 5).unwrap();
        assert_eq!(flags(&mask), vec![false, true, false, true, false]);
    }

    #[test]
    fn test_malformed_line() {
        let e = mask_from("chr1\t0\t3\nchr1\t10\n", "chr1", 20).unwrap_err();
        assert!(matches!(
            e,
            MappabilityError::MalformedRecord { line: 2, found: 2 }
        ));
    }

    #[test]
    fn test_malformed_line_other_chromosome() {
        let e = mask_from("chr2\t1\t2\t3\n", "chr1", 20).unwrap_err();
        assert!(matches!(
            e,
            MappabilityError::MalformedRecord { line: 1, found: 4 }
        ));
    }

    #[test]
    fn test_other_chromosome_not_validated() {
        let mask = mask_from("chr2\tfoo\t-100\nchr2\t0\t1000000\n", "chr1", 4).unwrap();
        assert_eq!(mask.count_mappable(), 0);
    }

    #[test]
    fn test_coordinate_errors() {
        let cases = [
            ("chr1\tx\t3\n", CoordinateError::NotAnInteger("x".to_owned())),
            ("chr1\t-1\t3\n", CoordinateError::NegativeStart(-1)),
            (
                "chr1\t4\t2\n",
                CoordinateError::StartAfterStop { start: 4, stop: 2 },
            ),
            (
                "chr1\t0\t11\n",
                CoordinateError::StopBeyondLength {
                    stop: 11,
                    length: 10,
                },
            ),
        ];
        for (input, expected) in cases {
            match mask_from(input, "chr1", 10) {
                Err(MappabilityError::CoordinateRange { line, source }) => {
                    assert_eq!(line, 1);
                    assert_eq!(source, expected);
                }
                r => panic!("Unexpected result for {:?}: {:?}", input, r),
            }
        }
    }

    #[test]
    fn test_stop_at_length() {
        let mask = mask_from("chr1\t8\t10\n", "chr1", 10).unwrap();
        assert!(mask.is_mappable(9));
        assert!(!mask.is_mappable(10));
        assert_eq!(mask.get(10), None);
    }

    #[test]
    fn test_regions_and_summary() {
        let mask = mask_from("c\t0\t2\nc\t1\t4\nc\t6\t8\nc\t9\t10\n", "c", 10).unwrap();
        let regions: Vec<_> = mask.regions().collect();
        assert_eq!(regions, vec![[0, 4], [6, 8], [9, 10]]);
        let summary = mask.summary();
        assert_eq!(summary.mappable, 7);
        assert_eq!(summary.n_regions, 3);
        assert_eq!(summary.fraction, Some(0.7));
    }

    #[test]
    fn test_summary_empty_contig() {
        let summary = MappabilityMask::new(0).summary();
        assert_eq!(summary.n_regions, 0);
        assert_eq!(summary.fraction, None);
    }

    #[test]
    fn test_set_range() {
        let mut mask = MappabilityMask::new(5);
        mask.set_range(1, 3).unwrap();
        mask.set_range(2, 2).unwrap();
        assert_eq!(mask.count_mappable(), 2);
        assert!(mask.set_range(3, 2).is_err());
        assert!(mask.set_range(0, 6).is_err());
    }

    #[test]
    fn test_read_mq_map_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "chr1\t0\t3").unwrap();
        writeln!(f, "chr2\t5\t8").unwrap();
        writeln!(f, "chr1\t5\t7").unwrap();
        f.flush().unwrap();
        let mask = read_mq_map(f.path(), "chr1", 10).unwrap();
        assert_eq!(mask.regions().collect::<Vec<_>>(), vec![[0, 3], [5, 7]]);
    }

    #[test]
    fn test_try_new() {
        let mask = MappabilityMask::try_new(130).unwrap();
        assert_eq!(mask.len(), 130);
        assert_eq!(mask.count_mappable(), 0);
        assert_eq!(mask, MappabilityMask::new(130));
        assert!(MappabilityMask::try_new(0).unwrap().is_empty());
    }

    #[test]
    fn test_huge_length_is_an_error() {
        assert!(matches!(
            MappabilityMask::try_new(usize::MAX),
            Err(MappabilityError::Allocation { length: usize::MAX })
        ));
        let e = mask_from("chr1\t0\t3\n", "chr1", usize::MAX).unwrap_err();
        assert!(matches!(e, MappabilityError::Allocation { .. }));
    }

    #[test]
    fn test_read_mq_map_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.txt.gz");
        {
            let mut wrt = compress::CompressIo::new()
                .path(&path)
                .ctype(CompressType::Gzip)
                .bufwriter()
                .unwrap();
            write!(wrt, "chr1\t0\t3\nchr2\t5\t8\nchr1\t5\t7\n").unwrap();
            wrt.flush().unwrap();
        }
        let mask = read_mq_map(&path, "chr1", 10).unwrap();
        assert_eq!(mask.regions().collect::<Vec<_>>(), vec![[0, 3], [5, 7]]);
    }

    #[test]
    fn test_read_mq_map_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"chr1\t0\t3\nchr2\t\xff\t8\n").unwrap();
        f.flush().unwrap();
        match read_mq_map(f.path(), "chr1", 10) {
            Err(MappabilityError::FileAccess { path, .. }) => assert_eq!(path, f.path()),
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn test_read_mq_map_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let e = read_mq_map(dir.path().join("missing.txt"), "chr1", 10).unwrap_err();
        assert!(matches!(e, MappabilityError::FileAccess { .. }));
    }
}
