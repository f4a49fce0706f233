//! Region window
//!
//! The `(chromosome, start, end)` triple a track is asked to display.

use std::fmt;
use std::str::FromStr;

/// A displayed genomic window
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicRegion {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

/// Failure to parse a `chrom:start-end` string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionParseError {
    #[error("Region '{0}' is not of the form chrom:start-end")]
    Malformed(String),

    #[error("Invalid {field} coordinate '{value}' in region")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Region start ({start}) must be smaller than end ({end})")]
    EmptyRange { start: u64, end: u64 },
}

impl GenomicRegion {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Window span in base pairs
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_coord(field: &'static str, value: &str) -> Result<u64, RegionParseError> {
    let cleaned: String = value.chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned.parse().map_err(|_| RegionParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl FromStr for GenomicRegion {
    type Err = RegionParseError;

    /// Parses `chr1:1,000,000-2,000,000`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (chrom, range) = s
            .rsplit_once(':')
            .ok_or_else(|| RegionParseError::Malformed(s.to_string()))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| RegionParseError::Malformed(s.to_string()))?;
        if chrom.is_empty() {
            return Err(RegionParseError::Malformed(s.to_string()));
        }

        let start = parse_coord("start", start)?;
        let end = parse_coord("end", end)?;
        if start >= end {
            return Err(RegionParseError::EmptyRange { start, end });
        }

        Ok(Self::new(chrom, start, end))
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
