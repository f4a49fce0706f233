//! BEDPE format adapter
//!
//! Loads paired-interval (loop) calls into an in-memory table and answers
//! region queries against it.
//!
//! # Format
//!
//! ```text
//! chrom1<TAB>start1<TAB>end1<TAB>chrom2<TAB>start2<TAB>end2[<TAB>name<TAB>score...]
//! ```
//!
//! Lines starting with `browser`, `track`, `#` or `chrom1` are headers and
//! are skipped. Only intra-chromosomal loops are kept.

use crate::core::error::{Anchor, BedpeParseError, ParseResult};
use crate::core::io::{open_reader, LineIterator};
use crate::core::GenomicRegion;
use log::{info, warn};
use memchr::memchr_iter;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Prefixes marking header or comment lines
pub const HEADER_PREFIXES: [&str; 4] = ["browser", "track", "#", "chrom1"];

/// Number of mandatory BEDPE columns
pub const REQUIRED_FIELDS: usize = 6;

/// Column index of the BEDPE score
pub const SCORE_FIELD: usize = 7;

/// One validated loop: two anchors on the same chromosome, ordered by position
#[derive(Debug, Clone, PartialEq)]
pub struct LoopRecord {
    pub chrom: String,
    pub start1: u64,
    pub end1: u64,
    pub start2: u64,
    pub end2: u64,
    /// BEDPE score column, when present and numeric
    pub score: Option<f64>,
}

impl LoopRecord {
    /// Build a record, ordering the anchors left to right
    ///
    /// Returns the record and whether the anchors were swapped.
    pub fn normalized(
        chrom: impl Into<String>,
        start1: u64,
        end1: u64,
        start2: u64,
        end2: u64,
    ) -> (Self, bool) {
        let swap = start2 < start1;
        let (start1, end1, start2, end2) = if swap {
            (start2, end2, start1, end1)
        } else {
            (start1, end1, start2, end2)
        };
        let record = Self {
            chrom: chrom.into(),
            start1,
            end1,
            start2,
            end2,
            score: None,
        };
        (record, swap)
    }

    /// Attach a score
    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    /// `(start1, end1, start2, end2)`
    pub fn anchors(&self) -> (u64, u64, u64, u64) {
        (self.start1, self.end1, self.start2, self.end2)
    }

    /// Whether both inner anchor edges lie strictly inside the window
    #[inline]
    pub fn in_window(&self, chrom: &str, region_start: u64, region_end: u64) -> bool {
        self.chrom == chrom
            && region_start < self.end1
            && self.end1 < region_end
            && region_start < self.start2
            && self.start2 < region_end
    }
}

/// Zero-copy view over the fields of one BEDPE data line
pub struct BedpeRecordView<'a> {
    line: &'a str,
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> BedpeRecordView<'a> {
    /// Split a line on tabs; fails if fewer than six fields are present
    pub fn parse(line: &'a str, line_number: usize) -> ParseResult<Self> {
        let mut field_bounds = Vec::with_capacity(10);
        let mut start_pos = 0;
        for tab_pos in memchr_iter(b'\t', line.as_bytes()) {
            field_bounds.push((start_pos, tab_pos));
            start_pos = tab_pos + 1;
        }
        field_bounds.push((start_pos, line.len()));

        if field_bounds.len() < REQUIRED_FIELDS {
            return Err(BedpeParseError::TooFewFields {
                line: line_number,
                found: field_bounds.len(),
                content: line.to_string(),
            });
        }

        Ok(Self { line, field_bounds })
    }

    /// Get field as string slice
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .map(|&(start, end)| &self.line[start..end])
    }

    fn required(&self, index: usize) -> &'a str {
        let (start, end) = self.field_bounds[index];
        &self.line[start..end]
    }

    pub fn chrom1(&self) -> &'a str {
        self.required(0)
    }

    pub fn chrom2(&self) -> &'a str {
        self.required(3)
    }

    /// Parse the four coordinates as `(start1, end1, start2, end2)`
    pub fn coordinates(&self, line_number: usize) -> ParseResult<(u64, u64, u64, u64)> {
        let parse = |field: &'static str, index: usize| -> ParseResult<u64> {
            let value = self.required(index);
            value
                .parse::<u64>()
                .map_err(|e| BedpeParseError::InvalidNumber {
                    line: line_number,
                    field,
                    value: value.to_string(),
                    message: e.to_string(),
                })
        };
        Ok((
            parse("start1", 1)?,
            parse("end1", 2)?,
            parse("start2", 4)?,
            parse("end2", 5)?,
        ))
    }

    /// Score column (index 7), if present and a finite number
    pub fn score(&self) -> Option<f64> {
        self.field(SCORE_FIELD)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

/// Result of parsing one data line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Valid intra-chromosomal loop; `swapped` is set when anchors were reordered
    Loop { record: LoopRecord, swapped: bool },
    /// Anchors on different chromosomes
    CrossChromosome,
}

/// Check whether a line is a header or comment line
#[inline]
pub fn is_header_line(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Parse and validate one data line
///
/// Validation order: field count, integer coordinates, `start <= end` for
/// each anchor, then the chromosome check.
pub fn parse_bedpe_line(line: &str, line_number: usize) -> ParseResult<ParsedLine> {
    let trimmed = line.trim();
    let view = BedpeRecordView::parse(trimmed, line_number)?;
    let (start1, end1, start2, end2) = view.coordinates(line_number)?;

    if start1 > end1 {
        return Err(BedpeParseError::InvalidRange {
            line: line_number,
            anchor: Anchor::First,
            start: start1,
            end: end1,
            content: trimmed.to_string(),
        });
    }
    if start2 > end2 {
        return Err(BedpeParseError::InvalidRange {
            line: line_number,
            anchor: Anchor::Second,
            start: start2,
            end: end2,
            content: trimmed.to_string(),
        });
    }

    if view.chrom1() != view.chrom2() {
        return Ok(ParsedLine::CrossChromosome);
    }

    let (record, swapped) = LoopRecord::normalized(view.chrom1(), start1, end1, start2, end2);
    Ok(ParsedLine::Loop {
        record: record.with_score(view.score()),
        swapped,
    })
}

/// A line skipped during loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    pub content: String,
}

/// Summary of one load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Physical lines read
    pub total_lines: usize,
    /// Header/comment lines skipped
    pub header_lines: usize,
    /// Records kept
    pub valid: usize,
    /// Records whose anchors were reordered
    pub swapped: usize,
    /// Cross-chromosome lines that were skipped
    pub cross_chrom: Vec<SkippedLine>,
    /// Every warning emitted during the load, in order
    pub warnings: Vec<String>,
}

impl LoadReport {
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// All loops of one BEDPE file, in load order
#[derive(Debug, Clone, Default)]
pub struct LoopTable {
    records: Vec<LoopRecord>,
    source: Option<PathBuf>,
}

impl LoopTable {
    /// Build a table directly from records
    pub fn from_records(records: Vec<LoopRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load a BEDPE file (plain, gzip or bzip2)
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<(Self, LoadReport)> {
        let path = path.as_ref();
        let reader = open_reader(path)?;
        let (mut table, report) = Self::load(reader, &path.display().to_string())?;
        table.source = Some(path.to_path_buf());
        Ok((table, report))
    }

    /// Parse BEDPE text from any reader
    pub fn from_reader<R: BufRead>(reader: R) -> ParseResult<(Self, LoadReport)> {
        Self::load(reader, "<reader>")
    }

    /// Parse BEDPE text from bytes (for testing)
    pub fn from_bytes(data: &[u8]) -> ParseResult<(Self, LoadReport)> {
        Self::load(data, "<bytes>")
    }

    fn load<R: BufRead>(reader: R, source_name: &str) -> ParseResult<(Self, LoadReport)> {
        let mut records = Vec::new();
        let mut report = LoadReport::default();
        let mut lines = LineIterator::new(reader);

        while let Some(line) = lines.next_line() {
            let line = line?;
            report.total_lines += 1;
            let line_number = report.total_lines;

            if is_header_line(line) {
                report.header_lines += 1;
                continue;
            }

            match parse_bedpe_line(line, line_number)? {
                ParsedLine::Loop { record, swapped } => {
                    if swapped {
                        report.swapped += 1;
                    }
                    records.push(record);
                    report.valid += 1;
                }
                ParsedLine::CrossChromosome => {
                    report.warn(format!(
                        "Only loops in same chromosome are used. Skipping line {}: {}",
                        line_number, line
                    ));
                    report.cross_chrom.push(SkippedLine {
                        line_number,
                        content: line.to_string(),
                    });
                }
            }
        }

        if report.valid == 0 {
            report.warn(format!("No valid intervals were found in file {}", source_name));
        }
        info!(
            "Loaded {} loops from {} ({} cross-chromosome lines skipped)",
            report.valid,
            source_name,
            report.cross_chrom.len()
        );

        Ok((
            Self {
                records,
                source: None,
            },
            report,
        ))
    }

    /// Loops overlapping the window, in load order
    ///
    /// A loop is in view when its first anchor's end and its second anchor's
    /// start both lie strictly inside `(region_start, region_end)`.
    pub fn query(&self, chrom: &str, region_start: u64, region_end: u64) -> Vec<&LoopRecord> {
        self.records
            .iter()
            .filter(|r| r.in_window(chrom, region_start, region_end))
            .collect()
    }

    pub fn query_region(&self, region: &GenomicRegion) -> Vec<&LoopRecord> {
        self.query(&region.chrom, region.start, region.end)
    }

    /// Distinct chromosomes in first-seen order
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.chrom.as_str()) {
                seen.push(&record.chrom);
            }
        }
        seen
    }

    pub fn records(&self) -> &[LoopRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoopRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the table was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
