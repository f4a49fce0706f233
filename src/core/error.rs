//! Error types for LoopTrack
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for LoopTrack operations
#[derive(Debug, Error)]
pub enum LoopTrackError {
    /// BEDPE loading errors
    #[error("BEDPE parse error: {0}")]
    Parse(#[from] BedpeParseError),

    /// Track configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Drawing surface errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which anchor of a loop record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    First,
    Second,
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anchor::First => write!(f, "1"),
            Anchor::Second => write!(f, "2"),
        }
    }
}

/// Errors that can occur while loading a BEDPE file
///
/// All variants are fatal for the load: no partial table is produced.
#[derive(Debug, Error)]
pub enum BedpeParseError {
    /// Fewer than six tab-separated fields
    #[error(
        "File not valid at line {line}. The format is chrom1 start1 end1 chrom2 start2 end2 \
         (found {found} fields) in line: {content}"
    )]
    TooFewFields {
        line: usize,
        found: usize,
        content: String,
    },

    /// A coordinate field is not a non-negative integer
    #[error("Error reading line {line}: field {field} ('{value}') is not an integer: {message}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
        message: String,
    },

    /// start > end for one of the anchors
    #[error("Error in line #{line}, end{anchor} ({end}) smaller than start{anchor} ({start}) in: {content}")]
    InvalidRange {
        line: usize,
        anchor: Anchor,
        start: u64,
        end: u64,
        content: String,
    },

    /// I/O error while opening or reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BedpeParseError {
    /// 1-based line number of the offending line, if the error is line-bound
    pub fn line(&self) -> Option<usize> {
        match self {
            BedpeParseError::TooFewFields { line, .. }
            | BedpeParseError::InvalidNumber { line, .. }
            | BedpeParseError::InvalidRange { line, .. } => Some(*line),
            BedpeParseError::Io(_) => None,
        }
    }
}

/// Errors that can occur while building a track configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required property is absent
    #[error("Missing required property '{0}'")]
    MissingKey(&'static str),

    /// Property value cannot be used
    #[error("Invalid value '{value}' for property '{key}': {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    /// Malformed tracks file
    #[error("Tracks file syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Requested section is not in the tracks file
    #[error("No loops track section found in {}{}", .path.display(), .section.as_deref().map(|s| format!(" (section '{}')", s)).unwrap_or_default())]
    SectionNotFound {
        path: PathBuf,
        section: Option<String>,
    },

    /// I/O error while reading a tracks file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while rendering onto a surface
#[derive(Debug, Error)]
pub enum RenderError {
    /// Viewport has no extent on one of the axes
    #[error("Empty viewport: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    EmptyViewport {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    /// Canvas size in pixels is not positive
    #[error("Invalid canvas size: {width_px} x {height_px} pixels")]
    InvalidCanvas { width_px: f64, height_px: f64 },

    /// Failed to write rendered output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LoopTrack operations
pub type Result<T> = std::result::Result<T, LoopTrackError>;

/// Result type alias for BEDPE loading
pub type ParseResult<T> = std::result::Result<T, BedpeParseError>;

/// Result type alias for configuration
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for rendering
pub type RenderResult<T> = std::result::Result<T, RenderError>;
