//! LoopTrack - chromatin loop tracks for linear genome browsers
//!
//! Loads BEDPE interaction calls (pairs of genomic intervals such as Hi-C
//! loop anchors) and draws each loop in view as a kite-shaped outline.
//!
//! # Example
//!
//! ```ignore
//! use loop_track::{GenomeTrack, LoopTrack, LoopTrackConfig, RecordingSurface};
//!
//! let track = LoopTrack::new(LoopTrackConfig::new("loops.bedpe"))?;
//!
//! let mut surface = RecordingSurface::new();
//! let drawn = track.plot(&mut surface, "chr1", 1_000_000, 2_000_000);
//! ```

pub mod core;
pub mod formats;
pub mod track;

// Re-export commonly used types
pub use crate::core::{
    BedpeParseError, ConfigError, GenomicRegion, LoopTrackError, RenderError, Result,
};
pub use formats::bedpe::{LoadReport, LoopRecord, LoopTable};
pub use track::{
    DrawSurface, GenomeTrack, LineStyle, LoopGlyph, LoopTrack, LoopTrackConfig,
    RecordingSurface, SvgSurface, Viewport,
};
