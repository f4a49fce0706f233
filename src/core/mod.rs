//! Core types
//!
//! Error types, input helpers and the region window.

pub mod error;
pub mod io;
mod region;

pub use error::{
    Anchor, BedpeParseError, ConfigError, ConfigResult, LoopTrackError, ParseResult,
    RenderError, RenderResult, Result,
};
pub use io::{detect_compression, open_reader, CompressionFormat, LineIterator};
pub use region::{GenomicRegion, RegionParseError};
