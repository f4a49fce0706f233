//! File format adapters
//!
//! Adapters for interaction file formats (BEDPE).

pub mod bedpe;

pub use bedpe::{
    is_header_line, parse_bedpe_line, BedpeRecordView, LoadReport, LoopRecord, LoopTable,
    ParsedLine, SkippedLine,
};
