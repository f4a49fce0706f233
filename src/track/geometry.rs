//! Loop glyph geometry
//!
//! A loop is drawn as a kite standing on the diagonal between its two
//! anchors. With `a = start1, b = end1, c = start2, d = end2`:
//!
//! ```text
//!            P2 ((b+c)/2, d-a)
//!           /  \
//!   P3     /    \    P1
//!  (x0-w1/2,      (x0+w2/2,
//!   y0+w1) \    /  y0+w2)
//!           \  /
//!            P0 ((b+c)/2, c-b)
//! ```
//!
//! The x axis is genomic position, the y axis is genomic distance, so loops
//! with wider gaps sit higher.

use crate::formats::bedpe::LoopRecord;

/// A point in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outline of one loop glyph, vertices in drawing order P0..P3
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopGlyph {
    pub points: [Point; 4],
}

impl LoopGlyph {
    /// Kite for anchors `(start1, end1)` and `(start2, end2)`
    pub fn new(start1: u64, end1: u64, start2: u64, end2: u64) -> Self {
        let (a, b, c, d) = (start1 as f64, end1 as f64, start2 as f64, end2 as f64);
        let width1 = b - a;
        let width2 = d - c;

        let x0 = (b + c) / 2.0;
        let y0 = c - b;

        Self {
            points: [
                Point::new(x0, y0),
                Point::new(x0 + width2 / 2.0, y0 + width2),
                Point::new(x0, d - a),
                Point::new(x0 - width1 / 2.0, y0 + width1),
            ],
        }
    }

    pub fn from_record(record: &LoopRecord) -> Self {
        Self::new(record.start1, record.end1, record.start2, record.end2)
    }
}

/// Outline width for one loop
///
/// A configured width wins. Otherwise the width follows the loop score as
/// `0.5 * sqrt(score)`, falling back to `default` when there is no usable score.
pub fn resolve_line_width(fixed: Option<f64>, record: &LoopRecord, default: f64) -> f64 {
    match fixed {
        Some(width) => width,
        None => record
            .score
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| 0.5 * s.sqrt())
            .unwrap_or(default),
    }
}
