//! Track rendering
//!
//! Track configuration, glyph geometry, drawing surfaces and the loops
//! track itself.

pub mod config;
pub mod geometry;
mod loops;
pub mod surface;

pub use config::{parse_tracks_ini, LineStyle, LoopTrackConfig};
pub use geometry::{resolve_line_width, LoopGlyph, Point};
pub use loops::LoopTrack;
pub use surface::{DrawSurface, Polygon, PolygonStyle, RecordingSurface, SvgSurface, Viewport};

use crate::core::error::RenderResult;
use crate::core::GenomicRegion;

/// Pixels per centimeter at 96 dpi
pub const PX_PER_CM: f64 = 96.0 / 2.54;

/// A horizontal lane of a genome browser
///
/// The dispatch layer calls `plot` once per displayed region and
/// `plot_y_axis` once for the label column.
pub trait GenomeTrack {
    /// Draw the region; returns the number of glyphs drawn
    fn plot(
        &self,
        surface: &mut dyn DrawSurface,
        chrom: &str,
        region_start: u64,
        region_end: u64,
    ) -> usize;

    fn plot_y_axis(&self, surface: &mut dyn DrawSurface);

    fn title(&self) -> &str;

    /// Track height in centimeters
    fn height(&self) -> f64;
}

/// Render one track over a region into an SVG surface
///
/// The y range spans `[0, region length]`, so loops whose anchors fill the
/// window reach the top edge.
pub fn render_svg(
    track: &dyn GenomeTrack,
    region: &GenomicRegion,
    width_px: f64,
) -> RenderResult<(SvgSurface, usize)> {
    let viewport = Viewport::new(
        (region.start as f64, region.end as f64),
        (0.0, region.len() as f64),
        width_px,
        track.height() * PX_PER_CM,
    );
    let mut surface = SvgSurface::new(viewport)?;
    track.plot_y_axis(&mut surface);
    let drawn = track.plot(&mut surface, &region.chrom, region.start, region.end);
    Ok((surface, drawn))
}
