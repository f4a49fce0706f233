//! Loops track
//!
//! Draws BEDPE loop calls as kite outlines over a genomic window.

use crate::core::error::Result;
use crate::formats::bedpe::{LoadReport, LoopRecord, LoopTable};
use crate::track::config::{LoopTrackConfig, DEFAULT_LINE_WIDTH};
use crate::track::geometry::{resolve_line_width, LoopGlyph};
use crate::track::surface::{DrawSurface, Polygon, PolygonStyle};
use crate::track::GenomeTrack;
use log::debug;

/// A loops track: configuration plus the table loaded from its file
#[derive(Debug, Clone)]
pub struct LoopTrack {
    config: LoopTrackConfig,
    loops: LoopTable,
    report: LoadReport,
}

impl LoopTrack {
    /// Load the configured BEDPE file
    pub fn new(config: LoopTrackConfig) -> Result<Self> {
        let (loops, report) = LoopTable::from_path(&config.file)?;
        Ok(Self {
            config,
            loops,
            report,
        })
    }

    /// Track over an already loaded table
    pub fn with_table(config: LoopTrackConfig, loops: LoopTable) -> Self {
        let report = LoadReport {
            valid: loops.len(),
            ..LoadReport::default()
        };
        Self {
            config,
            loops,
            report,
        }
    }

    pub fn config(&self) -> &LoopTrackConfig {
        &self.config
    }

    pub fn loops(&self) -> &LoopTable {
        &self.loops
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    fn glyph_polygon(&self, record: &LoopRecord) -> Polygon {
        Polygon {
            points: LoopGlyph::from_record(record).points,
            style: PolygonStyle {
                edge_color: self.config.color.clone(),
                line_width: resolve_line_width(self.config.line_width, record, DEFAULT_LINE_WIDTH),
                line_style: self.config.line_style,
                alpha: self.config.alpha,
                fill: None,
            },
        }
    }
}

impl GenomeTrack for LoopTrack {
    fn plot(
        &self,
        surface: &mut dyn DrawSurface,
        chrom: &str,
        region_start: u64,
        region_end: u64,
    ) -> usize {
        let mut count = 0;
        for record in self.loops.query(chrom, region_start, region_end) {
            surface.add_polygon(self.glyph_polygon(record));
            count += 1;
        }

        debug!("{} loops were plotted", count);
        debug!("title is {}", self.config.title);
        count
    }

    /// Loops tracks have no y axis
    fn plot_y_axis(&self, _surface: &mut dyn DrawSurface) {}

    fn title(&self) -> &str {
        &self.config.title
    }

    fn height(&self) -> f64 {
        self.config.height
    }
}
