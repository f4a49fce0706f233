//! Drawing surfaces
//!
//! Tracks draw onto a [`DrawSurface`]. Two surfaces are provided: an
//! in-memory [`RecordingSurface`] and an [`SvgSurface`] that renders a
//! standalone SVG document.

use crate::core::error::{RenderError, RenderResult};
use crate::track::config::LineStyle;
use crate::track::geometry::Point;
use std::fmt::Write as _;
use std::path::Path;

/// Stroke settings of a polygon
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub edge_color: String,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub alpha: f64,
    /// Fill color, `None` for an outline only
    pub fill: Option<String>,
}

/// A closed four-vertex outline in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: [Point; 4],
    pub style: PolygonStyle,
}

/// Something a track can draw onto
pub trait DrawSurface {
    fn add_polygon(&mut self, polygon: Polygon);
}

/// Keeps every polygon it receives, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    polygons: Vec<Polygon>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl DrawSurface for RecordingSurface {
    fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }
}

/// Mapping from data coordinates to a pixel canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl Viewport {
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), width_px: f64, height_px: f64) -> Self {
        Self {
            x_min: x_range.0,
            x_max: x_range.1,
            y_min: y_range.0,
            y_max: y_range.1,
            width_px,
            height_px,
        }
    }

    fn validate(&self) -> RenderResult<()> {
        if !(self.x_max > self.x_min) || !(self.y_max > self.y_min) {
            return Err(RenderError::EmptyViewport {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width_px) || !positive(self.height_px) {
            return Err(RenderError::InvalidCanvas {
                width_px: self.width_px,
                height_px: self.height_px,
            });
        }
        Ok(())
    }

    /// Data point to pixel position; y grows upwards in data space
    pub fn to_pixel(&self, point: Point) -> Point {
        let x = (point.x - self.x_min) / (self.x_max - self.x_min) * self.width_px;
        let y = (self.y_max - point.y) / (self.y_max - self.y_min) * self.height_px;
        Point::new(x, y)
    }
}

/// Renders polygons as SVG
#[derive(Debug, Clone)]
pub struct SvgSurface {
    viewport: Viewport,
    body: String,
    count: usize,
}

/// Escape text for use in SVG attributes and text nodes
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

impl SvgSurface {
    pub fn new(viewport: Viewport) -> RenderResult<Self> {
        viewport.validate()?;
        Ok(Self {
            viewport,
            body: String::new(),
            count: 0,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of polygons drawn so far
    pub fn polygon_count(&self) -> usize {
        self.count
    }

    /// Complete SVG document; `title` is drawn top-left when non-empty
    pub fn to_svg_string(&self, title: &str) -> String {
        let (w, h) = (self.viewport.width_px, self.viewport.height_px);
        let mut svg = String::with_capacity(self.body.len() + 512);
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#
        );
        let _ = writeln!(
            svg,
            r#"<defs><clipPath id="track-area"><rect x="0" y="0" width="{w:.0}" height="{h:.0}"/></clipPath></defs>"#
        );
        let _ = writeln!(svg, r#"<g clip-path="url(#track-area)">"#);
        svg.push_str(&self.body);
        svg.push_str("</g>\n");
        if !title.is_empty() {
            let _ = writeln!(
                svg,
                r#"<text x="4" y="14" font-family="sans-serif" font-size="12">{}</text>"#,
                escape_xml(title)
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Write the SVG document to a file
    pub fn write_to(&self, path: &Path, title: &str) -> RenderResult<()> {
        std::fs::write(path, self.to_svg_string(title))?;
        Ok(())
    }
}

impl DrawSurface for SvgSurface {
    fn add_polygon(&mut self, polygon: Polygon) {
        let style = &polygon.style;
        let points = polygon
            .points
            .iter()
            .map(|p| {
                let px = self.viewport.to_pixel(*p);
                format!("{:.2},{:.2}", px.x, px.y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let fill = style
            .fill
            .as_deref()
            .map(escape_xml)
            .unwrap_or_else(|| "none".to_string());

        let _ = write!(
            self.body,
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{:.3}" stroke-opacity="{:.3}""#,
            points,
            fill,
            escape_xml(&style.edge_color),
            style.line_width,
            style.alpha
        );
        if let Some(dashes) = style.line_style.dash_array() {
            let _ = write!(self.body, r#" stroke-dasharray="{}""#, dashes);
        }
        self.body.push_str("/>\n");
        self.count += 1;
    }
}
