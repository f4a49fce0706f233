//! Track configuration
//!
//! Properties for a loops track, either built directly or read from the
//! `key = value` sections of a tracks file.

use crate::core::error::{ConfigError, ConfigResult};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_COLOR: &str = "blue";
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_ALPHA: f64 = 0.8;
/// Track height in centimeters
pub const DEFAULT_HEIGHT: f64 = 3.0;

/// Property keys understood by the loops track
pub const KNOWN_KEYS: [&str; 8] = [
    "file",
    "file_type",
    "color",
    "line width",
    "line style",
    "alpha",
    "title",
    "height",
];

/// Stroke pattern of a glyph outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// SVG `stroke-dasharray` for this style, `None` for solid lines
    pub fn dash_array(&self) -> Option<&'static str> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some("6,4"),
            LineStyle::Dotted => Some("1,3"),
            LineStyle::DashDot => Some("6,3,1,3"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
            LineStyle::DashDot => "dashdot",
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solid" | "-" => Ok(LineStyle::Solid),
            "dashed" | "--" => Ok(LineStyle::Dashed),
            "dotted" | ":" => Ok(LineStyle::Dotted),
            "dashdot" | "-." => Ok(LineStyle::DashDot),
            other => Err(format!(
                "unknown line style '{}', expected solid, dashed, dotted or dashdot",
                other
            )),
        }
    }
}

/// Render configuration of a loops track
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTrackConfig {
    /// BEDPE file to load
    pub file: PathBuf,
    /// Edge color, any SVG/CSS color string
    pub color: String,
    /// Fixed outline width; `None` selects the per-loop width heuristic
    pub line_width: Option<f64>,
    pub line_style: LineStyle,
    pub alpha: f64,
    pub title: String,
    /// Track height in centimeters
    pub height: f64,
}

impl LoopTrackConfig {
    /// Configuration with all defaults
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            color: DEFAULT_COLOR.to_string(),
            line_width: Some(DEFAULT_LINE_WIDTH),
            line_style: LineStyle::Solid,
            alpha: DEFAULT_ALPHA,
            title: String::new(),
            height: DEFAULT_HEIGHT,
        }
    }

    /// Build from a property mapping, applying defaults for absent keys
    pub fn from_properties(properties: &HashMap<String, String>) -> ConfigResult<Self> {
        let file = properties
            .get("file")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingKey("file"))?;
        let mut config = Self::new(file);

        for (key, value) in properties {
            let value = value.trim();
            match key.as_str() {
                "color" => {
                    if value.is_empty() {
                        return Err(invalid(key, value, "color must not be empty"));
                    }
                    config.color = value.to_string();
                }
                "line width" => config.line_width = Some(parse_positive(key, value)?),
                "line style" => {
                    config.line_style = value.parse().map_err(|e| invalid(key, value, e))?
                }
                "alpha" => {
                    let alpha = parse_number(key, value)?;
                    if !(0.0..=1.0).contains(&alpha) {
                        return Err(invalid(key, value, "alpha must be between 0 and 1"));
                    }
                    config.alpha = alpha;
                }
                "title" => config.title = value.to_string(),
                "height" => config.height = parse_positive(key, value)?,
                "file" => {}
                other if KNOWN_KEYS.contains(&other) => {}
                other => debug!("Ignoring unknown loops track property '{}'", other),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges after fields were set directly
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(width) = self.line_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(invalid("line width", &width.to_string(), "value must be positive"));
            }
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid(
                "alpha",
                &self.alpha.to_string(),
                "alpha must be between 0 and 1",
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(invalid("height", &self.height.to_string(), "value must be positive"));
        }
        if self.color.trim().is_empty() {
            return Err(invalid("color", &self.color, "color must not be empty"));
        }
        Ok(())
    }

    /// Read the loops track section of a tracks file
    ///
    /// With `section == None` the first section that looks like a loops track
    /// is used. Relative `file` paths resolve against the tracks file directory.
    pub fn from_tracks_file(path: &Path, section: Option<&str>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let sections = parse_tracks_ini(&text)?;

        let properties = sections
            .iter()
            .find(|(name, props)| match section {
                Some(wanted) => name == wanted,
                None => is_loops_section(props),
            })
            .map(|(_, props)| props)
            .ok_or_else(|| ConfigError::SectionNotFound {
                path: path.to_path_buf(),
                section: section.map(str::to_string),
            })?;

        let mut config = Self::from_properties(properties)?;
        if config.file.is_relative() {
            if let Some(dir) = path.parent() {
                config.file = dir.join(&config.file);
            }
        }
        Ok(config)
    }
}

fn is_loops_section(properties: &HashMap<String, String>) -> bool {
    if properties.get("file_type").map(|t| t.trim()) == Some("loops") {
        return true;
    }
    properties
        .get("file")
        .map(|f| {
            let f = f.trim();
            f.ends_with(".bedpe") || f.ends_with(".bedpe.gz") || f.ends_with(".bedpe.bz2")
        })
        .unwrap_or(false)
}

fn invalid(key: &str, value: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

fn parse_number(key: &str, value: &str) -> ConfigResult<f64> {
    let number: f64 = value
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(key, value, e.to_string()))?;
    if !number.is_finite() {
        return Err(invalid(key, value, "value must be finite"));
    }
    Ok(number)
}

fn parse_positive(key: &str, value: &str) -> ConfigResult<f64> {
    let number = parse_number(key, value)?;
    if number <= 0.0 {
        return Err(invalid(key, value, "value must be positive"));
    }
    Ok(number)
}

/// Parse an ini-style tracks file into ordered `(section, properties)` pairs
pub fn parse_tracks_ini(text: &str) -> ConfigResult<Vec<(String, HashMap<String, String>)>> {
    let mut sections: Vec<(String, HashMap<String, String>)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or_else(|| ConfigError::Syntax {
                line: line_number,
                message: format!("unterminated section header '{}'", line),
            })?;
            sections.push((name.trim().to_string(), HashMap::new()));
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Syntax {
            line: line_number,
            message: format!("expected 'key = value', got '{}'", line),
        })?;
        let (_, properties) = sections.last_mut().ok_or_else(|| ConfigError::Syntax {
            line: line_number,
            message: "property outside of any section".to_string(),
        })?;
        properties.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = LoopTrackConfig::from_properties(&props(&[("file", "loops.bedpe")])).unwrap();
        assert_eq!(config, LoopTrackConfig::new("loops.bedpe"));
        assert_eq!(config.color, "blue");
        assert_eq!(config.line_width, Some(1.0));
        assert_eq!(config.line_style, LineStyle::Solid);
        assert_eq!(config.alpha, 0.8);
        assert_eq!(config.height, 3.0);
    }

    #[test]
    fn test_all_properties() {
        let config = LoopTrackConfig::from_properties(&props(&[
            ("file", "loops.bedpe"),
            ("color", "#ff0000"),
            ("line width", "2.5"),
            ("line style", "dashed"),
            ("alpha", "0.5"),
            ("title", "CTCF loops"),
            ("height", "5"),
            ("orientation", "inverted"),
        ]))
        .unwrap();
        assert_eq!(config.color, "#ff0000");
        assert_eq!(config.line_width, Some(2.5));
        assert_eq!(config.line_style, LineStyle::Dashed);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.title, "CTCF loops");
        assert_eq!(config.height, 5.0);
    }

    #[test]
    fn test_missing_file() {
        let err = LoopTrackConfig::from_properties(&props(&[("color", "red")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("file")));
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("line width", "thick"),
            ("line width", "0"),
            ("alpha", "1.5"),
            ("height", "-1"),
            ("line style", "wavy"),
            ("color", ""),
        ] {
            let err = LoopTrackConfig::from_properties(&props(&[("file", "a.bedpe"), (key, value)]))
                .unwrap_err();
            match err {
                ConfigError::InvalidValue { key: k, .. } => assert_eq!(k, key),
                other => panic!("unexpected {:?} for {}={}", other, key, value),
            }
        }
    }

    #[test]
    fn test_validate_direct_fields() {
        let mut config = LoopTrackConfig::new("loops.bedpe");
        assert!(config.validate().is_ok());

        config.line_width = None;
        assert!(config.validate().is_ok());

        config.line_width = Some(-2.0);
        match config.validate().unwrap_err() {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "line width"),
            other => panic!("unexpected {:?}", other),
        }

        let mut config = LoopTrackConfig::new("loops.bedpe");
        config.height = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

        let mut config = LoopTrackConfig::new("loops.bedpe");
        config.alpha = 1.2;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_line_style_shorthands() {
        assert_eq!("--".parse::<LineStyle>().unwrap(), LineStyle::Dashed);
        assert_eq!(":".parse::<LineStyle>().unwrap(), LineStyle::Dotted);
        assert_eq!("-.".parse::<LineStyle>().unwrap(), LineStyle::DashDot);
        assert_eq!("-".parse::<LineStyle>().unwrap(), LineStyle::Solid);
        assert_eq!(LineStyle::Solid.dash_array(), None);
        assert!(LineStyle::Dotted.dash_array().is_some());
    }

    #[test]
    fn test_parse_tracks_ini() {
        let text = "# tracks\n[x-axis]\n\n[loops]\nfile = a.bedpe\nline width = 2\n; note\n";
        let sections = parse_tracks_ini(text).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0, "x-axis");
        assert!(sections[0].1.is_empty());
        assert_eq!(sections[1].1.get("line width").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_parse_tracks_ini_errors() {
        assert!(matches!(
            parse_tracks_ini("file = a.bedpe\n"),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_tracks_ini("[loops\n"),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_tracks_ini("[loops]\njust text\n"),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn test_from_tracks_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("tracks.ini");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "[genes]\nfile = genes.bed\n")?;
        writeln!(file, "[hic loops]\nfile = data/loops.bedpe\ncolor = red\n")?;
        drop(file);

        let config = LoopTrackConfig::from_tracks_file(&path, None)?;
        assert_eq!(config.file, dir.path().join("data/loops.bedpe"));
        assert_eq!(config.color, "red");

        let err = LoopTrackConfig::from_tracks_file(&path, Some("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::SectionNotFound { .. }));
        Ok(())
    }
}
