//! LoopTrack CLI entry point
//!
//! Renders BEDPE loop calls over a genomic region as SVG.

use clap::{Parser, Subcommand, ValueEnum};
use loop_track::core::GenomicRegion;
use loop_track::formats::bedpe::LoopTable;
use loop_track::track::{self, GenomeTrack, LineStyle, LoopTrack, LoopTrackConfig};
use std::path::PathBuf;
use std::time::Instant;

/// Outline style (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LineStyleArg {
    Solid,
    Dashed,
    Dotted,
    Dashdot,
}

impl From<LineStyleArg> for LineStyle {
    fn from(arg: LineStyleArg) -> Self {
        match arg {
            LineStyleArg::Solid => LineStyle::Solid,
            LineStyleArg::Dashed => LineStyle::Dashed,
            LineStyleArg::Dotted => LineStyle::Dotted,
            LineStyleArg::Dashdot => LineStyle::DashDot,
        }
    }
}

#[derive(Parser)]
#[command(name = "loop-track")]
#[command(about = "Render chromatin loop (BEDPE) tracks")]
#[command(version)]
#[command(author = "LoopTrack Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot the loops of a region to SVG
    Plot {
        /// Input BEDPE file (plain, .gz or .bz2)
        #[arg(required_unless_present = "tracks", conflicts_with = "tracks")]
        input: Option<PathBuf>,
        /// Tracks file with a loops section
        #[arg(long)]
        tracks: Option<PathBuf>,
        /// Section of the tracks file to use (default: first loops section)
        #[arg(long, requires = "tracks")]
        section: Option<String>,
        /// Region to plot, e.g. chr1:1,000,000-2,000,000
        #[arg(short = 'r', long)]
        region: GenomicRegion,
        /// Output SVG file
        #[arg(short = 'o', long, default_value = "output.svg")]
        output: PathBuf,
        /// Outline color
        #[arg(long)]
        color: Option<String>,
        /// Fixed outline width
        #[arg(long = "line-width", conflicts_with = "auto_width")]
        line_width: Option<f64>,
        /// Derive outline width from the BEDPE score column
        #[arg(long = "auto-width")]
        auto_width: bool,
        /// Outline style
        #[arg(long = "line-style")]
        line_style: Option<LineStyleArg>,
        /// Outline opacity (0-1)
        #[arg(long)]
        alpha: Option<f64>,
        /// Track title
        #[arg(long)]
        title: Option<String>,
        /// Track height in centimeters
        #[arg(long)]
        height: Option<f64>,
        /// Image width in pixels
        #[arg(long = "width-px", default_value = "1000")]
        width_px: f64,
    },
    /// Load a BEDPE file and report what was read
    Stats {
        /// Input BEDPE file (plain, .gz or .bz2)
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Plot {
            input,
            tracks,
            section,
            region,
            output,
            color,
            line_width,
            auto_width,
            line_style,
            alpha,
            title,
            height,
            width_px,
        } => {
            let mut config = match (input, tracks) {
                (_, Some(tracks)) => LoopTrackConfig::from_tracks_file(&tracks, section.as_deref())
                    .map_err(|e| anyhow::anyhow!("Failed to read tracks file: {}", e))?,
                (Some(input), None) => LoopTrackConfig::new(input),
                (None, None) => anyhow::bail!("either an input file or --tracks is required"),
            };
            if let Some(color) = color {
                config.color = color;
            }
            if let Some(width) = line_width {
                anyhow::ensure!(width > 0.0, "line width must be positive");
                config.line_width = Some(width);
            }
            if auto_width {
                config.line_width = None;
            }
            if let Some(style) = line_style {
                config.line_style = style.into();
            }
            if let Some(alpha) = alpha {
                anyhow::ensure!((0.0..=1.0).contains(&alpha), "alpha must be between 0 and 1");
                config.alpha = alpha;
            }
            if let Some(title) = title {
                config.title = title;
            }
            if let Some(height) = height {
                anyhow::ensure!(height > 0.0, "height must be positive");
                config.height = height;
            }

            anyhow::ensure!(width_px > 0.0, "image width must be positive");
            config.validate()?;

            eprintln!("Loading loops file: {:?}", config.file);
            let loops_track = LoopTrack::new(config)?;

            eprintln!("Plotting {} -> {:?}", region, output);
            let (surface, drawn) = track::render_svg(&loops_track, &region, width_px)?;
            surface.write_to(&output, loops_track.title())?;

            let report = loops_track.load_report();
            eprintln!("\n=== Plot Statistics ===");
            eprintln!("Loops loaded:    {}", report.valid);
            eprintln!("Cross-chrom:     {}", report.cross_chrom.len());
            eprintln!("Loops plotted:   {}", drawn);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Stats { input } => {
            let (table, report) = LoopTable::from_path(&input)?;

            eprintln!("=== Load Statistics ===");
            eprintln!("Lines read:      {}", report.total_lines);
            eprintln!("Header lines:    {}", report.header_lines);
            eprintln!("Valid loops:     {}", report.valid);
            eprintln!("Swapped anchors: {}", report.swapped);
            eprintln!("Cross-chrom:     {}", report.cross_chrom.len());
            eprintln!("Chromosomes:     {}", table.chromosomes().join(", "));
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
