//! Loops track integration tests
//!
//! File-backed loading (plain and compressed), tracks-file configuration
//! and SVG rendering.

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use loop_track::core::GenomicRegion;
use loop_track::track::{self, GenomeTrack, LineStyle, LoopTrack, LoopTrackConfig, RecordingSurface};
use loop_track::{BedpeParseError, LoopTable, LoopTrackError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LOOPS: &str = "track name=\"loops\"\n\
chrom1\tstart1\tend1\tchrom2\tstart2\tend2\tname\tscore\n\
chr1\t100\t200\tchr1\t500\t600\tl1\t9\n\
chr1\t5000\t5200\tchr1\t1000\t1100\tl2\t25\n\
chr1\t100\t200\tchr2\t500\t600\tl3\t1\n\
chr2\t300\t400\tchr2\t800\t900\tl4\t4\n";

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn bzip(data: &str) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "loops.bedpe", LOOPS.as_bytes());

    let (table, report) = LoopTable::from_path(&path).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.source(), Some(path.as_path()));
    assert_eq!(report.header_lines, 2);
    assert_eq!(report.swapped, 1);
    assert_eq!(report.cross_chrom.len(), 1);
    assert_eq!(report.cross_chrom[0].line_number, 5);
    assert_eq!(table.chromosomes(), vec!["chr1", "chr2"]);
}

#[test]
fn test_gzip_loads_like_plain() {
    let dir = TempDir::new().unwrap();
    let plain = write_file(dir.path(), "loops.bedpe", LOOPS.as_bytes());
    // no .gz suffix: detected from magic bytes
    let compressed = write_file(dir.path(), "loops_compressed.bedpe", &gzip(LOOPS));

    let (plain_table, _) = LoopTable::from_path(&plain).unwrap();
    let (gz_table, _) = LoopTable::from_path(&compressed).unwrap();
    assert_eq!(plain_table.records(), gz_table.records());
}

#[test]
fn test_bzip2_loads_like_plain() {
    let dir = TempDir::new().unwrap();
    let plain = write_file(dir.path(), "loops.bedpe", LOOPS.as_bytes());
    let by_suffix = write_file(dir.path(), "loops.bedpe.bz2", &bzip(LOOPS));
    let by_magic = write_file(dir.path(), "loops_bz.bedpe", &bzip(LOOPS));

    let (plain_table, plain_report) = LoopTable::from_path(&plain).unwrap();
    let (bz_table, bz_report) = LoopTable::from_path(&by_suffix).unwrap();
    assert_eq!(plain_table.records(), bz_table.records());
    assert_eq!(plain_report.valid, bz_report.valid);
    assert_eq!(plain_report.cross_chrom.len(), bz_report.cross_chrom.len());

    let (magic_table, _) = LoopTable::from_path(&by_magic).unwrap();
    assert_eq!(plain_table.records(), magic_table.records());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = LoopTrack::new(LoopTrackConfig::new("/nonexistent/dir/loops.bedpe")).unwrap_err();
    assert!(matches!(err, LoopTrackError::Parse(BedpeParseError::Io(_))));
}

#[test]
fn test_malformed_file_fails_track() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.bedpe", b"chr1\t100\t200\tchr1\t500\t600\nchr1\t100\t200\n");

    let err = LoopTrack::new(LoopTrackConfig::new(&path)).unwrap_err();
    match err {
        LoopTrackError::Parse(BedpeParseError::TooFewFields { line, found, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_track_plot_per_region() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "loops.bedpe", LOOPS.as_bytes());
    let track = LoopTrack::new(LoopTrackConfig::new(&path)).unwrap();

    let mut surface = RecordingSurface::new();
    assert_eq!(track.plot(&mut surface, "chr1", 0, 10_000), 2);
    assert_eq!(track.plot(&mut surface, "chr2", 0, 10_000), 1);
    assert_eq!(track.plot(&mut surface, "chr3", 0, 10_000), 0);
    assert_eq!(surface.len(), 3);
}

#[test]
fn test_tracks_file_configuration() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "loops.bedpe", LOOPS.as_bytes());
    let tracks = write_file(
        dir.path(),
        "tracks.ini",
        b"[x-axis]\nwhere = top\n\n[hic]\nfile = loops.bedpe\ntitle = Loops\ncolor = #1f77b4\nline style = dotted\nalpha = 1\n",
    );

    let config = LoopTrackConfig::from_tracks_file(&tracks, None).unwrap();
    assert_eq!(config.line_style, LineStyle::Dotted);
    assert_eq!(config.alpha, 1.0);

    let track = LoopTrack::new(config).unwrap();
    assert_eq!(track.title(), "Loops");
    assert_eq!(track.loops().len(), 3);
}

#[test]
fn test_render_svg_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "loops.bedpe", LOOPS.as_bytes());
    let mut config = LoopTrackConfig::new(&path);
    config.title = "CTCF <loops>".to_string();
    config.line_width = None;
    let track = LoopTrack::new(config).unwrap();

    let region: GenomicRegion = "chr1:0-10,000".parse().unwrap();
    let (surface, drawn) = track::render_svg(&track, &region, 1000.0).unwrap();
    assert_eq!(drawn, 2);

    let out = dir.path().join("loops.svg");
    surface.write_to(&out, track.title()).unwrap();
    let svg = std::fs::read_to_string(&out).unwrap();

    assert_eq!(svg.matches("<polygon").count(), 2);
    assert_eq!(svg.matches(r#"fill="none""#).count(), 2);
    // 0.5 * sqrt(9) and 0.5 * sqrt(25)
    assert!(svg.contains(r#"stroke-width="1.500""#));
    assert!(svg.contains(r#"stroke-width="2.500""#));
    assert!(svg.contains("CTCF &lt;loops&gt;"));
}
