//! Integration tests running the full pipeline over a tile directory.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;
use tilegrid::compose::{BACKGROUND_COLOR, PLACEHOLDER_COLOR};
use tilegrid::{CellStatus, GridError, MosaicBuilder, DEFAULT_OUTPUT};

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

/// Write a solid-color PNG tile.
fn create_tile(dir: &Path, filename: &str, width: u32, height: u32, color: Rgb<u8>) {
    RgbImage::from_pixel(width, height, color)
        .save(dir.join(filename))
        .unwrap();
}

fn load_output(dir: &Path) -> RgbImage {
    image::open(dir.join(DEFAULT_OUTPUT)).unwrap().to_rgb8()
}

#[test]
fn test_mixed_size_grid() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N09E092.png", 100, 50, RED);
    create_tile(tmp.path(), "N09E093.png", 80, 50, BLUE);
    create_tile(tmp.path(), "N10E092.png", 100, 60, GREEN);

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();

    assert_eq!(summary.output, tmp.path().join(DEFAULT_OUTPUT));
    assert_eq!((summary.width, summary.height), (180, 110));
    assert_eq!(summary.missing_files, vec!["N10E093.png"]);

    let canvas = load_output(tmp.path());
    assert_eq!(canvas.dimensions(), (180, 110));
    assert_eq!(*canvas.get_pixel(0, 0), GREEN);
    assert_eq!(*canvas.get_pixel(150, 30), PLACEHOLDER_COLOR);
    assert_eq!(*canvas.get_pixel(50, 80), RED);
    assert_eq!(*canvas.get_pixel(150, 80), BLUE);
}

#[test]
fn test_gap_row_is_zero_height() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N07E000.png", 10, 10, RED);
    create_tile(tmp.path(), "N10E000.png", 10, 10, BLUE);

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();

    // Rows N10..N07 exist, but N09/N08 have no tile and collapse to 0
    assert_eq!(summary.rows, 4);
    assert_eq!((summary.width, summary.height), (10, 20));
    assert_eq!(summary.missing_files, vec!["N08E000.png", "N09E000.png"]);

    let canvas = load_output(tmp.path());
    assert_eq!(*canvas.get_pixel(0, 0), BLUE);
    assert_eq!(*canvas.get_pixel(0, 10), RED);
}

#[test]
fn test_all_four_hemispheres() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N01W001.png", 4, 4, RED);
    create_tile(tmp.path(), "S01E001.png", 4, 4, BLUE);

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();
    assert_eq!((summary.rows, summary.columns), (2, 2));

    // North-West top-left, South-East bottom-right
    let canvas = load_output(tmp.path());
    assert_eq!(*canvas.get_pixel(0, 0), RED);
    assert_eq!(*canvas.get_pixel(7, 7), BLUE);
    assert_eq!(*canvas.get_pixel(7, 0), PLACEHOLDER_COLOR);
    assert_eq!(*canvas.get_pixel(0, 7), PLACEHOLDER_COLOR);
}

#[test]
fn test_centered_tile_keeps_background_margin() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 100, 60, GREEN);
    create_tile(tmp.path(), "N00E001.png", 80, 50, RED);

    let mut cells = Vec::new();
    MosaicBuilder::new(tmp.path())
        .build()
        .run_with(|p| cells.push(p.clone()))
        .unwrap();

    let small = cells.iter().find(|p| p.filename == "N00E001.png").unwrap();
    assert_eq!(small.cell.x, 100);
    assert!(matches!(small.status, CellStatus::Placed { x: 100, y: 5, .. }));

    let canvas = load_output(tmp.path());
    assert_eq!(*canvas.get_pixel(100, 0), BACKGROUND_COLOR);
    assert_eq!(*canvas.get_pixel(100, 5), RED);
}

#[test]
fn test_corrupt_tile_is_placeholder_not_missing() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 10, 10, RED);
    create_tile(tmp.path(), "N00E002.png", 10, 10, RED);
    fs::write(tmp.path().join("N00E001.png"), b"not an image").unwrap();

    let mut statuses = Vec::new();
    let summary = MosaicBuilder::new(tmp.path())
        .build()
        .run_with(|p| statuses.push((p.filename.clone(), p.status.clone())))
        .unwrap();

    assert!(summary.missing_files.is_empty());
    assert_eq!(summary.failed, 1);
    assert!(matches!(
        statuses.iter().find(|(n, _)| n == "N00E001.png"),
        Some((_, CellStatus::Failed { .. }))
    ));
    // The corrupt column has no readable tile, so it has zero width
    assert_eq!((summary.width, summary.height), (20, 10));
}

/// Encode a PNG and cut it off a few bytes into its first IDAT chunk, so the
/// header still reads but the pixel data does not.
fn truncated_png(width: u32, height: u32) -> Vec<u8> {
    let tile = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7) as u8, (y * 13) as u8, (x ^ y) as u8])
    });
    let mut bytes = Vec::new();
    tile.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
    let cut = idat + 4 + 8;
    assert!(cut < bytes.len());
    bytes.truncate(cut);
    bytes
}

#[test]
fn test_truncated_pixel_data_sizes_cell_then_fails() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 10, 10, RED);
    fs::write(tmp.path().join("N00E001.png"), truncated_png(32, 24)).unwrap();

    let mut statuses = Vec::new();
    let summary = MosaicBuilder::new(tmp.path())
        .build()
        .run_with(|p| statuses.push((p.filename.clone(), p.status.clone())))
        .unwrap();

    // The header pass reads 32x24, so the cell keeps its size
    assert_eq!((summary.width, summary.height), (42, 24));
    assert_eq!(summary.placed, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.missing_files.is_empty());
    assert!(matches!(
        statuses.iter().find(|(n, _)| n == "N00E001.png"),
        Some((_, CellStatus::Failed { .. }))
    ));

    let canvas = load_output(tmp.path());
    assert_eq!(*canvas.get_pixel(5, 12), RED);
    assert_eq!(*canvas.get_pixel(10, 0), PLACEHOLDER_COLOR);
    assert_eq!(*canvas.get_pixel(41, 23), PLACEHOLDER_COLOR);
}

#[cfg(unix)]
#[test]
fn test_symlinked_tile_is_placed() {
    let tiles = TempDir::new().unwrap();
    create_tile(tiles.path(), "source.png", 10, 10, BLUE);
    let tmp = TempDir::new().unwrap();
    std::os::unix::fs::symlink(
        tiles.path().join("source.png"),
        tmp.path().join("N00E000.png"),
    )
    .unwrap();

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();

    assert_eq!(summary.placed, 1);
    assert_eq!((summary.width, summary.height), (10, 10));
    assert_eq!(*load_output(tmp.path()).get_pixel(5, 5), BLUE);
}

#[test]
fn test_out_of_range_names_are_skipped() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 10, 10, RED);
    create_tile(tmp.path(), "N4000000000E000.png", 10, 10, BLUE);

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.skipped, vec!["N4000000000E000.png"]);
}

#[test]
fn test_non_canonical_names_are_looked_up_canonically() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N9E92.png", 10, 10, RED);
    create_tile(tmp.path(), "N10E092.png", 10, 10, BLUE);

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();

    // N9E92.png sized the grid but N09E092.png is what the grid looks for
    assert_eq!((summary.width, summary.height), (10, 20));
    assert_eq!(summary.missing_files, vec!["N09E092.png"]);
    let canvas = load_output(tmp.path());
    assert_eq!(*canvas.get_pixel(5, 15), PLACEHOLDER_COLOR);
}

#[test]
fn test_invalid_names_are_skipped() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 4, 4, RED);
    create_tile(tmp.path(), "vacation.png", 4, 4, BLUE);
    fs::write(tmp.path().join("N01E001.txt"), b"notes").unwrap();

    let summary = MosaicBuilder::new(tmp.path()).build().run().unwrap();
    assert_eq!(summary.skipped, vec!["vacation.png"]);
    assert_eq!((summary.rows, summary.columns), (1, 1));
}

#[test]
fn test_empty_directory_writes_no_output() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "vacation.png", 4, 4, BLUE);

    let result = MosaicBuilder::new(tmp.path()).build().run();
    match result {
        Err(GridError::EmptyInput { dir }) => assert_eq!(dir, tmp.path()),
        other => panic!("Expected EmptyInput, got {:?}", other.map(|s| s.output)),
    }
    assert!(!tmp.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn test_rerun_ignores_previous_output() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 4, 4, RED);

    let mosaic = MosaicBuilder::new(tmp.path()).build();
    let first = mosaic.run().unwrap();
    let second = mosaic.run().unwrap();

    assert!(first.skipped.is_empty());
    assert_eq!(second.skipped, vec![DEFAULT_OUTPUT]);
    assert_eq!((first.width, first.height), (second.width, second.height));
    assert_eq!(first.placed, second.placed);
}

#[test]
fn test_custom_output_and_colors() {
    let tmp = TempDir::new().unwrap();
    create_tile(tmp.path(), "N00E000.png", 4, 4, RED);
    create_tile(tmp.path(), "N01E001.png", 4, 4, RED);

    let summary = MosaicBuilder::new(tmp.path())
        .output("grid.png")
        .placeholder_color(Rgb([1, 1, 1]))
        .build()
        .run()
        .unwrap();

    assert_eq!(summary.output, tmp.path().join("grid.png"));
    let canvas = image::open(&summary.output).unwrap().to_rgb8();
    assert_eq!(*canvas.get_pixel(0, 0), Rgb([1, 1, 1]));
}
