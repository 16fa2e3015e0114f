use anyhow::{Context, Result};
use std::path::PathBuf;
use tilegrid::MosaicBuilder;

pub fn run(input_dir: PathBuf) -> Result<()> {
    if !input_dir.exists() {
        anyhow::bail!("Input directory does not exist: {}", input_dir.display());
    }

    let mosaic = MosaicBuilder::new(&input_dir).build();
    let scan = mosaic.scan().context("Failed to read input directory")?;

    if scan.is_empty() {
        println!("No valid tile files found in: {}", input_dir.display());
        return Ok(());
    }

    println!("{:<16} {:>12} {:>12}", "TILE", "SIZE", "CANONICAL");
    println!("{}", "-".repeat(42));

    let mut unreadable = 0;
    for tile in &scan.tiles {
        let size = match tile.dimensions {
            Some(dims) => dims.to_string(),
            None => {
                unreadable += 1;
                "???".to_string()
            }
        };
        println!(
            "{:<16} {:>12} {:>12}",
            tile.name,
            size,
            tile.coordinate.to_string()
        );
    }

    let layout = mosaic.layout(&scan)?;

    // Summary
    println!();
    println!("Summary:");
    println!("  Total tiles: {}", scan.tiles.len());
    if unreadable > 0 {
        println!("  Unreadable: {}", unreadable);
    }
    if !scan.skipped.is_empty() {
        println!("  Skipped (invalid name): {}", scan.skipped.len());
        for name in &scan.skipped {
            println!("    {}", name);
        }
    }
    println!(
        "  Grid: {} rows x {} columns",
        layout.row_count(),
        layout.column_count()
    );
    println!("  Input directory: {}", input_dir.display());

    Ok(())
}
