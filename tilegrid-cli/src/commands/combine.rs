use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tilegrid::{CellStatus, MissingReport, MosaicBuilder, MosaicSummary};

pub fn run(input_dir: PathBuf, output: String, json: bool) -> Result<()> {
    if !input_dir.exists() {
        anyhow::bail!("Input directory does not exist: {}", input_dir.display());
    }

    let mosaic = MosaicBuilder::new(&input_dir).output(output).build();

    let scan = mosaic.scan().context("Failed to read input directory")?;
    if scan.is_empty() {
        // Nothing to combine: not an error, but no output is written
        println!("No valid tile files found in: {}", input_dir.display());
        for name in &scan.skipped {
            println!("  Skipping invalid filename: {}", name);
        }
        return Ok(());
    }

    if json {
        let summary = mosaic
            .run_scan(scan, |_| {})
            .context("Failed to create composite")?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Found tile files:");
    for name in &scan.skipped {
        println!("  Skipping invalid filename: {}", name);
    }
    for tile in &scan.tiles {
        match (&tile.dimensions, &tile.error) {
            (Some(dims), _) => println!("  {} ({})", tile.name, dims),
            (None, Some(err)) => println!("  {} (unreadable: {})", tile.name, err),
            (None, None) => println!("  {}", tile.name),
        }
    }

    let layout = mosaic.layout(&scan)?;
    let pb = ProgressBar::new((layout.row_count() * layout.column_count()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let summary = mosaic
        .run_scan(scan, |placement| {
            match &placement.status {
                CellStatus::Placed { x, y, .. } => {
                    pb.println(format!("  Placed {} at ({}, {})", placement.filename, x, y))
                }
                CellStatus::Missing => pb.println(format!(
                    "  Missing {}, created placeholder",
                    placement.filename
                )),
                CellStatus::Failed { reason } => pb.println(format!(
                    "  Error pasting {}: {}",
                    placement.filename, reason
                )),
            }
            pb.inc(1);
        })
        .context("Failed to create composite")?;
    pb.finish_and_clear();

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &MosaicSummary) {
    println!();
    println!(
        "Successfully created {} ({}x{})",
        summary.output.display(),
        summary.width,
        summary.height
    );
    println!(
        "Grid layout: {} rows x {} columns",
        summary.rows, summary.columns
    );
    println!(
        "Cells: {} placed, {} missing, {} unreadable",
        summary.placed, summary.missing, summary.failed
    );
    println!();

    print!("{}", MissingReport::from(summary.missing_files.clone()));
}
