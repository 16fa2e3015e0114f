use anyhow::{Context, Result};
use std::path::PathBuf;
use tilegrid::{GridError, MosaicBuilder};

pub fn run(input_dir: PathBuf, all: bool) -> Result<()> {
    let mosaic = MosaicBuilder::new(&input_dir).build();

    let (layout, report) = match mosaic.missing_report() {
        Ok(result) => result,
        Err(GridError::EmptyInput { dir }) => {
            println!("No valid tile files found in: {}", dir.display());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read input directory"),
    };

    println!(
        "Grid layout: {} rows x {} columns ({} cells)",
        layout.row_count(),
        layout.column_count(),
        layout.row_count() * layout.column_count()
    );
    println!();

    if all && !report.is_empty() {
        println!("Missing PNG files in grid:");
        for name in report.missing() {
            println!("  {}", name);
        }
    } else {
        print!("{}", report);
    }

    Ok(())
}
