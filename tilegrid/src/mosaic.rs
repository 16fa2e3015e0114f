//! End-to-end tile grid assembly.
//!
//! [`Mosaic`] runs the whole pipeline over an [`ImageStore`]:
//!
//! 1. list candidate files and parse their names, skipping invalid ones
//! 2. read the dimensions of every valid tile
//! 3. derive the [`GridLayout`] and [`SizeTable`]
//! 4. compose and save the canvas
//! 5. report grid cells without a file
//!
//! ```ignore
//! use tilegrid::MosaicBuilder;
//!
//! let mosaic = MosaicBuilder::new("/data/tiles")
//!     .output("combined_grid.png")
//!     .build();
//!
//! let summary = mosaic.run()?;
//! println!("{}x{}", summary.width, summary.height);
//! ```

use std::path::{Path, PathBuf};

use image::Rgb;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::compose::{compose, CellPlacement, Composite, CompositeOptions};
use crate::error::{GridError, Result};
use crate::filename::parse_tile_filename;
use crate::layout::GridLayout;
use crate::report::MissingReport;
use crate::sizing::{SizeTable, TileDimensions};
use crate::store::{FsImageStore, ImageStore};
use crate::tile::{Dimensions, TileCoordinate};

/// Default name of the composite image.
pub const DEFAULT_OUTPUT: &str = "combined_grid.png";

/// A tile found while scanning the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedTile {
    /// Filename as listed (not necessarily canonical).
    pub name: String,
    pub coordinate: TileCoordinate,
    /// `None` if the header could not be read.
    pub dimensions: Option<Dimensions>,
    /// Why the header could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of scanning a store: valid tiles and skipped filenames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TileScan {
    pub tiles: Vec<ScannedTile>,
    /// Listed `.png` files whose names are not tile coordinates.
    pub skipped: Vec<String>,
}

impl TileScan {
    /// Coordinates of every validly named tile, readable or not.
    pub fn coordinates(&self) -> Vec<TileCoordinate> {
        self.tiles.iter().map(|t| t.coordinate).collect()
    }

    /// Dimensions of the tiles whose header could be read.
    pub fn dimensions(&self) -> TileDimensions {
        self.tiles
            .iter()
            .filter_map(|t| t.dimensions.map(|d| (t.coordinate, d)))
            .collect()
    }

    /// Whether no validly named tile was found.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MosaicSummary {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub columns: usize,
    pub placed: usize,
    pub missing: usize,
    pub failed: usize,
    pub skipped: Vec<String>,
    pub missing_files: Vec<String>,
}

/// Assembles the tiles of one store into a single grid image.
pub struct Mosaic<S: ImageStore = FsImageStore> {
    store: S,
    output: String,
    options: CompositeOptions,
}

impl<S: ImageStore> Mosaic<S> {
    /// Create a mosaic over any store, with default colors and output name.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            output: DEFAULT_OUTPUT.to_string(),
            options: CompositeOptions::default(),
        }
    }

    /// Set the output filename, relative to the store root unless absolute.
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Replace the canvas colors.
    pub fn options(mut self, options: CompositeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn output_name(&self) -> &str {
        &self.output
    }

    /// List the store, parse every name and read tile dimensions.
    ///
    /// Invalid names are collected in [`TileScan::skipped`]; unreadable
    /// tiles are kept with `dimensions: None`. Neither is an error.
    pub fn scan(&self) -> Result<TileScan> {
        let mut scan = TileScan::default();

        for name in self.store.list()? {
            if name == self.output {
                debug!(file = %name, "Skipping previous output");
                scan.skipped.push(name);
                continue;
            }

            let coordinate = match parse_tile_filename(&name) {
                Ok(coordinate) => coordinate,
                Err(e) => {
                    warn!(file = %name, error = %e, "Skipping invalid filename");
                    scan.skipped.push(name);
                    continue;
                }
            };

            let (dimensions, error) = match self.store.dimensions(&name) {
                Ok(dims) => {
                    debug!(file = %name, width = dims.width, height = dims.height, "Loaded tile");
                    (Some(dims), None)
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "Error reading tile");
                    (None, Some(e.to_string()))
                }
            };

            scan.tiles.push(ScannedTile {
                name,
                coordinate,
                dimensions,
                error,
            });
        }

        Ok(scan)
    }

    /// Derive the grid layout for a scan.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyInput`] if the scan holds no valid tile.
    pub fn layout(&self, scan: &TileScan) -> Result<GridLayout> {
        GridLayout::from_coordinates(&scan.coordinates()).map_err(|e| match e {
            GridError::EmptyInput { .. } => GridError::EmptyInput {
                dir: self.store.root().to_path_buf(),
            },
            other => other,
        })
    }

    /// Build the canvas for a scan without saving it.
    pub fn compose<F>(&self, scan: &TileScan, on_cell: F) -> Result<(GridLayout, Composite)>
    where
        F: FnMut(&CellPlacement),
    {
        let layout = self.layout(scan)?;
        let sizes = SizeTable::compute(&layout, &scan.dimensions());
        info!(
            rows = layout.row_count(),
            columns = layout.column_count(),
            width = sizes.total_width(),
            height = sizes.total_height(),
            "Composing grid"
        );
        let composite = compose(&layout, &sizes, &self.store, &self.options, on_cell);
        Ok((layout, composite))
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyInput`] before any canvas is created if no
    /// valid tile was found, or an I/O / encode error if listing the store
    /// or writing the output fails. Per-tile failures never abort the run.
    pub fn run(&self) -> Result<MosaicSummary> {
        self.run_with(|_| {})
    }

    /// Run the full pipeline, calling `on_cell` after each cell is drawn.
    pub fn run_with<F>(&self, on_cell: F) -> Result<MosaicSummary>
    where
        F: FnMut(&CellPlacement),
    {
        let scan = self.scan()?;
        self.run_scan(scan, on_cell)
    }

    /// Compose, save and report from a scan obtained with [`Self::scan`].
    pub fn run_scan<F>(&self, scan: TileScan, on_cell: F) -> Result<MosaicSummary>
    where
        F: FnMut(&CellPlacement),
    {
        let (layout, composite) = self.compose(&scan, on_cell)?;

        let output = self.store.save(&self.output, &composite.canvas)?;
        info!(
            output = %output.display(),
            width = composite.canvas.width(),
            height = composite.canvas.height(),
            "Saved composite"
        );

        let report = MissingReport::build(&layout, &self.store);

        Ok(MosaicSummary {
            output,
            width: composite.canvas.width(),
            height: composite.canvas.height(),
            rows: layout.row_count(),
            columns: layout.column_count(),
            placed: composite.placed_count(),
            missing: composite.missing_count(),
            failed: composite.failed_count(),
            skipped: scan.skipped,
            missing_files: report.into_inner(),
        })
    }

    /// Report missing cells without composing anything.
    pub fn missing_report(&self) -> Result<(GridLayout, MissingReport)> {
        let scan = self.scan()?;
        let layout = self.layout(&scan)?;
        let report = MissingReport::build(&layout, &self.store);
        Ok((layout, report))
    }
}

/// Builder for a directory-backed [`Mosaic`].
///
/// # Example
///
/// ```ignore
/// use image::Rgb;
/// use tilegrid::MosaicBuilder;
///
/// let mosaic = MosaicBuilder::new("/data/tiles")
///     .output("grid.png")
///     .placeholder_color(Rgb([128, 128, 128]))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MosaicBuilder {
    input_dir: PathBuf,
    output: String,
    options: CompositeOptions,
}

impl MosaicBuilder {
    /// Create a new builder for the tiles in `input_dir`.
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output: DEFAULT_OUTPUT.to_string(),
            options: CompositeOptions::default(),
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TILEGRID_INPUT_DIR` | Directory containing tile images | Required |
    /// | `TILEGRID_OUTPUT` | Output filename | `combined_grid.png` |
    ///
    /// # Errors
    ///
    /// Returns an error if `TILEGRID_INPUT_DIR` is not set.
    pub fn from_env() -> Result<Self> {
        let input_dir = std::env::var("TILEGRID_INPUT_DIR").map_err(|_| {
            GridError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "TILEGRID_INPUT_DIR environment variable not set",
            ))
        })?;

        let mut builder = Self::new(input_dir);
        if let Ok(output) = std::env::var("TILEGRID_OUTPUT") {
            builder = builder.output(output);
        }
        Ok(builder)
    }

    /// Set the output filename (default: `combined_grid.png`).
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the color of cells without a usable tile.
    pub fn placeholder_color(mut self, color: Rgb<u8>) -> Self {
        self.options.placeholder = color;
        self
    }

    /// Set the canvas background color.
    pub fn background_color(mut self, color: Rgb<u8>) -> Self {
        self.options.background = color;
        self
    }

    pub fn build(self) -> Mosaic<FsImageStore> {
        Mosaic::with_store(FsImageStore::new(&self.input_dir))
            .output(self.output)
            .options(self.options)
    }
}
