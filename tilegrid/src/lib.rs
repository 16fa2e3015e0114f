//! # tilegrid - Lat/Lon Tile Grid Assembly
//!
//! Combines raster tiles named by latitude/longitude (e.g. `N09E092.png`)
//! into one composite grid image, drawing placeholder cells where tiles are
//! missing.
//!
//! ## Features
//!
//! - **Gap-free grid**: every magnitude between the observed extremes of a
//!   hemisphere gets a row or column, even without a tile
//! - **Mixed tile sizes**: rows take the tallest tile, columns the widest,
//!   and smaller tiles are centered in their cell
//! - **Fault tolerant**: unreadable tiles become placeholders instead of
//!   aborting the run
//! - **Pluggable storage**: the pipeline runs over any [`ImageStore`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use tilegrid::MosaicBuilder;
//!
//! let summary = MosaicBuilder::new("/data/tiles").build().run()?;
//! println!("Created {} ({}x{})", summary.output.display(), summary.width, summary.height);
//! for name in &summary.missing_files {
//!     println!("missing: {}", name);
//! }
//! ```
//!
//! ## Grid Orientation
//!
//! - Rows: North tiles from high to low latitude, then South tiles from low
//!   to high latitude (North at the top)
//! - Columns: West tiles from high to low longitude, then East tiles from low
//!   to high longitude (West on the left)

pub mod compose;
pub mod error;
pub mod filename;
pub mod layout;
pub mod mosaic;
pub mod report;
pub mod sizing;
pub mod store;
pub mod tile;

// Re-export main types at crate root for convenience
pub use compose::{CellPlacement, CellStatus, Composite, CompositeOptions};
pub use error::{GridError, Result};
pub use layout::GridLayout;
pub use mosaic::{Mosaic, MosaicBuilder, MosaicSummary, TileScan, DEFAULT_OUTPUT};
pub use report::MissingReport;
pub use sizing::{SizeTable, TileDimensions};
pub use store::{FsImageStore, ImageStore, MemoryImageStore};
pub use tile::{ColumnKey, Dimensions, LatHemisphere, LonHemisphere, RowKey, TileCoordinate};
