//! Canvas composition.
//!
//! Rows are walked top to bottom with a running Y offset and, within each
//! row, columns left to right with a running X offset that restarts at 0.
//! Every cell is either filled with its tile, centered, or with a solid
//! placeholder when the tile is missing or cannot be decoded.

use image::{Rgb, RgbImage};
use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::GridLayout;
use crate::sizing::SizeTable;
use crate::store::ImageStore;
use crate::tile::{Dimensions, TileCoordinate};

/// Canvas background (R=255, G=255, B=255)
pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Neutral gray for cells without a usable tile (R=200, G=200, B=200)
pub const PLACEHOLDER_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

/// Colors used when building the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    pub background: Rgb<u8>,
    pub placeholder: Rgb<u8>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            placeholder: PLACEHOLDER_COLOR,
        }
    }
}

/// Pixel rectangle of one grid cell on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// What ended up in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CellStatus {
    /// The tile was pasted with its top-left corner at `(x, y)`.
    Placed { x: u32, y: u32, dimensions: Dimensions },
    /// No file for this cell; placeholder drawn.
    Missing,
    /// The file exists but could not be decoded; placeholder drawn.
    Failed { reason: String },
}

/// Outcome for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellPlacement {
    pub coordinate: TileCoordinate,
    pub filename: String,
    pub cell: CellRect,
    pub status: CellStatus,
}

impl CellPlacement {
    pub fn is_placeholder(&self) -> bool {
        !matches!(self.status, CellStatus::Placed { .. })
    }
}

/// The finished canvas and what was placed in each cell, in row-major order.
#[derive(Debug, Clone)]
pub struct Composite {
    pub canvas: RgbImage,
    pub placements: Vec<CellPlacement>,
}

impl Composite {
    pub fn placed_count(&self) -> usize {
        self.count(|s| matches!(s, CellStatus::Placed { .. }))
    }

    pub fn missing_count(&self) -> usize {
        self.count(|s| matches!(s, CellStatus::Missing))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, CellStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&CellStatus) -> bool) -> usize {
        self.placements.iter().filter(|p| pred(&p.status)).count()
    }
}

/// Offset that centers an extent of `inner` within `outer`, 0 if it does not fit.
///
/// # Examples
///
/// ```
/// use tilegrid::compose::center_offset;
///
/// assert_eq!(center_offset(100, 80), 10);
/// assert_eq!(center_offset(61, 50), 5);
/// assert_eq!(center_offset(0, 10), 0);
/// ```
pub fn center_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Build the composite canvas.
///
/// The canvas is exactly `sizes.total_width()` × `sizes.total_height()`.
/// `on_cell` is called once per cell, in row-major order, after the cell has
/// been drawn.
pub fn compose<S, F>(
    layout: &GridLayout,
    sizes: &SizeTable,
    store: &S,
    options: &CompositeOptions,
    mut on_cell: F,
) -> Composite
where
    S: ImageStore + ?Sized,
    F: FnMut(&CellPlacement),
{
    let mut canvas = RgbImage::from_pixel(
        sizes.total_width(),
        sizes.total_height(),
        options.background,
    );
    let mut placements = Vec::with_capacity(layout.row_count() * layout.column_count());

    let mut y = 0;
    for &row in layout.rows() {
        let row_height = sizes.row_height(row);
        let mut x = 0;

        for &column in layout.columns() {
            let column_width = sizes.column_width(column);
            let coordinate = TileCoordinate::from_keys(row, column);
            let filename = coordinate.filename();
            let cell = CellRect {
                x,
                y,
                width: column_width,
                height: row_height,
            };

            let status = if store.exists(&filename) {
                match store.load(&filename) {
                    Ok(tile) => {
                        let origin_x = x + center_offset(column_width, tile.width());
                        let origin_y = y + center_offset(row_height, tile.height());
                        paste_tile(&mut canvas, &tile, cell, origin_x, origin_y);
                        debug!(
                            tile = %filename,
                            x = origin_x,
                            y = origin_y,
                            "Placed tile"
                        );
                        CellStatus::Placed {
                            x: origin_x,
                            y: origin_y,
                            dimensions: Dimensions::new(tile.width(), tile.height()),
                        }
                    }
                    Err(e) => {
                        warn!(
                            tile = %filename,
                            error = %e,
                            "Failed to paste tile, using placeholder"
                        );
                        fill_cell(&mut canvas, cell, options.placeholder);
                        CellStatus::Failed {
                            reason: e.to_string(),
                        }
                    }
                }
            } else {
                debug!(tile = %filename, "Missing tile, using placeholder");
                fill_cell(&mut canvas, cell, options.placeholder);
                CellStatus::Missing
            };

            let placement = CellPlacement {
                coordinate,
                filename,
                cell,
                status,
            };
            on_cell(&placement);
            placements.push(placement);

            x += column_width;
        }

        y += row_height;
    }

    Composite { canvas, placements }
}

/// Copies `tile` onto the canvas at `(origin_x, origin_y)`.
///
/// Pixels falling outside `cell` are dropped, so a tile never spills into a
/// neighbouring cell.
fn paste_tile(canvas: &mut RgbImage, tile: &RgbImage, cell: CellRect, origin_x: u32, origin_y: u32) {
    let max_x = cell.x + cell.width;
    let max_y = cell.y + cell.height;
    let width = tile.width().min(max_x.saturating_sub(origin_x));
    let height = tile.height().min(max_y.saturating_sub(origin_y));

    for ty in 0..height {
        for tx in 0..width {
            canvas.put_pixel(origin_x + tx, origin_y + ty, *tile.get_pixel(tx, ty));
        }
    }
}

/// Fills a cell rectangle with a solid color.
fn fill_cell(canvas: &mut RgbImage, cell: CellRect, color: Rgb<u8>) {
    for y in cell.y..cell.y + cell.height {
        for x in cell.x..cell.x + cell.width {
            canvas.put_pixel(x, y, color);
        }
    }
}
