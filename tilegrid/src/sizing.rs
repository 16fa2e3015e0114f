//! Row heights and column widths.
//!
//! A row is as tall as its tallest tile and a column as wide as its widest
//! tile. Only tiles whose dimensions could be read take part; a row or
//! column with no readable tile has extent 0.

use std::collections::BTreeMap;

use crate::layout::GridLayout;
use crate::tile::{ColumnKey, Dimensions, RowKey, TileCoordinate};

/// Dimensions of every tile that was read successfully.
pub type TileDimensions = BTreeMap<TileCoordinate, Dimensions>;

/// Per-row heights and per-column widths for a [`GridLayout`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeTable {
    row_heights: BTreeMap<RowKey, u32>,
    column_widths: BTreeMap<ColumnKey, u32>,
}

impl SizeTable {
    /// Compute the extent of every row and column in `layout`.
    ///
    /// Every key of the layout receives an entry, even when no tile in it
    /// was readable.
    pub fn compute(layout: &GridLayout, dimensions: &TileDimensions) -> Self {
        let row_heights = layout
            .rows()
            .iter()
            .map(|&row| {
                let height = layout
                    .columns()
                    .iter()
                    .filter_map(|&col| dimensions.get(&TileCoordinate::from_keys(row, col)))
                    .fold(0u32, |max, dims| max.max(dims.height));
                (row, height)
            })
            .collect();

        let column_widths = layout
            .columns()
            .iter()
            .map(|&col| {
                let width = layout
                    .rows()
                    .iter()
                    .filter_map(|&row| dimensions.get(&TileCoordinate::from_keys(row, col)))
                    .fold(0u32, |max, dims| max.max(dims.width));
                (col, width)
            })
            .collect();

        Self {
            row_heights,
            column_widths,
        }
    }

    /// Height of a row, 0 for rows without readable tiles or unknown keys.
    pub fn row_height(&self, row: RowKey) -> u32 {
        self.row_heights.get(&row).copied().unwrap_or(0)
    }

    /// Width of a column, 0 for columns without readable tiles or unknown keys.
    pub fn column_width(&self, column: ColumnKey) -> u32 {
        self.column_widths.get(&column).copied().unwrap_or(0)
    }

    /// Total canvas width: the sum of all column widths.
    pub fn total_width(&self) -> u32 {
        self.column_widths.values().sum()
    }

    /// Total canvas height: the sum of all row heights.
    pub fn total_height(&self) -> u32 {
        self.row_heights.values().sum()
    }

    /// Canvas dimensions for this table.
    pub fn canvas_dimensions(&self) -> Dimensions {
        Dimensions::new(self.total_width(), self.total_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::parse_tile_filename;
    use crate::tile::{LatHemisphere, LonHemisphere};

    fn dims(entries: &[(&str, u32, u32)]) -> TileDimensions {
        entries
            .iter()
            .map(|&(name, w, h)| (parse_tile_filename(name).unwrap(), Dimensions::new(w, h)))
            .collect()
    }

    #[test]
    fn test_row_and_column_maxima() {
        let dimensions = dims(&[
            ("N09E092.png", 100, 50),
            ("N09E093.png", 80, 50),
            ("N10E092.png", 100, 60),
        ]);
        let coords: Vec<_> = dimensions.keys().copied().collect();
        let layout = GridLayout::from_coordinates(&coords).unwrap();
        let sizes = SizeTable::compute(&layout, &dimensions);

        assert_eq!(sizes.row_height(RowKey::new(10, LatHemisphere::North)), 60);
        assert_eq!(sizes.row_height(RowKey::new(9, LatHemisphere::North)), 50);
        assert_eq!(sizes.column_width(ColumnKey::new(92, LonHemisphere::East)), 100);
        assert_eq!(sizes.column_width(ColumnKey::new(93, LonHemisphere::East)), 80);
        assert_eq!(sizes.canvas_dimensions(), Dimensions::new(180, 110));
    }

    #[test]
    fn test_unreadable_tiles_contribute_nothing() {
        // N10E003 parsed but unreadable; N09 and E002 are gaps
        let coords: Vec<_> = ["N08E001.png", "N10E001.png", "N10E003.png"]
            .iter()
            .map(|n| parse_tile_filename(n).unwrap())
            .collect();
        let layout = GridLayout::from_coordinates(&coords).unwrap();
        let dimensions = dims(&[("N08E001.png", 30, 20), ("N10E001.png", 40, 10)]);
        let sizes = SizeTable::compute(&layout, &dimensions);

        assert_eq!(sizes.row_height(RowKey::new(9, LatHemisphere::North)), 0);
        assert_eq!(sizes.row_height(RowKey::new(10, LatHemisphere::North)), 10);
        assert_eq!(sizes.column_width(ColumnKey::new(2, LonHemisphere::East)), 0);
        assert_eq!(sizes.column_width(ColumnKey::new(3, LonHemisphere::East)), 0);
        assert_eq!(sizes.column_width(ColumnKey::new(1, LonHemisphere::East)), 40);
        assert_eq!(sizes.total_width(), 40);
        assert_eq!(sizes.total_height(), 30);
    }

    #[test]
    fn test_all_unreadable_gives_empty_canvas() {
        let coords = vec![parse_tile_filename("S01W001.png").unwrap()];
        let layout = GridLayout::from_coordinates(&coords).unwrap();
        let sizes = SizeTable::compute(&layout, &TileDimensions::new());
        assert_eq!(sizes.canvas_dimensions(), Dimensions::new(0, 0));
    }
}
