//! Grid layout derivation.
//!
//! Observed coordinates are bucketed by hemisphere (N, S, E, W). Each bucket
//! contributes the inclusive range between its smallest and largest
//! magnitude, so a gap in the input still produces a row or column. Rows run
//! North to South (North block descending, then South block ascending) and
//! columns run West to East (West block descending, then East block
//! ascending), matching how the canvas is read top-left to bottom-right.
//!
//! Coordinates must be within 90° latitude and 180° longitude, which keeps
//! a layout to at most 182 rows by 362 columns.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::{GridError, Result};
use crate::tile::{ColumnKey, LatHemisphere, LonHemisphere, RowKey, TileCoordinate};

/// Ordered rows and columns of the composite grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    rows: Vec<RowKey>,
    columns: Vec<ColumnKey>,
}

/// Running min/max of the magnitudes seen in one hemisphere bucket.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket(Option<(u32, u32)>);

impl Bucket {
    fn observe(&mut self, magnitude: u32) {
        self.0 = Some(match self.0 {
            Some((min, max)) => (min.min(magnitude), max.max(magnitude)),
            None => (magnitude, magnitude),
        });
    }

    /// Inclusive range from min to max, or `None` if nothing was observed.
    fn range(&self) -> Option<RangeInclusive<u32>> {
        self.0.map(|(min, max)| min..=max)
    }

    fn descending(&self) -> impl Iterator<Item = u32> {
        self.range().into_iter().flat_map(|r| r.rev())
    }

    fn ascending(&self) -> impl Iterator<Item = u32> {
        self.range().into_iter().flatten()
    }
}

impl GridLayout {
    /// Derive the gap-free layout covering every observed coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyInput`] if `coords` is empty, or
    /// [`GridError::InvalidFormat`] if a coordinate is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use tilegrid::{filename::parse_tile_filename, GridLayout};
    ///
    /// let coords = ["N07E001.png", "N10E001.png"]
    ///     .iter()
    ///     .map(|n| parse_tile_filename(n).unwrap())
    ///     .collect::<Vec<_>>();
    /// let layout = GridLayout::from_coordinates(&coords).unwrap();
    /// assert_eq!(layout.row_count(), 4); // 10, 9, 8, 7
    /// ```
    pub fn from_coordinates(coords: &[TileCoordinate]) -> Result<Self> {
        if coords.is_empty() {
            return Err(GridError::EmptyInput {
                dir: PathBuf::new(),
            });
        }

        if let Some(coord) = coords.iter().find(|c| !c.is_in_range()) {
            return Err(GridError::InvalidFormat {
                name: coord.filename(),
            });
        }

        let (mut north, mut south) = (Bucket::default(), Bucket::default());
        let (mut east, mut west) = (Bucket::default(), Bucket::default());

        for coord in coords {
            match coord.lat_hemisphere {
                LatHemisphere::North => north.observe(coord.lat_magnitude),
                LatHemisphere::South => south.observe(coord.lat_magnitude),
            }
            match coord.lon_hemisphere {
                LonHemisphere::East => east.observe(coord.lon_magnitude),
                LonHemisphere::West => west.observe(coord.lon_magnitude),
            }
        }

        let rows = north
            .descending()
            .map(|m| RowKey::new(m, LatHemisphere::North))
            .chain(
                south
                    .ascending()
                    .map(|m| RowKey::new(m, LatHemisphere::South)),
            )
            .collect();

        let columns = west
            .descending()
            .map(|m| ColumnKey::new(m, LonHemisphere::West))
            .chain(
                east.ascending()
                    .map(|m| ColumnKey::new(m, LonHemisphere::East)),
            )
            .collect();

        Ok(Self { rows, columns })
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> &[RowKey] {
        &self.rows
    }

    /// Columns in left-to-right order.
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = TileCoordinate> + '_ {
        self.rows.iter().flat_map(move |&row| {
            self.columns
                .iter()
                .map(move |&column| TileCoordinate::from_keys(row, column))
        })
    }
}
