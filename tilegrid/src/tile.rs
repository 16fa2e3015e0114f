//! Tile coordinates and grid keys.
//!
//! A tile is identified by two hemisphere letters and two non-negative
//! magnitudes, e.g. `N09E092` is 9° North, 92° East. Rows of the grid are
//! keyed by the latitude half of the coordinate, columns by the longitude
//! half.

use std::fmt;

use serde::Serialize;

/// Largest latitude magnitude a tile may have, in degrees.
pub const MAX_LATITUDE: u32 = 90;

/// Largest longitude magnitude a tile may have, in degrees.
pub const MAX_LONGITUDE: u32 = 180;

/// Latitude hemisphere of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LatHemisphere {
    /// Northern hemisphere (`N`)
    North,
    /// Southern hemisphere (`S`)
    South,
}

impl LatHemisphere {
    /// Returns the single-letter prefix used in filenames.
    pub fn letter(&self) -> char {
        match self {
            LatHemisphere::North => 'N',
            LatHemisphere::South => 'S',
        }
    }

    /// Parse a hemisphere letter, ignoring case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'N' | 'n' => Some(LatHemisphere::North),
            'S' | 's' => Some(LatHemisphere::South),
            _ => None,
        }
    }
}

/// Longitude hemisphere of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LonHemisphere {
    /// Eastern hemisphere (`E`)
    East,
    /// Western hemisphere (`W`)
    West,
}

impl LonHemisphere {
    /// Returns the single-letter prefix used in filenames.
    pub fn letter(&self) -> char {
        match self {
            LonHemisphere::East => 'E',
            LonHemisphere::West => 'W',
        }
    }

    /// Parse a hemisphere letter, ignoring case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'E' | 'e' => Some(LonHemisphere::East),
            'W' | 'w' => Some(LonHemisphere::West),
            _ => None,
        }
    }
}

impl fmt::Display for LatHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Display for LonHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Key of one grid row: a latitude magnitude within a hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowKey {
    pub magnitude: u32,
    pub hemisphere: LatHemisphere,
}

impl RowKey {
    pub fn new(magnitude: u32, hemisphere: LatHemisphere) -> Self {
        Self {
            magnitude,
            hemisphere,
        }
    }
}

/// Key of one grid column: a longitude magnitude within a hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnKey {
    pub magnitude: u32,
    pub hemisphere: LonHemisphere,
}

impl ColumnKey {
    pub fn new(magnitude: u32, hemisphere: LonHemisphere) -> Self {
        Self {
            magnitude,
            hemisphere,
        }
    }
}

/// Coordinate of a single tile, derived once from its filename.
///
/// # Example
///
/// ```
/// use tilegrid::{LatHemisphere, LonHemisphere, TileCoordinate};
///
/// let coord = TileCoordinate::new(LatHemisphere::North, 9, LonHemisphere::East, 92);
/// assert_eq!(coord.filename(), "N09E092.png");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TileCoordinate {
    pub lat_hemisphere: LatHemisphere,
    pub lat_magnitude: u32,
    pub lon_hemisphere: LonHemisphere,
    pub lon_magnitude: u32,
}

impl TileCoordinate {
    pub fn new(
        lat_hemisphere: LatHemisphere,
        lat_magnitude: u32,
        lon_hemisphere: LonHemisphere,
        lon_magnitude: u32,
    ) -> Self {
        Self {
            lat_hemisphere,
            lat_magnitude,
            lon_hemisphere,
            lon_magnitude,
        }
    }

    /// Whether both magnitudes are within [`MAX_LATITUDE`] and [`MAX_LONGITUDE`].
    ///
    /// This bounds a grid to at most 182 rows and 362 columns.
    pub fn is_in_range(&self) -> bool {
        self.lat_magnitude <= MAX_LATITUDE && self.lon_magnitude <= MAX_LONGITUDE
    }

    /// Build the coordinate of the cell at the intersection of a row and a column.
    pub fn from_keys(row: RowKey, column: ColumnKey) -> Self {
        Self::new(
            row.hemisphere,
            row.magnitude,
            column.hemisphere,
            column.magnitude,
        )
    }

    /// The row this tile belongs to.
    pub fn row(&self) -> RowKey {
        RowKey::new(self.lat_magnitude, self.lat_hemisphere)
    }

    /// The column this tile belongs to.
    pub fn column(&self) -> ColumnKey {
        ColumnKey::new(self.lon_magnitude, self.lon_hemisphere)
    }

    /// Canonical filename, zero-padded to 2 latitude and 3 longitude digits.
    pub fn filename(&self) -> String {
        format!("{}.png", self)
    }
}

impl fmt::Display for TileCoordinate {
    /// Formats the canonical stem, e.g. `N09E092`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{}{:03}",
            self.lat_hemisphere, self.lat_magnitude, self.lon_hemisphere, self.lon_magnitude
        )
    }
}

/// Pixel dimensions of a decoded tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
