//! Tile filename utilities.
//!
//! This module converts between tile filenames and [`TileCoordinate`]s.
//!
//! # Filename Format
//!
//! Tiles follow the naming convention: `{N|S}{lat}{E|W}{lon}.png`
//!
//! - Hemisphere letters and the extension are case-insensitive
//! - Magnitudes may have any number of digits on input (`N9E92.png` is valid)
//! - Latitude must not exceed 90 and longitude must not exceed 180
//! - The canonical form used for lookups pads latitude to 2 digits and
//!   longitude to 3 digits (e.g., `N09E092.png`)

use std::path::Path;

use crate::error::{GridError, Result};
use crate::tile::{LatHemisphere, LonHemisphere, TileCoordinate};

/// Extension of tile images, compared without regard to case.
pub const TILE_EXTENSION: &str = "png";

/// Returns `true` if the filename has a `.png` extension (any case).
///
/// This is the listing filter; it says nothing about whether the name is a
/// valid tile coordinate.
///
/// # Examples
///
/// ```
/// use tilegrid::filename::is_tile_image;
///
/// assert!(is_tile_image("N09E092.png"));
/// assert!(is_tile_image("notes.PNG"));
/// assert!(!is_tile_image("N09E092.hgt"));
/// ```
pub fn is_tile_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(TILE_EXTENSION))
        .unwrap_or(false)
}

/// Parse a tile filename into its coordinate.
///
/// # Arguments
///
/// * `filename` - The filename, optionally with a leading path
///
/// # Errors
///
/// Returns [`GridError::InvalidFormat`] if the name does not match
/// `{N|S}<digits>{E|W}<digits>.png`, or if latitude exceeds 90 or longitude
/// exceeds 180.
///
/// # Examples
///
/// ```
/// use tilegrid::filename::parse_tile_filename;
///
/// let coord = parse_tile_filename("N09E092.png").unwrap();
/// assert_eq!(coord.lat_magnitude, 9);
/// assert_eq!(coord.lon_magnitude, 92);
/// assert!(parse_tile_filename("combined_grid.png").is_err());
/// ```
pub fn parse_tile_filename(filename: &str) -> Result<TileCoordinate> {
    let invalid = || GridError::InvalidFormat {
        name: filename.to_string(),
    };

    // Extract just the filename if a path is given
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    let stem = strip_tile_extension(name).ok_or_else(invalid)?;

    let mut chars = stem.chars();
    let lat_hemisphere = chars
        .next()
        .and_then(LatHemisphere::from_letter)
        .ok_or_else(invalid)?;
    let rest = chars.as_str();

    let (lat_digits, rest) = split_leading_digits(rest);
    let lat_magnitude = parse_magnitude(lat_digits).ok_or_else(invalid)?;

    let mut chars = rest.chars();
    let lon_hemisphere = chars
        .next()
        .and_then(LonHemisphere::from_letter)
        .ok_or_else(invalid)?;
    let lon_digits = chars.as_str();

    if !lon_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let lon_magnitude = parse_magnitude(lon_digits).ok_or_else(invalid)?;

    let coord = TileCoordinate::new(lat_hemisphere, lat_magnitude, lon_hemisphere, lon_magnitude);
    if !coord.is_in_range() {
        return Err(invalid());
    }
    Ok(coord)
}

/// Strip a trailing `.png` (any case), returning `None` if it is absent.
fn strip_tile_extension(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(TILE_EXTENSION.len() + 1)?;
    let (stem, ext) = (name.get(..split)?, name.get(split..)?);
    let ext = ext.strip_prefix('.')?;
    ext.eq_ignore_ascii_case(TILE_EXTENSION).then_some(stem)
}

fn split_leading_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

fn parse_magnitude(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
