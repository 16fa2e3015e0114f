//! Error types for the tilegrid library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a tile grid.
#[derive(Error, Debug)]
pub enum GridError {
    /// IO error when listing, reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The filename does not follow the `{N|S}{lat}{E|W}{lon}.png` convention.
    #[error("Invalid tile filename: {name} (expected e.g. N09E092.png)")]
    InvalidFormat { name: String },

    /// The tile file exists but its image data could not be read.
    #[error("Failed to decode tile {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// The requested tile is not present in the store.
    #[error("Tile not found: {path}")]
    TileNotFound { path: PathBuf },

    /// No valid tile coordinates were found, so there is no grid to build.
    #[error("No valid tile files found in: {dir}")]
    EmptyInput { dir: PathBuf },

    /// The composite image could not be encoded or written.
    #[error("Failed to write composite {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;
