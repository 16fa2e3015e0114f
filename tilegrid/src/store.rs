//! Tile image storage.
//!
//! The compositor never touches the filesystem directly. It goes through an
//! [`ImageStore`], which lists candidate tiles, probes them, decodes them and
//! persists the final canvas. [`FsImageStore`] is backed by a directory;
//! [`MemoryImageStore`] keeps encoded tiles in memory.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbImage};
use memmap2::Mmap;

use crate::error::{GridError, Result};
use crate::filename::is_tile_image;
use crate::tile::Dimensions;

/// Capability to list, read and write tile images by filename.
pub trait ImageStore {
    /// Location shown in diagnostics (the directory for filesystem stores).
    fn root(&self) -> &Path;

    /// Names of all candidate tile images (`.png`, any case), sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Whether a file with this name exists, regardless of whether it decodes.
    fn exists(&self, name: &str) -> bool;

    /// Read the pixel dimensions of a tile without decoding its pixels.
    fn dimensions(&self, name: &str) -> Result<Dimensions>;

    /// Decode a tile into an RGB buffer.
    fn load(&self, name: &str) -> Result<RgbImage>;

    /// Encode `image` as PNG under `name`, returning where it was written.
    fn save(&self, name: &str, image: &RgbImage) -> Result<PathBuf>;
}

/// Tile store backed by a directory on disk.
///
/// Tiles are memory-mapped and decoded from the mapping; each mapping is
/// dropped as soon as the call returns.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn map(&self, name: &str) -> Result<Mmap> {
        let path = self.path(name);
        if !path.is_file() {
            return Err(GridError::TileNotFound { path });
        }

        let file = File::open(&path)?;
        if file.metadata()?.len() == 0 {
            return Err(GridError::Decode {
                name: name.to_string(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "empty file",
                )),
            });
        }

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. The file is opened read-only and the mapping never
        // outlives the call that created it.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(mmap)
    }
}

impl ImageStore for FsImageStore {
    fn root(&self) -> &Path {
        &self.dir
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            // Follows symlinks, like `exists`
            .filter(|entry| entry.path().is_file())
            // Non-UTF-8 names are kept lossily so they surface as invalid names
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| is_tile_image(name))
            .collect();

        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn dimensions(&self, name: &str) -> Result<Dimensions> {
        let mmap = self.map(name)?;
        probe_dimensions(name, &mmap)
    }

    fn load(&self, name: &str) -> Result<RgbImage> {
        let mmap = self.map(name)?;
        decode(name, &mmap)
    }

    fn save(&self, name: &str, image: &RgbImage) -> Result<PathBuf> {
        let path = self.path(name);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| GridError::Encode {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// In-memory tile store holding encoded tile bytes.
///
/// Bytes are kept as written, so corrupt data behaves exactly as a corrupt
/// file on disk would. Saved canvases are kept decoded.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    files: BTreeMap<String, Vec<u8>>,
    saved: RefCell<BTreeMap<String, RgbImage>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw file contents under `name`.
    pub fn insert_bytes(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }

    /// Encode `image` as PNG and store it under `name`.
    pub fn insert_image(&mut self, name: impl Into<String>, image: &RgbImage) -> Result<()> {
        let name = name.into();
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|source| GridError::Encode {
                path: PathBuf::from(&name),
                source,
            })?;
        self.files.insert(name, bytes);
        Ok(())
    }

    /// Remove a stored file, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    /// A canvas previously written with [`ImageStore::save`].
    pub fn saved(&self, name: &str) -> Option<RgbImage> {
        self.saved.borrow().get(name).cloned()
    }

    fn bytes(&self, name: &str) -> Result<&[u8]> {
        self.files
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| GridError::TileNotFound {
                path: PathBuf::from(name),
            })
    }
}

impl ImageStore for MemoryImageStore {
    fn root(&self) -> &Path {
        Path::new("<memory>")
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self
            .files
            .keys()
            .filter(|name| is_tile_image(name.as_str()))
            .cloned()
            .collect())
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn dimensions(&self, name: &str) -> Result<Dimensions> {
        probe_dimensions(name, self.bytes(name)?)
    }

    fn load(&self, name: &str) -> Result<RgbImage> {
        decode(name, self.bytes(name)?)
    }

    fn save(&self, name: &str, image: &RgbImage) -> Result<PathBuf> {
        self.saved
            .borrow_mut()
            .insert(name.to_string(), image.clone());
        Ok(PathBuf::from(name))
    }
}

/// Read only the image header to get its dimensions.
fn probe_dimensions(name: &str, bytes: &[u8]) -> Result<Dimensions> {
    let decode_err = |source| GridError::Decode {
        name: name.to_string(),
        source,
    };

    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(decode_err)?;

    Ok(Dimensions::new(width, height))
}

/// Fully decode an image, converting it to 8-bit RGB.
fn decode(name: &str, bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(|source| GridError::Decode {
        name: name.to_string(),
        source,
    })?;
    Ok(img.to_rgb8())
}
