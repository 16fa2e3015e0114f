//! Missing-tile report.
//!
//! The report checks file existence only. A tile that exists but cannot be
//! decoded gets a placeholder on the canvas without appearing here.

use std::fmt;

use crate::layout::GridLayout;
use crate::store::ImageStore;

/// Number of missing filenames shown by [`MissingReport`]'s `Display`.
pub const DISPLAY_LIMIT: usize = 20;

/// Canonical filenames of grid cells with no file, sorted lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingReport {
    missing: Vec<String>,
}

impl MissingReport {
    /// Check every cell of `layout` against `store`.
    pub fn build<S: ImageStore + ?Sized>(layout: &GridLayout, store: &S) -> Self {
        let mut missing: Vec<String> = layout
            .cells()
            .map(|coord| coord.filename())
            .filter(|name| !store.exists(name))
            .collect();
        missing.sort();
        Self { missing }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len()
    }

    /// All missing filenames.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// The first [`DISPLAY_LIMIT`] missing filenames.
    pub fn shown(&self) -> &[String] {
        &self.missing[..self.missing.len().min(DISPLAY_LIMIT)]
    }

    /// How many filenames are left out of [`Self::shown`].
    pub fn remaining(&self) -> usize {
        self.missing.len().saturating_sub(DISPLAY_LIMIT)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.missing
    }
}

impl From<Vec<String>> for MissingReport {
    fn from(mut missing: Vec<String>) -> Self {
        missing.sort();
        Self { missing }
    }
}

impl fmt::Display for MissingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "All grid positions filled with PNG files!");
        }

        writeln!(f, "Missing PNG files in grid:")?;
        for name in self.shown() {
            writeln!(f, "  {}", name)?;
        }
        if self.remaining() > 0 {
            writeln!(f, "  ...and {} more", self.remaining())?;
        }
        Ok(())
    }
}
