//! Training corpus loading and colour indexing
//!
//! A corpus is a small grid of colour indices plus the RGBA palette they refer
//! to. Rows are stored bottom-up so that corpus `y` grows in the same direction
//! as world `y`.

use crate::io::error::{AlgorithmError, Result, invalid_source};
use ndarray::Array2;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Colour-indexed training sample for the overlapping solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// Colour index per cell, indexed `[y, x]`
    cells: Array2<usize>,
    /// RGBA colour for each index
    palette: Vec<[u8; 4]>,
}

impl Corpus {
    /// Build a corpus from rows of colour indices
    ///
    /// `rows[0]` is the bottom row. Every row must have the same length and
    /// every index must address the palette.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, ragged, or references a colour
    /// the palette doesn't contain
    pub fn from_rows(rows: &[Vec<usize>], palette: Vec<[u8; 4]>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(invalid_source(&"corpus must contain at least one cell"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(invalid_source(&"corpus rows must all have the same width"));
        }

        let mut cells = Array2::zeros((height, width));
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value >= palette.len() {
                    return Err(AlgorithmError::InvalidTileIndex {
                        index: value,
                        max_tiles: palette.len(),
                    });
                }
                if let Some(cell) = cells.get_mut((y, x)) {
                    *cell = value;
                }
            }
        }

        Ok(Self { cells, palette })
    }

    /// Build a corpus from indices alone, generating a grey-ramp palette
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or ragged
    pub fn from_indices(rows: &[Vec<usize>]) -> Result<Self> {
        let colours = rows.iter().flatten().copied().max().map_or(0, |max| max + 1);
        let palette = (0..colours)
            .map(|index| {
                let shade = if colours > 1 {
                    (index * 255 / (colours - 1)) as u8
                } else {
                    255
                };
                [shade, shade, shade, 255]
            })
            .collect();
        Self::from_rows(rows, palette)
    }

    /// Load a corpus from a PNG file
    ///
    /// Colours are sorted before indexing so the same image always produces
    /// the same tile indices.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or decoded
    /// - The image has no pixels
    pub fn from_png_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::CorpusLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();
        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);

        let mut colour_set = HashSet::new();
        for pixel in rgba_img.pixels() {
            colour_set.insert(pixel.0);
        }

        // Deterministic colour ordering ensures reproducible tile assignments
        let mut palette: Vec<[u8; 4]> = colour_set.into_iter().collect();
        palette.sort_unstable();
        let colour_index: HashMap<[u8; 4], usize> = palette
            .iter()
            .enumerate()
            .map(|(index, &colour)| (colour, index))
            .collect();

        let mut rows = vec![vec![0; width]; height];
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            // Image rows run top-down, corpus rows bottom-up
            let row = height - 1 - y as usize;
            if let Some(cell) = rows.get_mut(row).and_then(|r| r.get_mut(x as usize)) {
                *cell = colour_index.get(&pixel.0).copied().unwrap_or(0);
            }
        }

        Self::from_rows(&rows, palette)
    }

    /// Corpus width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Corpus height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Colour index at `(x, y)`, wrapping on both axes
    pub fn wrapped(&self, x: usize, y: usize) -> usize {
        self.cells
            .get((y % self.height(), x % self.width()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct colours
    pub fn colour_count(&self) -> usize {
        self.palette.len()
    }

    /// RGBA colour for each index
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Raw colour grid indexed `[y, x]`
    pub const fn cells(&self) -> &Array2<usize> {
        &self.cells
    }
}
