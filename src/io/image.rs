//! PNG export of the presented world with transparency for unsolved cells

use crate::io::canvas::TileCanvas;
use crate::io::configuration::UNSOLVED_COLOR;
use crate::io::error::{AlgorithmError, Result};
use image::{ImageBuffer, Rgba};
use std::path::Path;

/// Export every cell the canvas ever presented as a PNG image
///
/// The image covers the bounding box of presented cells. World y grows
/// upward, so the top image row holds the highest world row.
///
/// # Errors
///
/// Returns an error if:
/// - Nothing has been presented
/// - A tile value has no palette entry
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_canvas_as_png(
    canvas: &TileCanvas,
    palette: &[[u8; 4]],
    output_path: &Path,
) -> Result<()> {
    let bounds = canvas
        .bounds()
        .ok_or_else(|| AlgorithmError::InvalidSourceData {
            reason: "No cells have been presented".to_string(),
        })?;

    let width = bounds.width() as u32;
    let height = bounds.height() as u32;
    let mut img = ImageBuffer::from_pixel(width, height, Rgba(UNSOLVED_COLOR));

    for (&[x, y], &tile) in canvas.world() {
        let rgba = palette
            .get(tile)
            .copied()
            .ok_or(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: palette.len(),
            })?;
        let pixel_x = (x - bounds.min[0]) as u32;
        let pixel_y = (bounds.max[1] - y) as u32;
        img.put_pixel(pixel_x, pixel_y, Rgba(rgba));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
