//! Frame capture and GIF generation for a viewpoint walk

use crate::io::canvas::TileCanvas;
use crate::io::error::{AlgorithmError, Result};
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// One captured view of the visible window
#[derive(Debug, Clone)]
pub struct ViewFrame {
    /// World cell at the bottom-left corner of the frame
    pub origin: [i32; 2],
    /// Tick the frame was captured on
    pub tick: usize,
    /// Row-major tiles, bottom row first (None = nothing presented)
    pub tiles: Vec<Option<usize>>,
}

/// Captures fixed-size views of the canvas for an animated export
///
/// Every frame shows `size x size` cells so the animation keeps a stable
/// frame even while the window is extended.
pub struct VisualizationCapture {
    frames: Vec<ViewFrame>,
    size: usize,
    palette: Vec<[u8; 4]>,
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of all palette colours is used as the empty colour
    pub fn new(size: usize, palette: Vec<[u8; 4]>, expected_frames: usize) -> Self {
        let empty_color = if palette.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut sums = [0u32; 4];
            for color in &palette {
                for (sum, &channel) in sums.iter_mut().zip(color) {
                    *sum += u32::from(channel);
                }
            }
            let count = palette.len() as u32;
            sums.map(|sum| (sum / count) as u8)
        };

        Self {
            frames: Vec::with_capacity(expected_frames),
            size,
            palette,
            empty_color,
        }
    }

    /// Copy the visible tiles around `origin` from the canvas
    pub fn record_frame(&mut self, canvas: &TileCanvas, origin: [i32; 2], tick: usize) {
        let mut tiles = Vec::with_capacity(self.size * self.size);
        for dy in 0..self.size as i32 {
            for dx in 0..self.size as i32 {
                tiles.push(canvas.visible_tile([origin[0] + dx, origin[1] + dy]));
            }
        }
        self.frames.push(ViewFrame {
            origin,
            tick,
            tiles,
        });
    }

    /// Captured frames in order
    pub fn frames(&self) -> &[ViewFrame] {
        &self.frames
    }

    /// Returns the number of captured frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - A tile has no palette entry
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let mut frames = self
            .frames
            .iter()
            .map(|frame| self.render_frame(frame, frame_delay_ms))
            .collect::<Result<Vec<_>>>()?;

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(frame_delay_ms * 25, 1),
            ));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn render_frame(&self, frame: &ViewFrame, delay_ms: u32) -> Result<Frame> {
        let size = self.size as u32;
        let mut img = RgbaImage::new(size, size);

        for (index, tile) in frame.tiles.iter().enumerate() {
            let color = match tile {
                None => self.empty_color,
                Some(tile) => {
                    self.palette
                        .get(*tile)
                        .copied()
                        .ok_or(AlgorithmError::InvalidTileIndex {
                            index: *tile,
                            max_tiles: self.palette.len(),
                        })?
                }
            };
            let x = (index % self.size) as u32;
            let row = (index / self.size) as u32;
            // World rows grow upward
            img.put_pixel(x, size - 1 - row, Rgba(color));
        }

        Ok(Frame::from_parts(
            img,
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }
}
