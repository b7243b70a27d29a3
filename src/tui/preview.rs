//! Terminal rendering of images.
//!
//! Images are drawn with the upper half block character: each terminal cell
//! shows two vertically stacked pixels, the top one as foreground and the
//! bottom one as background.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::ValidatorError;

const UPPER_HALF: &str = "▀";

/// A decoded image ready for terminal display.
#[derive(Debug, Clone)]
pub struct Preview {
    image: RgbImage,
}

impl Preview {
    /// Decode encoded image bytes, shrinking the image to fit `max_side`.
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::ImageDecode` if the bytes are not a
    /// supported image.
    pub fn decode(bytes: &[u8], max_side: u32) -> Result<Self, ValidatorError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| ValidatorError::ImageDecode(e.to_string()))?;
        let max_side = max_side.max(1);
        let image = if image.width() > max_side || image.height() > max_side {
            image.thumbnail(max_side, max_side)
        } else {
            image
        };
        Ok(Self {
            image: image.to_rgb8(),
        })
    }

    /// Pixel dimensions after thumbnailing.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Rasterize into at most `cols` x `rows` terminal cells, keeping aspect ratio.
    #[must_use]
    pub fn to_lines(&self, cols: u16, rows: u16) -> Vec<Line<'static>> {
        let (width, height) = self.image.dimensions();
        if cols == 0 || rows == 0 || width == 0 || height == 0 {
            return Vec::new();
        }

        let (w, h) = fit(width, height, u32::from(cols), u32::from(rows) * 2);
        let scaled = imageops::resize(&self.image, w, h, FilterType::Triangle);

        (0..h)
            .step_by(2)
            .map(|y| {
                let spans: Vec<Span<'static>> = (0..w)
                    .map(|x| {
                        let top = to_color(scaled.get_pixel(x, y));
                        let bottom = if y + 1 < h {
                            to_color(scaled.get_pixel(x, y + 1))
                        } else {
                            Color::Reset
                        };
                        Span::styled(UPPER_HALF, Style::default().fg(top).bg(bottom))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn to_color(pixel: &Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    Color::Rgb(r, g, b)
}

/// Largest size with the aspect ratio of `width` x `height` that fits the bounds.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn fit(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let w = (f64::from(width) * scale).floor() as u32;
    let h = (f64::from(height) * scale).floor() as u32;
    (w.clamp(1, max_width), h.clamp(1, max_height))
}
