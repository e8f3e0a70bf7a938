//! Converter — samples a raster image into a glyph grid.
//!
//! Sampling is nearest-pixel on a fixed stride. The vertical stride is twice
//! the horizontal one because a glyph cell is about twice as tall as it is
//! wide, so a square patch of pixels comes out as a square patch of glyphs.

pub mod ramp;

use std::num::NonZeroU32;

use crate::types::{Cell, CellMetrics, Grid, Rgb};
pub use ramp::GlyphRamp;

/// Decoded pixels the converter can sample from.
pub trait RasterImage {
    fn dimensions(&self) -> (u32, u32);
    fn sample(&self, x: u32, y: u32) -> Rgb;
}

impl RasterImage for image::RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        image::ImageBuffer::dimensions(self)
    }

    fn sample(&self, x: u32, y: u32) -> Rgb {
        let image::Rgb([r, g, b]) = *self.get_pixel(x, y);
        Rgb::new(r, g, b)
    }
}

/// Channels are premultiplied by alpha, so fully transparent pixels read as
/// black.
impl RasterImage for image::RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        image::ImageBuffer::dimensions(self)
    }

    fn sample(&self, x: u32, y: u32) -> Rgb {
        let image::Rgba([r, g, b, a]) = *self.get_pixel(x, y);
        let premultiply = |c: u8| (u16::from(c) * u16::from(a) / 255) as u8;
        Rgb::new(premultiply(r), premultiply(g), premultiply(b))
    }
}

/// Grid plus the window size needed to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub grid: Grid,
    pub window_width: i32,
    pub window_height: i32,
}

#[derive(Debug, Clone)]
pub struct Converter {
    ramp: GlyphRamp,
    target_width: NonZeroU32,
    metrics: CellMetrics,
}

impl Converter {
    pub fn new(ramp: GlyphRamp, target_width: NonZeroU32, metrics: CellMetrics) -> Self {
        Converter {
            ramp,
            target_width,
            metrics,
        }
    }

    /// Horizontal and vertical sampling stride for an image this wide.
    pub fn strides(&self, image_width: u32) -> (u32, u32) {
        let stride_x = (image_width / self.target_width.get()).max(1);
        (stride_x, stride_x * 2)
    }

    /// The image must have non-zero dimensions; the loader rejects anything
    /// else before it gets here.
    pub fn convert<I: RasterImage + ?Sized>(&self, image: &I) -> Conversion {
        let (width, height) = image.dimensions();
        let (stride_x, stride_y) = self.strides(width);

        let rows: Vec<Vec<Cell>> = (0..height)
            .step_by(stride_y as usize)
            .map(|y| {
                (0..width)
                    .step_by(stride_x as usize)
                    .map(|x| {
                        let color = image.sample(x, y);
                        Cell::new(self.ramp.map(color), color)
                    })
                    .collect()
            })
            .collect();

        let grid = Grid::from_rows(rows);
        let window_width = grid.max_row_len() as i32 * self.metrics.cell_width;
        let window_height =
            grid.row_count() as i32 * self.metrics.cell_height + self.metrics.top_padding;

        Conversion {
            grid,
            window_width,
            window_height,
        }
    }
}
