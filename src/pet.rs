use crate::converter::{Conversion, Converter, RasterImage};
use crate::monitor::MonitorSnapshot;
use crate::types::Grid;

/// CPU percentage above which the pet turns red.
pub const STRESS_CPU_PERCENT: f64 = 80.0;

/// The thing on screen: its glyph grid, the window that holds it, and the
/// latest system readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pet {
    pub grid: Grid,
    pub window_width: i32,
    pub window_height: i32,
    pub cpu_usage: f64,
    pub mem_usage: f64,
}

impl Pet {
    pub fn from_conversion(conversion: Conversion) -> Self {
        let Conversion {
            grid,
            window_width,
            window_height,
        } = conversion;
        Pet {
            grid,
            window_width,
            window_height,
            cpu_usage: 0.0,
            mem_usage: 0.0,
        }
    }

    pub fn from_image<I: RasterImage + ?Sized>(converter: &Converter, image: &I) -> Self {
        Self::from_conversion(converter.convert(image))
    }

    /// Carry the monitor readings over from the pet this one replaces.
    pub fn with_readings_of(mut self, previous: &Pet) -> Self {
        self.cpu_usage = previous.cpu_usage;
        self.mem_usage = previous.mem_usage;
        self
    }

    pub fn observe(&mut self, snapshot: MonitorSnapshot) {
        self.cpu_usage = snapshot.cpu;
        self.mem_usage = snapshot.mem;
    }

    pub fn is_stressed(&self) -> bool {
        self.cpu_usage > STRESS_CPU_PERCENT
    }

    pub fn window_size(&self) -> (i32, i32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::GlyphRamp;
    use crate::types::CellMetrics;
    use std::num::NonZeroU32;

    #[test]
    fn stress_is_strictly_above_threshold() {
        let mut pet = Pet::default();
        pet.observe(MonitorSnapshot { cpu: 80.0, mem: 10.0 });
        assert!(!pet.is_stressed());
        pet.observe(MonitorSnapshot { cpu: 85.0, mem: 10.0 });
        assert!(pet.is_stressed());
    }

    #[test]
    fn replacement_keeps_readings_but_not_grid() {
        let converter = Converter::new(
            GlyphRamp::default(),
            NonZeroU32::new(10).unwrap(),
            CellMetrics::DESKTOP,
        );
        let mut old = Pet::from_image(
            &converter,
            &image::RgbImage::from_pixel(40, 40, image::Rgb([0, 0, 0])),
        );
        old.observe(MonitorSnapshot { cpu: 91.5, mem: 33.0 });

        let new = Pet::from_image(
            &converter,
            &image::RgbImage::from_pixel(20, 20, image::Rgb([255, 255, 255])),
        )
        .with_readings_of(&old);

        assert!(new.is_stressed());
        assert_eq!(new.mem_usage, 33.0);
        assert_eq!(new.grid.row_count(), 5);
        assert_eq!(new.window_size(), (10 * 7, 5 * 13 + 20));
        assert_ne!(new.grid, old.grid);
    }
}
