use crate::types::Rgb;

/// Densest glyph first, blank last, so dark pixels read as ink.
pub const DEFAULT_RAMP: &str = "@%#*+=-:. ";

/// Maps a pixel color to a glyph by luminance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Returns `None` for an empty ramp.
    pub fn new(glyphs: &str) -> Option<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return None;
        }
        Some(GlyphRamp { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn map(&self, pixel: Rgb) -> char {
        let last = self.glyphs.len() - 1;
        let idx = (pixel.luminance() / 255.0 * last as f64).floor() as usize;
        self.glyphs[idx.min(last)]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        GlyphRamp {
            glyphs: DEFAULT_RAMP.chars().collect(),
        }
    }
}
