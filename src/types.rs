//! Shared boundary types for the pet.
//!
//! This module defines the data contracts between the stages of a frame:
//! - Converter → Effect Engine / Renderer: `Grid` of `Cell`s
//! - Renderer → Player: `DrawOp`s positioned in window pixels

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Perceptual luminance on the 0–255 scale.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    original: char,
    /// What gets drawn this frame. Only the effect engine writes it.
    pub displayed: char,
    color: Rgb,
}

impl Cell {
    pub fn new(glyph: char, color: Rgb) -> Self {
        Cell {
            original: glyph,
            displayed: glyph,
            color,
        }
    }

    pub fn original(&self) -> char {
        self.original
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_corrupted(&self) -> bool {
        self.displayed != self.original
    }

    pub fn restore(&mut self) {
        self.displayed = self.original;
    }
}

/// Rows of cells in increasing y, cells in increasing x.
///
/// Rows are not padded: a ragged row is kept as sampled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<Cell>] {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// The undisturbed glyphs, one line per row.
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::original).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Fixed font metrics used to size the window and place glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: i32,
    pub cell_height: i32,
    /// Extra rows of pixels above the grid, reserved for the HUD.
    pub top_padding: i32,
    /// Y of the first glyph row before the idle float is added.
    pub base_y: i32,
    /// Peak of the idle float, in pixels.
    pub float_amplitude: f64,
    pub hud_x: i32,
    pub hud_y: i32,
}

impl CellMetrics {
    /// A 7×13 bitmap font in a desktop window.
    pub const DESKTOP: CellMetrics = CellMetrics {
        cell_width: 7,
        cell_height: 13,
        top_padding: 20,
        base_y: 30,
        float_amplitude: 5.0,
        hud_x: 0,
        hud_y: 10,
    };

    /// One terminal cell per glyph, HUD on the first row. The float moves
    /// glyphs by at most one row either way, so the grid starts on row 2 and
    /// the window keeps a spare row below it.
    pub const TERMINAL: CellMetrics = CellMetrics {
        cell_width: 1,
        cell_height: 1,
        top_padding: 3,
        base_y: 2,
        float_amplitude: 1.5,
        hud_x: 0,
        hud_y: 0,
    };
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::DESKTOP
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Usable screen area, origin at (0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOp {
    pub x: i32,
    pub y: i32,
    pub ch: char,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Rgb,
}
