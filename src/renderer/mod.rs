//! Renderer — assembles what a frame should look like.
//!
//! Takes the pet, the motion flag, and the animation clock and produces
//! positioned, colored draw operations plus the optional HUD line.
//!
//! The renderer is pure and stateless. Given the same input, it always
//! produces the same output. It knows nothing about terminals or windows.

use crate::config::Toggles;
use crate::pet::Pet;
use crate::types::{CellMetrics, DrawOp, Hud, Rgb};

pub const ALERT_COLOR: Rgb = Rgb::new(255, 50, 50);
pub const MONO_COLOR: Rgb = Rgb::new(0, 255, 0);
pub const HUD_COLOR: Rgb = Rgb::new(255, 255, 0);

/// Radians of idle float per tick.
const FLOAT_SPEED: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub offset_y: f64,
    pub ops: Vec<DrawOp>,
    pub hud: Option<Hud>,
}

pub struct Renderer;

impl Renderer {
    pub fn assemble(
        pet: &Pet,
        moving: bool,
        tick: f64,
        toggles: &Toggles,
        metrics: &CellMetrics,
    ) -> RenderState {
        let offset_y = float_offset(toggles.show_animation, moving, tick, metrics.float_amplitude);
        let base_y = metrics.base_y + offset_y as i32;
        let stressed = pet.is_stressed();

        let mut ops = Vec::with_capacity(pet.grid.row_count() * pet.grid.max_row_len());
        for (r, row) in pet.grid.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                ops.push(DrawOp {
                    x: c as i32 * metrics.cell_width,
                    y: r as i32 * metrics.cell_height + base_y,
                    ch: cell.displayed,
                    color: draw_color(stressed, toggles.show_color, cell.color()),
                });
            }
        }

        let hud = (toggles.show_monitor && !moving).then(|| Hud {
            x: metrics.hud_x,
            y: metrics.hud_y,
            text: hud_text(pet.cpu_usage, pet.mem_usage),
            color: HUD_COLOR,
        });

        RenderState { offset_y, ops, hud }
    }
}

/// Stress beats color mode, color mode beats monochrome.
pub fn draw_color(stressed: bool, show_color: bool, cell_color: Rgb) -> Rgb {
    if stressed {
        ALERT_COLOR
    } else if show_color {
        cell_color
    } else {
        MONO_COLOR
    }
}

/// Slow sinusoidal bob while idle; flat whenever the pet is moving.
pub fn float_offset(animate: bool, moving: bool, tick: f64, amplitude: f64) -> f64 {
    if animate && !moving {
        (tick * FLOAT_SPEED).sin() * amplitude
    } else {
        0.0
    }
}

pub fn hud_text(cpu: f64, mem: f64) -> String {
    format!("CPU: {cpu:.0}% | MEM: {mem:.0}%")
}
