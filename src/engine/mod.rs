//! Engine — the per-frame driver.
//!
//! Runs one full pass per scheduler tick: motion, effect reset and glitch,
//! monitor readings, then render assembly. It also tells the scheduler how
//! fast to tick.
//!
//! The engine never deals with terminals, windows, or files. The windowing
//! layer hands it pointer and window state and applies what comes back.

use rand::Rng;

use crate::config::{Toggle, Toggles};
use crate::effects::EffectEngine;
use crate::monitor::StatsProvider;
use crate::motion::{MotionController, MotionState, PointerInput};
use crate::pet::Pet;
use crate::renderer::{RenderState, Renderer};
use crate::types::{CellMetrics, Point, ScreenSize};

pub const ACTIVE_TICK_RATE: u32 = 60;
pub const IDLE_TICK_RATE: u32 = 5;

/// What the windowing layer reports at the start of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub pointer: PointerInput,
    pub window_origin: Point,
    pub screen: ScreenSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Move the window here, if set.
    pub window_origin: Option<Point>,
    pub window_size: (i32, i32),
    pub tick_rate: u32,
    pub render: RenderState,
}

pub struct Engine {
    pet: Pet,
    motion: MotionController,
    effects: EffectEngine,
    toggles: Toggles,
    metrics: CellMetrics,
    tick: f64,
}

impl Engine {
    pub fn new(pet: Pet, toggles: Toggles, metrics: CellMetrics, window_origin: Point) -> Self {
        Engine {
            pet,
            motion: MotionController::new(window_origin),
            effects: EffectEngine::new(),
            toggles,
            metrics,
            tick: 0.0,
        }
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn motion(&self) -> &MotionState {
        self.motion.state()
    }

    pub fn tick(&self) -> f64 {
        self.tick
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    pub fn toggle(&mut self, toggle: Toggle) {
        self.toggles.flip(toggle);
    }

    /// Swap in a freshly converted pet in one step. Readings carry over so
    /// the stress tint does not blink.
    pub fn replace_pet(&mut self, pet: Pet) {
        self.pet = pet.with_readings_of(&self.pet);
    }

    pub fn step<S, R>(&mut self, input: FrameInput, stats: &S, rng: &mut R) -> FrameOutput
    where
        S: StatsProvider + ?Sized,
        R: Rng,
    {
        self.tick += 1.0;

        let hover = self.is_hovered(input.pointer.position);
        let moving_at_start = self.motion.is_moving();
        let tick_rate = advise_tick_rate(hover, moving_at_start, self.toggles.show_animation);

        let window_origin = self.motion.step(
            input.pointer,
            input.window_origin,
            self.pet.window_size(),
            input.screen,
        );

        self.effects.apply_frame(
            &mut self.pet.grid,
            self.toggles.show_glitch,
            !moving_at_start,
            rng,
        );

        self.pet.observe(stats.latest());

        let render = Renderer::assemble(
            &self.pet,
            self.motion.is_moving(),
            self.tick,
            &self.toggles,
            &self.metrics,
        );

        FrameOutput {
            window_origin,
            window_size: self.pet.window_size(),
            tick_rate,
            render,
        }
    }

    fn is_hovered(&self, pointer: Point) -> bool {
        (0..=self.pet.window_width).contains(&pointer.x)
            && (0..=self.pet.window_height).contains(&pointer.y)
    }
}

/// Hover and motion count separately; either one, or the idle float being
/// on, asks for the fast rate.
pub fn advise_tick_rate(hover: bool, moving: bool, animating: bool) -> u32 {
    if hover || moving || animating {
        ACTIVE_TICK_RATE
    } else {
        IDLE_TICK_RATE
    }
}
