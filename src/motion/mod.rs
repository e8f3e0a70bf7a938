//! Motion Controller — drag, throw, and bounce.
//!
//! Two phases. While the button is held the window tracks the pointer
//! exactly and the per-frame displacement is kept as velocity, so letting go
//! mid-flick throws the window. While free, velocity is integrated with
//! friction and the window bounces off the screen edges.

use crate::types::{Point, ScreenSize};

/// Per-axis speed at or below which the pet counts as at rest.
pub const REST_THRESHOLD: f64 = 0.1;
/// Fraction of velocity kept after each free frame.
pub const FRICTION: f64 = 0.95;
/// Fraction of speed kept when bouncing off an edge.
pub const RESTITUTION: f64 = 0.6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Velocity { x, y }
    }

    pub fn is_resting(self) -> bool {
        self.x.abs() <= REST_THRESHOLD && self.y.abs() <= REST_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionPhase {
    #[default]
    Free,
    /// `anchor` is where the pointer grabbed the window, relative to its
    /// origin.
    Dragging { anchor: Point },
}

/// Pointer state for one frame. Position is relative to the window origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerInput {
    pub position: Point,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub phase: MotionPhase,
    pub velocity: Velocity,
    /// Window origin at the end of the previous frame.
    pub last_window_pos: Point,
}

impl MotionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, MotionPhase::Dragging { .. })
    }

    pub fn is_moving(&self) -> bool {
        self.is_dragging() || !self.velocity.is_resting()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MotionController {
    state: MotionState,
}

impl MotionController {
    pub fn new(window_origin: Point) -> Self {
        MotionController {
            state: MotionState {
                last_window_pos: window_origin,
                ..MotionState::default()
            },
        }
    }

    pub fn from_state(state: MotionState) -> Self {
        MotionController { state }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state.is_moving()
    }

    /// Advance one frame. Returns the new window origin when the window has
    /// to move.
    pub fn step(
        &mut self,
        pointer: PointerInput,
        window_origin: Point,
        window_size: (i32, i32),
        screen: ScreenSize,
    ) -> Option<Point> {
        let command = if pointer.pressed {
            self.drag(pointer.position, window_origin)
        } else {
            self.state.phase = MotionPhase::Free;
            self.coast(window_origin, window_size, screen)
        };

        self.state.last_window_pos = command.unwrap_or(window_origin);
        command
    }

    fn drag(&mut self, pointer: Point, window_origin: Point) -> Option<Point> {
        let anchor = match self.state.phase {
            MotionPhase::Free => {
                self.state.phase = MotionPhase::Dragging { anchor: pointer };
                return None;
            }
            MotionPhase::Dragging { anchor } => anchor,
        };

        let target = Point::new(
            window_origin.x + pointer.x - anchor.x,
            window_origin.y + pointer.y - anchor.y,
        );
        let last = self.state.last_window_pos;
        self.state.velocity = Velocity::new(
            f64::from(target.x - last.x),
            f64::from(target.y - last.y),
        );
        Some(target)
    }

    fn coast(&mut self, origin: Point, size: (i32, i32), screen: ScreenSize) -> Option<Point> {
        let v = self.state.velocity;
        if v.is_resting() {
            self.state.velocity = Velocity::ZERO;
            return None;
        }

        let (x, vx) = integrate_axis(origin.x, v.x, size.0, screen.width);
        let (y, vy) = integrate_axis(origin.y, v.y, size.1, screen.height);
        self.state.velocity = Velocity::new(vx, vy);
        Some(Point::new(x, y))
    }
}

/// Move along one axis by the truncated velocity, then apply friction or,
/// on contact with an edge, clamp and bounce.
fn integrate_axis(pos: i32, vel: f64, size: i32, limit: i32) -> (i32, f64) {
    let mut pos = pos + vel as i32;
    let mut next = vel * FRICTION;

    if pos < 0 {
        pos = 0;
        next = -vel * RESTITUTION;
    }
    if pos + size > limit {
        pos = limit - size;
        next = -vel * RESTITUTION;
    }
    (pos, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };
    const SIZE: (i32, i32) = (350, 215);

    fn released() -> PointerInput {
        PointerInput::default()
    }

    fn held(x: i32, y: i32) -> PointerInput {
        PointerInput {
            position: Point::new(x, y),
            pressed: true,
        }
    }

    fn free(origin: Point, velocity: Velocity) -> MotionController {
        MotionController::from_state(MotionState {
            phase: MotionPhase::Free,
            velocity,
            last_window_pos: origin,
        })
    }

    #[test]
    fn free_step_moves_by_pre_friction_velocity() {
        let origin = Point::new(500, 500);
        let mut mc = free(origin, Velocity::new(10.0, 0.0));

        let moved = mc.step(released(), origin, SIZE, SCREEN);

        assert_eq!(moved, Some(Point::new(510, 500)));
        assert!((mc.state().velocity.x - 9.5).abs() < 1e-9);
        assert_eq!(mc.state().last_window_pos, Point::new(510, 500));
    }

    #[test]
    fn fractional_velocity_truncates_toward_zero() {
        let origin = Point::new(500, 500);
        let mut mc = free(origin, Velocity::new(2.9, -2.9));
        let moved = mc.step(released(), origin, SIZE, SCREEN);
        assert_eq!(moved, Some(Point::new(502, 498)));
    }

    #[test]
    fn left_wall_clamps_and_bounces() {
        let origin = Point::new(0, 500);
        let mut mc = free(origin, Velocity::new(-5.0, 0.0));

        let moved = mc.step(released(), origin, SIZE, SCREEN);

        assert_eq!(moved, Some(Point::new(0, 500)));
        assert!((mc.state().velocity.x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn right_and_bottom_walls_account_for_window_size() {
        let origin = Point::new(1920 - 350 - 2, 1080 - 215 - 1);
        let mut mc = free(origin, Velocity::new(10.0, 20.0));

        let moved = mc.step(released(), origin, SIZE, SCREEN);

        assert_eq!(moved, Some(Point::new(1920 - 350, 1080 - 215)));
        let v = mc.state().velocity;
        assert!((v.x + 6.0).abs() < 1e-9);
        assert!((v.y + 12.0).abs() < 1e-9);
    }

    #[test]
    fn corner_hit_bounces_both_axes() {
        let origin = Point::new(3, 2);
        let mut mc = free(origin, Velocity::new(-10.0, -10.0));
        let moved = mc.step(released(), origin, SIZE, SCREEN);
        assert_eq!(moved, Some(Point::new(0, 0)));
        let v = mc.state().velocity;
        assert!(v.x > 0.0 && v.y > 0.0);
    }

    #[test]
    fn slow_drift_snaps_to_rest() {
        let origin = Point::new(100, 100);
        let mut mc = free(origin, Velocity::new(0.05, 0.05));

        assert_eq!(mc.step(released(), origin, SIZE, SCREEN), None);
        assert_eq!(mc.state().velocity, Velocity::ZERO);
        assert!(!mc.is_moving());
    }

    #[test]
    fn one_fast_axis_keeps_both_moving() {
        let origin = Point::new(100, 100);
        let mut mc = free(origin, Velocity::new(0.05, 4.0));
        assert!(mc.step(released(), origin, SIZE, SCREEN).is_some());
        assert!((mc.state().velocity.x - 0.0475).abs() < 1e-9);
    }

    #[test]
    fn friction_eventually_stops_the_window() {
        let mut origin = Point::new(900, 500);
        let mut mc = free(origin, Velocity::new(8.0, 0.0));
        for _ in 0..200 {
            if let Some(p) = mc.step(released(), origin, SIZE, SCREEN) {
                origin = p;
            }
        }
        assert_eq!(mc.state().velocity, Velocity::ZERO);
        assert!(!mc.is_moving());
    }

    #[test]
    fn press_records_anchor_without_moving() {
        let origin = Point::new(200, 200);
        let mut mc = MotionController::new(origin);

        assert_eq!(mc.step(held(15, 20), origin, SIZE, SCREEN), None);
        assert_eq!(
            mc.state().phase,
            MotionPhase::Dragging {
                anchor: Point::new(15, 20)
            }
        );
        assert!(mc.is_moving());
    }

    #[test]
    fn drag_follows_pointer_and_release_throws() {
        let mut origin = Point::new(200, 200);
        let mut mc = MotionController::new(origin);
        mc.step(held(15, 20), origin, SIZE, SCREEN);

        // Pointer moved 4 right, 3 down relative to the window.
        let moved = mc.step(held(19, 23), origin, SIZE, SCREEN).unwrap();
        assert_eq!(moved, Point::new(204, 203));
        origin = moved;

        // The last flick is what gets thrown, not an average.
        let moved = mc.step(held(27, 21), origin, SIZE, SCREEN).unwrap();
        assert_eq!(moved, Point::new(216, 204));
        assert_eq!(mc.state().velocity, Velocity::new(12.0, 1.0));
        origin = moved;

        let moved = mc.step(released(), origin, SIZE, SCREEN);
        assert!(!mc.state().is_dragging());
        assert_eq!(moved, Some(Point::new(228, 205)));
        assert!((mc.state().velocity.x - 11.4).abs() < 1e-9);
    }

    #[test]
    fn holding_still_zeroes_velocity() {
        let origin = Point::new(50, 50);
        let mut mc = MotionController::new(origin);
        mc.step(held(5, 5), origin, SIZE, SCREEN);
        let moved = mc.step(held(5, 5), origin, SIZE, SCREEN);
        assert_eq!(moved, Some(origin));
        assert_eq!(mc.state().velocity, Velocity::ZERO);
        // Still grabbed, so still not idle.
        assert!(mc.is_moving());

        mc.step(released(), origin, SIZE, SCREEN);
        assert!(!mc.is_moving());
    }
}
