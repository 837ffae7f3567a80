use std::f32::consts::TAU;

use glam::Vec2;

/// Centered grid of slots with a shared horizontal sway
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// Centre of the top row
    pub origin: Vec2,
    pub cols: u32,
    pub rows: u32,
    /// Horizontal spacing between columns
    pub dx: f32,
    /// Vertical spacing between rows
    pub dy: f32,
    /// Sway phase in cycles
    pub sway_phase: f32,
    pub sway_amp: f32,
    /// Cycles per second
    pub sway_speed: f32,
}

impl Formation {
    pub fn new(view_w: f32) -> Self {
        Self {
            origin: Vec2::new(view_w / 2.0, 62.0),
            cols: 10,
            rows: 4,
            dx: 32.0,
            dy: 28.0,
            sway_phase: 0.0,
            sway_amp: 20.0,
            sway_speed: 0.34,
        }
    }

    /// World position of a slot centre, before sway.
    pub fn slot(&self, col: u32, row: u32) -> Vec2 {
        let centered = col as f32 - (self.cols as f32 - 1.0) / 2.0;
        Vec2::new(
            self.origin.x + centered * self.dx,
            self.origin.y + row as f32 * self.dy,
        )
    }

    /// Current horizontal offset shared by every parked enemy.
    pub fn sway(&self) -> f32 {
        (self.sway_phase * TAU).sin() * self.sway_amp
    }

    pub fn advance(&mut self, dt: f32) {
        self.sway_phase += dt * self.sway_speed;
    }

    pub fn reset(&mut self) {
        self.sway_phase = 0.0;
    }
}
