//! Flight-path templates and the follower that walks them.
//!
//! Every builder returns segments whose endpoints chain: segment N ends where
//! segment N + 1 starts.

use glam::Vec2;

use crate::config::Config;
use crate::geometry::{CubicSegment, segment_duration};

/// Named entry maneuvers used by the wave plans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPath {
    Left,
    Right,
    LoopLeft,
    LoopRight,
}

impl EntryPath {
    pub fn build(self, slot: Vec2, view_w: f32) -> Vec<CubicSegment> {
        match self {
            EntryPath::Left => left_entry(slot),
            EntryPath::Right => right_entry(slot, view_w),
            EntryPath::LoopLeft => loop_then_slot(slot, true, view_w),
            EntryPath::LoopRight => loop_then_slot(slot, false, view_w),
        }
    }
}

pub fn left_entry(slot: Vec2) -> Vec<CubicSegment> {
    vec![CubicSegment::new(
        Vec2::new(-20.0, -10.0),
        Vec2::new(20.0, 20.0),
        Vec2::new(50.0, 90.0),
        slot,
    )]
}

pub fn right_entry(slot: Vec2, view_w: f32) -> Vec<CubicSegment> {
    vec![CubicSegment::new(
        Vec2::new(view_w + 20.0, -10.0),
        Vec2::new(view_w - 20.0, 20.0),
        Vec2::new(view_w - 60.0, 90.0),
        slot,
    )]
}

/// Sweep in from one side, turn a loop, then settle into the slot.
pub fn loop_then_slot(slot: Vec2, from_left: bool, view_w: f32) -> Vec<CubicSegment> {
    let (start_x, mid_x, loop_x, bulge) = if from_left {
        (-20.0, 40.0, 70.0, 60.0)
    } else {
        (view_w + 20.0, view_w - 40.0, view_w - 70.0, -60.0)
    };
    let loop_top = Vec2::new(loop_x, 105.0);
    let loop_end = Vec2::new(loop_x, 85.0);
    vec![
        CubicSegment::new(
            Vec2::new(start_x, 10.0),
            Vec2::new(mid_x, 30.0),
            Vec2::new(loop_x, 70.0),
            loop_top,
        ),
        CubicSegment::new(
            loop_top,
            Vec2::new(loop_x + bulge, 120.0),
            Vec2::new(loop_x + bulge, 70.0),
            loop_end,
        ),
        CubicSegment::new(
            loop_end,
            Vec2::new(loop_x, 130.0),
            Vec2::new(slot.x, 130.0),
            slot,
        ),
    ]
}

/// Two-segment attack run from `start` toward where the player is heading.
///
/// The aim point leads the player's centre by `dive_lead` of the horizontal
/// offset between diver and player.
pub fn dive_path(start: Vec2, player_center: Vec2, config: &Config) -> Vec<CubicSegment> {
    let target_x = player_center.x + (player_center.x - start.x) * config.dive_lead;
    let side = if target_x >= start.x { 1.0 } else { -1.0 };

    let mid = Vec2::new((start.x + target_x) * 0.5, start.y + config.dive_y2);
    let first = CubicSegment::new(
        start,
        Vec2::new(start.x - side * config.dive_entry_dx, start.y - 20.0),
        Vec2::new(start.x - side * config.dive_entry_dx, start.y + config.dive_y1),
        mid,
    );
    let second = CubicSegment::new(
        mid,
        Vec2::new(mid.x + side * config.dive_hook_dx, mid.y + config.dive_y1 * 0.5),
        Vec2::new(target_x, player_center.y - config.dive_y1 * 0.5),
        Vec2::new(target_x, config.dive_exit_y),
    );
    vec![first, second]
}

/// Short swoop from a formation slot to a hover point between enemy and player.
///
/// `jitter` shifts the hover point horizontally.
pub fn beam_dive_path(start: Vec2, player_center: Vec2, jitter: f32) -> Vec<CubicSegment> {
    let target = Vec2::new(
        (start.x + player_center.x) * 0.5 + jitter,
        start.y + (player_center.y - start.y) * 0.5 + 10.0,
    );
    vec![CubicSegment::new(
        start,
        start + Vec2::new(0.0, 20.0),
        target - Vec2::new(0.0, 20.0),
        target,
    )]
}

/// Single arc from wherever the enemy is back to its slot.
///
/// `jitter` perturbs the approach control point horizontally.
pub fn return_to_slot(from: Vec2, slot: Vec2, jitter: f32) -> Vec<CubicSegment> {
    let lean = if from.x < slot.x { 20.0 } else { -20.0 };
    vec![CubicSegment::new(
        from,
        from + Vec2::new(lean, -30.0),
        Vec2::new(slot.x + jitter, slot.y - 30.0),
        slot,
    )]
}

/// Progress along a chain of segments, each with its own traversal time.
///
/// `seg_idx` never leaves `0..segments.len()` for a non-empty path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    segments: Vec<CubicSegment>,
    durations: Vec<f32>,
    seg_idx: usize,
    t: f32,
}

impl FlightPath {
    /// Every segment takes the same fixed time.
    pub fn timed(segments: Vec<CubicSegment>, duration: f32) -> Self {
        let durations = vec![duration; segments.len()];
        Self::with_durations(segments, durations)
    }

    /// Segment times derived from arc length so the visual speed is uniform.
    pub fn at_speed(segments: Vec<CubicSegment>, speed: f32, min_duration: f32) -> Self {
        let durations = segments
            .iter()
            .map(|s| segment_duration(s, speed, min_duration))
            .collect();
        Self::with_durations(segments, durations)
    }

    fn with_durations(segments: Vec<CubicSegment>, durations: Vec<f32>) -> Self {
        Self {
            segments,
            durations,
            seg_idx: 0,
            t: 0.0,
        }
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    pub fn segment_index(&self) -> usize {
        self.seg_idx
    }

    pub fn current_duration(&self) -> f32 {
        self.durations.get(self.seg_idx).copied().unwrap_or(0.0)
    }

    /// Step forward by `dt`. Returns true once the last segment is consumed.
    ///
    /// Leftover time at a segment boundary is dropped, so a frame never
    /// crosses more than one boundary.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.segments.is_empty() {
            return true;
        }
        let dur = self.current_duration();
        self.t += if dur > 0.0 { dt / dur } else { 1.0 };
        if self.t < 1.0 {
            return false;
        }
        if self.seg_idx + 1 >= self.segments.len() {
            self.t = 1.0;
            return true;
        }
        self.seg_idx += 1;
        self.t = 0.0;
        false
    }

    /// Current point, evaluated at the clamped progress fraction.
    pub fn position(&self) -> Option<Vec2> {
        let idx = self.seg_idx.min(self.segments.len().checked_sub(1)?);
        Some(self.segments[idx].point_at(self.t.clamp(0.0, 1.0)))
    }
}
