use glam::Vec2;

use super::enemy::EnemyId;

/// Countdown leftovers at or below this count as spent
const EXPIRY_SLACK: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeamId(pub u32);

/// Beam life-cycle. The lifetime countdown only exists once the beam is full
/// length or has latched onto the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeamPhase {
    /// Growing toward `max_len`; can capture
    Extending,
    /// At full length, counting down; can still capture
    Extended { remaining: f32 },
    /// Has captured the player, counting down; inert
    Latched { remaining: f32 },
}

/// Cone-shaped capture beam hanging below its captor
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub id: BeamId,
    /// Weak link to the firing enemy; may go stale
    pub owner: EnemyId,
    pub len: f32,
    pub max_len: f32,
    pub phase: BeamPhase,
}

impl Beam {
    pub fn new(id: BeamId, owner: EnemyId, max_len: f32) -> Self {
        Self {
            id,
            owner,
            len: 0.0,
            max_len,
            phase: BeamPhase::Extending,
        }
    }

    pub fn is_full(&self) -> bool {
        !matches!(self.phase, BeamPhase::Extending)
    }

    /// Lifetime left, once the countdown has started.
    pub fn remaining(&self) -> Option<f32> {
        match self.phase {
            BeamPhase::Extending => None,
            BeamPhase::Extended { remaining } | BeamPhase::Latched { remaining } => Some(remaining),
        }
    }

    pub fn can_capture(&self) -> bool {
        !matches!(self.phase, BeamPhase::Latched { .. })
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|r| r <= EXPIRY_SLACK)
    }

    /// Burn lifetime; does nothing until the countdown has started.
    pub fn tick_life(&mut self, dt: f32) {
        match &mut self.phase {
            BeamPhase::Extending => {}
            BeamPhase::Extended { remaining } | BeamPhase::Latched { remaining } => {
                *remaining -= dt;
            }
        }
    }

    /// Grow by `speed * dt`. Reaching `max_len` starts a `duration` countdown.
    pub fn extend(&mut self, dt: f32, speed: f32, duration: f32) {
        if self.is_full() && !self.can_capture() {
            return;
        }
        self.len = (self.len + speed * dt).min(self.max_len);
        if self.phase == BeamPhase::Extending && self.len >= self.max_len {
            self.phase = BeamPhase::Extended {
                remaining: duration,
            };
        }
    }

    /// Lock onto the player. An unstarted countdown starts now.
    pub fn latch(&mut self, duration: f32) {
        let remaining = self.remaining().unwrap_or(duration);
        self.phase = BeamPhase::Latched { remaining };
    }

    /// Cone half-width at `depth` below the emitter.
    pub fn half_width_at(&self, depth: f32, base_width: f32, spread: f32) -> f32 {
        let ratio = if self.max_len > 0.0 {
            depth / self.max_len
        } else {
            0.0
        };
        base_width / 2.0 + ratio * spread
    }

    /// Whether a point `offset` from the emitter lies inside the current cone.
    pub fn covers(&self, offset: Vec2, base_width: f32, spread: f32) -> bool {
        offset.y > 0.0
            && offset.y <= self.len
            && offset.x.abs() <= self.half_width_at(offset.y, base_width, spread)
    }
}

/// The player's ship held by a captor, drawn riding above it; `pos` is top-left
#[derive(Debug, Clone)]
pub struct CapturedShip {
    pub pos: Vec2,
    pub size: Vec2,
}

impl CapturedShip {
    /// Ride centred just above the captor.
    pub fn follow(&mut self, captor_pos: Vec2, captor_size: Vec2) {
        self.pos = Vec2::new(
            (captor_pos.x + captor_size.x / 2.0 - self.size.x / 2.0).round(),
            (captor_pos.y - self.size.y - 2.0).round(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam() -> Beam {
        Beam::new(BeamId(1), EnemyId(9), 120.0)
    }

    #[test]
    fn test_beam_extends_then_counts_down() {
        let mut b = beam();
        b.extend(1.0, 60.0, 1.2);
        assert_eq!(b.len, 60.0);
        assert!(!b.is_full());
        assert_eq!(b.remaining(), None);

        b.tick_life(5.0);
        assert_eq!(b.remaining(), None);

        b.extend(1.5, 60.0, 1.2);
        assert_eq!(b.len, 120.0);
        assert!(b.is_full());
        assert_eq!(b.remaining(), Some(1.2));

        b.tick_life(1.0);
        assert!(!b.is_expired());
        b.tick_life(0.2);
        assert!(b.is_expired());
    }

    #[test]
    fn test_countdown_spent_by_whole_frames() {
        let mut b = beam();
        b.extend(2.0, 60.0, 1.2);
        for _ in 0..71 {
            b.tick_life(1.0 / 60.0);
        }
        assert!(!b.is_expired());
        b.tick_life(1.0 / 60.0);
        assert!(b.is_expired());
    }

    #[test]
    fn test_latch_starts_countdown_when_unfilled() {
        let mut b = beam();
        b.extend(0.5, 60.0, 1.2);
        b.latch(1.2);
        assert!(b.is_full());
        assert!(!b.can_capture());
        assert_eq!(b.remaining(), Some(1.2));
    }

    #[test]
    fn test_latch_keeps_running_countdown() {
        let mut b = beam();
        b.extend(2.0, 60.0, 1.2);
        b.tick_life(0.5);
        b.latch(1.2);
        assert!((b.remaining().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_cone_widens_with_depth() {
        let mut b = beam();
        b.len = 120.0;
        assert_eq!(b.half_width_at(0.0, 20.0, 120.0), 10.0);
        assert_eq!(b.half_width_at(60.0, 20.0, 120.0), 70.0);
        assert!(b.covers(Vec2::new(60.0, 60.0), 20.0, 120.0));
        assert!(!b.covers(Vec2::new(80.0, 60.0), 20.0, 120.0));
        assert!(!b.covers(Vec2::new(0.0, -5.0), 20.0, 120.0));
        b.len = 30.0;
        assert!(!b.covers(Vec2::new(0.0, 60.0), 20.0, 120.0));
    }

    #[test]
    fn test_captured_ship_rides_above_captor() {
        let mut ship = CapturedShip {
            pos: Vec2::ZERO,
            size: Vec2::new(24.0, 20.0),
        };
        ship.follow(Vec2::new(100.0, 80.0), Vec2::new(16.0, 12.0));
        assert_eq!(ship.pos, Vec2::new(96.0, 58.0));
    }
}
