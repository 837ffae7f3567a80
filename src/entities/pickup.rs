use glam::Vec2;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    /// Extra life
    Heart,
    /// Timed invulnerability, immune to enemy bullets
    Fish,
    /// Timed speed and fire-rate boost
    Treat,
}

impl PowerupKind {
    /// Mutually exclusive drop roll for `r` in [0, 1); rarest kind first.
    pub fn roll(r: f32, config: &Config) -> Option<Self> {
        let heart = config.heart_drop_chance;
        let fish = heart + config.fish_drop_chance;
        let treat = fish + config.treat_drop_chance;
        if r < heart {
            Some(PowerupKind::Heart)
        } else if r < fish {
            Some(PowerupKind::Fish)
        } else if r < treat {
            Some(PowerupKind::Treat)
        } else {
            None
        }
    }

    pub fn get_char(&self) -> char {
        match self {
            PowerupKind::Heart => '♥',
            PowerupKind::Fish => 'F',
            PowerupKind::Treat => 'T',
        }
    }
}

/// A falling powerup; `pos` is its centre
#[derive(Debug, Clone)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub vy: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2, vy: f32) -> Self {
        Self { kind, pos, vy }
    }

    /// Fall, drifting sideways toward `target_x` at `drift` px/s.
    pub fn update(&mut self, dt: f32, target_x: f32, drift: f32) {
        self.pos.y += self.vy * dt;
        let dx = self.pos.x - target_x;
        let magnitude = dx.abs().max(1.0);
        self.pos.x -= dx / magnitude * drift * dt;
    }

    pub fn is_out_of_bounds(&self, view_h: f32) -> bool {
        self.pos.y > view_h + 20.0
    }

    pub fn within_reach(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) <= radius
    }
}

/// The captured ship, released when its captor is shot down; `pos` is its centre
#[derive(Debug, Clone)]
pub struct RescueShip {
    pub pos: Vec2,
    pub size: Vec2,
    pub vy: f32,
}

impl RescueShip {
    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.vy * dt;
    }

    pub fn is_out_of_bounds(&self, view_h: f32) -> bool {
        self.pos.y > view_h + 20.0
    }

    pub fn within_reach(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) <= radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_priority() {
        let config = Config::default();
        assert_eq!(PowerupKind::roll(0.0, &config), Some(PowerupKind::Heart));
        assert_eq!(PowerupKind::roll(0.019, &config), Some(PowerupKind::Heart));
        assert_eq!(PowerupKind::roll(0.03, &config), Some(PowerupKind::Fish));
        assert_eq!(PowerupKind::roll(0.1, &config), Some(PowerupKind::Treat));
        assert_eq!(PowerupKind::roll(0.5, &config), None);
    }

    #[test]
    fn test_powerup_falls_and_drifts_toward_target() {
        let mut p = Powerup::new(PowerupKind::Treat, Vec2::new(50.0, 100.0), 40.0);
        p.update(1.0, 150.0, 10.0);
        assert_eq!(p.pos, Vec2::new(60.0, 140.0));
        let mut p = Powerup::new(PowerupKind::Fish, Vec2::new(150.0, 100.0), 40.0);
        p.update(0.5, 50.0, 10.0);
        assert_eq!(p.pos.x, 145.0);
    }

    #[test]
    fn test_powerup_pickup_radius() {
        let p = Powerup::new(PowerupKind::Heart, Vec2::new(100.0, 100.0), 40.0);
        assert!(p.within_reach(Vec2::new(110.0, 110.0), 16.0));
        assert!(!p.within_reach(Vec2::new(120.0, 110.0), 16.0));
    }

    #[test]
    fn test_rescue_ship_falls_off_screen() {
        let mut ship = RescueShip {
            pos: Vec2::new(100.0, 280.0),
            size: Vec2::new(24.0, 20.0),
            vy: 60.0,
        };
        assert!(!ship.is_out_of_bounds(288.0));
        ship.update(1.0);
        assert!(ship.is_out_of_bounds(288.0));
    }
}
