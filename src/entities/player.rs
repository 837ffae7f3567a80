use glam::Vec2;

use super::projectile::Projectile;
use crate::config::Config;
use crate::geometry::Rect;

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 20.0);
/// Closest the ship may get to either side wall
pub const SIDE_MARGIN: f32 = 6.0;
/// Flash duration after taking damage
pub const DAMAGE_FLASH: f32 = 0.25;

/// Result of the player absorbing one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The dual-fighter wing was lost instead of a life
    LostWing,
    /// A life was lost and the ship respawns
    LostLife,
    /// The last life was lost
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub lives: u32,
    pub score: u32,
    pub fire_cooldown: f32,
    pub flash: f32,
    /// Flying with a rescued second ship
    pub dual: bool,
    pub invulnerable_time: f32,
    /// Guards against being damaged twice in one frame
    pub hit_this_frame: bool,
}

impl Player {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Self::spawn_point(config),
            size: PLAYER_SIZE,
            alive: true,
            lives: config.lives,
            score: 0,
            fire_cooldown: 0.0,
            flash: 0.0,
            dual: false,
            invulnerable_time: 0.0,
            hit_this_frame: false,
        }
    }

    pub fn spawn_point(config: &Config) -> Vec2 {
        Vec2::new(
            config.view_w / 2.0 - PLAYER_SIZE.x / 2.0,
            config.view_h - 28.0,
        )
    }

    /// Put a fresh ship back at the spawn point.
    pub fn respawn(&mut self, config: &Config) {
        self.pos = Self::spawn_point(config);
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_time > 0.0
    }

    pub fn grant_invulnerability(&mut self, seconds: f32) {
        self.invulnerable_time = self.invulnerable_time.max(seconds);
    }

    pub fn is_flashing(&self) -> bool {
        self.flash > 0.0
    }

    /// Slide horizontally, staying inside the side margins.
    pub fn move_by(&mut self, dx: f32, view_w: f32) {
        let max_x = view_w - self.size.x - SIDE_MARGIN;
        self.pos.x = (self.pos.x + dx).clamp(SIDE_MARGIN, max_x.max(SIDE_MARGIN));
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);
        self.flash = (self.flash - dt).max(0.0);
    }

    /// Attempts to fire if the cooldown allows.
    /// Returns one bullet, or two side by side when flying dual.
    pub fn try_fire(&mut self, cooldown: f32, config: &Config) -> Vec<Projectile> {
        if !self.can_fire() {
            return vec![];
        }
        self.fire_cooldown = cooldown;

        let cx = self.center().x;
        if self.dual {
            vec![
                Projectile::player_shot(cx - config.dual_shot_spacing, self.pos.y, config.bullet_speed),
                Projectile::player_shot(cx + config.dual_shot_spacing, self.pos.y, config.bullet_speed),
            ]
        } else {
            vec![Projectile::player_shot(cx, self.pos.y, config.bullet_speed)]
        }
    }

    /// Absorb one hit: the dual wing goes first, then a life.
    pub fn take_hit(&mut self) -> HitOutcome {
        self.hit_this_frame = true;
        self.flash = DAMAGE_FLASH;
        if self.dual {
            self.dual = false;
            return HitOutcome::LostWing;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.alive = false;
            HitOutcome::Destroyed
        } else {
            HitOutcome::LostLife
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_new() {
        let config = Config::default();
        let player = Player::new(&config);
        assert_eq!(player.pos, Vec2::new(100.0, 260.0));
        assert_eq!(player.lives, 3);
        assert!(player.alive);
        assert!(player.can_fire());
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_player_movement_clamped() {
        let config = Config::default();
        let mut player = Player::new(&config);
        player.move_by(-1000.0, config.view_w);
        assert_eq!(player.pos.x, SIDE_MARGIN);
        player.move_by(1000.0, config.view_w);
        assert_eq!(player.pos.x, 224.0 - 24.0 - SIDE_MARGIN);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let config = Config::default();
        let mut player = Player::new(&config);
        assert_eq!(player.try_fire(0.25, &config).len(), 1);
        assert!(player.try_fire(0.25, &config).is_empty());
        player.tick_cooldown(0.25);
        assert!(player.can_fire());
    }

    #[test]
    fn test_dual_fires_two_shots() {
        let config = Config::default();
        let mut player = Player::new(&config);
        player.dual = true;
        let shots = player.try_fire(0.25, &config);
        assert_eq!(shots.len(), 2);
        let gap = shots[1].bounds().center().x - shots[0].bounds().center().x;
        assert_eq!(gap, 2.0 * config.dual_shot_spacing);
    }

    #[test]
    fn test_take_hit_loses_wing_first() {
        let config = Config::default();
        let mut player = Player::new(&config);
        player.dual = true;
        assert_eq!(player.take_hit(), HitOutcome::LostWing);
        assert_eq!(player.lives, 3);
        assert!(player.hit_this_frame);
        assert!(player.is_flashing());
        assert_eq!(player.take_hit(), HitOutcome::LostLife);
        assert_eq!(player.lives, 2);
    }

    #[test]
    fn test_last_life_destroys() {
        let config = Config::default();
        let mut player = Player::new(&config);
        player.lives = 1;
        assert_eq!(player.take_hit(), HitOutcome::Destroyed);
        assert!(!player.alive);
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_invulnerability_expires() {
        let config = Config::default();
        let mut player = Player::new(&config);
        player.grant_invulnerability(0.5);
        player.tick_timers(0.3);
        assert!(player.is_invulnerable());
        player.tick_timers(0.3);
        assert!(!player.is_invulnerable());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds_x(moves in prop::collection::vec(-50.0f32..50.0, 0..100)) {
                let config = Config::default();
                let mut player = Player::new(&config);
                for dx in moves {
                    player.move_by(dx, config.view_w);
                    prop_assert!(player.pos.x >= SIDE_MARGIN);
                    prop_assert!(player.pos.x + player.size.x <= config.view_w - SIDE_MARGIN + 1e-3);
                }
            }

            #[test]
            fn test_lives_never_negative(lives in 0u32..5, hits in 0usize..12) {
                let config = Config::default();
                let mut player = Player::new(&config);
                player.lives = lives;
                for _ in 0..hits {
                    player.take_hit();
                }
                prop_assert!(player.lives <= lives);
            }
        }
    }
}
