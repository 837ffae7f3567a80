//! The player's ship: steering, firing, pickups and timed buffs.

use super::{GameEvent, World};
use crate::entities::PowerupKind;
use crate::input::{InputAction, InputState};

/// Remaining seconds on each timed powerup
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Buffs {
    pub treat: f32,
    pub fish: f32,
}

impl Buffs {
    pub fn treat_active(&self) -> bool {
        self.treat > 0.0
    }

    pub fn fish_active(&self) -> bool {
        self.fish > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.treat = (self.treat - dt).max(0.0);
        self.fish = (self.fish - dt).max(0.0);
    }
}

impl World {
    pub(super) fn update_player(&mut self, dt: f32, input: &InputState) {
        self.player.tick_cooldown(dt);

        if self.player.alive {
            let (speed, cooldown) = if self.buffs.treat_active() {
                (
                    self.config.player_speed * self.config.treat_speed_boost,
                    self.config.fire_cooldown / self.config.treat_fire_boost,
                )
            } else {
                (self.config.player_speed, self.config.fire_cooldown)
            };

            let mut dir = 0.0;
            if input.is_held(InputAction::Left) {
                dir -= 1.0;
            }
            if input.is_held(InputAction::Right) {
                dir += 1.0;
            }
            if dir != 0.0 {
                self.player.move_by(dir * speed * dt, self.config.view_w);
            }

            if input.is_held(InputAction::Fire) {
                let shots = self.player.try_fire(cooldown, &self.config);
                if !shots.is_empty() {
                    self.bullets.extend(shots);
                    self.events.push(GameEvent::ShotFired);
                }
            }
        }

        self.player.tick_timers(dt);
    }

    /// Falling loot and the rescue ship; catching either applies it at once.
    pub(super) fn update_pickups(&mut self, dt: f32) {
        let view_h = self.config.view_h;
        let center = self.player.center();
        let alive = self.player.alive;

        if let Some(ship) = self.rescue_ship.as_mut() {
            ship.update(dt);
            if alive && ship.within_reach(center, self.config.rescue_catch_radius) {
                self.rescue_ship = None;
                self.player.dual = true;
                self.player.score += self.config.rescue_bonus;
                log::debug!("ship rescued, flying dual");
                self.events.push(GameEvent::Rescue);
            } else if ship.is_out_of_bounds(view_h) {
                self.rescue_ship = None;
            }
        }

        let mut caught = Vec::new();
        let drift = self.config.powerup_drift_toward;
        self.powerups.retain_mut(|p| {
            p.update(dt, center.x, drift);
            if alive && p.within_reach(center, self.config.powerup_catch_radius) {
                caught.push(p.kind);
                return false;
            }
            !p.is_out_of_bounds(view_h)
        });
        for kind in caught {
            self.collect(kind);
        }

        self.buffs.tick(dt);
    }

    fn collect(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Heart => {
                self.player.lives += 1;
                self.player
                    .grant_invulnerability(self.config.respawn_invulnerability);
            }
            PowerupKind::Fish => {
                self.buffs.fish = self.config.fish_duration;
                self.player.grant_invulnerability(self.config.fish_duration);
            }
            PowerupKind::Treat => {
                self.buffs.treat = self.config.treat_duration;
            }
        }
        log::debug!("collected {kind:?}");
        self.events.push(GameEvent::PowerupCollected(kind));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::Config;
    use crate::entities::{Powerup, RescueShip};

    fn world() -> World {
        let mut world = World::with_seed(Config::default(), 4);
        world.reset();
        world.enemies.clear();
        world
    }

    fn holding(actions: &[InputAction]) -> InputState {
        InputState::from_actions(actions.iter().copied())
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut w = world();
        let x0 = w.player.pos.x;
        w.update_player(0.1, &holding(&[InputAction::Right]));
        assert!((w.player.pos.x - (x0 + 9.6)).abs() < 1e-4);

        for _ in 0..100 {
            w.update_player(0.1, &holding(&[InputAction::Left]));
        }
        assert_eq!(w.player.pos.x, crate::entities::SIDE_MARGIN);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut w = world();
        let x0 = w.player.pos.x;
        w.update_player(0.1, &holding(&[InputAction::Left, InputAction::Right]));
        assert_eq!(w.player.pos.x, x0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut w = world();
        let fire = holding(&[InputAction::Fire]);
        w.update_player(0.016, &fire);
        w.update_player(0.016, &fire);
        assert_eq!(w.bullets.len(), 1);
        for _ in 0..20 {
            w.update_player(0.016, &fire);
        }
        assert_eq!(w.bullets.len(), 2);
    }

    #[test]
    fn test_treat_boosts_speed() {
        let mut w = world();
        w.buffs.treat = 5.0;
        let x0 = w.player.pos.x;
        w.update_player(0.1, &holding(&[InputAction::Right]));
        assert!((w.player.pos.x - (x0 + 14.4)).abs() < 1e-4);
    }

    #[test]
    fn test_dead_ship_stays_put() {
        let mut w = world();
        w.player.alive = false;
        let x0 = w.player.pos.x;
        w.update_player(0.1, &holding(&[InputAction::Right, InputAction::Fire]));
        assert_eq!(w.player.pos.x, x0);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_catching_heart_adds_life() {
        let mut w = world();
        let c = w.player.center();
        w.powerups.push(Powerup::new(PowerupKind::Heart, c, 60.0));
        w.update_pickups(0.0);
        assert!(w.powerups.is_empty());
        assert_eq!(w.player.lives, 4);
        assert!(w.player.is_invulnerable());
        assert!(
            w.drain_events()
                .contains(&GameEvent::PowerupCollected(PowerupKind::Heart))
        );
    }

    #[test]
    fn test_fish_and_treat_timers() {
        let mut w = world();
        let c = w.player.center();
        w.powerups.push(Powerup::new(PowerupKind::Fish, c, 60.0));
        w.powerups.push(Powerup::new(PowerupKind::Treat, c, 60.0));
        w.update_pickups(0.0);
        assert!(w.buffs.fish_active());
        assert!(w.buffs.treat_active());
        assert!(w.player.is_invulnerable());

        w.update_pickups(10.0);
        assert!(!w.buffs.fish_active());
        assert!(!w.buffs.treat_active());
    }

    #[test]
    fn test_missed_powerup_falls_away() {
        let mut w = world();
        w.powerups
            .push(Powerup::new(PowerupKind::Treat, Vec2::new(20.0, 300.0), 60.0));
        w.update_pickups(0.5);
        assert!(w.powerups.is_empty());
        assert!(!w.buffs.treat_active());
    }

    #[test]
    fn test_rescue_ship_grants_dual_and_bonus() {
        let mut w = world();
        w.rescue_ship = Some(RescueShip {
            pos: w.player.center(),
            size: Vec2::new(24.0, 20.0),
            vy: 60.0,
        });
        w.update_pickups(0.0);
        assert!(w.rescue_ship.is_none());
        assert!(w.player.dual);
        assert_eq!(w.player.score, 200);
        assert!(w.drain_events().contains(&GameEvent::Rescue));
    }
}
