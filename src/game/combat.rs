//! Collision resolution, damage and scoring.

use glam::Vec2;
use rand::Rng;

use super::{GameEvent, World};
use crate::entities::{Enemy, FlightMode, HitOutcome, Powerup, PowerupKind, RescueShip};

/// Particles in the burst when the player is hit
const PLAYER_BURST: usize = 18;

/// What hurt the player; decides the aftermath of a survived hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DamageSource {
    Contact,
    EnemyFire,
}

impl World {
    /// Ramming: the first targetable enemy touching the ship dies with it.
    pub(super) fn resolve_contact(&mut self) {
        if !self.player.alive || self.player.hit_this_frame || self.player.is_invulnerable() {
            return;
        }
        let ship = self.player.bounds();
        let Some(idx) = self
            .enemies
            .iter()
            .position(|e| e.is_targetable() && e.bounds().overlaps(&ship))
        else {
            return;
        };
        let enemy = self.remove_enemy(idx);
        log::debug!("{} {:?} rammed the player", enemy.kind.get_name(), enemy.id);
        self.boom(enemy.center(), enemy.size.x as usize);
        self.damage_player(DamageSource::Contact);
    }

    /// Each player bullet is absorbed by the first targetable enemy it touches.
    pub(super) fn resolve_player_bullets(&mut self) {
        let mut b = 0;
        while b < self.bullets.len() {
            let shot = self.bullets[b].bounds();
            let hit = self
                .enemies
                .iter()
                .position(|e| e.is_targetable() && e.bounds().overlaps(&shot));
            match hit {
                Some(idx) => {
                    self.bullets.remove(b);
                    if self.enemies[idx].take_hit(self.config.hit_flash) {
                        self.destroy_enemy(idx);
                    }
                }
                None => b += 1,
            }
        }
    }

    /// At most one enemy bullet lands per frame; fish and invulnerability block them.
    pub(super) fn resolve_enemy_bullets(&mut self) {
        if !self.player.alive
            || self.player.hit_this_frame
            || self.player.is_invulnerable()
            || self.buffs.fish_active()
        {
            return;
        }
        let ship = self.player.bounds();
        let Some(idx) = self
            .enemy_bullets
            .iter()
            .position(|b| b.bounds().overlaps(&ship))
        else {
            return;
        };
        self.enemy_bullets.remove(idx);
        self.damage_player(DamageSource::EnemyFire);
    }

    pub(super) fn damage_player(&mut self, source: DamageSource) -> HitOutcome {
        let center = self.player.center();
        let outcome = self.player.take_hit();
        log::debug!("player hit by {source:?}: {outcome:?}, {} lives left", self.player.lives);
        self.events.push(GameEvent::PlayerHit);
        self.boom(center, PLAYER_BURST);

        match outcome {
            HitOutcome::LostWing => {}
            HitOutcome::LostLife => {
                self.player.respawn(&self.config);
                if source == DamageSource::EnemyFire {
                    self.regroup();
                    self.player
                        .grant_invulnerability(self.config.respawn_invulnerability);
                }
            }
            HitOutcome::Destroyed => {
                self.beams.clear();
                if self.captured_ship.is_none() {
                    self.captor = None;
                }
            }
        }
        outcome
    }

    /// Call every enemy back to its slot and withdraw all beams.
    fn regroup(&mut self) {
        let sway = self.formation.sway();
        for idx in 0..self.enemies.len() {
            if self.enemies[idx].is_targetable() {
                self.enemies[idx].mode = FlightMode::Formation;
                self.park(idx, sway);
            }
        }
        self.beams.clear();
        if self.captured_ship.is_none() {
            self.captor = None;
        }
    }

    /// Score, explode, maybe drop loot, and release a held ship.
    fn destroy_enemy(&mut self, idx: usize) {
        let (id, center, bottom, width, score) = {
            let e = &self.enemies[idx];
            (e.id, e.center(), e.pos.y + e.size.y, e.size.x, e.score())
        };
        self.player.score += score;
        self.events.push(GameEvent::Explosion);
        self.boom(center, width as usize);

        let r = self.rng.random::<f32>();
        if let Some(kind) = PowerupKind::roll(r, &self.config) {
            self.powerups.push(Powerup::new(
                kind,
                Vec2::new(center.x, bottom),
                self.config.powerup_drift_speed,
            ));
        }

        if self.captor == Some(id)
            && let Some(ship) = self.captured_ship.take()
        {
            log::debug!("captor {id:?} destroyed, dropping the captured ship");
            self.rescue_ship = Some(RescueShip {
                pos: center,
                size: ship.size,
                vy: self.config.rescue_drop_speed,
            });
        }
        self.remove_enemy(idx);
    }

    fn remove_enemy(&mut self, idx: usize) -> Enemy {
        let enemy = self.enemies.remove(idx);
        self.forget_enemy(enemy.id);
        enemy
    }
}
