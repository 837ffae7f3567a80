//! Tractor beams, the capture itself, and the captured ship riding its captor.

use glam::Vec2;

use super::{GameEvent, World};
use crate::entities::{CapturedShip, EnemyId, FlightMode, HitOutcome};

impl World {
    pub(super) fn update_beams(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.beams.len() {
            if self.step_beam(i, dt) {
                i += 1;
            } else {
                self.beams.remove(i);
            }
        }
    }

    /// Advance one beam. Returns false when the beam should be discarded.
    fn step_beam(&mut self, i: usize, dt: f32) -> bool {
        let owner = self.beams[i].owner;
        let Some(captor_idx) = self.find_enemy(owner) else {
            log::warn!("beam {:?} lost its owner {:?}, dropping it", self.beams[i].id, owner);
            self.release_reservation(owner);
            return false;
        };

        self.beams[i].tick_life(dt);
        if self.beams[i].is_expired() {
            let latched = !self.beams[i].can_capture();
            let home = self.path_home(captor_idx, self.config.beam_dive_speed * 0.8);
            self.enemies[captor_idx].mode = FlightMode::Return(home);
            if !latched {
                self.release_reservation(owner);
            }
            return false;
        }

        if !self.beams[i].can_capture() {
            return true;
        }
        self.beams[i].extend(dt, self.config.beam_extend_speed, self.config.beam_duration);

        let captor = &self.enemies[captor_idx];
        let emitter = Vec2::new(captor.center().x, captor.pos.y + captor.size.y);
        let offset = self.player.center() - emitter;
        let catchable = self.captured_ship.is_none()
            && self.player.alive
            && !self.player.hit_this_frame
            && !self.player.is_invulnerable();
        if catchable
            && self.beams[i].covers(offset, self.config.beam_width, self.config.beam_cone_spread)
        {
            self.capture_player(i, captor_idx);
        }
        true
    }

    /// The player is pulled into the beam: one hit is taken and the ship
    /// is attached to the captor.
    fn capture_player(&mut self, beam_idx: usize, captor_idx: usize) {
        let captor_id = self.enemies[captor_idx].id;
        let ship = CapturedShip {
            pos: self.player.pos,
            size: self.player.size,
        };

        let outcome = self.player.take_hit();
        log::debug!("player captured by {captor_id:?} ({outcome:?})");
        self.captor = Some(captor_id);
        self.captured_ship = Some(ship);
        self.beams[beam_idx].latch(self.config.beam_duration);
        self.events.push(GameEvent::Capture);

        if outcome != HitOutcome::Destroyed {
            self.player.respawn(&self.config);
            self.player.fire_cooldown = self.config.fire_cooldown;
        }
    }

    /// Keep the captured ship riding its captor, or drop it if the captor is gone.
    pub(super) fn update_captured_ship(&mut self) {
        if self.captured_ship.is_none() {
            return;
        }
        let Some(idx) = self.captor.and_then(|id| self.find_enemy(id)) else {
            log::warn!("captured ship lost its captor {:?}, dropping it", self.captor);
            self.captor = None;
            self.captured_ship = None;
            return;
        };
        let (pos, size) = (self.enemies[idx].pos, self.enemies[idx].size);
        if let Some(ship) = self.captured_ship.as_mut() {
            ship.follow(pos, size);
        }
    }

    /// Clear the capture reservation held by `id` unless it holds a ship.
    pub(super) fn release_reservation(&mut self, id: EnemyId) {
        if self.captor == Some(id) && self.captured_ship.is_none() {
            self.captor = None;
        }
    }

    /// Drop every link into an enemy that is about to disappear.
    pub(super) fn forget_enemy(&mut self, id: EnemyId) {
        self.beams.retain(|b| b.owner != id);
        if self.captor == Some(id) {
            self.captor = None;
            self.captured_ship = None;
        }
    }
}
