//! Enemy flight: the dive scheduler and the per-enemy state machine.

use glam::Vec2;
use rand::Rng;

use super::{GameEvent, World};
use crate::entities::{Beam, BeamId, FlightMode, Projectile};
use crate::paths::{FlightPath, beam_dive_path, dive_path, return_to_slot};

/// Horizontal spread of return and beam hover points
const PATH_JITTER: f32 = 20.0;

impl World {
    /// Count enemies currently on an attack run or flying home from one.
    pub fn active_divers(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_diving()).count()
    }

    /// Every `dive_every` seconds, maybe send one parked enemy on a dive.
    pub(super) fn launch_dives(&mut self, dt: f32) {
        if !self.player.alive {
            return;
        }
        self.dive_timer -= dt;
        if self.dive_timer > 0.0 {
            return;
        }
        self.dive_timer = self.config.dive_every;

        if self.rng.random::<f32>() >= self.config.dive_chance {
            return;
        }
        if self.active_divers() >= self.config.dive_max_active {
            return;
        }
        let Some(idx) = self.pick_diver() else {
            return;
        };

        let player_center = self.player.center();
        let enemy = &mut self.enemies[idx];
        let segments = dive_path(enemy.center(), player_center, &self.config);
        let path = FlightPath::at_speed(
            segments,
            self.config.dive_speed,
            self.config.min_segment_duration,
        );
        log::debug!("{} {:?} dives", enemy.kind.get_name(), enemy.id);
        enemy.mode = FlightMode::Dive(path);
    }

    /// Uniform pick among parked enemies, preferring ones that cannot beam.
    fn pick_diver(&mut self) -> Option<usize> {
        let parked: Vec<usize> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e.mode, FlightMode::Formation))
            .map(|(i, _)| i)
            .collect();
        let plain: Vec<usize> = parked
            .iter()
            .copied()
            .filter(|&i| !self.enemies[i].can_beam())
            .collect();
        let pool = if plain.is_empty() { parked } else { plain };
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.rng.random_range(0..pool.len())])
    }

    pub(super) fn update_enemies(&mut self, dt: f32, sway: f32) {
        for idx in 0..self.enemies.len() {
            self.enemies[idx].tick_flash(dt);
            let mode = std::mem::replace(&mut self.enemies[idx].mode, FlightMode::Formation);
            let next = self.step_enemy(idx, mode, dt, sway);
            self.enemies[idx].mode = next;
        }
    }

    fn step_enemy(&mut self, idx: usize, mode: FlightMode, dt: f32, sway: f32) -> FlightMode {
        match mode {
            FlightMode::Spawning { mut delay, entry } => {
                delay -= dt;
                if delay < 0.0 {
                    if let Some(start) = entry.position() {
                        self.enemies[idx].set_center(start);
                    }
                    FlightMode::Path(entry)
                } else {
                    FlightMode::Spawning { delay, entry }
                }
            }
            FlightMode::Path(mut path) => {
                if path.advance(dt) {
                    self.park(idx, sway);
                    FlightMode::Formation
                } else {
                    self.follow(idx, &path);
                    FlightMode::Path(path)
                }
            }
            FlightMode::Dive(mut path) => {
                if path.advance(dt) {
                    self.follow(idx, &path);
                    FlightMode::Return(self.path_home(idx, self.config.dive_speed))
                } else {
                    self.follow(idx, &path);
                    FlightMode::Dive(path)
                }
            }
            FlightMode::Return(mut path) => {
                if path.advance(dt) {
                    self.park(idx, sway);
                    FlightMode::Formation
                } else {
                    self.follow(idx, &path);
                    FlightMode::Return(path)
                }
            }
            FlightMode::BeamDive { mut path, beam } => {
                if path.advance(dt) {
                    self.follow(idx, &path);
                    let anchor = self.enemies[idx].center();
                    self.open_beam(idx, beam, anchor);
                    FlightMode::Beam { anchor, beam }
                } else {
                    self.follow(idx, &path);
                    FlightMode::BeamDive { path, beam }
                }
            }
            FlightMode::Beam { anchor, beam } => {
                if self.find_beam(beam).is_none() {
                    let id = self.enemies[idx].id;
                    log::warn!("{id:?} lost its beam {beam:?}, heading home");
                    self.release_reservation(id);
                    return FlightMode::Return(self.path_home(idx, self.config.beam_dive_speed));
                }
                self.enemies[idx].set_center(anchor);
                FlightMode::Beam { anchor, beam }
            }
            FlightMode::Formation => self.hold_formation(idx, dt, sway),
        }
    }

    /// Parked behaviour: track the swaying slot, maybe shoot, maybe start a
    /// capture run.
    fn hold_formation(&mut self, idx: usize, dt: f32, sway: f32) -> FlightMode {
        self.park(idx, sway);
        if !self.player.alive {
            return FlightMode::Formation;
        }

        if self.roll(self.config.enemy_fire_rate, dt) {
            let enemy = &self.enemies[idx];
            let dx = self.player.center().x - enemy.center().x;
            if dx.abs() < self.config.enemy_aim_window {
                let shot = Projectile::enemy_shot(
                    enemy.center().x,
                    enemy.pos.y + enemy.size.y,
                    self.config.enemy_bullet_speed,
                );
                self.enemy_bullets.push(shot);
            }
        }

        let may_beam = self.enemies[idx].can_beam()
            && self.captor.is_none()
            && self.captured_ship.is_none()
            && !self.player.dual;
        if may_beam && self.roll(self.config.beam_rate, dt) {
            return self.start_beam_dive(idx);
        }
        FlightMode::Formation
    }

    /// Reserve the capture slot for this enemy and send it to its hover point.
    fn start_beam_dive(&mut self, idx: usize) -> FlightMode {
        let beam = BeamId(self.next_id());
        let jitter = self.jitter(PATH_JITTER);
        let enemy = &self.enemies[idx];
        let segments = beam_dive_path(enemy.center(), self.player.center(), jitter);
        let path = FlightPath::at_speed(
            segments,
            self.config.beam_dive_speed,
            self.config.min_segment_duration,
        );
        self.captor = Some(enemy.id);
        log::debug!("{} {:?} starts a beam run", enemy.kind.get_name(), enemy.id);
        self.events.push(GameEvent::BeamStart);
        FlightMode::BeamDive { path, beam }
    }

    /// Hang a new beam under the enemy, long enough to reach past the player.
    fn open_beam(&mut self, idx: usize, id: BeamId, anchor: Vec2) {
        let reach = (self.player.pos.y - anchor.y).max(0.0) + self.config.beam_len_margin;
        let max_len = reach.max(self.config.beam_min_len);
        self.beams.push(Beam::new(id, self.enemies[idx].id, max_len));
    }

    /// A return path from the enemy's current position to its live slot.
    pub(super) fn path_home(&mut self, idx: usize, speed: f32) -> FlightPath {
        let jitter = self.jitter(PATH_JITTER);
        let enemy = &mut self.enemies[idx];
        enemy.slot.pos = self.formation.slot(enemy.slot.col, enemy.slot.row);
        let segments = return_to_slot(enemy.center(), enemy.slot.pos, jitter);
        FlightPath::at_speed(segments, speed, self.config.min_segment_duration)
    }

    /// Snap into the slot, refreshing the slot position from the grid.
    pub(super) fn park(&mut self, idx: usize, sway: f32) {
        let enemy = &mut self.enemies[idx];
        enemy.slot.pos = self.formation.slot(enemy.slot.col, enemy.slot.row);
        enemy.snap_to_slot(sway);
    }

    fn follow(&mut self, idx: usize, path: &FlightPath) {
        if let Some(point) = path.position() {
            self.enemies[idx].set_center(point);
        }
    }
}
