//! The simulation aggregate and its per-frame entry point.
//!
//! `World` owns every piece of mutable game state. `World::advance` is the
//! single writer: it runs each subsystem exactly once per call, in a fixed
//! order, and front ends only read the result.

mod capture;
mod combat;
mod events;
mod flight;
mod ship;
mod waves;

pub use events::GameEvent;
pub use ship::Buffs;
pub use waves::{WAVE_PLANS, WaveEntry, wave_plan};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::entities::{
    Beam, BeamId, CapturedShip, Enemy, EnemyId, Formation, Particle, Player, Powerup, Projectile,
    RescueShip, Star, create_explosion_particles, create_star_field,
};
use crate::input::{InputAction, InputState};

/// Top-level mode; only `Playing` runs the entity simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Title,
    Playing,
    Paused,
    GameOver,
    Victory,
}

pub struct World {
    pub config: Config,
    pub mode: GameMode,
    pub wave: u32,
    pub stars: Vec<Star>,
    pub player: Player,
    pub bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub powerups: Vec<Powerup>,
    pub beams: Vec<Beam>,
    pub formation: Formation,
    /// Countdown to the next dive roll
    pub dive_timer: f32,
    /// The single enemy allowed to run a capture; a weak reference
    pub captor: Option<EnemyId>,
    /// Player ship held by the captor
    pub captured_ship: Option<CapturedShip>,
    pub rescue_ship: Option<RescueShip>,
    pub buffs: Buffs,
    events: Vec<GameEvent>,
    prev_input: InputState,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// A world on the title screen, seeded from the config or the OS.
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = create_star_field(config.star_count, config.view_w, config.view_h, &mut rng);
        Self {
            mode: GameMode::Title,
            wave: 0,
            stars,
            player: Player::new(&config),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            beams: Vec::new(),
            formation: Formation::new(config.view_w),
            dive_timer: config.dive_every,
            captor: None,
            captured_ship: None,
            rescue_ship: None,
            buffs: Buffs::default(),
            events: Vec::new(),
            prev_input: InputState::default(),
            rng,
            next_id: 1,
            config,
        }
    }

    /// Start a fresh session at wave 1.
    pub fn reset(&mut self) {
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.powerups.clear();
        self.beams.clear();
        self.player = Player::new(&self.config);
        self.formation.reset();
        self.dive_timer = self.config.dive_every;
        self.captor = None;
        self.captured_ship = None;
        self.rescue_ship = None;
        self.buffs = Buffs::default();
        self.mode = GameMode::Playing;
        self.wave = 1;
        log::info!("new game, {} lives", self.player.lives);
        self.events.push(GameEvent::GameStarted);
        self.spawn_wave();
    }

    /// Advance the whole game by `dt` seconds given the currently held input.
    ///
    /// `dt` is expected to be clamped by the caller.
    pub fn advance(&mut self, dt: f32, input: &InputState) {
        self.update_stars(dt);

        match self.mode {
            GameMode::Title | GameMode::GameOver | GameMode::Victory => {
                if self.just_pressed(input, InputAction::Confirm) {
                    self.reset();
                }
            }
            GameMode::Playing => self.update_playing(dt, input),
            GameMode::Paused => {
                if self.just_pressed(input, InputAction::Pause) {
                    self.mode = GameMode::Playing;
                    self.events.push(GameEvent::Resumed);
                }
            }
        }

        self.prev_input = input.clone();
    }

    /// Take the notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn find_enemy(&self, id: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id == id)
    }

    pub fn find_beam(&self, id: BeamId) -> Option<usize> {
        self.beams.iter().position(|b| b.id == id)
    }

    pub fn is_game_over(&self) -> bool {
        !self.player.alive
    }

    fn update_playing(&mut self, dt: f32, input: &InputState) {
        self.player.hit_this_frame = false;

        if self.just_pressed(input, InputAction::Pause) {
            self.mode = GameMode::Paused;
            self.events.push(GameEvent::Paused);
            return;
        }

        self.formation.advance(dt);
        let sway = self.formation.sway();

        self.launch_dives(dt);
        self.update_player(dt, input);
        self.update_projectiles(dt);
        self.update_pickups(dt);
        self.update_enemies(dt, sway);

        self.resolve_contact();
        self.resolve_player_bullets();
        self.resolve_enemy_bullets();

        self.update_beams(dt);
        self.update_captured_ship();
        self.update_particles(dt);
        self.check_wave_clear();

        if self.is_game_over() && self.mode == GameMode::Playing {
            log::info!("game over at wave {} with {} points", self.wave, self.player.score);
            self.mode = GameMode::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    fn update_stars(&mut self, dt: f32) {
        let (w, h) = (self.config.view_w, self.config.view_h);
        for star in &mut self.stars {
            star.update(dt, w, h, &mut self.rng);
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        let view_h = self.config.view_h;
        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.bullets.retain(|b| !b.is_out_of_bounds(view_h));
        for bullet in &mut self.enemy_bullets {
            bullet.update(dt);
        }
        self.enemy_bullets.retain(|b| !b.is_out_of_bounds(view_h));
    }

    fn update_particles(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    fn check_wave_clear(&mut self) {
        if self.is_game_over() || !self.enemies.is_empty() {
            return;
        }
        log::info!("wave {} cleared", self.wave);
        self.events.push(GameEvent::WaveCleared);
        self.wave += 1;
        if self.wave > self.config.waves_for_victory {
            log::info!("victory with {} points", self.player.score);
            self.mode = GameMode::Victory;
            self.events.push(GameEvent::Victory);
        } else {
            self.spawn_wave();
        }
    }

    fn just_pressed(&self, input: &InputState, action: InputAction) -> bool {
        input.is_held(action) && !self.prev_input.is_held(action)
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Per-frame Bernoulli trial for an event expected `rate` times a second.
    ///
    /// Approximately frame-rate independent for small `dt`.
    fn roll(&mut self, rate: f32, dt: f32) -> bool {
        let p = (rate * dt).clamp(0.0, 1.0);
        p > 0.0 && self.rng.random::<f32>() < p
    }

    fn jitter(&mut self, half_range: f32) -> f32 {
        self.rng.random_range(-half_range..half_range)
    }

    fn boom(&mut self, center: Vec2, count: usize) {
        let burst = create_explosion_particles(center, count, &mut self.rng);
        self.particles.extend(burst);
    }
}
