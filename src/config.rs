//! Tunable game parameters.
//!
//! Every field has an authored default; a JSON file may override any subset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // viewport
    pub view_w: f32,
    pub view_h: f32,
    pub star_count: usize,

    // player
    pub player_speed: f32,
    pub fire_cooldown: f32,
    pub lives: u32,
    pub dual_shot_spacing: f32,
    pub respawn_invulnerability: f32,

    // bullets
    pub bullet_speed: f32,
    pub enemy_bullet_speed: f32,

    // enemies
    /// Per-second chance that a formation enemy fires
    pub enemy_fire_rate: f32,
    /// Enemies only fire when the player is within this horizontal distance
    pub enemy_aim_window: f32,
    pub hit_flash: f32,
    /// Duration of each segment of an entry path, in seconds
    pub entry_segment_duration: f32,
    pub min_segment_duration: f32,

    // dive attacks
    pub dive_every: f32,
    pub dive_chance: f32,
    pub dive_max_active: usize,
    pub dive_lead: f32,
    pub dive_entry_dx: f32,
    pub dive_hook_dx: f32,
    pub dive_y1: f32,
    pub dive_y2: f32,
    pub dive_exit_y: f32,
    /// Linear speed (px/s) used to time dive and return segments
    pub dive_speed: f32,

    // capture beam
    /// Per-second chance that an eligible beam enemy starts a capture
    pub beam_rate: f32,
    pub beam_duration: f32,
    pub beam_width: f32,
    pub beam_extend_speed: f32,
    pub beam_dive_speed: f32,
    pub beam_cone_spread: f32,
    pub beam_min_len: f32,
    pub beam_len_margin: f32,

    // powerups
    pub heart_drop_chance: f32,
    pub fish_drop_chance: f32,
    pub treat_drop_chance: f32,
    pub powerup_drift_speed: f32,
    pub powerup_drift_toward: f32,
    pub powerup_catch_radius: f32,
    pub treat_duration: f32,
    pub treat_speed_boost: f32,
    pub treat_fire_boost: f32,
    pub fish_duration: f32,

    // rescue ship
    pub rescue_drop_speed: f32,
    pub rescue_catch_radius: f32,
    pub rescue_bonus: u32,

    // progression
    pub waves_for_victory: u32,
    pub wave_spawn_stagger: f32,

    /// Upper bound the front end applies to a frame's elapsed time
    pub max_frame_dt: f32,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view_w: 224.0,
            view_h: 288.0,
            star_count: 120,

            player_speed: 96.0,
            fire_cooldown: 0.243,
            lives: 3,
            dual_shot_spacing: 8.0,
            respawn_invulnerability: 2.0,

            bullet_speed: 174.0,
            enemy_bullet_speed: 114.0,

            enemy_fire_rate: 0.0105 * 60.0,
            enemy_aim_window: 40.0,
            hit_flash: 0.08,
            entry_segment_duration: 1.0,
            min_segment_duration: 0.06,

            dive_every: 2.0,
            dive_chance: 0.7,
            dive_max_active: 2,
            dive_lead: 0.25,
            dive_entry_dx: 48.0,
            dive_hook_dx: 70.0,
            dive_y1: 60.0,
            dive_y2: 140.0,
            dive_exit_y: 330.0,
            dive_speed: 125.0,

            beam_rate: 0.2 * 60.0,
            beam_duration: 1.2,
            beam_width: 20.0,
            beam_extend_speed: 60.0,
            beam_dive_speed: 60.0,
            beam_cone_spread: 120.0,
            beam_min_len: 120.0,
            beam_len_margin: 80.0,

            heart_drop_chance: 0.02,
            fish_drop_chance: 0.04,
            treat_drop_chance: 0.06,
            powerup_drift_speed: 40.0,
            powerup_drift_toward: 10.0,
            powerup_catch_radius: 16.0,
            treat_duration: 8.0,
            treat_speed_boost: 1.5,
            treat_fire_boost: 1.5,
            fish_duration: 6.0,

            rescue_drop_speed: 60.0,
            rescue_catch_radius: 18.0,
            rescue_bonus: 200,

            waves_for_victory: 10,
            wave_spawn_stagger: 0.22,

            max_frame_dt: 0.033,
            seed: None,
        }
    }
}

impl Config {
    /// Parse a JSON document; absent keys keep their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Clamp a measured frame time to the configured maximum step.
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_frame_dt)
    }
}
