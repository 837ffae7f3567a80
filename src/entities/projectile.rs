use glam::Vec2;

use crate::geometry::Rect;

pub const PLAYER_SHOT_SIZE: Vec2 = Vec2::new(3.0, 18.0);
pub const ENEMY_SHOT_SIZE: Vec2 = Vec2::new(2.0, 6.0);
/// How far past the viewport edge a bullet travels before it is dropped
pub const OFFSCREEN_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity; negative moves up
    pub vy: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    /// Player bullet centred on `center_x`, leaving from just above `top_y`.
    pub fn player_shot(center_x: f32, top_y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - PLAYER_SHOT_SIZE.x / 2.0, top_y - 6.0),
            size: PLAYER_SHOT_SIZE,
            vy: -speed,
            owner: ProjectileOwner::Player,
        }
    }

    /// Enemy bullet dropped from `center_x` at `bottom_y`.
    pub fn enemy_shot(center_x: f32, bottom_y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - ENEMY_SHOT_SIZE.x / 2.0, bottom_y),
            size: ENEMY_SHOT_SIZE,
            vy: speed,
            owner: ProjectileOwner::Enemy,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.vy * dt;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_out_of_bounds(&self, view_h: f32) -> bool {
        match self.owner {
            ProjectileOwner::Player => self.pos.y < -OFFSCREEN_MARGIN,
            ProjectileOwner::Enemy => self.pos.y > view_h + OFFSCREEN_MARGIN,
        }
    }
}
