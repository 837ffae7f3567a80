mod beam;
mod enemy;
mod formation;
mod particle;
mod pickup;
mod player;
mod projectile;
mod star;

// Re-export all public types
pub use beam::{Beam, BeamId, BeamPhase, CapturedShip};
pub use enemy::{Enemy, EnemyId, EnemyKind, EnemyStats, FlightMode, FormationSlot};
pub use formation::Formation;
pub use particle::{PARTICLE_GRAVITY, Particle, create_explosion_particles};
pub use pickup::{Powerup, PowerupKind, RescueShip};
pub use player::{DAMAGE_FLASH, HitOutcome, PLAYER_SIZE, Player, SIDE_MARGIN};
pub use projectile::{ENEMY_SHOT_SIZE, PLAYER_SHOT_SIZE, Projectile, ProjectileOwner};
pub use star::{Star, create_star_field};
