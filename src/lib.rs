//! Gizmo's Revenge: a Galaga-style shooter for the terminal.
//!
//! The simulation lives in [`game::World`] and is driven entirely through
//! [`game::World::advance`]; it does no I/O. The terminal front end
//! ([`app`], [`renderer`], [`audio`]) only reads the world and feeds it
//! input snapshots.

pub use config::Config;
pub use entities::{
    Beam, BeamId, BeamPhase, CapturedShip, Enemy, EnemyId, EnemyKind, FlightMode, Formation,
    Player, Powerup, PowerupKind, Projectile, ProjectileOwner, RescueShip,
};
pub use game::{GameEvent, GameMode, World};
pub use input::{InputAction, InputState};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod paths;
pub mod renderer;
