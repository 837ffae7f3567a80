use glam::Vec2;

use super::beam::BeamId;
use crate::geometry::Rect;
use crate::paths::FlightPath;

/// Stable identity of an enemy for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Mouse,
    Feather,
    Yarn,
    Catnip,
    /// Laser pointer boss, fires the capture beam
    Laser,
    Bee,
    Boss,
}

/// Fixed per-kind stat record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub hp: u8,
    pub score: u32,
    pub can_beam: bool,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Mouse,
        EnemyKind::Feather,
        EnemyKind::Yarn,
        EnemyKind::Catnip,
        EnemyKind::Laser,
        EnemyKind::Bee,
        EnemyKind::Boss,
    ];

    pub fn stats(self) -> EnemyStats {
        let (w, h, hp, score, can_beam) = match self {
            EnemyKind::Mouse => (10.0, 10.0, 1, 50, false),
            EnemyKind::Feather => (12.0, 12.0, 1, 80, false),
            EnemyKind::Yarn => (12.0, 12.0, 2, 100, false),
            EnemyKind::Catnip => (12.0, 12.0, 2, 120, false),
            EnemyKind::Laser => (16.0, 12.0, 3, 200, true),
            EnemyKind::Bee => (12.0, 10.0, 1, 50, false),
            EnemyKind::Boss => (14.0, 12.0, 2, 150, true),
        };
        EnemyStats {
            size: Vec2::new(w, h),
            hp,
            score,
            can_beam,
        }
    }

    /// Resolve an authored kind name. Unknown names get the `Bee` profile.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "mouse" => EnemyKind::Mouse,
            "feather" => EnemyKind::Feather,
            "yarn" => EnemyKind::Yarn,
            "catnip" => EnemyKind::Catnip,
            "laser" => EnemyKind::Laser,
            "boss" => EnemyKind::Boss,
            _ => EnemyKind::Bee,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            EnemyKind::Mouse => "mouse",
            EnemyKind::Feather => "feather",
            EnemyKind::Yarn => "yarn",
            EnemyKind::Catnip => "catnip",
            EnemyKind::Laser => "laser",
            EnemyKind::Bee => "bee",
            EnemyKind::Boss => "boss",
        }
    }
}

/// Formation slot an enemy belongs to; `pos` is the slot centre without sway
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub col: u32,
    pub row: u32,
    pub pos: Vec2,
}

/// Flight/attack state machine. Each variant carries exactly the data that
/// is meaningful in that state.
#[derive(Debug, Clone, PartialEq)]
pub enum FlightMode {
    /// Waiting off-screen before the entry maneuver starts
    Spawning { delay: f32, entry: FlightPath },
    /// Flying the entry path toward the slot
    Path(FlightPath),
    /// Parked in the formation grid
    Formation,
    /// Attack run toward the player
    Dive(FlightPath),
    /// Flying back to the slot after a dive or a beam
    Return(FlightPath),
    /// Swooping down to the beam hover point
    BeamDive { path: FlightPath, beam: BeamId },
    /// Hovering while its beam is out
    Beam { anchor: Vec2, beam: BeamId },
}

impl FlightMode {
    pub fn name(&self) -> &'static str {
        match self {
            FlightMode::Spawning { .. } => "spawning",
            FlightMode::Path(_) => "path",
            FlightMode::Formation => "formation",
            FlightMode::Dive(_) => "dive",
            FlightMode::Return(_) => "return",
            FlightMode::BeamDive { .. } => "beamdive",
            FlightMode::Beam { .. } => "beam",
        }
    }

    /// The path being followed, for modes that follow one.
    pub fn path(&self) -> Option<&FlightPath> {
        match self {
            FlightMode::Spawning { entry, .. } => Some(entry),
            FlightMode::Path(p) | FlightMode::Dive(p) | FlightMode::Return(p) => Some(p),
            FlightMode::BeamDive { path, .. } => Some(path),
            FlightMode::Formation | FlightMode::Beam { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u8,
    pub mode: FlightMode,
    pub slot: FormationSlot,
    pub flash: f32,
}

impl Enemy {
    /// Entity factory: a fresh enemy in `Spawning` mode that flies `entry`
    /// after `spawn_delay` seconds.
    pub fn new(
        id: EnemyId,
        kind: EnemyKind,
        slot: FormationSlot,
        entry: FlightPath,
        spawn_delay: f32,
    ) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos: slot.pos - stats.size * 0.5,
            size: stats.size,
            hp: stats.hp,
            mode: FlightMode::Spawning {
                delay: spawn_delay,
                entry,
            },
            slot,
            flash: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size * 0.5;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn score(&self) -> u32 {
        self.kind.stats().score
    }

    pub fn can_beam(&self) -> bool {
        self.kind.stats().can_beam
    }

    /// Spawning enemies are off-stage and take no collisions.
    pub fn is_targetable(&self) -> bool {
        !matches!(self.mode, FlightMode::Spawning { .. })
    }

    pub fn is_diving(&self) -> bool {
        matches!(self.mode, FlightMode::Dive(_) | FlightMode::Return(_))
    }

    /// Apply one bullet hit. Returns true when this hit destroys the enemy.
    pub fn take_hit(&mut self, flash: f32) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.flash = flash;
        !self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_flashing(&self) -> bool {
        self.flash > 0.0
    }

    pub fn tick_flash(&mut self, dt: f32) {
        self.flash = (self.flash - dt).max(0.0);
    }

    /// Park in the slot with the shared formation sway applied.
    pub fn snap_to_slot(&mut self, sway: f32) {
        self.set_center(self.slot.pos + Vec2::new(sway, 0.0));
    }
}
