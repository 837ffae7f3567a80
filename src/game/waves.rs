use super::World;
use crate::entities::{Enemy, EnemyId, EnemyKind, FormationSlot};
use crate::paths::{EntryPath, FlightPath};

/// One enemy in a wave: where it parks, what it is, how it flies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveEntry {
    pub col: u32,
    pub row: u32,
    pub kind: EnemyKind,
    pub path: EntryPath,
}

const fn e(col: u32, row: u32, kind: EnemyKind, path: EntryPath) -> WaveEntry {
    WaveEntry {
        col,
        row,
        kind,
        path,
    }
}

use EnemyKind::{Catnip, Feather, Laser, Mouse, Yarn};
use EntryPath::{Left, LoopLeft, LoopRight, Right};

/// Authored waves; anything past the last one replays it.
pub const WAVE_PLANS: [&[WaveEntry]; 10] = [
    &[
        e(2, 0, Mouse, Left),
        e(4, 0, Mouse, Left),
        e(5, 0, Mouse, Right),
        e(7, 0, Mouse, Right),
        e(3, 1, Feather, LoopLeft),
        e(6, 1, Feather, LoopRight),
    ],
    &[
        e(1, 0, Feather, Left),
        e(8, 0, Feather, Right),
        e(3, 1, Feather, LoopLeft),
        e(6, 1, Feather, LoopRight),
        e(4, 2, Mouse, LoopLeft),
        e(5, 2, Mouse, LoopRight),
    ],
    // first beamers
    &[
        e(2, 0, Mouse, Left),
        e(7, 0, Mouse, Right),
        e(3, 1, Yarn, LoopLeft),
        e(6, 1, Yarn, LoopRight),
        e(4, 2, Laser, LoopLeft),
        e(5, 2, Laser, LoopRight),
    ],
    &[
        e(1, 0, Mouse, Left),
        e(8, 0, Mouse, Right),
        e(2, 1, Feather, LoopLeft),
        e(7, 1, Feather, LoopRight),
        e(4, 2, Catnip, LoopLeft),
        e(5, 2, Catnip, LoopRight),
    ],
    &[
        e(2, 0, Feather, Left),
        e(7, 0, Feather, Right),
        e(3, 1, Yarn, LoopLeft),
        e(6, 1, Yarn, LoopRight),
        e(4, 2, Laser, LoopLeft),
        e(5, 2, Laser, LoopRight),
    ],
    &[
        e(1, 0, Yarn, Left),
        e(8, 0, Yarn, Right),
        e(2, 1, Catnip, LoopLeft),
        e(7, 1, Catnip, LoopRight),
        e(4, 2, Feather, LoopLeft),
        e(5, 2, Feather, LoopRight),
    ],
    &[
        e(2, 0, Mouse, Left),
        e(7, 0, Mouse, Right),
        e(3, 1, Catnip, LoopLeft),
        e(6, 1, Catnip, LoopRight),
        e(3, 2, Laser, LoopLeft),
        e(4, 2, Laser, LoopLeft),
        e(6, 2, Laser, LoopRight),
    ],
    &[
        e(1, 0, Mouse, Left),
        e(8, 0, Feather, Right),
        e(2, 1, Yarn, LoopLeft),
        e(7, 1, Catnip, LoopRight),
        e(4, 2, Laser, LoopLeft),
        e(5, 2, Laser, LoopRight),
    ],
    &[
        e(2, 0, Catnip, Left),
        e(7, 0, Catnip, Right),
        e(1, 1, Yarn, LoopLeft),
        e(8, 1, Yarn, LoopRight),
        e(3, 2, Laser, LoopLeft),
        e(4, 2, Laser, LoopLeft),
        e(6, 2, Laser, LoopRight),
    ],
    &[
        e(0, 0, Feather, Left),
        e(9, 0, Feather, Right),
        e(2, 1, Catnip, LoopLeft),
        e(7, 1, Catnip, LoopRight),
        e(2, 2, Laser, LoopLeft),
        e(3, 2, Laser, LoopLeft),
        e(4, 2, Laser, LoopLeft),
        e(5, 2, Laser, LoopRight),
    ],
];

/// Plan for a 1-based wave number; 0 is treated as wave 1.
pub fn wave_plan(wave: u32) -> &'static [WaveEntry] {
    let idx = (wave.max(1) as usize - 1).min(WAVE_PLANS.len() - 1);
    WAVE_PLANS[idx]
}

impl World {
    /// Queue the current wave's enemies, each one waiting a little longer
    /// than the previous before flying in.
    pub(super) fn spawn_wave(&mut self) {
        let plan = wave_plan(self.wave);
        let stagger = self.config.wave_spawn_stagger;
        log::info!("spawning wave {} ({} enemies)", self.wave, plan.len());

        for (i, entry) in plan.iter().enumerate() {
            let slot_pos = self.formation.slot(entry.col, entry.row);
            let segments = entry.path.build(slot_pos, self.config.view_w);
            let path = FlightPath::timed(segments, self.config.entry_segment_duration);
            let start = path.position().unwrap_or(slot_pos);

            let slot = FormationSlot {
                col: entry.col,
                row: entry.row,
                pos: slot_pos,
            };
            let id = EnemyId(self.next_id());
            let mut enemy = Enemy::new(id, entry.kind, slot, path, i as f32 * stagger);
            enemy.set_center(start);
            self.enemies.push(enemy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entities::FlightMode;

    #[test]
    fn test_wave_plan_clamps() {
        assert_eq!(wave_plan(0), WAVE_PLANS[0]);
        assert_eq!(wave_plan(1), WAVE_PLANS[0]);
        assert_eq!(wave_plan(10), WAVE_PLANS[9]);
        assert_eq!(wave_plan(42), WAVE_PLANS[9]);
    }

    #[test]
    fn test_plans_fit_the_grid() {
        for plan in WAVE_PLANS {
            assert!(!plan.is_empty());
            for entry in plan {
                assert!(entry.col < 10 && entry.row < 4);
            }
        }
    }

    #[test]
    fn test_spawn_wave_staggers_entries() {
        let mut world = World::with_seed(Config::default(), 5);
        world.reset();
        assert_eq!(world.enemies.len(), 6);
        let delays: Vec<f32> = world
            .enemies
            .iter()
            .map(|e| match e.mode {
                FlightMode::Spawning { delay, .. } => delay,
                _ => panic!("expected spawning, got {}", e.mode.name()),
            })
            .collect();
        assert_eq!(delays[0], 0.0);
        for pair in delays.windows(2) {
            assert!((pair[1] - pair[0] - 0.22).abs() < 1e-5);
        }
    }

    #[test]
    fn test_spawned_enemies_have_unique_ids() {
        let mut world = World::with_seed(Config::default(), 5);
        world.reset();
        let mut ids: Vec<u32> = world.enemies.iter().map(|e| e.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), world.enemies.len());
    }
}
