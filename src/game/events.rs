use crate::entities::PowerupKind;

/// Fire-and-forget notifications for the sound layer.
///
/// The simulation queues these while advancing and never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    ShotFired,
    Explosion,
    PlayerHit,
    BeamStart,
    Capture,
    Rescue,
    PowerupCollected(PowerupKind),
    WaveCleared,
    Victory,
    GameOver,
    Paused,
    Resumed,
}
