use rodio::{OutputStream, OutputStreamHandle, Sink, Source, source::SineWave};
use std::time::Duration;

use crate::game::GameEvent;

/// A note: frequency in Hz and length in milliseconds
type Tone = (f32, u64);

/// Short synthesized jingle for each event
pub fn tones_for(event: GameEvent) -> &'static [Tone] {
    match event {
        GameEvent::GameStarted => &[(392.0, 100), (523.0, 150)],
        GameEvent::ShotFired => &[(880.0, 40)],
        GameEvent::Explosion => &[(220.0, 60), (160.0, 80)],
        GameEvent::PlayerHit => &[(300.0, 80), (200.0, 80), (120.0, 160)],
        GameEvent::BeamStart => &[(500.0, 80), (600.0, 80), (700.0, 80)],
        GameEvent::Capture => &[(700.0, 100), (500.0, 100), (300.0, 200)],
        GameEvent::Rescue => &[(523.0, 80), (659.0, 80), (784.0, 160)],
        GameEvent::PowerupCollected(_) => &[(660.0, 60), (990.0, 90)],
        GameEvent::WaveCleared => &[(523.0, 100), (784.0, 150)],
        GameEvent::Victory => &[(523.0, 120), (659.0, 120), (784.0, 120), (1046.0, 300)],
        GameEvent::GameOver => &[(392.0, 200), (330.0, 200), (262.0, 400)],
        GameEvent::Paused | GameEvent::Resumed => &[(440.0, 60)],
    }
}

fn volume_for(event: GameEvent) -> f32 {
    match event {
        GameEvent::ShotFired => 0.03,
        GameEvent::Explosion => 0.06,
        _ => 0.08,
    }
}

/// Plays a tone sequence per game event
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl AudioManager {
    /// Open the default output device.
    pub fn new() -> color_eyre::Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Fire and forget; playback errors are ignored so sound never stops the game.
    pub fn play(&self, event: GameEvent) {
        let Ok(sink) = Sink::try_new(&self.stream_handle) else {
            return;
        };
        sink.set_volume(volume_for(event));
        for &(freq, ms) in tones_for(event) {
            sink.append(SineWave::new(freq).take_duration(Duration::from_millis(ms)));
        }
        sink.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PowerupKind;

    #[test]
    fn test_every_event_has_a_jingle() {
        let events = [
            GameEvent::GameStarted,
            GameEvent::ShotFired,
            GameEvent::Explosion,
            GameEvent::PlayerHit,
            GameEvent::BeamStart,
            GameEvent::Capture,
            GameEvent::Rescue,
            GameEvent::PowerupCollected(PowerupKind::Fish),
            GameEvent::WaveCleared,
            GameEvent::Victory,
            GameEvent::GameOver,
            GameEvent::Paused,
            GameEvent::Resumed,
        ];
        for event in events {
            let tones = tones_for(event);
            assert!(!tones.is_empty(), "{event:?}");
            assert!(tones.iter().all(|&(f, ms)| f > 20.0 && ms > 0));
        }
    }

    #[test]
    fn test_shots_are_quietest() {
        assert!(volume_for(GameEvent::ShotFired) < volume_for(GameEvent::Victory));
    }
}
