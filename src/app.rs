use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::Config;
use crate::game::World;
use crate::input::InputManager;
use crate::renderer::{GameRenderer, RenderView};

/// The terminal front end: owns the world and drives it in real time.
pub struct App {
    running: bool,
    world: World,
    last_frame_time: Instant,
    fps: u32,
    input_manager: InputManager,
    renderer: GameRenderer,
    /// None when no output device could be opened
    audio_manager: Option<AudioManager>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, reports_release: bool) -> Self {
        let audio_manager = match AudioManager::new() {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("audio unavailable, continuing without sound: {err}");
                None
            }
        };
        Self {
            running: true,
            world: World::new(config),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events()?;
            if self.input_manager.quit_requested() {
                log::info!("quit requested");
                self.running = false;
                continue;
            }

            let dt = self.world.config.clamp_dt(frame_time.as_secs_f32());
            let input = self.input_manager.state();
            self.world.advance(dt, &input);

            for event in self.world.drain_events() {
                if let Some(audio) = &self.audio_manager {
                    audio.play(event);
                }
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    world: &self.world,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Keep the loop near 60 FPS without spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }
}
