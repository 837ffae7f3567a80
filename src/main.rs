use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::{self, File};
use std::io::stdout;

use gizmos_revenge::app::App;
use gizmos_revenge::config::Config;

const LOG_FILE: &str = "gizmos-revenge.log";

/// The terminal belongs to the game, so logs go to a file.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("creating {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Defaults, or a JSON override file given as the first argument.
fn load_config() -> Result<Config> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(&path).wrap_err_with(|| format!("reading config {path}"))?;
    let config =
        Config::from_json(&text).wrap_err_with(|| format!("parsing config {path}"))?;
    log::info!("loaded config from {path}");
    Ok(config)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;
    let config = load_config()?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!("keyboard enhancement supported: {supports_keyboard_enhancement}");

    enable_raw_mode()?;
    let mut out = stdout();
    let setup = execute!(out, EnterAlternateScreen).and_then(|()| {
        // Release events need the enhancement flags, pushed after entering the alternate screen
        if supports_keyboard_enhancement {
            execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        Ok(())
    });

    let result = setup
        .map_err(color_eyre::Report::from)
        .and_then(|()| play(config, supports_keyboard_enhancement));
    let restored = restore_terminal(supports_keyboard_enhancement);
    settle(result, restored)
}

fn play(config: Config, supports_keyboard_enhancement: bool) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    App::new(config, supports_keyboard_enhancement).run(&mut terminal)
}

/// Undo raw mode, the alternate screen and the enhancement flags.
fn restore_terminal(supports_keyboard_enhancement: bool) -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = stdout();
    if supports_keyboard_enhancement {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    execute!(stdout, LeaveAlternateScreen, Show)?;
    Ok(())
}

/// The game's own error wins over a failed restore.
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            log::error!("terminal restore failed: {restore_err}");
            Err(err)
        }
        (result, restored) => result.and(restored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    #[test]
    fn test_startup_error_survives_restore() {
        let err = settle(Err(eyre!("no terminal")), Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "no terminal");
    }

    #[test]
    fn test_game_error_beats_restore_error() {
        let err = settle(Err(eyre!("draw failed")), Err(eyre!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_run() {
        let err = settle(Ok(()), Err(eyre!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
