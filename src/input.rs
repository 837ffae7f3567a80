use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// How long a key counts as held after its last press or repeat when the
/// terminal cannot report releases
const HOLD_TIMEOUT: Duration = Duration::from_millis(150);

/// Semantic game actions, independent of the physical keys bound to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Left,
    Right,
    Fire,
    Confirm,
    Pause,
    Quit,
}

/// Snapshot of which actions are currently held down.
///
/// This is all the simulation sees of the keyboard; edge detection happens
/// on its side by comparing consecutive snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: HashSet<InputAction>,
}

impl InputState {
    pub fn from_actions(actions: impl IntoIterator<Item = InputAction>) -> Self {
        Self {
            held: actions.into_iter().collect(),
        }
    }

    pub fn press(&mut self, action: InputAction) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Key binding table
pub fn action_for(key: &KeyEvent) -> Option<InputAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputAction::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::Right),
        KeyCode::Char(' ') => Some(InputAction::Fire),
        KeyCode::Enter => Some(InputAction::Confirm),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(InputAction::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputAction::Quit),
        _ => None,
    }
}

/// Manages input polling and turns raw key events into an [`InputState`]
pub struct InputManager {
    state: InputState,
    /// Pressed since the last poll; a tap released within one batch still
    /// shows up for a frame
    tapped: HashSet<InputAction>,
    /// Last press or repeat per held action; only used without release events
    last_seen: HashMap<InputAction, Instant>,
    reports_release: bool,
}

impl InputManager {
    /// `reports_release` should be true when the terminal sends key release
    /// events (keyboard enhancement flags are active).
    pub fn new(reports_release: bool) -> Self {
        Self {
            state: InputState::default(),
            tapped: HashSet::new(),
            last_seen: HashMap::new(),
            reports_release,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Should be called once per frame before reading the state.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.begin_frame();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key_event(key, Instant::now());
            }
        }
        if !self.reports_release {
            self.expire_stale(Instant::now());
        }
        Ok(())
    }

    /// Held actions plus anything tapped since the last poll.
    pub fn state(&self) -> InputState {
        let mut state = self.state.clone();
        for &action in &self.tapped {
            state.press(action);
        }
        state
    }

    pub fn quit_requested(&self) -> bool {
        self.state.is_held(InputAction::Quit) || self.tapped.contains(&InputAction::Quit)
    }

    fn begin_frame(&mut self) {
        self.tapped.clear();
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        let Some(action) = action_for(&key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.state.press(action);
                self.tapped.insert(action);
                self.last_seen.insert(action, now);
            }
            KeyEventKind::Release => {
                self.state.release(action);
                self.last_seen.remove(&action);
            }
        }
    }

    /// Fallback for terminals without release events: a key is released
    /// once it stops repeating.
    fn expire_stale(&mut self, now: Instant) {
        let state = &mut self.state;
        self.last_seen.retain(|action, seen| {
            let alive = now.duration_since(*seen) < HOLD_TIMEOUT;
            if !alive {
                state.release(*action);
            }
            alive
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_bindings() {
        let press = |code| action_for(&key(code, KeyEventKind::Press));
        assert_eq!(press(KeyCode::Left), Some(InputAction::Left));
        assert_eq!(press(KeyCode::Char('d')), Some(InputAction::Right));
        assert_eq!(press(KeyCode::Char(' ')), Some(InputAction::Fire));
        assert_eq!(press(KeyCode::Enter), Some(InputAction::Confirm));
        assert_eq!(press(KeyCode::Esc), Some(InputAction::Pause));
        assert_eq!(press(KeyCode::Char('q')), Some(InputAction::Quit));
        assert_eq!(press(KeyCode::Char('x')), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ctrl_c), Some(InputAction::Quit));
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_key_event(key(KeyCode::Left, KeyEventKind::Press), now);
        input.handle_key_event(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        assert!(input.state().is_held(InputAction::Left));
        assert!(input.state().is_held(InputAction::Fire));

        input.begin_frame();
        input.handle_key_event(key(KeyCode::Left, KeyEventKind::Release), now);
        assert!(!input.state().is_held(InputAction::Left));
        assert!(input.state().is_held(InputAction::Fire));
    }

    #[test]
    fn test_tap_inside_one_poll_lasts_a_frame() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.begin_frame();
        input.handle_key_event(key(KeyCode::Char('p'), KeyEventKind::Press), now);
        input.handle_key_event(key(KeyCode::Char('p'), KeyEventKind::Release), now);
        assert!(input.state().is_held(InputAction::Pause));

        input.begin_frame();
        assert!(!input.state().is_held(InputAction::Pause));
        assert!(input.state().is_empty());
    }

    #[test]
    fn test_quit_tap_is_seen() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.begin_frame();
        input.handle_key_event(key(KeyCode::Char('q'), KeyEventKind::Press), now);
        input.handle_key_event(key(KeyCode::Char('q'), KeyEventKind::Release), now);
        assert!(input.quit_requested());
    }

    #[test]
    fn test_held_keys_expire_without_release_events() {
        let mut input = InputManager::new(false);
        let start = Instant::now();
        input.handle_key_event(key(KeyCode::Right, KeyEventKind::Press), start);
        input.expire_stale(start + Duration::from_millis(50));
        assert!(input.state().is_held(InputAction::Right));

        input.handle_key_event(key(KeyCode::Right, KeyEventKind::Repeat), start + Duration::from_millis(100));
        input.expire_stale(start + Duration::from_millis(200));
        assert!(input.state().is_held(InputAction::Right));

        input.begin_frame();
        input.expire_stale(start + Duration::from_millis(400));
        assert!(input.state().is_empty());
    }

    #[test]
    fn test_input_state_snapshot() {
        let mut state = InputState::from_actions([InputAction::Fire, InputAction::Left]);
        assert!(state.is_held(InputAction::Fire));
        state.release(InputAction::Fire);
        assert!(!state.is_held(InputAction::Fire));
        state.clear();
        assert_eq!(state, InputState::default());
    }
}
