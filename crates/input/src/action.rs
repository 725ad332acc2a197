use farmstead_kernel::{AppState, Direction};

/// Backend-neutral names for the keys the demo listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    F1,
    Escape,
    Other,
}

/// A high-level action produced by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the orbit camera one step.
    Orbit(Direction),
    /// Show or hide the debug overlay.
    ToggleOverlay,
    /// Close the application.
    Quit,
    /// Key is not bound.
    Noop,
}

impl Action {
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::ArrowLeft => Action::Orbit(Direction::Left),
            Key::ArrowRight => Action::Orbit(Direction::Right),
            Key::ArrowUp => Action::Orbit(Direction::Up),
            Key::ArrowDown => Action::Orbit(Direction::Down),
            Key::F1 => Action::ToggleOverlay,
            Key::Escape => Action::Quit,
            Key::Other => Action::Noop,
        }
    }

    /// Parse a compact move script such as `"LLUR"` (case-insensitive).
    ///
    /// Unknown characters map to [`Action::Noop`] so scripts never fail.
    pub fn parse_moves(script: &str) -> Vec<Action> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'L' => Action::Orbit(Direction::Left),
                'R' => Action::Orbit(Direction::Right),
                'U' => Action::Orbit(Direction::Up),
                'D' => Action::Orbit(Direction::Down),
                other => {
                    tracing::warn!(%other, "ignoring unknown move");
                    Action::Noop
                }
            })
            .collect()
    }

    /// Apply the state-changing part of the action.
    ///
    /// Returns `true` when a redraw is needed.
    pub fn apply(self, state: &mut AppState) -> bool {
        match self {
            Action::Orbit(direction) => {
                state.steer(direction);
                true
            }
            Action::ToggleOverlay => true,
            Action::Quit | Action::Noop => false,
        }
    }
}
