//! Input latch with level-triggered movement and edge-triggered commands.
//!
//! - **Level-triggered:** `left`, `right` and `jump` mirror the physical key
//!   state and are read every tick.
//! - **Edge-triggered:** `reset` and `pause` latch on key release and are
//!   drained exactly once per frame by the frame driver with
//!   [`InputLatch::take_edges`], before the simulation step runs.
//!
//! Host events may arrive at any point between frames; every field is an
//! independent bool, so the driver always sees a consistent latch.

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Reset,
    Pause,
}

impl Key {
    /// Map a `KeyboardEvent.code` to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowUp" | "KeyW" | "Space" => Some(Key::Jump),
            "KeyR" => Some(Key::Reset),
            "KeyP" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// One-shot commands drained at the top of a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edges {
    pub reset: bool,
    pub pause: bool,
}

/// Held movement keys, as seen by one simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    reset: bool,
    pause: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => self.jump = true,
            // Commands fire on release
            Key::Reset | Key::Pause => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Jump => self.jump = false,
            Key::Reset => self.reset = true,
            Key::Pause => self.pause = true,
        }
    }

    /// Apply a raw keyboard event; unmapped codes are ignored.
    /// Returns whether the code was mapped.
    pub fn handle_code(&mut self, code: &str, down: bool) -> bool {
        match Key::from_code(code) {
            Some(key) if down => {
                self.key_down(key);
                true
            }
            Some(key) => {
                self.key_up(key);
                true
            }
            None => false,
        }
    }

    /// Consume the edge flags, clearing them
    pub fn take_edges(&mut self) -> Edges {
        let edges = Edges {
            reset: self.reset,
            pause: self.pause,
        };
        self.reset = false;
        self.pause = false;
        edges
    }

    pub fn held(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }

    /// Release held keys (the page lost the keyboard). Pending reset and
    /// pause edges stay until the next frame consumes them.
    pub fn clear(&mut self) {
        self.left = false;
        self.right = false;
        self.jump = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_map() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_code("KeyA"), Some(Key::Left));
        assert_eq!(Key::from_code("KeyD"), Some(Key::Right));
        assert_eq!(Key::from_code("Space"), Some(Key::Jump));
        assert_eq!(Key::from_code("KeyW"), Some(Key::Jump));
        assert_eq!(Key::from_code("KeyR"), Some(Key::Reset));
        assert_eq!(Key::from_code("KeyP"), Some(Key::Pause));
        assert_eq!(Key::from_code("KeyQ"), None);
        // Codes are physical positions, not characters
        assert_eq!(Key::from_code("a"), None);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut latch = InputLatch::new();
        latch.handle_code("ArrowRight", true);
        assert!(latch.held().right);
        // Still held on the next frame
        latch.take_edges();
        assert!(latch.held().right);
        latch.handle_code("ArrowRight", false);
        assert!(!latch.held().right);
    }

    #[test]
    fn test_commands_latch_on_release_only() {
        let mut latch = InputLatch::new();
        latch.handle_code("KeyP", true);
        assert_eq!(latch.take_edges(), Edges::default());
        latch.handle_code("KeyP", false);
        assert_eq!(
            latch.take_edges(),
            Edges {
                reset: false,
                pause: true
            }
        );
    }

    #[test]
    fn test_edges_are_consumed_once() {
        let mut latch = InputLatch::new();
        latch.key_up(Key::Reset);
        latch.key_up(Key::Pause);
        let edges = latch.take_edges();
        assert!(edges.reset && edges.pause);
        assert_eq!(latch.take_edges(), Edges::default());
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut latch = InputLatch::new();
        assert!(!latch.handle_code("Tab", true));
        assert!(!latch.handle_code("Tab", false));
        assert_eq!(latch, InputLatch::new());
    }

    #[test]
    fn test_clear_releases_held_keys() {
        let mut latch = InputLatch::new();
        latch.key_down(Key::Left);
        latch.key_down(Key::Jump);
        latch.clear();
        assert_eq!(latch.held(), TickInput::default());
    }

    #[test]
    fn test_clear_keeps_pending_edges() {
        let mut latch = InputLatch::new();
        latch.key_down(Key::Right);
        latch.handle_code("KeyR", true);
        latch.handle_code("KeyR", false);
        latch.clear();
        assert!(!latch.held().right);
        assert_eq!(
            latch.take_edges(),
            Edges {
                reset: true,
                pause: false
            }
        );
    }
}
