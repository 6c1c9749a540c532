//! Key bindings and the commands they produce.

use super::queue::InputEvent;

/// DOM `keyCode` values used by the default bindings.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const X: u32 = 88;
}

/// What an input event asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Left held (true) or released (false).
    MoveLeft(bool),
    MoveRight(bool),
    Jump,
    Dash,
}

/// Key-code binding table.
#[derive(Debug, Clone)]
pub struct Controls {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub jump: Vec<u32>,
    pub dash: Vec<u32>,
    /// Whether a pointer press dashes.
    pub pointer_dash: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: vec![keys::ARROW_LEFT, keys::A],
            right: vec![keys::ARROW_RIGHT, keys::D],
            jump: vec![keys::ARROW_UP, keys::SPACE],
            dash: vec![keys::X],
            pointer_dash: true,
        }
    }
}

impl Controls {
    /// Translate one event. Unbound keys and pointer movement map to nothing.
    pub fn command(&self, event: &InputEvent) -> Option<Command> {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if self.left.contains(&key_code) {
                    Some(Command::MoveLeft(true))
                } else if self.right.contains(&key_code) {
                    Some(Command::MoveRight(true))
                } else if self.jump.contains(&key_code) {
                    Some(Command::Jump)
                } else if self.dash.contains(&key_code) {
                    Some(Command::Dash)
                } else {
                    None
                }
            }
            InputEvent::KeyUp { key_code } => {
                if self.left.contains(&key_code) {
                    Some(Command::MoveLeft(false))
                } else if self.right.contains(&key_code) {
                    Some(Command::MoveRight(false))
                } else {
                    None
                }
            }
            InputEvent::PointerDown { .. } if self.pointer_dash => Some(Command::Dash),
            _ => None,
        }
    }
}

/// Held left/right state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementAxis {
    pub left: bool,
    pub right: bool,
}

impl MovementAxis {
    /// `right - left`: -1, 0 or 1.
    pub fn axis(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    /// Record a held-state command. Returns false for other commands.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft(held) => self.left = held,
            Command::MoveRight(held) => self.right = held,
            _ => return false,
        }
        true
    }
}
