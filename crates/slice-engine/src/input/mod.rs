pub mod controls;
pub mod queue;

pub use controls::{Command, Controls, MovementAxis};
pub use queue::{InputEvent, InputQueue};
