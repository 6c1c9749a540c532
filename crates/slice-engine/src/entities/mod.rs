pub mod body;
pub mod enemy;
pub mod player;

pub use body::{Action, Body, Collisions};
pub use enemy::{Enemy, WeaponKind};
pub use player::Player;
