pub mod effects;
pub mod parallax;
