pub mod rect;
pub mod rng;
pub mod time;
