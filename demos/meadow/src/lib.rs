use wasm_bindgen::prelude::*;
use slice_engine::*;

mod game;
mod levels;
use game::Meadow;

slice_web::export_game!(Meadow, "meadow");
