use wasm_bindgen::prelude::*;
use pigshot_engine::*;

mod game;
use game::PigRange;

pigshot_web::export_game!(PigRange, "pig-range");
