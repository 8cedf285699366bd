mod draw;
mod frames;
mod logger;
mod scene;

pub use scene::*;

use wasm_bindgen::prelude::*;

fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

#[wasm_bindgen(start)]
fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if cfg!(feature = "deploy") {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Debug
    };

    logger::init(level).map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(())
}
