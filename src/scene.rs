use std::{cell::RefCell, fmt, rc::Rc};

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use serde::{Deserialize, Serialize};
use shared::{AnimationLoop, SettingsError, ShowSettings, Viewport};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::{draw::CanvasSurface, frames::AnimationFrames, window};

type Fireworks = AnimationLoop<AnimationFrames, ChaCha8Rng>;

/// Errors concerning the [`FireworksScene`].
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneError(String);

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SettingsError> for SceneError {
    fn from(settings_error: SettingsError) -> Self {
        SceneError(settings_error.to_string())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(json_error: serde_json::Error) -> Self {
        SceneError(format!("malformed data-settings: {json_error}"))
    }
}

impl From<serde_wasm_bindgen::Error> for SceneError {
    fn from(value_error: serde_wasm_bindgen::Error) -> Self {
        SceneError(format!("malformed settings: {value_error}"))
    }
}

impl From<JsValue> for SceneError {
    fn from(value: JsValue) -> Self {
        SceneError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SceneError> for JsValue {
    fn from(scene_error: SceneError) -> Self {
        JsValue::from_str(&scene_error.0)
    }
}

/// The fireworks scene, mounted on a canvas by the page.
///
/// Playback starts with [`FireworksScene::play`] and lasts until
/// [`FireworksScene::unmount`] or until the scene is freed.
#[wasm_bindgen]
pub struct FireworksScene {
    canvas: HtmlCanvasElement,
    frames: AnimationFrames,
    animation: Rc<RefCell<Fireworks>>,
}

#[wasm_bindgen]
impl FireworksScene {
    /// `settings` may be a plain object, or left out to read the canvas' `data-settings`
    /// attribute.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, settings: JsValue) -> Result<FireworksScene, JsValue> {
        let settings = load_settings(&canvas, settings)?;

        let seed = window()
            .performance()
            .map(|performance| performance.now() as u64)
            .unwrap_or_default()
            ^ (js_sys::Math::random() * u32::MAX as f64) as u64;

        log::debug!("fireworks scene mounted with {settings:?}");

        let frames = AnimationFrames::default();
        let animation = AnimationLoop::new(
            frames.clone(),
            ChaCha8Rng::seed_from_u64(seed),
            settings,
        )
        .map_err(SceneError::from)?;

        Ok(FireworksScene {
            canvas,
            frames,
            animation: Rc::new(RefCell::new(animation)),
        })
    }

    /// Sizes the canvas to the window and starts the show, or resizes a running one.
    pub fn play(&mut self) -> Result<(), JsValue> {
        if !self.frames.is_installed() {
            self.frames.install(self.frame_callback()?);
        }

        let viewport = self.fit_to_window()?;
        self.animation.borrow_mut().start(viewport);

        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        self.animation
            .borrow_mut()
            .resize(Viewport::new(width as f64, height as f64));
    }

    /// Cancels the pending frame and releases everything in flight.
    pub fn unmount(&mut self) {
        self.animation.borrow_mut().stop();
        self.frames.uninstall();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.animation.borrow().is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> f64 {
        self.animation.borrow().ticks() as f64
    }
}

impl FireworksScene {
    fn fit_to_window(&self) -> Result<Viewport, SceneError> {
        let window = window();

        let width = window
            .inner_width()?
            .as_f64()
            .ok_or_else(|| SceneError("window has no inner width".to_string()))?;
        let height = window
            .inner_height()?
            .as_f64()
            .ok_or_else(|| SceneError("window has no inner height".to_string()))?;

        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);

        Ok(Viewport::new(width.floor(), height.floor()))
    }

    fn frame_callback(&self) -> Result<Closure<dyn FnMut()>, SceneError> {
        let context = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| SceneError("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        let mut surface = CanvasSurface::new(context);
        let canvas = self.canvas.clone();
        let frames = self.frames.clone();
        let animation = self.animation.clone();

        Ok(Closure::new(move || {
            let Some(handle) = frames.fired() else {
                return;
            };

            // A canvas removed from the document is treated as gone.
            let surface = canvas.is_connected().then_some(&mut surface);

            animation.borrow_mut().frame(handle, surface);
        }))
    }
}

impl Drop for FireworksScene {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn load_settings(
    canvas: &HtmlCanvasElement,
    settings: JsValue,
) -> Result<ShowSettings, SceneError> {
    if !settings.is_undefined() && !settings.is_null() {
        return Ok(serde_wasm_bindgen::from_value(settings)?);
    }

    match canvas.dataset().get("settings") {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(ShowSettings::default()),
    }
}
