use shared::{Hsla, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> CanvasSurface {
        CanvasSurface { context }
    }

    fn paint_with(&self, color: &Hsla) {
        self.context.set_global_alpha(color.alpha);
        self.context.set_fill_style_str(&color.css());
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Hsla,
    ) -> Result<(), JsValue> {
        self.paint_with(&color);
        self.context.fill_rect(x, y, width, height);

        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) -> Result<(), JsValue> {
        self.paint_with(&color);
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, std::f64::consts::TAU)?;
        self.context.fill();

        Ok(())
    }
}
