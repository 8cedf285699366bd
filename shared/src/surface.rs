use crate::Hsla;

/// A 2D drawing target.
///
/// The alpha of each color is the opacity the shape is composited with.
pub trait Surface {
    type Error;

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Hsla,
    ) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla)
        -> Result<(), Self::Error>;
}
