use std::fmt;

/// A color in HSL space with an opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Degrees, `[0, 360)`.
    pub hue: f64,
    /// Percent.
    pub saturation: f64,
    /// Percent.
    pub lightness: f64,
    /// `[0, 1]`, 1 is opaque.
    pub alpha: f64,
}

impl Hsla {
    pub const BLACK: Hsla = Hsla::hsl(0.0, 0.0, 0.0);

    pub const fn hsl(hue: f64, saturation: f64, lightness: f64) -> Hsla {
        Hsla {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    pub const fn with_alpha(self, alpha: f64) -> Hsla {
        Hsla { alpha, ..self }
    }

    /// CSS color string without the alpha channel, which is applied separately as the
    /// compositing opacity.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}
