use crate::{Hsla, Random, Surface};

/// Velocity retained per tick.
pub const DRAG: f64 = 0.98;
/// Downward acceleration per tick.
pub const GRAVITY: f64 = 0.05;

/// A single glowing point of a burst, fading under gravity and drag.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: (f64, f64),
    pub velocity: (f64, f64),
    pub alpha: f64,
    pub decay: f64,
    pub hue: f64,
    pub size: f64,
    pub gravity: f64,
}

impl Particle {
    pub fn new(
        position: (f64, f64),
        velocity: (f64, f64),
        decay: f64,
        hue: f64,
        size: f64,
    ) -> Particle {
        Particle {
            position,
            velocity,
            alpha: 1.0,
            decay,
            hue,
            size,
            gravity: GRAVITY,
        }
    }

    /// Randomized particle at a detonation point.
    pub fn spawn(position: (f64, f64), rng: &mut impl Random) -> Particle {
        let velocity = ((rng.random() - 0.5) * 8.0, (rng.random() - 0.5) * 8.0);
        let decay = rng.range(0.01, 0.03);
        let hue = rng.range(0.0, 360.0);
        let size = rng.range(1.0, 3.0);

        Particle::new(position, velocity, decay, hue, size)
    }

    /// Advances one tick. Returns `false` once the particle has faded out.
    pub fn tick(&mut self) -> bool {
        self.velocity.0 *= DRAG;
        self.velocity.1 *= DRAG;
        self.velocity.1 += self.gravity;

        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;

        self.alpha -= self.decay;

        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn color(&self) -> Hsla {
        Hsla::hsl(self.hue, 100.0, 60.0).with_alpha(self.alpha)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.fill_circle(self.position.0, self.position.1, self.size, self.color())
    }
}
