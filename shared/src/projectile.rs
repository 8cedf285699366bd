use std::collections::VecDeque;

use crate::{Hsla, Random, Surface};

/// Number of past positions kept behind a projectile.
pub const TRAIL_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: (f64, f64),
    pub alpha: f64,
}

/// A rising flare flying in a straight line towards its detonation point.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: (f64, f64),
    target: (f64, f64),
    speed: f64,
    angle: f64,
    brightness: f64,
    trail: VecDeque<TrailPoint>,
}

impl Projectile {
    /// `flight_speed` is the fraction of the launch distance covered per tick, so every
    /// launch takes roughly the same number of ticks regardless of its length.
    pub fn new(
        start: (f64, f64),
        target: (f64, f64),
        flight_speed: f64,
        rng: &mut impl Random,
    ) -> Projectile {
        let distance = (target.0 - start.0).hypot(target.1 - start.1);

        Projectile {
            position: start,
            target,
            speed: distance * flight_speed,
            angle: (target.1 - start.1).atan2(target.0 - start.0),
            brightness: rng.range(50.0, 100.0),
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    pub fn target(&self) -> (f64, f64) {
        self.target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    pub fn remaining(&self) -> f64 {
        (self.target.0 - self.position.0).hypot(self.target.1 - self.position.1)
    }

    /// Whether the next step would carry the projectile past its target.
    pub fn has_arrived(&self) -> bool {
        self.remaining() < self.speed
    }

    /// Advances one tick. Returns `true` once the projectile should detonate.
    ///
    /// Arrival is checked after moving, so the final position may land up to one step
    /// short of or past the target.
    pub fn tick(&mut self) -> bool {
        self.trail.push_back(TrailPoint {
            position: self.position,
            alpha: 1.0,
        });

        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        self.position.0 += self.angle.cos() * self.speed;
        self.position.1 += self.angle.sin() * self.speed;

        self.has_arrived()
    }

    /// Draws the trail, oldest point first, followed by the head. Trail hues are picked
    /// anew on every call, which makes the streak flicker.
    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        rng: &mut impl Random,
    ) -> Result<(), S::Error> {
        for (index, point) in self.trail.iter().enumerate() {
            let hue = rng.range(15.0, 75.0);
            let color = Hsla::hsl(hue, 100.0, 70.0).with_alpha(point.alpha * 0.5);

            surface.fill_circle(
                point.position.0,
                point.position.1,
                index as f64 * 0.6,
                color,
            )?;
        }

        let head = Hsla::hsl(rng.range(15.0, 75.0), 100.0, self.brightness);

        surface.fill_circle(self.position.0, self.position.1, 2.0, head)
    }
}
