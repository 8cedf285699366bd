use crate::{Particle, Projectile, Random, ShowSettings, Viewport};

/// Decides once per tick whether a new projectile goes up.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchScheduler {
    chance: f64,
    flight_speed: f64,
    target_band: f64,
    target_margin: f64,
}

impl LaunchScheduler {
    pub fn new(settings: &ShowSettings) -> LaunchScheduler {
        LaunchScheduler {
            chance: settings.launch_chance,
            flight_speed: settings.flight_speed,
            target_band: settings.target_band,
            target_margin: settings.target_margin,
        }
    }

    /// Launches from the bottom edge towards the upper band of the viewport with
    /// probability `chance`. The trial is per tick, not per unit of time.
    pub fn poll(&self, viewport: Viewport, rng: &mut impl Random) -> Option<Projectile> {
        if !rng.chance(self.chance) {
            return None;
        }

        let start = (rng.range(0.0, viewport.width), viewport.height);
        let target = (
            rng.range(0.0, viewport.width),
            self.target_margin + rng.random() * viewport.height * self.target_band,
        );

        Some(Projectile::new(start, target, self.flight_speed, rng))
    }
}

/// Turns a detonation point into a batch of particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpawner {
    min: usize,
    max: usize,
}

impl BurstSpawner {
    pub fn new(settings: &ShowSettings) -> BurstSpawner {
        // Never an empty range, even for settings that skipped validation.
        BurstSpawner {
            min: settings.burst_min,
            max: settings.burst_max.max(settings.burst_min.saturating_add(1)),
        }
    }

    /// Number of particles in the next burst, uniform in `[min, max)`.
    pub fn count(&self, rng: &mut impl Random) -> usize {
        let spread = (self.max - self.min) as f64;

        // Guards against a sample rounding up to `max`.
        ((rng.random() * spread).floor() as usize + self.min).min(self.max - 1)
    }

    /// Appends a burst at `position` and returns its size.
    pub fn spawn(
        &self,
        position: (f64, f64),
        rng: &mut impl Random,
        particles: &mut Vec<Particle>,
    ) -> usize {
        let count = self.count(rng);

        particles.reserve(count);
        particles.extend((0..count).map(|_| Particle::spawn(position, rng)));

        count
    }
}
