use crate::{
    BurstSpawner, Hsla, LaunchScheduler, Particle, Projectile, Random, ShowSettings, Surface,
    Viewport,
};

/// Everything alive in a running fireworks show.
#[derive(Debug, Clone)]
pub struct Show {
    viewport: Viewport,
    fade: Hsla,
    launcher: LaunchScheduler,
    spawner: BurstSpawner,
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
}

impl Show {
    pub fn new(viewport: Viewport, settings: &ShowSettings) -> Show {
        Show {
            viewport,
            fade: Hsla::BLACK.with_alpha(settings.fade),
            launcher: LaunchScheduler::new(settings),
            spawner: BurstSpawner::new(settings),
            projectiles: Vec::new(),
            particles: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Runs one simulation step and draws the result over the previous frame.
    ///
    /// Projectiles go first. Particles born from this tick's detonations are left
    /// untouched until the next tick.
    pub fn tick<S: Surface>(
        &mut self,
        surface: &mut S,
        rng: &mut impl Random,
    ) -> Result<(), S::Error> {
        surface.fill_rect(0.0, 0.0, self.viewport.width, self.viewport.height, self.fade)?;

        if let Some(projectile) = self.launcher.poll(self.viewport, rng) {
            self.projectiles.push(projectile);
        }

        let settled = self.particles.len();

        for projectile in self.projectiles.iter_mut() {
            let arrived = projectile.tick();
            projectile.draw(surface, rng)?;

            if arrived {
                self.spawner.spawn(projectile.target(), rng, &mut self.particles);
            }
        }

        self.projectiles.retain(|projectile| !projectile.has_arrived());

        for particle in self.particles[..settled].iter_mut() {
            if particle.tick() {
                particle.draw(surface)?;
            }
        }

        self.particles.retain(Particle::is_alive);

        Ok(())
    }
}
