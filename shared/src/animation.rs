use std::fmt::Debug;

use crate::{Random, SettingsError, Show, ShowSettings, Surface, Viewport};

/// Per-frame callback primitive of the host, such as `requestAnimationFrame`.
pub trait Scheduler {
    type Handle: Copy + PartialEq + Debug;

    /// Asks the host to fire the tick callback once more. `None` if the host refuses.
    fn request_tick(&mut self) -> Option<Self::Handle>;

    fn cancel_tick(&mut self, handle: Self::Handle);
}

enum LoopState<H> {
    Idle,
    Running { show: Show, pending: Option<H> },
}

/// Drives a [`Show`] one tick per host frame, from the moment playback starts until the
/// hosting scene goes away.
pub struct AnimationLoop<S: Scheduler, R: Random> {
    scheduler: S,
    rng: R,
    settings: ShowSettings,
    state: LoopState<S::Handle>,
    ticks: u64,
}

impl<S: Scheduler, R: Random> AnimationLoop<S, R> {
    /// Fails if `settings` do not pass [`ShowSettings::validate`].
    pub fn new(
        scheduler: S,
        rng: R,
        settings: ShowSettings,
    ) -> Result<AnimationLoop<S, R>, SettingsError> {
        settings.validate()?;

        Ok(AnimationLoop {
            scheduler,
            rng,
            settings,
            state: LoopState::Idle,
            ticks: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// The live show, if running.
    pub fn show(&self) -> Option<&Show> {
        match &self.state {
            LoopState::Running { show, .. } => Some(show),
            LoopState::Idle => None,
        }
    }

    pub fn show_mut(&mut self) -> Option<&mut Show> {
        match &mut self.state {
            LoopState::Running { show, .. } => Some(show),
            LoopState::Idle => None,
        }
    }

    /// The handle the next tick is expected under.
    pub fn pending(&self) -> Option<S::Handle> {
        match &self.state {
            LoopState::Running { pending, .. } => *pending,
            LoopState::Idle => None,
        }
    }

    /// Total ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Begins playback over a surface of the given size. If already running, only adopts
    /// the new size.
    pub fn start(&mut self, viewport: Viewport) {
        if let Some(show) = self.show_mut() {
            log::debug!("fireworks already running");
            show.resize(viewport);
            return;
        }

        let Some(handle) = self.scheduler.request_tick() else {
            log::warn!("host refused to schedule the first fireworks tick");
            return;
        };

        log::debug!(
            "fireworks started over {}x{}",
            viewport.width,
            viewport.height
        );

        self.state = LoopState::Running {
            show: Show::new(viewport, &self.settings),
            pending: Some(handle),
        };
    }

    /// Cancels the pending tick and drops every projectile and particle. Does nothing if
    /// already idle.
    pub fn stop(&mut self) {
        if let LoopState::Running { pending, show } =
            std::mem::replace(&mut self.state, LoopState::Idle)
        {
            if let Some(handle) = pending {
                self.scheduler.cancel_tick(handle);
            }

            log::debug!(
                "fireworks stopped with {} projectiles and {} particles in flight",
                show.projectiles().len(),
                show.particles().len()
            );
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(show) = self.show_mut() {
            show.resize(viewport);
        }
    }

    /// Host callback for the tick scheduled under `handle`.
    ///
    /// Callbacks that are stale, or arrive after [`AnimationLoop::stop`], are ignored. A
    /// missing or failing surface skips the tick and stops the loop. Returns whether a tick
    /// ran to completion.
    pub fn frame<D>(&mut self, handle: S::Handle, surface: Option<&mut D>) -> bool
    where
        D: Surface,
        D::Error: Debug,
    {
        let LoopState::Running { show, pending } = &mut self.state else {
            return false;
        };

        if *pending != Some(handle) {
            return false;
        }

        *pending = None;

        let Some(surface) = surface else {
            log::warn!("fireworks surface went away, stopping");
            self.stop();
            return false;
        };

        if let Err(err) = show.tick(surface, &mut self.rng) {
            log::warn!("fireworks tick aborted: {:?}", err);
            self.stop();
            return false;
        }

        self.ticks += 1;

        match self.scheduler.request_tick() {
            Some(next) => {
                *pending = Some(next);
                true
            }
            None => {
                log::warn!("host refused to schedule the next fireworks tick");
                self.stop();
                true
            }
        }
    }
}

impl<S: Scheduler, R: Random> Drop for AnimationLoop<S, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    use super::*;
    use crate::{
        random::tests::Script,
        surface::tests::{Detached, DrawCall, DrawLog},
        Particle,
    };

    #[derive(Default)]
    struct FakeFrames {
        next: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
        refuse: bool,
    }

    impl Scheduler for FakeFrames {
        type Handle = u32;

        fn request_tick(&mut self) -> Option<u32> {
            if self.refuse {
                return None;
            }

            self.next += 1;
            self.requested.push(self.next);
            Some(self.next)
        }

        fn cancel_tick(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    fn animation(settings: ShowSettings) -> AnimationLoop<FakeFrames, ChaCha8Rng> {
        AnimationLoop::new(
            FakeFrames::default(),
            ChaCha8Rng::seed_from_u64(5),
            settings,
        )
        .unwrap()
    }

    fn quiet() -> ShowSettings {
        ShowSettings {
            launch_chance: 0.0,
            ..Default::default()
        }
    }

    fn run(animation: &mut AnimationLoop<FakeFrames, ChaCha8Rng>, log: &mut DrawLog, ticks: usize) {
        for _ in 0..ticks {
            let handle = animation.pending().unwrap();
            assert!(animation.frame(handle, Some(&mut *log)));
        }
    }

    #[test]
    fn rejects_settings_that_fail_validation() {
        let invalid = [
            ShowSettings {
                flight_speed: f64::INFINITY,
                ..Default::default()
            },
            ShowSettings {
                target_margin: f64::NAN,
                ..Default::default()
            },
            ShowSettings {
                burst_min: 60,
                burst_max: 50,
                ..Default::default()
            },
        ];

        for settings in invalid {
            let result = AnimationLoop::new(
                FakeFrames::default(),
                ChaCha8Rng::seed_from_u64(5),
                settings,
            );
            assert!(result.is_err());
        }
    }

    #[test]
    fn idle_to_burst_through_the_loop() {
        // The first trial launches, every later sample sits above the launch chance.
        let mut animation = AnimationLoop::new(
            FakeFrames::default(),
            Script::new(&[0.0], 0.5),
            ShowSettings::default(),
        )
        .unwrap();
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));

        let handle = animation.pending().unwrap();
        assert!(animation.frame(handle, Some(&mut log)));

        let show = animation.show().unwrap();
        assert_eq!(show.projectiles().len(), 1);
        assert!(show.particles().is_empty());

        for _ in 0..100 {
            if animation.show().unwrap().projectiles().is_empty() {
                break;
            }

            let handle = animation.pending().unwrap();
            assert!(animation.frame(handle, Some(&mut log)));
        }

        let show = animation.show().unwrap();
        assert!(show.projectiles().is_empty(), "projectile never arrived");
        assert!((25..50).contains(&show.particles().len()));
    }

    #[test]
    fn start_while_running_adopts_new_size() {
        let mut animation = animation(quiet());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        animation.start(Viewport::new(1024.0, 768.0));

        assert_eq!(animation.scheduler().requested, vec![1]);
        assert_eq!(
            animation.show().unwrap().viewport(),
            Viewport::new(1024.0, 768.0)
        );

        run(&mut animation, &mut log, 1);

        let DrawCall::Rect(_, _, width, height, _) = log.calls[0] else {
            panic!("expected the fade first, got {:?}", log.calls[0]);
        };
        assert_eq!((width, height), (1024.0, 768.0));
    }

    #[test]
    fn starts_idle_without_collections() {
        let animation = animation(ShowSettings::default());

        assert!(!animation.is_running());
        assert!(animation.show().is_none());
        assert!(animation.scheduler().requested.is_empty());
    }

    #[test]
    fn start_schedules_once() {
        let mut animation = animation(ShowSettings::default());

        animation.start(Viewport::new(800.0, 600.0));
        animation.start(Viewport::new(800.0, 600.0));

        assert!(animation.is_running());
        assert_eq!(animation.scheduler().requested, vec![1]);
        assert_eq!(animation.pending(), Some(1));
    }

    #[test]
    fn each_frame_schedules_the_next() {
        let mut animation = animation(ShowSettings::default());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        run(&mut animation, &mut log, 10);

        assert_eq!(animation.ticks(), 10);
        assert_eq!(animation.scheduler().requested, (1..=11).collect::<Vec<_>>());
        assert_eq!(animation.pending(), Some(11));
    }

    #[test]
    fn teardown_cancels_timer() {
        let mut animation = animation(ShowSettings::default());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        run(&mut animation, &mut log, 5);

        let last = animation.pending().unwrap();
        animation.stop();

        assert!(!animation.is_running());
        assert!(animation.show().is_none());
        assert_eq!(animation.scheduler().cancelled, vec![last]);

        let drawn = log.calls.len();
        let requested = animation.scheduler().requested.len();

        assert!(!animation.frame(last, Some(&mut log)));
        assert_eq!(log.calls.len(), drawn);
        assert_eq!(animation.scheduler().requested.len(), requested);

        animation.stop();
        assert_eq!(animation.scheduler().cancelled, vec![last]);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut animation = animation(ShowSettings::default());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        run(&mut animation, &mut log, 2);

        assert!(!animation.frame(1, Some(&mut log)));
        assert_eq!(animation.ticks(), 2);
        assert_eq!(animation.pending(), Some(3));
    }

    #[test]
    fn missing_surface_stops_silently() {
        let mut animation = animation(ShowSettings::default());

        animation.start(Viewport::new(800.0, 600.0));
        let handle = animation.pending().unwrap();

        assert!(!animation.frame::<DrawLog>(handle, None));
        assert!(!animation.is_running());
        assert_eq!(animation.scheduler().requested, vec![1]);
        // The fired handle is spent, nothing is left to cancel.
        assert!(animation.scheduler().cancelled.is_empty());
    }

    #[test]
    fn failing_surface_stops_silently() {
        let mut animation = animation(ShowSettings::default());

        animation.start(Viewport::new(800.0, 600.0));
        let handle = animation.pending().unwrap();

        assert!(!animation.frame(handle, Some(&mut Detached)));
        assert!(!animation.is_running());
        assert_eq!(animation.scheduler().requested, vec![1]);
    }

    #[test]
    fn refused_schedule_stops() {
        let mut animation = animation(ShowSettings::default());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        animation.scheduler.refuse = true;

        let handle = animation.pending().unwrap();
        assert!(animation.frame(handle, Some(&mut log)));
        assert!(!animation.is_running());
        assert!(animation.scheduler().cancelled.is_empty());
    }

    #[test]
    fn full_decay_clears_state() {
        let mut animation = animation(quiet());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        animation
            .show_mut()
            .unwrap()
            .push_particle(Particle::new((1.0, 1.0), (0.0, 0.0), 1.0, 0.0, 1.0));

        run(&mut animation, &mut log, 1);

        assert!(animation.show().unwrap().particles().is_empty());
    }

    #[test]
    fn restart_begins_with_an_empty_show() {
        let mut animation = animation(ShowSettings {
            launch_chance: 1.0,
            ..Default::default()
        });
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        run(&mut animation, &mut log, 3);
        assert_eq!(animation.show().unwrap().projectiles().len(), 3);

        animation.stop();
        animation.start(Viewport::new(1024.0, 768.0));

        let show = animation.show().unwrap();
        assert!(show.projectiles().is_empty());
        assert_eq!(show.viewport(), Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn resize_reaches_the_fade() {
        let mut animation = animation(quiet());
        let mut log = DrawLog::default();

        animation.start(Viewport::new(800.0, 600.0));
        animation.resize(Viewport::new(300.0, 200.0));
        run(&mut animation, &mut log, 1);

        let DrawCall::Rect(x, y, width, height, _) = log.calls[0] else {
            panic!("expected the fade first, got {:?}", log.calls[0]);
        };
        assert_eq!((x, y, width, height), (0.0, 0.0, 300.0, 200.0));
    }
}
