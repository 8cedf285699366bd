use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors concerning [`ShowSettings`].
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SettingsError(pub String);

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid show settings: {}", self.0)
    }
}

impl std::error::Error for SettingsError {}

/// Upper bound on `burst_max`.
pub const MAX_BURST: usize = 1_000;

/// Tunable parameters of a fireworks show. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowSettings {
    /// Probability of launching a projectile on any given tick.
    pub launch_chance: f64,
    /// Opacity of the black rectangle painted over the previous frame.
    pub fade: f64,
    /// Fraction of the launch distance a projectile covers per tick.
    pub flight_speed: f64,
    /// Smallest burst, inclusive.
    pub burst_min: usize,
    /// Largest burst, exclusive.
    pub burst_max: usize,
    /// Fraction of the viewport height targets are spread over.
    pub target_band: f64,
    /// Distance of the highest possible target from the top edge.
    pub target_margin: f64,
}

impl ShowSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.launch_chance) {
            return Err(SettingsError(format!(
                "launch chance {} is not a probability",
                self.launch_chance
            )));
        }

        if !(0.0..=1.0).contains(&self.fade) {
            return Err(SettingsError(format!("fade {} is not an opacity", self.fade)));
        }

        if !(self.flight_speed.is_finite() && self.flight_speed > 0.0) {
            return Err(SettingsError(format!(
                "flight speed {} must be positive and finite",
                self.flight_speed
            )));
        }

        if self.burst_min >= self.burst_max {
            return Err(SettingsError(format!(
                "burst range {}..{} is empty",
                self.burst_min, self.burst_max
            )));
        }

        if self.burst_max > MAX_BURST {
            return Err(SettingsError(format!(
                "burst of up to {} particles exceeds {}",
                self.burst_max, MAX_BURST
            )));
        }

        if !(self.target_band > 0.0 && self.target_band <= 1.0) {
            return Err(SettingsError(format!(
                "target band {} must be within (0, 1]",
                self.target_band
            )));
        }

        if !(self.target_margin.is_finite() && self.target_margin >= 0.0) {
            return Err(SettingsError(format!(
                "target margin {} must be non-negative and finite",
                self.target_margin
            )));
        }

        Ok(())
    }
}

impl Default for ShowSettings {
    fn default() -> Self {
        ShowSettings {
            launch_chance: 0.2,
            fade: 0.2,
            flight_speed: 0.02,
            burst_min: 25,
            burst_max: 50,
            target_band: 0.6,
            target_margin: 50.0,
        }
    }
}
