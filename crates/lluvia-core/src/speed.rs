//! Global animation pacing.

use serde::{Deserialize, Serialize};

/// How fast every ambient animation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }

    fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.6,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.6,
        }
    }

    /// Stretch or shrink a base period in milliseconds.
    pub fn scale_period_ms(self, base_ms: u64) -> u64 {
        ((base_ms as f32 / self.multiplier()) as u64).max(1)
    }

    /// One raindrop fall from top to bottom.
    pub fn rain_fall_period_ms(self) -> u64 {
        self.scale_period_ms(1500)
    }

    /// Full fade-in/fade-out cycle of a star.
    pub fn star_twinkle_period_ms(self) -> u64 {
        self.scale_period_ms(3000)
    }

    /// Bobbing of the sun, moon and floating messages.
    pub fn float_period_ms(self) -> u64 {
        self.scale_period_ms(6000)
    }

    /// Breathing of the sun glow.
    pub fn sun_pulse_period_ms(self) -> u64 {
        self.scale_period_ms(4000)
    }

    /// Convert a particle duration in seconds to a scaled period.
    pub fn seconds_to_period_ms(self, seconds: f32) -> u64 {
        self.scale_period_ms((seconds.max(0.001) * 1000.0) as u64)
    }
}
