//! Randomized decorative particles.
//!
//! Every batch is generated whole and replaces the previous one. Values are
//! drawn uniformly inside the ranges declared in [`ranges`].

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Bounds for every randomized field.
pub mod ranges {
    use std::ops::RangeInclusive;

    /// Cloud width in pixels of the reference 100% wide sky.
    pub const CLOUD_SIZE: RangeInclusive<f32> = 60.0..=100.0;
    /// Seconds for a cloud to cross the sky.
    pub const CLOUD_SPEED: RangeInclusive<f32> = 20.0..=30.0;
    pub const CLOUD_DELAY: RangeInclusive<f32> = -20.0..=0.0;
    pub const CLOUD_OPACITY: RangeInclusive<f32> = 0.7..=1.0;

    pub const STAR_LEFT: RangeInclusive<f32> = 0.0..=100.0;
    pub const STAR_TOP: RangeInclusive<f32> = 0.0..=60.0;
    pub const STAR_DELAY: RangeInclusive<f32> = 0.0..=3.0;

    pub const DROP_LEFT: RangeInclusive<f32> = 0.0..=100.0;
    pub const DROP_DELAY: RangeInclusive<f32> = -2.0..=0.0;
    pub const DROP_SIZE: RangeInclusive<f32> = 1.0..=4.0;

    pub const CRATER_SIZE: RangeInclusive<f32> = 5.0..=20.0;
    pub const CRATER_TOP: RangeInclusive<f32> = 0.0..=70.0;
    pub const CRATER_LEFT: RangeInclusive<f32> = 0.0..=70.0;

    pub const SPLASH_SIZE: RangeInclusive<f32> = 5.0..=15.0;
}

pub const CLOUD_COUNT: usize = 5;
pub const STAR_COUNT: usize = 50;
pub const RAIN_LAYER_COUNT: usize = 4;
pub const WAVE_COUNT: usize = 4;
pub const CRATER_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    /// Width in pixels.
    pub size: f32,
    /// Seconds to cross the sky once.
    pub speed: f32,
    /// Start offset in seconds; negative starts mid-crossing.
    pub delay: f32,
    pub opacity: f32,
}

/// Star position in percent of the sky plus twinkle delay in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub left: f32,
    pub top: f32,
    pub delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    /// Batch-local index.
    pub id: usize,
    /// Horizontal position in percent.
    pub left: f32,
    /// Start offset in seconds; negative starts mid-fall.
    pub delay: f32,
    /// Width in pixels.
    pub size: f32,
}

impl Raindrop {
    /// Streak length; drops are fifteen times longer than wide.
    pub fn length(&self) -> f32 {
        self.size * 15.0
    }

    /// Completed falls and progress (`0.0..1.0`) through the current one.
    ///
    /// The negative delay means the drop is already mid-fall at time zero.
    pub fn fall(&self, elapsed_ms: u64, period_ms: u64) -> (u64, f32) {
        let offset_ms = (-self.delay * 1000.0).max(0.0) as u64;
        let t = elapsed_ms + offset_ms;
        let period = period_ms.max(1);
        (t / period, (t % period) as f32 / period as f32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainLayer {
    /// Stacking order, 1 at the back.
    pub z_index: usize,
    pub opacity: f32,
    /// Drops of this layer; back layers hold more.
    pub drops: Vec<Raindrop>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Seconds per roll.
    pub speed: f32,
    /// Crest height in pixels.
    pub height: f32,
    pub opacity: f32,
}

impl Wave {
    /// Parameters of wave `index`, calmer when dry and choppier in the rain.
    pub fn for_index(index: usize, raining: bool) -> Self {
        let i = index as f32;
        if raining {
            Self {
                speed: 6.0 + i,
                height: 45.0 - i * 4.0,
                opacity: 0.5 - i * 0.1,
            }
        } else {
            Self {
                speed: 8.0 + i * 2.0,
                height: 35.0 - i * 4.0,
                opacity: 0.7 - i * 0.1,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crater {
    /// Diameter in pixels on an 80 pixel moon.
    pub size: f32,
    /// Offsets in percent of the moon's bounding box.
    pub top: f32,
    pub left: f32,
}

/// Short-lived splash where a raindrop hit the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashDrop {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl SplashDrop {
    /// How long a splash stays on screen.
    pub const LIFETIME_MS: u64 = 500;
}

/// Kinds of particle the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Cloud,
    Star,
    Raindrop,
    Wave,
    Crater,
    Splash,
}

/// A generated particle of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleDescriptor {
    Cloud(Cloud),
    Star(Star),
    Raindrop(Raindrop),
    Wave(Wave),
    Crater(Crater),
    Splash(SplashDrop),
}

/// Produces particle batches from an injected random source.
#[derive(Debug, Clone)]
pub struct ParticleGenerator<R = StdRng> {
    rng: R,
}

impl ParticleGenerator<StdRng> {
    /// Reproducible generator.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ParticleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn draw(&mut self, range: RangeInclusive<f32>) -> f32 {
        self.rng.gen_range(range)
    }

    /// Generate `count` particles of `kind`.
    ///
    /// Waves come out in their dry configuration and splashes at a random
    /// horizontal position; use [`Self::waves`] and [`Self::splash`] to
    /// control those.
    pub fn generate(&mut self, kind: ParticleKind, count: usize) -> Vec<ParticleDescriptor> {
        match kind {
            ParticleKind::Cloud => self
                .clouds(count)
                .into_iter()
                .map(ParticleDescriptor::Cloud)
                .collect(),
            ParticleKind::Star => self
                .stars(count)
                .into_iter()
                .map(ParticleDescriptor::Star)
                .collect(),
            ParticleKind::Raindrop => self
                .raindrops(count)
                .into_iter()
                .map(ParticleDescriptor::Raindrop)
                .collect(),
            ParticleKind::Wave => Self::waves(count, false)
                .into_iter()
                .map(ParticleDescriptor::Wave)
                .collect(),
            ParticleKind::Crater => self
                .craters(count)
                .into_iter()
                .map(ParticleDescriptor::Crater)
                .collect(),
            ParticleKind::Splash => (0..count)
                .map(|_| {
                    let x = self.draw(0.0..=100.0);
                    ParticleDescriptor::Splash(self.splash(x))
                })
                .collect(),
        }
    }

    pub fn clouds(&mut self, count: usize) -> Vec<Cloud> {
        (0..count)
            .map(|_| Cloud {
                size: self.draw(ranges::CLOUD_SIZE),
                speed: self.draw(ranges::CLOUD_SPEED),
                delay: self.draw(ranges::CLOUD_DELAY),
                opacity: self.draw(ranges::CLOUD_OPACITY),
            })
            .collect()
    }

    pub fn stars(&mut self, count: usize) -> Vec<Star> {
        (0..count)
            .map(|_| Star {
                left: self.draw(ranges::STAR_LEFT),
                top: self.draw(ranges::STAR_TOP),
                delay: self.draw(ranges::STAR_DELAY),
            })
            .collect()
    }

    pub fn raindrops(&mut self, count: usize) -> Vec<Raindrop> {
        (0..count)
            .map(|id| Raindrop {
                id,
                left: self.draw(ranges::DROP_LEFT),
                delay: self.draw(ranges::DROP_DELAY),
                size: self.draw(ranges::DROP_SIZE),
            })
            .collect()
    }

    /// Depth-sorted rain layers; farther layers are fainter and sparser.
    pub fn rain_layers(&mut self, layers: usize) -> Vec<RainLayer> {
        (0..layers)
            .map(|index| RainLayer {
                z_index: index + 1,
                opacity: 1.0 - index as f32 * 0.15,
                drops: self.raindrops(35usize.saturating_sub(index * 5)),
            })
            .collect()
    }

    /// Wave parameters are fixed per index; no randomness involved.
    pub fn waves(count: usize, raining: bool) -> Vec<Wave> {
        (0..count).map(|i| Wave::for_index(i, raining)).collect()
    }

    pub fn craters(&mut self, count: usize) -> Vec<Crater> {
        (0..count)
            .map(|_| Crater {
                size: self.draw(ranges::CRATER_SIZE),
                top: self.draw(ranges::CRATER_TOP),
                left: self.draw(ranges::CRATER_LEFT),
            })
            .collect()
    }

    pub fn splash(&mut self, x: f32) -> SplashDrop {
        SplashDrop {
            x,
            width: self.draw(ranges::SPLASH_SIZE),
            height: self.draw(ranges::SPLASH_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: usize = 10_000;

    #[test]
    fn test_cloud_ranges() {
        let mut generator = ParticleGenerator::from_seed(1);
        for cloud in generator.clouds(SAMPLES) {
            assert!(ranges::CLOUD_SIZE.contains(&cloud.size), "{cloud:?}");
            assert!(ranges::CLOUD_SPEED.contains(&cloud.speed), "{cloud:?}");
            assert!(ranges::CLOUD_DELAY.contains(&cloud.delay), "{cloud:?}");
            assert!(ranges::CLOUD_OPACITY.contains(&cloud.opacity), "{cloud:?}");
        }
    }

    #[test]
    fn test_star_ranges() {
        let mut generator = ParticleGenerator::from_seed(2);
        for star in generator.stars(SAMPLES) {
            assert!(ranges::STAR_LEFT.contains(&star.left));
            assert!(ranges::STAR_TOP.contains(&star.top));
            assert!(ranges::STAR_DELAY.contains(&star.delay));
        }
    }

    #[test]
    fn test_raindrop_ranges_and_ids() {
        let mut generator = ParticleGenerator::from_seed(3);
        for (i, drop) in generator.raindrops(SAMPLES).into_iter().enumerate() {
            assert_eq!(drop.id, i);
            assert!(ranges::DROP_LEFT.contains(&drop.left));
            assert!(ranges::DROP_DELAY.contains(&drop.delay));
            assert!(ranges::DROP_SIZE.contains(&drop.size));
            assert_eq!(drop.length(), drop.size * 15.0);
        }
    }

    #[test]
    fn test_crater_and_splash_ranges() {
        let mut generator = ParticleGenerator::from_seed(4);
        for crater in generator.craters(SAMPLES) {
            assert!(ranges::CRATER_SIZE.contains(&crater.size));
            assert!(ranges::CRATER_TOP.contains(&crater.top));
            assert!(ranges::CRATER_LEFT.contains(&crater.left));
        }
        for _ in 0..SAMPLES {
            let splash = generator.splash(12.0);
            assert_eq!(splash.x, 12.0);
            assert!(ranges::SPLASH_SIZE.contains(&splash.width));
            assert!(ranges::SPLASH_SIZE.contains(&splash.height));
        }
    }

    #[test]
    fn test_rain_layers_shape() {
        let mut generator = ParticleGenerator::from_seed(5);
        let layers = generator.rain_layers(RAIN_LAYER_COUNT);
        let counts: Vec<usize> = layers.iter().map(|l| l.drops.len()).collect();
        let z: Vec<usize> = layers.iter().map(|l| l.z_index).collect();
        assert_eq!(counts, vec![35, 30, 25, 20]);
        assert_eq!(z, vec![1, 2, 3, 4]);
        assert!((layers[3].opacity - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_wave_parameters() {
        let dry = ParticleGenerator::<StdRng>::waves(WAVE_COUNT, false);
        let wet = ParticleGenerator::<StdRng>::waves(WAVE_COUNT, true);
        assert_eq!(dry[0].speed, 8.0);
        assert_eq!(dry[3].speed, 14.0);
        assert_eq!(dry[1].height, 31.0);
        assert_eq!(wet[0].speed, 6.0);
        assert_eq!(wet[3].speed, 9.0);
        assert_eq!(wet[2].height, 37.0);
        assert!((wet[1].opacity - 0.4).abs() < 1e-6);
        assert!((dry[1].opacity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_batch() {
        let mut a = ParticleGenerator::from_seed(42);
        let mut b = ParticleGenerator::from_seed(42);
        assert_eq!(a.clouds(CLOUD_COUNT), b.clouds(CLOUD_COUNT));
        assert_eq!(a.stars(STAR_COUNT), b.stars(STAR_COUNT));
    }

    #[test]
    fn test_regeneration_gives_fresh_batch() {
        let mut generator = ParticleGenerator::from_seed(7);
        let first = generator.stars(STAR_COUNT);
        let second = generator.stars(STAR_COUNT);
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_dispatches_by_kind() {
        let mut generator = ParticleGenerator::from_seed(8);
        let batch = generator.generate(ParticleKind::Crater, 3);
        assert_eq!(batch.len(), 3);
        assert!(
            batch
                .iter()
                .all(|p| matches!(p, ParticleDescriptor::Crater(_)))
        );

        let waves = generator.generate(ParticleKind::Wave, WAVE_COUNT);
        assert_eq!(
            waves[0],
            ParticleDescriptor::Wave(Wave::for_index(0, false))
        );

        let splashes = generator.generate(ParticleKind::Splash, 10);
        for p in splashes {
            let ParticleDescriptor::Splash(s) = p else {
                panic!("expected splash, got {p:?}");
            };
            assert!((0.0..=100.0).contains(&s.x));
        }
    }
}
