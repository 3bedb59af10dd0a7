//! The scene: flags, message cursor and particle batches in one value.

use log::{debug, trace};
use rand::{Rng, rngs::StdRng};
use ratatui::style::Color;

use crate::error::SceneError;
use crate::flags::SceneFlags;
use crate::message::{Message, MessageCycler, mood_toggles};
use crate::particles::{
    CLOUD_COUNT, CRATER_COUNT, Cloud, Crater, ParticleGenerator, RAIN_LAYER_COUNT, RainLayer,
    STAR_COUNT, SplashDrop, Star, WAVE_COUNT, Wave,
};
use crate::speed::AnimationSpeed;
use crate::transition::{MessagePhase, MessageTransition, typewriter_prefix};
use crate::visuals::{self, CelestialLook, Filter, Parallax};

/// Startup settings for a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub start_raining: bool,
    pub start_night: bool,
    pub typewriter: bool,
    pub transition_delay_ms: u64,
    pub speed: AnimationSpeed,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            start_raining: false,
            start_night: false,
            typewriter: true,
            transition_delay_ms: crate::transition::DEFAULT_TRANSITION_DELAY_MS,
            speed: AnimationSpeed::default(),
        }
    }
}

/// A splash and the moment it appeared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    pub drop: SplashDrop,
    pub born_ms: u64,
}

/// Current particle batches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneParticles {
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
    pub rain_layers: Vec<RainLayer>,
    pub waves: Vec<Wave>,
    pub craters: Vec<Crater>,
    pub splashes: Vec<Splash>,
}

/// Plain data handed to the renderer each frame.
#[derive(Debug, Clone)]
pub struct SceneSnapshot<'a> {
    pub flags: SceneFlags,
    pub message: &'a Message,
    pub message_index: usize,
    pub message_count: usize,
    pub phase: MessagePhase,
    /// Card visibility in `0.0..=1.0`.
    pub reveal: f32,
    /// Milliseconds since the card last changed phase.
    pub phase_elapsed_ms: u64,
    /// Text to print; a prefix while the typewriter is running.
    pub text: &'a str,
    pub floating: bool,
    pub hint_visible: bool,
    pub speed: AnimationSpeed,
    pub celestial: CelestialLook,
    pub ocean_filter: Filter,
    pub ocean_colors: (Color, Color),
    pub atmosphere: Filter,
    pub reflection_opacity: f32,
    pub paper_opacity: f32,
    pub sky: &'static [(f32, Color)],
    pub parallax: Parallax,
    pub particles: &'a SceneParticles,
}

/// Everything the letter scene knows about itself.
#[derive(Debug)]
pub struct Scene<R = StdRng> {
    /// Rain, night and audio flags.
    flags: SceneFlags,
    /// Message list and the current position in it.
    cycler: MessageCycler,
    /// Pending tap advances and the card's phase.
    transition: MessageTransition,
    /// Whether the text is typed out or shown at once.
    typewriter: bool,
    /// Scales every animation period.
    speed: AnimationSpeed,
    /// Last pointer offset.
    parallax: Parallax,
    /// Source of every random batch.
    generator: ParticleGenerator<R>,
    /// Current batches, replaced whole on regeneration.
    particles: SceneParticles,
    /// Time of the previous tick, for detecting landed drops.
    last_tick_ms: u64,
}

impl<R: Rng> Scene<R> {
    /// Build a scene over `messages`, generating every particle batch.
    pub fn new(
        messages: Vec<Message>,
        generator: ParticleGenerator<R>,
        options: SceneOptions,
    ) -> Result<Self, SceneError> {
        let cycler = MessageCycler::new(messages)?;
        let flags = SceneFlags {
            raining: options.start_raining,
            night: options.start_night,
            audio_playing: false,
        };
        let mut scene = Self {
            flags,
            cycler,
            transition: MessageTransition::new(options.transition_delay_ms),
            typewriter: options.typewriter,
            speed: options.speed,
            parallax: Parallax::default(),
            generator,
            particles: SceneParticles::default(),
            last_tick_ms: 0,
        };
        scene.particles.craters = scene.generator.craters(CRATER_COUNT);
        scene.regenerate();
        Ok(scene)
    }

    /// Move to the next message and apply its mood.
    pub fn advance(&mut self) -> &Message {
        let mood = self.cycler.advance().mood;
        debug!("advanced to message {} ({mood})", self.cycler.index());

        let toggles = mood_toggles(mood, self.flags);
        if toggles.rain {
            self.toggle_rain();
        }
        if toggles.time {
            self.toggle_time();
        }
        self.cycler.current()
    }

    /// Flip the rain. Turning it on brings a fresh set of drops; the waves
    /// follow the weather either way.
    pub fn toggle_rain(&mut self) {
        self.flags = self.flags.toggle_rain();
        if self.flags.raining {
            self.particles.rain_layers = self.generator.rain_layers(RAIN_LAYER_COUNT);
        }
        self.particles.waves = ParticleGenerator::<R>::waves(WAVE_COUNT, self.flags.raining);
        debug!("rain {}", on_off(self.flags.raining));
    }

    /// Switch between day and night.
    pub fn toggle_time(&mut self) {
        self.flags = self.flags.toggle_time();
        debug!("night {}", on_off(self.flags.night));
    }

    /// Flip the audio flag and return the new state.
    ///
    /// Playback itself belongs to the caller.
    pub fn toggle_audio(&mut self) -> bool {
        self.flags = self.flags.toggle_audio();
        debug!("audio {}", on_off(self.flags.audio_playing));
        self.flags.audio_playing
    }

    /// User tap: hide the card and schedule the next message.
    pub fn tap(&mut self, now_ms: u64) {
        self.transition.request(now_ms);
    }

    /// Advance timers to `now_ms`. Returns how many messages were advanced.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let due = self.transition.poll(now_ms);
        for _ in 0..due {
            self.advance();
        }

        if self.flags.raining {
            self.spawn_splashes(now_ms);
        }
        self.particles
            .splashes
            .retain(|s| now_ms.saturating_sub(s.born_ms) < SplashDrop::LIFETIME_MS);

        self.last_tick_ms = now_ms;
        due
    }

    /// New splash for every front-layer drop that reached the water since the
    /// previous tick. The front layer is the one with the highest z-index.
    fn spawn_splashes(&mut self, now_ms: u64) {
        let period = self.speed.rain_fall_period_ms();
        let Some(front) = self.particles.rain_layers.iter().max_by_key(|l| l.z_index) else {
            return;
        };
        let landed: Vec<f32> = front
            .drops
            .iter()
            .filter(|d| d.fall(now_ms, period).0 > d.fall(self.last_tick_ms, period).0)
            .map(|d| d.left)
            .collect();
        for x in landed {
            let drop = self.generator.splash(x);
            self.particles.splashes.push(Splash {
                drop,
                born_ms: now_ms,
            });
        }
    }

    /// Fresh batches for a new viewport size.
    pub fn resize(&mut self) {
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.particles.clouds = self.generator.clouds(CLOUD_COUNT);
        self.particles.stars = self.generator.stars(STAR_COUNT);
        self.particles.rain_layers = self.generator.rain_layers(RAIN_LAYER_COUNT);
        self.particles.waves = ParticleGenerator::<R>::waves(WAVE_COUNT, self.flags.raining);
        trace!(
            "regenerated {} clouds, {} stars, {} rain layers",
            self.particles.clouds.len(),
            self.particles.stars.len(),
            self.particles.rain_layers.len()
        );
    }

    pub fn set_parallax(&mut self, parallax: Parallax) {
        self.parallax = parallax;
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    /// Stop pending timers before the scene goes away.
    pub fn teardown(&mut self) {
        if self.transition.is_pending() {
            debug!("dropping pending message advances");
        }
        self.transition.cancel();
        self.particles.splashes.clear();
    }

    pub fn flags(&self) -> SceneFlags {
        self.flags
    }

    pub fn current_message(&self) -> &Message {
        self.cycler.current()
    }

    pub fn message_index(&self) -> usize {
        self.cycler.index()
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    pub fn particles(&self) -> &SceneParticles {
        &self.particles
    }

    /// Everything the renderer needs for one frame.
    pub fn snapshot(&self, now_ms: u64) -> SceneSnapshot<'_> {
        let message = self.cycler.current();
        let phase_elapsed_ms = self.transition.phase_elapsed_ms(now_ms);
        let text = if self.typewriter && self.transition.phase() == MessagePhase::Visible {
            typewriter_prefix(&message.text, phase_elapsed_ms)
        } else {
            message.text.as_str()
        };

        SceneSnapshot {
            flags: self.flags,
            message,
            message_index: self.cycler.index(),
            message_count: self.cycler.len(),
            phase: self.transition.phase(),
            reveal: self.transition.reveal(now_ms),
            phase_elapsed_ms,
            text,
            floating: message.mood.floats(),
            hint_visible: !self.transition.has_shown(),
            speed: self.speed,
            celestial: visuals::celestial(self.flags),
            ocean_filter: visuals::ocean_filter(self.flags),
            ocean_colors: visuals::ocean_colors(self.flags),
            atmosphere: visuals::atmosphere_filter(self.flags),
            reflection_opacity: visuals::reflection_opacity(self.flags),
            paper_opacity: visuals::paper_effect_opacity(self.flags),
            sky: visuals::sky_gradient(self.flags),
            parallax: self.parallax,
            particles: &self.particles,
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
