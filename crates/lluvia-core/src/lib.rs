//! Core types for the lluvia scene.
//!
//! The scene is a small amount of state: three boolean modes, a cursor into a
//! fixed list of messages, and batches of randomized decorative particles.
//! Rendering, input and audio live in other crates and only ever see a
//! [`SceneSnapshot`].

mod error;
mod flags;
mod message;
mod mood;
pub mod particles;
mod scene;
mod speed;
mod transition;
pub mod visuals;

pub use error::SceneError;
pub use flags::SceneFlags;
pub use message::{Message, MessageCycler, MoodToggles, default_messages, mood_toggles};
pub use mood::{Entrance, Mood};
pub use particles::{ParticleDescriptor, ParticleGenerator, ParticleKind};
pub use scene::{Scene, SceneOptions, SceneParticles, SceneSnapshot, Splash};
pub use speed::AnimationSpeed;
pub use transition::{
    DEFAULT_TRANSITION_DELAY_MS, MessagePhase, MessageTransition, typewriter_prefix,
};
pub use visuals::{CelestialLook, Filter, Parallax};
