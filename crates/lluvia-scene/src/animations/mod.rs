//! Scene layers, each painting into the shared canvas.

pub mod celestial;
pub mod message;
pub mod ocean;
pub mod rain;
pub mod sky;
