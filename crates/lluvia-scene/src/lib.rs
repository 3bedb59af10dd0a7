//! Terminal rendering for the lluvia scene.
//!
//! Everything here reads a [`lluvia_core::SceneSnapshot`] and paints it:
//! the sky gradient with stars and clouds, the sun or moon, the ocean with
//! its waves and reflection, the rain layers and the message card. Layers
//! paint into a cell grid that becomes ratatui lines at the end of a frame.

mod animations;
mod canvas;
mod chars;
mod color;
mod layout;
mod renderer;

pub use layout::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
pub use renderer::SceneRenderer;
