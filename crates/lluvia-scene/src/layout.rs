//! Where things go on a terminal of a given size.

use std::f32::consts::PI;

use lluvia_core::SceneSnapshot;

/// Approximate pixel size of a terminal cell, used to turn the pixel-based
/// particle and parallax values into cells.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Share of the screen covered by the sky; the ocean takes the rest.
const SKY_SHARE: f32 = 0.7;

/// Sun and moon diameter in pixels.
const CELESTIAL_DIAMETER_PX: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    /// First ocean row.
    pub horizon: u16,
    /// Vertical parallax shift of the sky, in rows.
    pub sky_shift: f32,
    /// Center of the sun or moon, in cells.
    pub celestial_center: (f32, f32),
    /// Horizontal radius in cells; the vertical radius is half of it.
    pub celestial_radius: f32,
}

impl SceneLayout {
    pub fn compute(width: u16, height: u16, snapshot: &SceneSnapshot, elapsed_ms: u64) -> Self {
        let w = width as f32;
        let h = height as f32;
        let horizon = ((h * SKY_SHARE).round() as u16).min(height);

        let sky_shift = snapshot.parallax.sky_offset() / CELL_HEIGHT_PX * 4.0;

        let radius = (CELESTIAL_DIAMETER_PX / 2.0 / CELL_WIDTH_PX).min(w / 8.0).max(1.0);
        let (px, py) = snapshot.parallax.celestial_offset();
        let period = snapshot.speed.float_period_ms();
        let bob = ((elapsed_ms % period) as f32 / period as f32 * 2.0 * PI).sin() * 0.5;

        let cx = w * 0.85 - radius + px / CELL_WIDTH_PX * 4.0;
        let cy = h * 0.15 + radius / 2.0 + bob + py / CELL_HEIGHT_PX * 4.0;

        Self {
            horizon,
            sky_shift,
            celestial_center: (cx, cy),
            celestial_radius: radius,
        }
    }

    /// Rows of ocean below the horizon.
    pub fn ocean_rows(&self, height: u16) -> u16 {
        height.saturating_sub(self.horizon)
    }
}
