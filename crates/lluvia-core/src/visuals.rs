//! Visual parameters derived from the scene flags.
//!
//! Nothing here is stored; every value is recomputed from [`SceneFlags`] on
//! read.

use ratatui::style::Color;

use crate::flags::SceneFlags;

/// CSS-like colour filter. Neutral is `1.0` for the factors and `0.0` blur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filter {
    pub brightness: f32,
    pub contrast: f32,
    pub saturate: f32,
    pub blur: f32,
}

impl Default for Filter {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Filter {
    pub const NEUTRAL: Filter = Filter {
        brightness: 1.0,
        contrast: 1.0,
        saturate: 1.0,
        blur: 0.0,
    };

    pub fn brightness(self, brightness: f32) -> Self {
        Self { brightness, ..self }
    }

    pub fn contrast(self, contrast: f32) -> Self {
        Self { contrast, ..self }
    }

    pub fn saturate(self, saturate: f32) -> Self {
        Self { saturate, ..self }
    }

    pub fn blur(self, blur: f32) -> Self {
        Self { blur, ..self }
    }
}

/// Filter and glow of the sun or moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialLook {
    pub filter: Filter,
    pub glow: Color,
    pub glow_opacity: f32,
}

pub fn celestial(flags: SceneFlags) -> CelestialLook {
    if flags.night {
        CelestialLook {
            filter: Filter::NEUTRAL.blur(1.0).brightness(1.2),
            glow: Color::Rgb(255, 255, 255),
            glow_opacity: 0.3,
        }
    } else {
        CelestialLook {
            filter: Filter::NEUTRAL.blur(2.0).brightness(1.3).saturate(1.2),
            glow: Color::Rgb(255, 200, 100),
            glow_opacity: 0.4,
        }
    }
}

pub fn ocean_filter(flags: SceneFlags) -> Filter {
    let base = if flags.raining {
        Filter::NEUTRAL.brightness(0.9).contrast(1.2)
    } else {
        Filter::NEUTRAL.contrast(1.1)
    };
    if flags.night { base.saturate(0.9) } else { base }
}

/// Top and bottom colour of the water.
pub fn ocean_colors(flags: SceneFlags) -> (Color, Color) {
    if flags.night {
        (Color::Rgb(20, 100, 180), Color::Rgb(0, 80, 160))
    } else {
        (Color::Rgb(30, 144, 255), Color::Rgb(0, 102, 204))
    }
}

/// Whole-scene filter for time of day and weather.
pub fn atmosphere_filter(flags: SceneFlags) -> Filter {
    match (flags.night, flags.raining) {
        (true, false) => Filter::NEUTRAL.brightness(0.8).contrast(1.2),
        (true, true) => Filter::NEUTRAL
            .brightness(0.8)
            .contrast(1.2)
            .saturate(0.9)
            .blur(0.5),
        (false, false) => Filter::NEUTRAL.contrast(1.1),
        (false, true) => Filter::NEUTRAL.contrast(1.1).saturate(0.95).blur(0.3),
    }
}

pub fn reflection_opacity(flags: SceneFlags) -> f32 {
    let mut opacity = 0.6;
    if flags.raining {
        opacity *= 0.7;
    }
    if flags.night {
        opacity *= 0.8;
    }
    opacity
}

pub fn paper_effect_opacity(flags: SceneFlags) -> f32 {
    if flags.night { 0.07 } else { 0.05 }
}

const SUNSET_SKY: [(f32, Color); 5] = [
    (0.0, Color::Rgb(0xff, 0x7e, 0x5f)),
    (0.25, Color::Rgb(0xfe, 0xb4, 0x7b)),
    (0.5, Color::Rgb(0xff, 0xb8, 0x8c)),
    (0.75, Color::Rgb(0xff, 0xd8, 0xb1)),
    (1.0, Color::Rgb(0xe8, 0xf4, 0xf8)),
];

const NIGHT_SKY: [(f32, Color); 3] = [
    (0.0, Color::Rgb(0x0a, 0x11, 0x28)),
    (0.6, Color::Rgb(0x1a, 0x23, 0x7e)),
    (1.0, Color::Rgb(0x28, 0x35, 0x93)),
];

/// Vertical sky gradient stops, top (`0.0`) to bottom (`1.0`).
pub fn sky_gradient(flags: SceneFlags) -> &'static [(f32, Color)] {
    if flags.night { &NIGHT_SKY } else { &SUNSET_SKY }
}

/// Pointer-driven parallax offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parallax {
    pub x: f32,
    pub y: f32,
}

impl Parallax {
    const FACTOR: f32 = 0.01;

    /// Offset for a pointer at `(px, py)` on a `width` x `height` viewport.
    pub fn from_pointer(px: f32, py: f32, width: f32, height: f32) -> Self {
        Self {
            x: (px - width / 2.0) * Self::FACTOR,
            y: (py - height / 2.0) * Self::FACTOR,
        }
    }

    /// Vertical shift applied to the sky.
    pub fn sky_offset(self) -> f32 {
        self.y
    }

    /// The sun and moon move twice as far as the sky.
    pub fn celestial_offset(self) -> (f32, f32) {
        (self.x * 2.0, self.y * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(raining: bool, night: bool) -> SceneFlags {
        SceneFlags {
            raining,
            night,
            audio_playing: false,
        }
    }

    #[test]
    fn test_celestial_day_and_night() {
        let day = celestial(flags(false, false));
        assert_eq!(day.glow_opacity, 0.4);
        assert_eq!(day.filter.blur, 2.0);
        assert_eq!(day.filter.saturate, 1.2);

        let night = celestial(flags(false, true));
        assert_eq!(night.glow_opacity, 0.3);
        assert_eq!(night.filter.brightness, 1.2);
        assert_eq!(night.glow, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_ocean_filter_table() {
        assert_eq!(
            ocean_filter(flags(false, false)),
            Filter::NEUTRAL.contrast(1.1)
        );
        assert_eq!(
            ocean_filter(flags(true, false)),
            Filter::NEUTRAL.brightness(0.9).contrast(1.2)
        );
        assert_eq!(ocean_filter(flags(true, true)).saturate, 0.9);
        assert_eq!(ocean_filter(flags(false, true)).contrast, 1.1);
    }

    #[test]
    fn test_atmosphere_filter_table() {
        assert_eq!(atmosphere_filter(flags(false, false)).blur, 0.0);
        assert_eq!(atmosphere_filter(flags(false, true)).blur, 0.3);
        assert_eq!(atmosphere_filter(flags(true, true)).blur, 0.5);
        assert_eq!(atmosphere_filter(flags(true, false)).brightness, 0.8);
    }

    #[test]
    fn test_reflection_opacity() {
        let eps = 1e-6;
        assert!((reflection_opacity(flags(false, false)) - 0.6).abs() < eps);
        assert!((reflection_opacity(flags(true, false)) - 0.42).abs() < eps);
        assert!((reflection_opacity(flags(false, true)) - 0.48).abs() < eps);
        assert!((reflection_opacity(flags(true, true)) - 0.336).abs() < eps);
    }

    #[test]
    fn test_paper_and_sky() {
        assert_eq!(paper_effect_opacity(flags(false, true)), 0.07);
        assert_eq!(paper_effect_opacity(flags(true, false)), 0.05);
        assert_eq!(sky_gradient(flags(false, false)).len(), 5);
        assert_eq!(sky_gradient(flags(false, true)).len(), 3);
    }

    #[test]
    fn test_parallax_centered_pointer_is_still() {
        let p = Parallax::from_pointer(50.0, 20.0, 100.0, 40.0);
        assert_eq!(p, Parallax::default());

        let p = Parallax::from_pointer(100.0, 40.0, 100.0, 40.0);
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.sky_offset() - 0.2).abs() < 1e-6);
        let (cx, cy) = p.celestial_offset();
        assert!((cx - 1.0).abs() < 1e-6);
        assert!((cy - 0.4).abs() < 1e-6);
    }
}
