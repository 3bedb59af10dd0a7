//! Color utility functions for the scene layers.

use lluvia_core::Filter;
use ratatui::style::Color;

/// RGB components of a color; anything that is not `Rgb` counts as black.
pub fn rgb(color: Color) -> (f32, f32, f32) {
    match color {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        Color::White => (255.0, 255.0, 255.0),
        _ => (0.0, 0.0, 0.0),
    }
}

fn to_color((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(
        r.clamp(0.0, 255.0).round() as u8,
        g.clamp(0.0, 255.0).round() as u8,
        b.clamp(0.0, 255.0).round() as u8,
    )
}

/// Linear mix; `t = 0` gives `a`, `t = 1` gives `b`.
pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (ar, ag, ab) = rgb(a);
    let (br, bg, bb) = rgb(b);
    to_color((
        ar + (br - ar) * t,
        ag + (bg - ag) * t,
        ab + (bb - ab) * t,
    ))
}

/// Paint `fg` over `bg` with the given opacity.
pub fn blend(fg: Color, bg: Color, opacity: f32) -> Color {
    lerp(bg, fg, opacity)
}

/// Sample a gradient given as `(position, color)` stops sorted by position.
pub fn gradient_at(stops: &[(f32, Color)], t: f32) -> Color {
    let Some(&(first_pos, first)) = stops.first() else {
        return Color::Rgb(0, 0, 0);
    };
    if t <= first_pos {
        return first;
    }
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let span = (p1 - p0).max(f32::EPSILON);
            return lerp(c0, c1, (t - p0) / span);
        }
    }
    stops.last().map(|&(_, c)| c).unwrap_or(first)
}

/// Apply brightness, contrast and saturation the way CSS filters do.
///
/// Blur has no per-cell meaning and is handled by [`soften`].
pub fn apply_filter(color: Color, filter: Filter) -> Color {
    let (r, g, b) = rgb(color);

    let (r, g, b) = (
        r * filter.brightness,
        g * filter.brightness,
        b * filter.brightness,
    );

    let contrast = |c: f32| (c - 127.5) * filter.contrast + 127.5;
    let (r, g, b) = (contrast(r), contrast(g), contrast(b));

    let gray = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let saturate = |c: f32| gray + (c - gray) * filter.saturate;
    to_color((saturate(r), saturate(g), saturate(b)))
}

/// Pull a glyph color towards its background to mimic blur.
pub fn soften(fg: Color, bg: Color, blur: f32) -> Color {
    lerp(fg, bg, (blur * 0.3).min(0.6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(blend(b, a, 1.0), b);
    }

    #[test]
    fn test_gradient_at() {
        let stops = [
            (0.0, Color::Rgb(0, 0, 0)),
            (0.5, Color::Rgb(100, 100, 100)),
            (1.0, Color::Rgb(200, 200, 200)),
        ];
        assert_eq!(gradient_at(&stops, -1.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient_at(&stops, 0.25), Color::Rgb(50, 50, 50));
        assert_eq!(gradient_at(&stops, 0.75), Color::Rgb(150, 150, 150));
        assert_eq!(gradient_at(&stops, 2.0), Color::Rgb(200, 200, 200));
        assert_eq!(gradient_at(&[], 0.3), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_neutral_filter_is_identity() {
        let c = Color::Rgb(30, 144, 255);
        assert_eq!(apply_filter(c, Filter::NEUTRAL), c);
    }

    #[test]
    fn test_filter_darkens_and_desaturates() {
        let c = Color::Rgb(200, 100, 50);
        let (r, _, _) = rgb(apply_filter(c, Filter::NEUTRAL.brightness(0.5)));
        assert!(r < 200.0);

        let gray = apply_filter(c, Filter::NEUTRAL.saturate(0.0));
        let (r, g, b) = rgb(gray);
        assert!((r - g).abs() <= 1.0 && (g - b).abs() <= 1.0);
    }
}
