//! Layered rain and splashes on the water.

use lluvia_core::{
    SceneSnapshot, Splash,
    particles::{RainLayer, Raindrop, SplashDrop},
};
use ratatui::style::Color;

use crate::canvas::Canvas;
use crate::chars::{RAIN_CHARS, SPLASH_CHARS};
use crate::layout::{CELL_HEIGHT_PX, CELL_WIDTH_PX, SceneLayout};

/// Horizontal lean per row, roughly a 15 degree tilt on a 1:2 cell.
const LEAN: f32 = 0.13;

/// Head row and streak length of a drop at `progress` through its fall.
pub fn drop_head(drop: &Raindrop, progress: f32, height: f32) -> (f32, f32) {
    let length = (drop.length() / CELL_HEIGHT_PX).max(1.0);
    (progress * (height + length) - 1.0, length)
}

fn paint_layer(
    canvas: &mut Canvas,
    layer: &RainLayer,
    height: f32,
    period_ms: u64,
    elapsed_ms: u64,
) {
    let width = canvas.width() as f32;
    for drop in &layer.drops {
        let (_, progress) = drop.fall(elapsed_ms, period_ms);
        let (head, length) = drop_head(drop, progress, height);
        let ch = RAIN_CHARS[(drop.size as usize).saturating_sub(1).min(RAIN_CHARS.len() - 1)];

        let tail = (head - length).floor() as i32;
        for y in tail..=head.floor() as i32 {
            let fade = 1.0 - (head - y as f32) / (length + 1.0);
            let x = drop_column(drop.left, width, y as f32);
            canvas.put(
                x,
                y,
                ch,
                Color::Rgb(255, 255, 255),
                layer.opacity * 0.9 * fade.clamp(0.1, 1.0),
            );
        }
    }
}

pub fn paint_rain(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    elapsed_ms: u64,
) {
    if !snapshot.flags.raining {
        return;
    }

    // Mist over the horizon.
    let mist = Color::Rgb(220, 225, 235);
    for y in layout.horizon.saturating_sub(2)..layout.horizon {
        for x in 0..canvas.width() as i32 {
            canvas.tint(x, y as i32, mist, 0.12);
        }
    }

    let period = snapshot.speed.rain_fall_period_ms();
    let height = canvas.height() as f32;
    let mut layers: Vec<&RainLayer> = snapshot.particles.rain_layers.iter().collect();
    layers.sort_by_key(|l| l.z_index);
    for layer in layers {
        paint_layer(canvas, layer, height, period, elapsed_ms);
    }

    paint_splashes(canvas, &snapshot.particles.splashes, layout, elapsed_ms);
}

/// Column of a drop launched at `left` percent once it reaches `row`.
pub fn drop_column(left: f32, width: f32, row: f32) -> i32 {
    (left / 100.0 * width + row * LEAN).round() as i32
}

/// Splash glyph for a splash `age_ms` old, or `None` once it is gone.
pub fn splash_char(age_ms: u64) -> Option<char> {
    if age_ms >= SplashDrop::LIFETIME_MS {
        return None;
    }
    let stage = (age_ms * SPLASH_CHARS.len() as u64 / SplashDrop::LIFETIME_MS) as usize;
    SPLASH_CHARS.get(stage).copied()
}

fn paint_splashes(canvas: &mut Canvas, splashes: &[Splash], layout: &SceneLayout, elapsed_ms: u64) {
    let width = canvas.width() as f32;
    let y = layout.horizon as i32;
    for splash in splashes {
        let age = elapsed_ms.saturating_sub(splash.born_ms);
        let Some(ch) = splash_char(age) else {
            continue;
        };
        let fade = 1.0 - age as f32 / SplashDrop::LIFETIME_MS as f32;
        // Drops lean while falling, so they land to the right of their start.
        let center = drop_column(splash.drop.x, width, y as f32);
        let half = (splash.drop.width / CELL_WIDTH_PX / 2.0).round() as i32;
        for x in center - half..=center + half {
            canvas.put(x, y, ch, Color::Rgb(255, 255, 255), 0.8 * fade);
        }
        if splash.drop.height > 10.0 {
            canvas.put(center, y - 1, '\'', Color::Rgb(255, 255, 255), 0.5 * fade);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_travels_top_to_bottom() {
        let drop = Raindrop {
            id: 0,
            left: 50.0,
            delay: 0.0,
            size: 2.0,
        };
        let (start, length) = drop_head(&drop, 0.0, 40.0);
        let (end, _) = drop_head(&drop, 1.0, 40.0);
        assert!(start < 0.0);
        assert!(end >= 40.0);
        assert!(length >= 1.0);
    }

    #[test]
    fn test_splash_lands_under_leaning_drop() {
        let width = 100.0;
        let horizon = 30.0;
        assert_eq!(drop_column(50.0, width, 0.0), 50);
        let landing = drop_column(50.0, width, horizon);
        assert_eq!(landing, (50.0 + horizon * LEAN).round() as i32);
        assert!(landing > 50);
    }

    #[test]
    fn test_splash_stages() {
        assert_eq!(splash_char(0), Some(SPLASH_CHARS[0]));
        assert_eq!(splash_char(499), Some(SPLASH_CHARS[2]));
        assert_eq!(splash_char(500), None);
    }
}
