//! Ocean body, rolling waves and the sky's reflection.

use std::f32::consts::PI;

use lluvia_core::{SceneSnapshot, particles::Wave};
use ratatui::style::Color;

use crate::canvas::Canvas;
use crate::chars::WAVE_CHARS;
use crate::color::{apply_filter, lerp};
use crate::layout::{CELL_HEIGHT_PX, SceneLayout};

/// Crest row offset (relative to the horizon) of a wave at column `x`.
pub fn crest(wave: &Wave, index: usize, x: f32, elapsed_ms: u64, period_ms: u64) -> f32 {
    let phase = (elapsed_ms % period_ms.max(1)) as f32 / period_ms.max(1) as f32;
    let amplitude = wave.height / CELL_HEIGHT_PX / 2.0;
    let wavelength = 18.0 + index as f32 * 5.0;
    index as f32 * 1.5 + ((x / wavelength + phase) * 2.0 * PI).sin() * amplitude * 0.5
}

pub fn paint_ocean(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    elapsed_ms: u64,
) {
    let rows = layout.ocean_rows(canvas.height());
    if rows == 0 {
        return;
    }
    let (top, bottom) = snapshot.ocean_colors;
    let horizon = layout.horizon as i32;

    for row in 0..rows as i32 {
        let t = row as f32 / rows.max(1) as f32;
        let color = apply_filter(lerp(top, bottom, t), snapshot.ocean_filter);
        for x in 0..canvas.width() as i32 {
            canvas.set_bg(x, horizon + row, color);
        }
    }

    paint_reflection(canvas, snapshot, layout, rows, elapsed_ms);

    for (i, wave) in snapshot.particles.waves.iter().enumerate() {
        let period = snapshot.speed.seconds_to_period_ms(wave.speed);
        let ch = WAVE_CHARS[i % WAVE_CHARS.len()];
        for x in 0..canvas.width() as i32 {
            let y = horizon + crest(wave, i, x as f32, elapsed_ms, period).round() as i32;
            if y >= horizon {
                canvas.put(x, y, ch, Color::Rgb(255, 255, 255), wave.opacity);
            }
        }
    }
}

/// Warm band under the sun, or a silver one under the moon, fading with depth.
fn paint_reflection(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    rows: u16,
    elapsed_ms: u64,
) {
    let color = if snapshot.flags.night {
        Color::Rgb(230, 230, 255)
    } else {
        Color::Rgb(255, 126, 95)
    };
    let (cx, _) = layout.celestial_center;
    let half_width = layout.celestial_radius * 1.5;
    let depth = (rows as f32 * 0.6).max(1.0);
    let horizon = layout.horizon as i32;

    for row in 0..rows as i32 {
        let fade = 1.0 - row as f32 / depth;
        if fade <= 0.0 {
            break;
        }
        // Shimmer shifts the band sideways row by row.
        let shimmer = ((elapsed_ms as f32 / 700.0 + row as f32 * 0.9).sin()) * 1.5;
        let x0 = (cx - half_width + shimmer).round() as i32;
        let x1 = (cx + half_width + shimmer).round() as i32;
        for x in x0..=x1 {
            canvas.tint(x, horizon + row, color, snapshot.reflection_opacity * fade);
        }
    }
}
