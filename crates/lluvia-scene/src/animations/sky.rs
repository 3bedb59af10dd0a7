//! Sky gradient, twinkling stars and drifting clouds.

use std::f32::consts::PI;

use lluvia_core::{SceneSnapshot, particles::Cloud};
use ratatui::style::Color;

use crate::canvas::Canvas;
use crate::chars::{CLOUD_CHARS, STAR_CHARS};
use crate::color::gradient_at;
use crate::layout::SceneLayout;

/// Cloud rows as a fraction of the sky height, cycled by cloud index.
const CLOUD_ROWS: [f32; 5] = [0.2, 0.4, 0.3, 0.1, 0.5];

/// Fill every cell with the vertical gradient.
pub fn paint_gradient(canvas: &mut Canvas, snapshot: &SceneSnapshot, layout: &SceneLayout) {
    let height = canvas.height().max(1) as f32;
    let shift = layout.sky_shift;
    for y in 0..canvas.height() as i32 {
        let t = (y as f32 - shift) / height;
        let color = gradient_at(snapshot.sky, t);
        for x in 0..canvas.width() as i32 {
            canvas.set_bg(x, y, color);
        }
    }
}

/// Star opacity over one twinkle period, 0.3 at the ends and 1.0 midway.
pub fn twinkle(phase: f32) -> f32 {
    0.3 + 0.7 * (1.0 - (2.0 * phase - 1.0).abs())
}

pub fn paint_stars(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    elapsed_ms: u64,
) {
    if !snapshot.flags.night {
        return;
    }
    let period = snapshot.speed.star_twinkle_period_ms();
    for star in &snapshot.particles.stars {
        let x = (star.left / 100.0 * canvas.width() as f32) as i32;
        let y = (star.top / 100.0 * layout.horizon as f32 + layout.sky_shift) as i32;
        if y >= layout.horizon as i32 {
            continue;
        }

        let t = elapsed_ms + (star.delay * 1000.0) as u64;
        let phase = (t % period) as f32 / period as f32;
        let opacity = twinkle(phase);

        let ch = if opacity < 0.5 {
            STAR_CHARS[0]
        } else if opacity < 0.85 {
            STAR_CHARS[1]
        } else {
            STAR_CHARS[2]
        };
        canvas.put(x, y, ch, Color::Rgb(255, 255, 255), opacity);
    }
}

/// Horizontal position of a cloud's left edge, in cells.
pub fn cloud_x(cloud: &Cloud, width: f32, cloud_width: f32, elapsed_ms: u64, period_ms: u64) -> f32 {
    let period_ms = period_ms.max(1);
    let t = elapsed_ms + (-cloud.delay * 1000.0).max(0.0) as u64;
    let progress = (t % period_ms) as f32 / period_ms as f32;
    progress * (width + cloud_width) - cloud_width
}

pub fn paint_clouds(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    elapsed_ms: u64,
) {
    let width = canvas.width() as f32;
    let (light, dark) = if snapshot.flags.night {
        (Color::Rgb(120, 120, 160), Color::Rgb(80, 80, 120))
    } else {
        (Color::Rgb(255, 182, 193), Color::Rgb(255, 218, 185))
    };

    for (i, cloud) in snapshot.particles.clouds.iter().enumerate() {
        let cloud_width = (cloud.size / 8.0).round().max(4.0);
        let period = snapshot.speed.seconds_to_period_ms(cloud.speed);
        let left = cloud_x(cloud, width, cloud_width, elapsed_ms, period);

        // Clouds bob gently while they drift.
        let bob = ((elapsed_ms as f32 / period as f32 + i as f32 * 0.37) * 2.0 * PI).sin() * 0.5;
        let top = (CLOUD_ROWS[i % CLOUD_ROWS.len()] * layout.horizon as f32
            + layout.sky_shift
            + bob)
            .round() as i32;
        let rows = if cloud.size > 80.0 { 3 } else { 2 };

        for row in 0..rows {
            let y = top + row;
            if y >= layout.horizon as i32 {
                break;
            }
            // Middle row is the widest and densest.
            let inset = if row == rows / 2 { 0.0 } else { cloud_width * 0.2 };
            let x0 = (left + inset).round() as i32;
            let x1 = (left + cloud_width - inset).round() as i32;
            for x in x0..x1 {
                let rel = (x as f32 - left) / cloud_width;
                let edge = (rel - 0.5).abs() * 2.0;
                let ch = if edge > 0.7 {
                    CLOUD_CHARS[0]
                } else if row == rows / 2 && edge < 0.4 {
                    CLOUD_CHARS[2]
                } else {
                    CLOUD_CHARS[1]
                };
                let color = gradient_at(&[(0.0, light), (1.0, dark)], row as f32 / rows as f32);
                canvas.put(x, y, ch, color, cloud.opacity * 0.8);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twinkle_bounds() {
        assert!((twinkle(0.0) - 0.3).abs() < 1e-6);
        assert!((twinkle(0.5) - 1.0).abs() < 1e-6);
        for i in 0..=100 {
            let o = twinkle(i as f32 / 100.0);
            assert!((0.3..=1.0).contains(&o));
        }
    }

    #[test]
    fn test_cloud_enters_from_left() {
        let cloud = Cloud {
            size: 80.0,
            speed: 20.0,
            delay: 0.0,
            opacity: 1.0,
        };
        assert_eq!(cloud_x(&cloud, 100.0, 10.0, 0, 20_000), -10.0);
        let mid = cloud_x(&cloud, 100.0, 10.0, 10_000, 20_000);
        assert!((mid - 45.0).abs() < 1e-3);
    }
}
