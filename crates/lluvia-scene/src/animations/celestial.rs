//! Sun by day, cratered moon by night.

use std::f32::consts::PI;

use lluvia_core::SceneSnapshot;
use ratatui::style::Color;

use crate::canvas::Canvas;
use crate::chars::{CRATER_CHAR, DISK_CHAR};
use crate::color::{apply_filter, lerp};
use crate::layout::SceneLayout;

/// How far the glow reaches, as a multiple of the radius.
const GLOW_REACH: f32 = 1.8;

/// Normalized distance from the disk center, correcting for 1:2 cells.
fn disk_distance(x: f32, y: f32, layout: &SceneLayout) -> f32 {
    let (cx, cy) = layout.celestial_center;
    let dx = x - cx;
    let dy = (y - cy) * 2.0;
    (dx * dx + dy * dy).sqrt() / layout.celestial_radius
}

/// Radial color of the disk, lit from the upper left.
fn disk_color(night: bool, x: f32, y: f32, layout: &SceneLayout) -> Color {
    let (cx, cy) = layout.celestial_center;
    let r = layout.celestial_radius;
    let hx = cx - r * 0.4;
    let hy = cy - r * 0.2;
    let d = (((x - hx) / r).powi(2) + ((y - hy) * 2.0 / r).powi(2)).sqrt();
    let (inner, outer) = if night {
        (Color::Rgb(255, 255, 255), Color::Rgb(244, 244, 244))
    } else {
        (Color::Rgb(255, 140, 105), Color::Rgb(255, 107, 107))
    };
    lerp(inner, outer, d / 1.4)
}

pub fn paint_celestial(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    elapsed_ms: u64,
) {
    let night = snapshot.flags.night;
    let look = snapshot.celestial;
    let r = layout.celestial_radius;
    let (cx, cy) = layout.celestial_center;

    // The sun breathes; the moon glows steadily.
    let pulse = if night {
        1.0
    } else {
        let period = snapshot.speed.sun_pulse_period_ms();
        let phase = (elapsed_ms % period) as f32 / period as f32;
        0.85 + 0.15 * (phase * 2.0 * PI).sin()
    };

    let reach = r * GLOW_REACH;
    let x0 = (cx - reach).floor() as i32;
    let x1 = (cx + reach).ceil() as i32;
    let y0 = (cy - reach / 2.0).floor() as i32;
    let y1 = ((cy + reach / 2.0).ceil() as i32).min(layout.horizon as i32 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = disk_distance(x as f32, y as f32, layout);
            if d <= 1.0 {
                let base = disk_color(night, x as f32, y as f32, layout);
                let color = apply_filter(base, look.filter);
                canvas.set_bg(x, y, color);
                canvas.put(x, y, DISK_CHAR, color, 1.0);
            } else if d <= GLOW_REACH {
                let falloff = 1.0 - (d - 1.0) / (GLOW_REACH - 1.0);
                canvas.tint(x, y, look.glow, look.glow_opacity * falloff * pulse);
            }
        }
    }

    if night {
        paint_craters(canvas, snapshot, layout);
    }
}

fn paint_craters(canvas: &mut Canvas, snapshot: &SceneSnapshot, layout: &SceneLayout) {
    let r = layout.celestial_radius;
    let (cx, cy) = layout.celestial_center;
    // Crater coordinates are percentages of the disk's bounding box.
    let left = cx - r;
    let top = cy - r / 2.0;
    let shade = Color::Rgb(0, 0, 0);

    for crater in &snapshot.particles.craters {
        let radius = (crater.size / 80.0 * r).max(0.5);
        let ccx = left + crater.left / 100.0 * 2.0 * r + radius;
        let ccy = top + crater.top / 100.0 * r + radius / 2.0;
        for y in (ccy - radius / 2.0).floor() as i32..=(ccy + radius / 2.0).ceil() as i32 {
            for x in (ccx - radius).floor() as i32..=(ccx + radius).ceil() as i32 {
                let dx = x as f32 - ccx;
                let dy = (y as f32 - ccy) * 2.0;
                let inside_crater = (dx * dx + dy * dy).sqrt() <= radius;
                let on_disk = disk_distance(x as f32, y as f32, layout) <= 1.0;
                if inside_crater && on_disk {
                    let bg = canvas.bg(x, y);
                    canvas.set_bg(x, y, lerp(bg, shade, 0.1));
                    canvas.put(x, y, CRATER_CHAR, lerp(bg, shade, 0.25), 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_distance() {
        let layout = SceneLayout {
            horizon: 30,
            sky_shift: 0.0,
            celestial_center: (10.0, 5.0),
            celestial_radius: 4.0,
        };
        assert_eq!(disk_distance(10.0, 5.0, &layout), 0.0);
        assert_eq!(disk_distance(14.0, 5.0, &layout), 1.0);
        assert_eq!(disk_distance(10.0, 7.0, &layout), 1.0);
    }
}
