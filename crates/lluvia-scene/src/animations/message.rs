//! The message card and the tap hint.

use std::f32::consts::PI;

use lluvia_core::{MessagePhase, SceneSnapshot};
use ratatui::style::Color;

use crate::canvas::Canvas;
use crate::color::blend;
use crate::layout::SceneLayout;

pub const TAP_HINT: &str = "Toca en cualquier lugar para ver el mensaje...";

const MAX_CARD_WIDTH: u16 = 56;
const PADDING_X: i32 = 3;
const PADDING_Y: i32 = 1;

/// Greedy word wrap by character count. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }
        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

fn palette(night: bool) -> (Color, Color, Color) {
    if night {
        (
            Color::Rgb(30, 36, 80),
            Color::Rgb(235, 230, 245),
            Color::Rgb(255, 255, 255),
        )
    } else {
        (
            Color::Rgb(255, 248, 240),
            Color::Rgb(90, 50, 60),
            Color::Rgb(0, 0, 0),
        )
    }
}

/// Card offset in cells for the entrance, exit and float animations.
fn card_offset(snapshot: &SceneSnapshot, elapsed_ms: u64) -> (i32, i32) {
    let remaining = 1.0 - snapshot.reveal;
    let (dx, dy) = match snapshot.phase {
        MessagePhase::Visible => {
            let (ex, ey) = snapshot.message.entrance.offset();
            (ex as f32 * remaining, ey as f32 * remaining)
        }
        MessagePhase::Hidden => (0.0, remaining),
    };

    let bob = if snapshot.floating && snapshot.phase == MessagePhase::Visible {
        let period = snapshot.speed.float_period_ms();
        ((elapsed_ms % period) as f32 / period as f32 * 2.0 * PI).sin() * 0.6
    } else {
        0.0
    };
    (dx.round() as i32, (dy + bob).round() as i32)
}

pub fn paint_card(
    canvas: &mut Canvas,
    snapshot: &SceneSnapshot,
    layout: &SceneLayout,
    elapsed_ms: u64,
) {
    if snapshot.reveal <= 0.01 {
        return;
    }
    let width = canvas.width();
    let card_width = width.saturating_sub(4).min(MAX_CARD_WIDTH) as i32;
    let inner = (card_width - PADDING_X * 2).max(1) as usize;
    if card_width <= PADDING_X * 2 {
        return;
    }

    let lines = wrap(&snapshot.message.text, inner);
    let card_height = lines.len() as i32 + PADDING_Y * 2;
    let (ox, oy) = card_offset(snapshot, elapsed_ms);
    let left = (width as i32 - card_width) / 2 + ox;
    let top = (layout.horizon as i32 * 11 / 20 - card_height / 2).max(0) + oy;

    let (paper, ink, grain) = palette(snapshot.flags.night);
    for y in top..top + card_height {
        for x in left..left + card_width {
            let bg = blend(paper, canvas.bg(x, y), 0.9 * snapshot.reveal);
            canvas.set_bg(x, y, bg);
            canvas.put(x, y, ' ', ink, 1.0);
            // Paper grain.
            if (x.wrapping_mul(31) ^ y.wrapping_mul(17)) % 7 == 0 {
                canvas.tint(x, y, grain, snapshot.paper_opacity);
            }
        }
    }

    // Print the typed prefix across the lines of the full text, so the card
    // does not reflow while typing.
    let mut budget = snapshot.text.chars().count();
    for (row, line) in lines.iter().enumerate() {
        if budget == 0 {
            break;
        }
        let line_len = line.chars().count();
        let x0 = left + PADDING_X + (inner as i32 - line_len as i32) / 2;
        let y = top + PADDING_Y + row as i32;
        for (i, ch) in line.chars().take(budget).enumerate() {
            canvas.put(x0 + i as i32, y, ch, ink, snapshot.reveal);
        }
        // Account for the space consumed between wrapped words.
        budget = budget.saturating_sub(line_len + 1);
    }
}

pub fn paint_hint(canvas: &mut Canvas, snapshot: &SceneSnapshot) {
    if !snapshot.hint_visible {
        return;
    }
    let y = canvas.height() as i32 - 2;
    let len = TAP_HINT.chars().count() as i32;
    let x0 = (canvas.width() as i32 - len) / 2;
    for (i, ch) in TAP_HINT.chars().enumerate() {
        canvas.put(x0 + i as i32, y, ch, Color::Rgb(255, 255, 255), 0.8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let text = "Hay personas que son como poemas: te hacen ver la belleza en los detalles más pequeños.";
        let lines = wrap(text, 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 20, "{line:?}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("a b", 10), vec!["a b"]);
    }
}
