//! Scene rendering state.

use lluvia_core::SceneSnapshot;
use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::animations::{celestial, message, ocean, rain, sky};
use crate::canvas::Canvas;
use crate::color::{apply_filter, soften};
use crate::layout::SceneLayout;

/// Draws [`SceneSnapshot`]s into a ratatui frame.
///
/// Keeps its cell grid between frames so a steady terminal size does not
/// reallocate.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    canvas: Canvas,
}

impl SceneRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into `area` only.
    pub fn render_area(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &SceneSnapshot,
        elapsed_ms: u64,
    ) {
        self.paint(area.width, area.height, snapshot, elapsed_ms);
        frame.render_widget(Paragraph::new(self.canvas.to_lines()), area);
    }

    /// Paint every layer, back to front.
    fn paint(&mut self, width: u16, height: u16, snapshot: &SceneSnapshot, elapsed_ms: u64) {
        self.canvas.reset(width, height);
        if width == 0 || height == 0 {
            return;
        }
        let layout = SceneLayout::compute(width, height, snapshot, elapsed_ms);
        let canvas = &mut self.canvas;

        sky::paint_gradient(canvas, snapshot, &layout);
        sky::paint_stars(canvas, snapshot, &layout, elapsed_ms);
        sky::paint_clouds(canvas, snapshot, &layout, elapsed_ms);
        celestial::paint_celestial(canvas, snapshot, &layout, elapsed_ms);
        ocean::paint_ocean(canvas, snapshot, &layout, elapsed_ms);
        rain::paint_rain(canvas, snapshot, &layout, elapsed_ms);

        // Time of day and weather tint everything except the card.
        let atmosphere = snapshot.atmosphere;
        canvas.map(|cell| {
            cell.bg = apply_filter(cell.bg, atmosphere);
            cell.fg = soften(apply_filter(cell.fg, atmosphere), cell.bg, atmosphere.blur);
        });

        message::paint_card(canvas, snapshot, &layout, elapsed_ms);
        message::paint_hint(canvas, snapshot);
    }

    #[cfg(test)]
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
