//! Cell grid the layers paint into before it is turned into text lines.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::color::blend;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Rgb(255, 255, 255),
            bg: Color::Rgb(0, 0, 0),
        }
    }
}

/// Fixed-size grid of cells, row-major.
#[derive(Debug, Default)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Resize and clear the canvas.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Background color of a cell, black outside the grid.
    pub fn bg(&self, x: i32, y: i32) -> Color {
        self.get(x, y).map_or(Color::Rgb(0, 0, 0), |c| c.bg)
    }

    pub fn set_bg(&mut self, x: i32, y: i32, bg: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].bg = bg;
        }
    }

    /// Blend `color` into the background of a cell.
    pub fn tint(&mut self, x: i32, y: i32, color: Color, opacity: f32) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.bg = blend(color, cell.bg, opacity);
        }
    }

    /// Draw a glyph whose color is `fg` faded into the cell background.
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, opacity: f32) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = blend(fg, cell.bg, opacity);
        }
    }

    /// Apply `f` to every cell.
    pub fn map(&mut self, mut f: impl FnMut(&mut Cell)) {
        self.cells.iter_mut().for_each(&mut f);
    }

    /// Convert to styled lines, one per row.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .take(self.height as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| {
                        Span::styled(cell.ch.to_string(), Style::new().fg(cell.fg).bg(cell.bg))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
