//! Text bar displayer
//!
//! Draws the widget's percentage as a block-character bar with the value label
//! laid over it. Horizontal bars fill left to right, vertical bars bottom to top.

use std::cell::Cell;

use anyhow::Result;
use serde_json::Value;
use topic_bar_core::{BarOrientation, BarView, Displayer};
use topic_bar_types::display_configs::bar::DEFAULT_BAR_COLOR;
use topic_bar_types::Color;

const FILLED: char = '█';
const EMPTY: char = '░';
const RESET: &str = "\x1b[0m";

/// Terminal bar displayer
pub struct BarDisplayer {
    id: String,
    name: String,
    view: Option<BarView>,
    use_color: bool,
    dirty: Cell<bool>,
}

impl BarDisplayer {
    pub fn new() -> Self {
        Self {
            id: "text_bar".to_string(),
            name: "Text Bar".to_string(),
            view: None,
            use_color: true,
            dirty: Cell::new(true),
        }
    }

    /// Enable or disable ANSI colors in the output
    pub fn set_use_color(&mut self, use_color: bool) {
        self.use_color = use_color;
        self.dirty.set(true);
    }
}

impl Default for BarDisplayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Displayer for BarDisplayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn update_view(&mut self, view: &BarView) {
        if self.view.as_ref() != Some(view) {
            self.view = Some(view.clone());
            self.dirty.set(true);
        }
    }

    fn draw(&self, width: usize, height: usize) -> Result<String> {
        let Some(view) = &self.view else {
            return Ok(String::new());
        };
        let color = self.use_color.then(|| bar_color(&view.color));
        self.dirty.set(false);
        Ok(render_bar(view, width, height, color))
    }

    fn apply_config(&mut self, config: &Value) -> Result<()> {
        if let Some(use_color) = config.get("color").and_then(Value::as_bool) {
            self.set_use_color(use_color);
        }
        Ok(())
    }

    fn needs_redraw(&self) -> bool {
        self.dirty.get()
    }
}

/// Resolve the configured hex color, falling back to the default green
fn bar_color(hex: &str) -> Color {
    Color::from_hex(hex)
        .or_else(|| Color::from_hex(DEFAULT_BAR_COLOR))
        .unwrap_or_default()
}

/// Number of filled cells out of `cells` for a percentage
fn filled_cells(percentage: f64, cells: usize) -> usize {
    let fraction = (percentage / 100.0).clamp(0.0, 1.0);
    ((fraction * cells as f64).round() as usize).min(cells)
}

/// Render `view` into `height` lines of `width` cells. With a color, filled
/// cells are wrapped in 24-bit ANSI escapes.
pub fn render_bar(view: &BarView, width: usize, height: usize, color: Option<Color>) -> String {
    let width = width.max(1);
    let height = height.max(1);
    let label: Vec<char> = view.display_text().chars().collect();

    // grid[row][col] = (char, filled)
    let mut grid: Vec<Vec<(char, bool)>> = match view.orientation {
        BarOrientation::Horizontal => {
            let filled = filled_cells(view.percentage, width);
            let row: Vec<(char, bool)> = (0..width)
                .map(|col| if col < filled { (FILLED, true) } else { (EMPTY, false) })
                .collect();
            vec![row; height]
        }
        BarOrientation::Vertical => {
            let filled = filled_cells(view.percentage, height);
            (0..height)
                .map(|row| {
                    let is_filled = row >= height - filled;
                    let cell = if is_filled { (FILLED, true) } else { (EMPTY, false) };
                    vec![cell; width]
                })
                .collect()
        }
    };

    // Label: middle row, left-padded by one cell for horizontal bars; top row,
    // centered for vertical bars.
    let (label_row, label_col) = match view.orientation {
        BarOrientation::Horizontal => (height / 2, 1usize.min(width - 1)),
        BarOrientation::Vertical => (0, width.saturating_sub(label.len()) / 2),
    };
    for (offset, ch) in label.iter().enumerate() {
        if let Some(cell) = grid[label_row].get_mut(label_col + offset) {
            cell.0 = *ch;
        }
    }

    let mut out = String::with_capacity(height * (width + 1));
    for (index, row) in grid.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let mut in_fill = false;
        for &(ch, filled) in row {
            if let Some(color) = color {
                if filled && !in_fill {
                    let (r, g, b, _) = color.to_rgba8();
                    out.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
                } else if !filled && in_fill {
                    out.push_str(RESET);
                }
            }
            in_fill = filled;
            out.push(ch);
        }
        if color.is_some() && in_fill {
            out.push_str(RESET);
        }
    }
    out
}
