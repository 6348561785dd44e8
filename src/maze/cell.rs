use crossterm::style::{Color, Stylize};

use std::fmt;

/// A cell of the rendered wall/passage raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Wall,
    Passage,
    /// The cell the generator started from.
    Start,
}

impl GridCell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            GridCell::Wall => "⬜".with(Color::White),
            GridCell::Passage => "  ".with(Color::Reset),
            GridCell::Start => "🟩".with(Color::Green),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
