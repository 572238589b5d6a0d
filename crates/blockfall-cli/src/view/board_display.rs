use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Text,
    widgets::{Block as BlockWidget, BlockExt as _, Clear, Widget},
};

use crate::view::style;

/// Width of one grid cell in terminal columns.
const CELL_WIDTH: u16 = 2;
/// Height of one grid cell in terminal rows.
const CELL_HEIGHT: u16 = 1;

/// Renders the locked grid with the active piece overlaid.
///
/// Every grid cell maps to a fixed-size terminal rectangle; the falling
/// piece paints over the locked cells, and a `GAME OVER` banner covers the
/// middle of the board once the session has ended.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn width(&self) -> u16 {
        self.session.grid().width() as u16 * CELL_WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn height(&self) -> u16 {
        self.session.grid().height() as u16 * CELL_HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let cell_area = |row: u16, col: u16| {
            Rect::new(
                area.x + col * CELL_WIDTH,
                area.y + row * CELL_HEIGHT,
                CELL_WIDTH,
                CELL_HEIGHT,
            )
            .intersection(area)
        };

        for (row, cells) in self.session.grid().rows().enumerate() {
            for (col, &occupied) in cells.iter().enumerate() {
                let style = if occupied { style::LOCKED } else { style::EMPTY };
                buf.set_style(cell_area(row as u16, col as u16), style);
            }
        }

        // Piece cells above the top edge stay invisible.
        for (row, col) in self.session.active_piece().cell_positions() {
            if row < 0 {
                continue;
            }
            buf.set_style(cell_area(row as u16, col as u16), style::FALLING);
        }

        if self.session.state().is_game_over() {
            let banner_area = area.centered(
                Constraint::Length(area.width),
                Constraint::Length(3),
            );
            let banner_block = BlockWidget::new().style(style::GAME_OVER);
            let inner = banner_block.inner(banner_area);
            Clear.render(banner_area, buf);
            banner_block.render(banner_area, buf);
            Text::styled("GAME OVER", style::GAME_OVER)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
