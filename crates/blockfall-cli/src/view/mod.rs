use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, score_display::*};

mod board_display;
mod score_display;

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

mod color {
    use ratatui::style::Color;

    // The reference palette: locked blocks green, the falling piece white,
    // the border red.
    pub const GREEN: Color = Color::Rgb(0, 228, 54);
    pub const WHITE: Color = Color::Rgb(255, 241, 232);
    pub const RED: Color = Color::Rgb(255, 0, 77);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::view::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const BORDER: Style = fg_bg(color::RED, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const LOCKED: Style = bg_only(color::GREEN);
    pub const FALLING: Style = bg_only(color::WHITE);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);
}
