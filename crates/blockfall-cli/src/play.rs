use blockfall_engine::{GameSession, TickInput};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::Text,
    widgets::Block,
};

use crate::{
    tui::{App, Runtime},
    view::{BoardDisplay, ScoreDisplay, style},
};

/// Interactive play screen.
///
/// Key presses accumulate into pressed-this-tick signals; every tick hands
/// exactly one [`TickInput`] to the session and resets them, so each
/// direction acts at most once per tick no matter how fast the keys repeat.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    tick_rate: f64,
    pending: TickInput,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, tick_rate: f64) -> Self {
        Self {
            session,
            tick_rate,
            pending: TickInput::default(),
            is_exiting: false,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(self.tick_rate);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let is_playing = self.session.state().is_playing();
        if let Some(key) = event.as_key_event() {
            match key.code {
                KeyCode::Left if is_playing => self.pending.left = true,
                KeyCode::Right if is_playing => self.pending.right = true,
                KeyCode::Down if is_playing => self.pending.down = true,
                KeyCode::Up if is_playing => self.pending.rotate = true,
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        let input = std::mem::take(&mut self.pending);
        self.session.advance_tick(input);
    }

    fn draw(&self, frame: &mut Frame) {
        let board = BoardDisplay::new(&self.session)
            .block(Block::bordered().border_style(style::BORDER).style(style::DEFAULT));
        let score_panel = ScoreDisplay::new(&self.session).block(
            Block::bordered()
                .border_style(style::BORDER)
                .style(style::DEFAULT),
        );

        let help_text = if self.session.state().is_playing() {
            "Controls: \u{2190} \u{2192} (Move) | \u{2193} (Drop) | \u{2191} (Rotate) | Q (Quit)"
        } else {
            "Controls: Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [board_area, score_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(score_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        frame.render_widget(board, board_area);
        frame.render_widget(score_panel, score_area);
        frame.render_widget(help_text, help_area);
    }
}
