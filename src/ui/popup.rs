use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// Pop-up shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused;

impl Paused {
    /// The size that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const SIZE: Size = Size {
        width: 19,
        height: 5,
    };
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ─────┐
     * │ Resume (p)      │
     * │ Main Menu (Esc) │
     * │ Quit (q)        │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = popup_block(" PAUSED ");
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line().render(row, buf);
        }
    }
}

/// The choices offered while paused
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum PauseOpt {
    Resume,
    MainMenu,
    Quit,
}

impl PauseOpt {
    fn to_line(self) -> Line<'static> {
        match self {
            PauseOpt::Resume => key_line("Resume", "p"),
            PauseOpt::MainMenu => key_line("Main Menu", "Esc"),
            PauseOpt::Quit => key_line("Quit", "q"),
        }
    }
}

/// Pop-up shown over the board once the snake has crashed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    pub(super) score: u32,
    pub(super) new_high_score: bool,
}

impl GameOver {
    const WIDTH: u16 = 19;

    /// The size that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) fn size(&self) -> Size {
        Size {
            width: Self::WIDTH,
            height: self.lines().len().try_into().unwrap_or(u16::MAX).saturating_add(2),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(format!("Score: {}", self.score))];
        if self.new_high_score {
            lines.push(Line::styled("New high score!", consts::HIGH_SCORE_STYLE));
        }
        lines.push(key_line("Restart", "r"));
        lines.push(key_line("Main Menu", "Esc"));
        lines.push(key_line("Quit", "q"));
        lines
    }
}

impl Widget for GameOver {
    /*
     * ┌─── GAME OVER ───┐
     * │ Score: 12       │
     * │ New high score! │
     * │ Restart (r)     │
     * │ Main Menu (Esc) │
     * │ Quit (q)        │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = popup_block(" GAME OVER ").title_style(consts::GAME_OVER_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines().into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

fn popup_block(title: &'static str) -> Block<'static> {
    Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1))
        .style(Style::reset())
}

fn key_line(label: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(label),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}
