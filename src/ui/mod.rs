//! Rendering of a [`Session`] onto the terminal
mod menu;
mod popup;
use self::menu::Menu;
use self::popup::{GameOver, Paused};
use crate::consts;
use crate::game::{Direction, Grid, Position, Session, SessionState};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

impl<R> Widget for &Session<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let state = self.state();
        if state == SessionState::Menu {
            Menu {
                high_score: self.high_score(),
            }
            .render(display, buf);
            return;
        }
        let [bar_area, board_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        status_bar(self).render(bar_area, buf);
        let block_area = center_rect(board_area, board_size(self.grid()));
        draw_board(self, block_area, buf);
        match state {
            SessionState::Paused => Paused.render(center_rect(block_area, Paused::SIZE), buf),
            SessionState::GameOver => {
                let popup = GameOver {
                    score: self.score(),
                    new_high_score: self.new_high_score(),
                };
                popup.render(center_rect(block_area, popup.size()), buf);
            }
            SessionState::Menu | SessionState::Playing => (),
        }
    }
}

/// Size of the bordered box around a grid
fn board_size(grid: Grid) -> Size {
    Size {
        width: grid.width.saturating_add(2),
        height: grid.height.saturating_add(2),
    }
}

fn status_bar<R>(session: &Session<R>) -> Line<'static> {
    let mut line = Line::from_iter([
        Span::raw(format!(" Score: {}", session.score())),
        Span::raw(format!("   High score: {}", session.high_score())),
        Span::raw(format!("   Speed: {}ms", session.speed())),
    ]);
    if session.coconut().is_some() {
        line.push_span("   ");
        line.push_span(Span::styled(
            format!("{} coconut!", consts::COCONUT_SYMBOL),
            consts::COCONUT_STYLE,
        ));
    }
    line.style(consts::SCORE_BAR_STYLE)
}

fn draw_board<R>(session: &Session<R>, block_area: Rect, buf: &mut Buffer) {
    let mut level = Canvas {
        area: block_area.inner(Margin::new(1, 1)),
        buf,
    };
    level.draw_cell(session.food(), consts::FOOD_SYMBOL, consts::FOOD_STYLE);
    if let Some(pos) = session.coconut() {
        level.draw_cell(pos, consts::COCONUT_SYMBOL, consts::COCONUT_STYLE);
    }
    for enemy in session.enemies() {
        level.draw_cell(enemy.pos(), consts::ENEMY_SYMBOL, consts::ENEMY_STYLE);
    }
    let snake = session.snake();
    for &p in snake.segments().iter().skip(1) {
        level.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
    }
    let head_symbol = match snake.direction() {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    };
    level.draw_cell(snake.head(), head_symbol, consts::SNAKE_STYLE);
    if session.state() == SessionState::GameOver {
        // A head that went through a wall is off the board; mark the cell it
        // left from instead.
        let crash = if session.grid().contains(snake.head()) {
            Some(snake.head())
        } else {
            snake.segments().get(1).copied()
        };
        if let Some(pos) = crash {
            level.draw_cell(pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }
    }
    Block::bordered().render(block_area, buf);
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let (Ok(dx), Ok(dy)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        if dx >= self.area.width || dy >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(dx) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(dy) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}
