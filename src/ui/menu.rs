use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The main menu screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Menu {
    pub(super) high_score: u32,
}

impl Widget for Menu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [logo_area, instructions_area, play_area, high_score_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(area);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "space").render(play_area, buf);
        Line::styled(
            format!("High score: {}", self.high_score),
            consts::HIGH_SCORE_STYLE,
        )
        .centered()
        .render(high_score_area, buf);
        button("Quit", "q").render(quit_area, buf);
    }
}

fn button(label: &str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(format!("[{label} (")),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")]"),
    ])
    .centered()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const SNAKE_BODY_LENGTH: u16 = 13;
    const GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = 28;

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(words_area, buf);
        let [body_area, head_area, _, food_area, _, coconut_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::GUTTER),
            Constraint::Length(1),
            Constraint::Length(Self::GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        fill(
            buf,
            body_area,
            consts::SNAKE_BODY_SYMBOL,
            consts::SNAKE_STYLE,
        );
        fill(
            buf,
            head_area,
            consts::SNAKE_HEAD_RIGHT_SYMBOL,
            consts::SNAKE_STYLE,
        );
        fill(buf, food_area, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        fill(
            buf,
            coconut_area,
            consts::COCONUT_SYMBOL,
            consts::COCONUT_STYLE,
        );
    }
}

fn fill(buf: &mut Buffer, area: Rect, symbol: char, style: Style) {
    for p in area.positions() {
        if let Some(cell) = buf.cell_mut(p) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 8;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys = |lead: &'static str, k: [&'static str; 4]| {
            Line::from_iter([
                Span::raw(lead),
                Span::styled(k[0], consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled(k[1], consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled(k[2], consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled(k[3], consts::KEY_STYLE),
            ])
        };
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys("       ", ["←", "↓", "↑", "→"]),
            keys("   or: ", ["h", "j", "k", "l"]),
            keys("   or: ", ["a", "s", "w", "d"]),
            Line::from_iter([
                Span::raw("Eat "),
                Span::styled(consts::FOOD_SYMBOL.to_string(), consts::FOOD_STYLE),
                Span::raw(" to grow and"),
            ]),
            Line::from_iter([
                Span::styled(consts::COCONUT_SYMBOL.to_string(), consts::COCONUT_STYLE),
                Span::raw(" to speed up, but"),
            ]),
            Line::from_iter([
                Span::raw("don't hit "),
                Span::styled(consts::ENEMY_SYMBOL.to_string(), consts::ENEMY_STYLE),
                Span::raw(", walls,"),
            ]),
            Line::from("or yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        text.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_logo() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 34, 9));
        Logo.render(Rect::new(3, 1, Logo::WIDTH, Logo::HEIGHT), &mut buffer);
        #[rustfmt::skip]
        let mut expected = Buffer::with_lines([
             "",
             "    ____              _         ",
             "   / ___| _ __   __ _| | _____  ",
            r"   \___ \| '_ \ / _` | |/ / _ \ ",
             "    ___) | | | | (_| |   <  __/ ",
            r"   |____/|_| |_|\__,_|_|\_\___| ",
             "",
             "       ⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬<  ●  ◍       ",
             "",
        ]);
        expected.set_style(Rect::new(3, 1, 28, 5), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(7, 7, 14, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(23, 7, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(26, 7, 1, 1), consts::COCONUT_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn logo_rows_fit() {
        assert!(Logo::SNAKE
            .iter()
            .all(|ln| ln.len() == usize::from(Logo::WIDTH)));
    }

    #[test]
    fn render_menu() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        Menu { high_score: 42 }.render(area, &mut buffer);
        let rows = buffer
            .content()
            .chunks(80)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(rows[0].trim(), "____              _");
        assert_eq!(rows[8].trim(), "Move the snake with:");
        assert_eq!(rows[17].trim(), "[Play (space)]");
        assert_eq!(rows[19].trim(), "High score: 42");
        assert_eq!(rows[21].trim(), "[Quit (q)]");
    }
}
