use crate::command::Command;
use crate::game::{Session, SessionState};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// Drives a [`Session`]: draws it, feeds it key presses, and delivers ticks
/// at the session's current speed
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::StdRng> {
    session: Session<R>,

    /// When the next tick is due.  `None` while no game is being played.
    next_tick: Option<Instant>,

    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(session: Session<R>) -> App<R> {
        App {
            session,
            next_tick: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        tracing::info!("Starting up");
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        tracing::info!("Quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&self.session, frame.area()))?;
        Ok(())
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if let Some(interval) = self.session.take_interval_change() {
            self.next_tick = Some(Instant::now() + interval);
        }
        if self.session.state() != SessionState::Playing {
            self.next_tick = None;
            self.handle_event(read()?);
            return Ok(());
        }
        let deadline = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + self.session.tick_interval());
        if poll(deadline.saturating_duration_since(Instant::now()))? {
            self.handle_event(read()?);
        } else {
            self.session.update();
            self.next_tick = Some(Instant::now() + self.session.tick_interval());
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.session.state() == SessionState::Playing {
                self.session.handle_command(Command::TogglePause);
            }
            return;
        }
        let Some(ev) = event.as_key_press_event() else {
            return;
        };
        match Command::from_key_event(ev, self.session.state()) {
            Some(Command::Quit) => self.quitting = true,
            Some(cmd) => self.session.handle_command(cmd),
            None => (),
        }
    }
}
