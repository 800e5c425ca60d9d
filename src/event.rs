use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Where key presses come from.
///
/// The playing loop only ever calls [`KeySource::poll`], once per tick. The
/// blocking [`KeySource::wait`] is reserved for the title screen.
pub trait KeySource {
    /// Returns the next pending key press, if any, without blocking.
    fn poll(&mut self) -> Result<Option<KeyEvent>>;

    /// Blocks until a key is pressed.
    fn wait(&mut self) -> Result<KeyEvent>;
}

/// Reads the real terminal through crossterm.
pub struct CrosstermKeys;

fn pressed(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

impl KeySource for CrosstermKeys {
    fn poll(&mut self) -> Result<Option<KeyEvent>> {
        if event::poll(Duration::ZERO)? {
            Ok(pressed(event::read()?))
        } else {
            Ok(None)
        }
    }

    fn wait(&mut self) -> Result<KeyEvent> {
        loop {
            if let Some(key) = pressed(event::read()?) {
                return Ok(key);
            }
        }
    }
}
