use std::{
    thread,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::{
    action::Action,
    config::KeyBindings,
    event::KeySource,
    game::{Field, Session, Summary},
    ui::{scene, Canvas},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    GameOver,
    Quit,
}

/// How a run ended. Only a lost game has a summary to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    GameOver(Summary),
    Quit,
}

/// How much of a tick is left to sleep after `spent` was used up by work.
fn remaining(tick: Duration, spent: Duration) -> Option<Duration> {
    tick.checked_sub(spent).filter(|rest| !rest.is_zero())
}

pub struct App {
    pub phase: Phase,
    keybindings: KeyBindings,
    tick: Duration,
}

impl App {
    pub fn new(keybindings: KeyBindings, tick: Duration) -> Self {
        Self { phase: Phase::Title, keybindings, tick }
    }

    fn action(&self, key: &KeyEvent) -> Option<Action> {
        let action = self.keybindings.action_for(key);
        if let Some(action) = action {
            debug!(%action, code = ?key.code, "key pressed");
        }
        action
    }

    /// Title screen, the ride itself, and what it ended with.
    pub fn run<C: Canvas, K: KeySource>(&mut self, canvas: &mut C, keys: &mut K, rng: StdRng) -> Result<Ending> {
        self.title(canvas, keys)?;
        if self.phase == Phase::Quit {
            return Ok(Ending::Quit);
        }

        let now = Instant::now();
        let mut session = Session::new(Field::from(canvas.size()), rng, now);
        info!(colors = canvas.has_colors(), field = ?session.field(), "ride started");
        session.prefill();
        session.tick(canvas, now)?;
        self.play(&mut session, canvas, keys)
    }

    /// Shows the title and blocks until the player starts or quits.
    pub fn title<C: Canvas, K: KeySource>(&mut self, canvas: &mut C, keys: &mut K) -> Result<()> {
        self.phase = Phase::Title;
        canvas.clear();
        scene::draw_title(canvas, &self.keybindings);
        canvas.present()?;

        loop {
            let key = keys.wait()?;
            match self.action(&key) {
                Some(Action::Start) => {
                    self.phase = Phase::Playing;
                    return Ok(());
                },
                Some(Action::Quit) => {
                    info!("quit from the title screen");
                    self.phase = Phase::Quit;
                    return Ok(());
                },
                _ => {},
            }
        }
    }

    /// The tick loop. Each tick reads at most one key, advances the session,
    /// and then sleeps out the rest of the tick.
    pub fn play<C: Canvas, K: KeySource>(&mut self, session: &mut Session, canvas: &mut C, keys: &mut K) -> Result<Ending> {
        self.phase = Phase::Playing;
        loop {
            // The last hit wins over a quit pressed on the same tick.
            if session.is_over() {
                self.phase = Phase::GameOver;
                let summary = session.summary(Instant::now());
                info!(survived = summary.survived.as_secs(), flawless = summary.flawless.as_secs(), "game over");
                return Ok(Ending::GameOver(summary));
            }
            if session.quit_requested() {
                self.phase = Phase::Quit;
                return Ok(Ending::Quit);
            }

            let begun = Instant::now();
            if let Some(key) = keys.poll()? {
                if let Some(action) = self.action(&key) {
                    session.apply(action);
                }
            }
            session.tick(canvas, begun)?;

            if let Some(rest) = remaining(self.tick, begun.elapsed()) {
                thread::sleep(rest);
            }
            session.ramp(Instant::now());
        }
    }
}
