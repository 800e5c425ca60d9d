mod action;
mod app;
mod config;
mod constants;
mod event;
mod game;
mod ui;
mod utils;

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng};

use app::{App, Ending};
use config::Config;
use event::CrosstermKeys;
use ui::terminal::{self, TerminalCanvas};

fn main() -> Result<()> {
    utils::initialize_logging()?;
    utils::initialize_panic_handler()?;

    let config = Config::new()?;
    let use_colors = config.colors.enabled();

    // Setup terminal
    let tui = terminal::init().inspect_err(|_| {
        let _ = terminal::restore();
    })?;
    let mut canvas = TerminalCanvas::new(tui, use_colors)?;
    let mut app = App::new(config.keybindings, constants::TICK);

    let ending = app.run(&mut canvas, &mut CrosstermKeys, StdRng::from_entropy());

    // Restore terminal before anything is printed
    terminal::restore()?;

    if let Ending::GameOver(summary) = ending? {
        println!("{summary}");
    }
    Ok(())
}
