use std::io::{self, Stdout};

use color_eyre::eyre::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, prelude::*};

use super::{palette, Canvas, ColorClass};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

/// Puts the terminal back the way the shell expects it. Safe to call more than once.
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

/// Copies a finished frame into ratatui's buffer.
struct Scene<'a>(&'a Buffer);

impl Widget for Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.0.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// [`Canvas`] backed by a ratatui terminal. Frames are composed in an
/// off-screen buffer and handed to ratatui on `present`.
pub struct TerminalCanvas<B: Backend> {
    terminal: Terminal<B>,
    scene: Buffer,
    use_colors: bool,
}

impl<B: Backend> TerminalCanvas<B> {
    pub fn new(terminal: Terminal<B>, use_colors: bool) -> Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            scene: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            use_colors,
        })
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Canvas for TerminalCanvas<B> {
    fn size(&self) -> (u16, u16) {
        (self.scene.area.width, self.scene.area.height)
    }

    fn has_colors(&self) -> bool {
        self.use_colors
    }

    fn clear(&mut self) {
        let area = match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width, size.height),
            Err(_) => self.scene.area,
        };
        if area == self.scene.area {
            self.scene.reset();
        } else {
            self.scene = Buffer::empty(area);
        }
    }

    fn put(&mut self, x: i32, y: i32, glyph: char, class: ColorClass) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if let Some(cell) = self.scene.cell_mut((x, y)) {
            cell.set_char(glyph).set_style(palette(class, self.use_colors));
        }
    }

    fn present(&mut self) -> Result<()> {
        let scene = &self.scene;
        self.terminal.draw(|frame| frame.render_widget(Scene(scene), frame.area()))?;
        Ok(())
    }
}
