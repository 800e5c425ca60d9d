pub mod scene;
pub mod terminal;

#[cfg(test)]
pub mod memory;

use color_eyre::eyre::Result;
use ratatui::prelude::*;

/// What a drawn cell represents. The canvas decides how that looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorClass {
    #[default]
    Default,
    Bike,
    Enemy1,
    Enemy2,
    Enemy3,
    Status,
    Path,
}

/// Style for a color class. Without color support only the status bar stands
/// out, drawn in reverse video.
pub fn palette(class: ColorClass, use_colors: bool) -> Style {
    if !use_colors {
        return match class {
            ColorClass::Status => Style::default().add_modifier(Modifier::REVERSED),
            _ => Style::default(),
        };
    }
    match class {
        ColorClass::Default => Style::default(),
        ColorClass::Bike => Style::default().fg(Color::White).bg(Color::Black),
        ColorClass::Enemy1 => Style::default().fg(Color::Yellow).bg(Color::Black),
        ColorClass::Enemy2 => Style::default().fg(Color::Red).bg(Color::Black),
        ColorClass::Enemy3 => Style::default().fg(Color::Green).bg(Color::Black),
        ColorClass::Status => Style::default().fg(Color::White).bg(Color::Blue),
        ColorClass::Path => Style::default().fg(Color::Magenta).bg(Color::Black),
    }
}

/// A character grid the game draws one frame at a time into.
///
/// Coordinates are signed: anything outside `0..width` and `0..height` is
/// silently dropped, so callers never need to clip.
pub trait Canvas {
    /// Current `(columns, lines)`.
    fn size(&self) -> (u16, u16);

    fn has_colors(&self) -> bool;

    /// Starts a new frame, picking up the current terminal dimensions.
    fn clear(&mut self);

    fn put(&mut self, x: i32, y: i32, glyph: char, class: ColorClass);

    fn put_str(&mut self, x: i32, y: i32, text: &str, class: ColorClass) {
        for (i, glyph) in text.chars().enumerate() {
            self.put(x + i as i32, y, glyph, class);
        }
    }

    /// Shows the frame on screen.
    fn present(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn monochrome_keeps_status_visible() {
        assert_eq!(palette(ColorClass::Status, false), Style::default().add_modifier(Modifier::REVERSED));
        assert_eq!(palette(ColorClass::Enemy2, false), Style::default());
        assert_eq!(palette(ColorClass::Status, true).bg, Some(Color::Blue));
        assert_eq!(palette(ColorClass::Path, true).fg, Some(Color::Magenta));
    }
}
