use color_eyre::eyre::Result;

use super::{Canvas, ColorClass};

/// Plain grid canvas for tests.
pub struct MemoryCanvas {
    width: u16,
    height: u16,
    cells: Vec<(char, ColorClass)>,
    pub use_colors: bool,
    pub presented: usize,
}

impl MemoryCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', ColorClass::Default); width as usize * height as usize],
            use_colors: true,
            presented: 0,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self { presented: self.presented, use_colors: self.use_colors, ..Self::new(width, height) };
    }

    pub fn cell(&self, x: u16, y: u16) -> (char, ColorClass) {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn row(&self, y: u16) -> String {
        (0..self.width).map(|x| self.cell(x, y).0).collect()
    }

    /// Every cell holding `glyph`, as `(x, y)`.
    pub fn find(&self, glyph: char) -> Vec<(u16, u16)> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cell(x, y).0 == glyph)
            .collect()
    }
}

impl Canvas for MemoryCanvas {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn has_colors(&self) -> bool {
        self.use_colors
    }

    fn clear(&mut self) {
        self.cells.fill((' ', ColorClass::Default));
    }

    fn put(&mut self, x: i32, y: i32, glyph: char, class: ColorClass) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = (glyph, class);
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}
