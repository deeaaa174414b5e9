use crossterm::style::Color;

/// A single cell in the frame buffer
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

/// One screenful of cells, rebuilt from scratch every tick
pub struct Frame {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    /// Frame dimensions as (width, height)
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Blank every cell and adopt new dimensions
    pub fn reset(&mut self, width: u16, height: u16) {
        if (width, height) != self.size() {
            *self = Self::new(width, height);
            return;
        }
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Set a character at position; returns false if the cell is off-grid
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) -> bool {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
            true
        } else {
            false
        }
    }

    /// Set a string starting at position, clipping whatever falls off-grid
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x.saturating_add(i as i32), y, ch, fg, bold);
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.buffer.get(y as usize)?.get(x as usize)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.buffer.iter().map(|row| row.as_slice())
    }

    /// Text content of row `y`, trailing blanks trimmed
    #[cfg(test)]
    pub fn row_text(&self, y: usize) -> String {
        self.buffer
            .get(y)
            .map(|row| row.iter().map(|c| c.ch).collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Number of cells holding `ch`
    #[cfg(test)]
    pub fn count(&self, ch: char) -> usize {
        self.buffer.iter().flatten().filter(|c| c.ch == ch).count()
    }
}
