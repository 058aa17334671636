use std::io::{self, Write};

use golife::{pos, Pos};

/// A character grid drawn in layers, plus a status line below it.
pub struct Canvas {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// fills the terminal, keeping the last row for the status line.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![vec![' '; width]; height];
        Self {
            cells,
            width,
            height,
        }
    }

    /// paints every screen position for which `f` returns a character.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for (y, row) in self.cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if let Some(char) = f(pos!(x as i64, y as i64)) {
                    *cell = char;
                }
            }
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.iter().map(|row| row.iter().collect())
    }

    pub fn display(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        let clear = termion::clear::All;
        write!(out, "{clear}")?;
        for (index, line) in self.lines().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}{line}")?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        let status: String = status.chars().take(self.width).collect();
        write!(out, "{goto}{status}")?;
        out.flush()
    }
}

#[test]
fn test_layers_stack() {
    let mut canvas = Canvas::new(4, 2);
    canvas.layer(|pos| (pos.y == 0).then_some('-'));
    canvas.layer(|pos| (pos == pos!(2, 0) || pos == pos!(3, 1)).then_some('#'));
    let lines: Vec<String> = canvas.lines().collect();
    assert_eq!(lines, vec!["--#-".to_string(), "   #".to_string()]);
}
