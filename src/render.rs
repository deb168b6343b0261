//! Terminal playback of a solution path.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::node::SearchNode;
use crate::puzzle::{Board, BLANK};

/// Draw a board as a boxed grid, blank shown as an empty cell.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("+---+---+---+\n");
    for row in board.rows() {
        out.push('|');
        for &val in row {
            if val == BLANK {
                out.push_str("   |");
            } else {
                out.push_str(&format!(" {} |", val));
            }
        }
        out.push('\n');
        out.push_str("+---+---+---+\n");
    }
    out
}

fn caption(index: usize, total: usize, node: &SearchNode) -> String {
    match node.action {
        Some(action) => format!("step {}/{}: blank {}\n", index, total, action),
        None => format!("start ({} moves)\n", total),
    }
}

/// Plays a path back one board at a time with a fixed delay between steps.
pub struct Renderer<W: Write> {
    out: W,
    delay: Duration,
    clear: bool,
}

impl Renderer<io::Stdout> {
    /// Redraws in place on stdout.
    pub fn terminal(delay: Duration) -> Self {
        Self {
            out: io::stdout(),
            delay,
            clear: true,
        }
    }
}

impl<W: Write> Renderer<W> {
    /// Appends each step to `out` without clearing.
    pub fn plain(out: W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            clear: false,
        }
    }

    pub fn play(&mut self, path: &[SearchNode]) -> io::Result<()> {
        let total = path.len().saturating_sub(1);
        for (index, node) in path.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.draw(index, total, node)?;
        }
        Ok(())
    }

    fn draw(&mut self, index: usize, total: usize, node: &SearchNode) -> io::Result<()> {
        let text = format!("{}{}", caption(index, total, node), render_board(&node.board));
        if self.clear {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
            for line in text.lines() {
                queue!(self.out, Print(line), Print("\r\n"))?;
            }
        } else {
            writeln!(self.out, "{}", text)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
