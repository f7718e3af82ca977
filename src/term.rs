use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{StyledContent, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::error::SnakeError;
use crate::grid::{Board, CellChange, CellState, Grid, Position};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Each cell is two terminal columns wide so the board looks square
const CELL_WIDTH: TermInt = 2;

/// Draws the board and messages on the alternate screen
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    origin: Coords,
    board: Option<Board>,
}

impl TermManager {
    pub fn new() -> Result<Self, SnakeError> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), origin: (0, 0), board: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Clears the screen and draws an empty bordered board centered on it
    pub fn start_board(&mut self, grid: Grid) -> Result<(), SnakeError> {
        let side = grid.side() as TermInt;
        let (board_w, board_h) = (side * CELL_WIDTH + 2, side + 2);

        if board_w > self.width || board_h > self.height {
            return Err(SnakeError::TerminalTooSmall {
                width: self.width,
                height: self.height,
                needed_width: board_w,
                needed_height: board_h,
            });
        }

        self.origin = ((self.width - board_w) / 2, (self.height - board_h) / 2);
        self.board = Some(Board::new(grid));

        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_borders(board_w, board_h)?;
        self.flush()?;
        Ok(())
    }

    pub fn apply(&mut self, changes: &[CellChange]) -> io::Result<()> {
        let grid = match self.board.as_mut() {
            Some(board) => {
                board.apply(changes);
                board.grid()
            }
            None => return Ok(()),
        };

        for change in changes {
            self.print_cell(grid, change.position, change.state)?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        let blank = " ".repeat(msg_width as usize);
        queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1), style::Print(&blank))?;
        queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1 + msg_height - 1), style::Print(&blank))?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self, width: TermInt, height: TermInt) -> io::Result<()> {
        let (x0, y0) = self.origin;
        let (end_x, end_y) = (x0 + width - 1, y0 + height - 1);

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, y0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in y0 + 1..end_y {
            queue!(self.stdout, cursor::MoveTo(x0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        Ok(())
    }

    fn print_cell(&mut self, grid: Grid, pos: Position, state: CellState) -> io::Result<()> {
        let x = self.origin.0 + 1 + grid.col(pos) as TermInt * CELL_WIDTH;
        let y = self.origin.1 + 1 + grid.row(pos) as TermInt;

        queue!(self.stdout, cursor::MoveTo(x, y), style::PrintStyledContent(cell_glyph(state)))
    }
}

fn cell_glyph(state: CellState) -> StyledContent<&'static str> {
    match state {
        CellState::Empty => "  ".stylize(),
        CellState::Body => "██".green(),
        CellState::Target => "()".red().bold(),
    }
}
