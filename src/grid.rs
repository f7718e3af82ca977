use crate::config::{Boundary, GridSize};
use crate::snake::Direction::{self, *};

/// Row-major index into the board, always in `0..side * side`
pub type Position = usize;

/// Square board geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    side: usize,
}

/// Where a single move from a cell lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    Inside(Position),
    /// The move crossed an edge; `wrapped` is the cell on the opposite edge
    Crossed { wrapped: Position },
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        Grid { side: size.side() as usize }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }

    pub fn row(&self, pos: Position) -> usize {
        pos / self.side
    }

    pub fn col(&self, pos: Position) -> usize {
        pos % self.side
    }

    pub fn start_position(&self) -> Position {
        self.cell_count() / 3
    }

    pub fn neighbor(&self, pos: Position, direction: Direction) -> Neighbor {
        let (row, col, last) = (self.row(pos), self.col(pos), self.side - 1);

        match direction {
            Up if row == 0 => Neighbor::Crossed { wrapped: pos + last * self.side },
            Down if row == last => Neighbor::Crossed { wrapped: pos - last * self.side },
            Left if col == 0 => Neighbor::Crossed { wrapped: pos + last },
            Right if col == last => Neighbor::Crossed { wrapped: pos - last },
            Up => Neighbor::Inside(pos - self.side),
            Down => Neighbor::Inside(pos + self.side),
            Left => Neighbor::Inside(pos - 1),
            Right => Neighbor::Inside(pos + 1),
        }
    }

    /// Resolves a move under the given boundary policy, `None` means the move is fatal
    pub fn advance(
        &self,
        pos: Position,
        direction: Direction,
        boundary: Boundary,
    ) -> Option<Position> {
        match (self.neighbor(pos, direction), boundary) {
            (Neighbor::Inside(next), _) => Some(next),
            (Neighbor::Crossed { wrapped }, Boundary::Wrap) => Some(wrapped),
            (Neighbor::Crossed { .. }, Boundary::Solid) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Body,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub position: Position,
    pub state: CellState,
}

impl CellChange {
    pub fn new(position: Position, state: CellState) -> Self {
        CellChange { position, state }
    }
}

/// Cell-state buffer kept by the rendering side and updated from diffs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    cells: Vec<CellState>,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Board { grid, cells: vec![CellState::Empty; grid.cell_count()] }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn get(&self, pos: Position) -> CellState {
        self.cells[pos]
    }

    pub fn set(&mut self, pos: Position, state: CellState) {
        self.cells[pos] = state;
    }

    pub fn apply(&mut self, changes: &[CellChange]) {
        for change in changes {
            self.set(change.position, change.state);
        }
    }

    /// Every non-empty cell as a change, for a full redraw
    pub fn occupied(&self) -> Vec<CellChange> {
        self.cells.iter().enumerate()
            .filter(|(_, state)| **state != CellState::Empty)
            .map(|(pos, state)| CellChange::new(pos, *state))
            .collect()
    }
}
