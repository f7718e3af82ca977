use std::collections::VecDeque;

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{Boundary, GameConfig};
use crate::grid::{Board, CellChange, CellState, Grid, Position};
use Direction::*;
use StepResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeathCause {
    Boundary,
    SelfCollision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Moved { vacated: Option<Position>, new_head: Position, new_target: Option<Position> },
    Died { score: u32, cause: DeathCause },
}

impl StepResult {
    pub fn alive(&self) -> bool {
        matches!(self, Moved { .. })
    }

    /// Final score, only reported once the snake has died
    pub fn score(&self) -> Option<u32> {
        match self {
            Died { score, .. } => Some(*score),
            Moved { .. } => None,
        }
    }

    /// Cells to redraw after this step, in paint order
    pub fn changed_cells(&self, target: Position) -> Vec<CellChange> {
        let mut changes = vec![];

        if let Moved { vacated, new_head, new_target } = self {
            if let Some(pos) = vacated {
                // The target may have spawned under the tail
                let state = if *pos == target { CellState::Target } else { CellState::Empty };
                changes.push(CellChange::new(*pos, state));
            }
            changes.push(CellChange::new(*new_head, CellState::Body));
            if let Some(pos) = new_target {
                changes.push(CellChange::new(*pos, CellState::Target));
            }
        }

        changes
    }
}

pub struct GameState<R = StdRng> {
    grid: Grid,
    boundary: Boundary,
    body: VecDeque<Position>,
    length_target: usize,
    direction: Direction,
    pending_direction: Direction,
    target: Position,
    score: u32,
    death: Option<DeathCause>,
    rng: R,
}

impl GameState<StdRng> {
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameState::new(config, rng)
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        GameState::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Self {
        let grid = Grid::new(config.grid_size);
        let target = rng.gen_range(0..grid.cell_count());

        GameState {
            grid,
            boundary: config.boundary,
            body: VecDeque::from([grid.start_position()]),
            length_target: 1,
            direction: Left,
            pending_direction: Left,
            target,
            score: 0,
            death: None,
            rng,
        }
    }

    /// Oldest cell first, the head is the last entry
    pub fn body(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn length_target(&self) -> usize {
        self.length_target
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Full board snapshot; the target is painted over the body
    pub fn cells(&self) -> Board {
        let mut board = Board::new(self.grid);
        for pos in &self.body {
            board.set(*pos, CellState::Body);
        }
        board.set(self.target, CellState::Target);
        board
    }

    /// Requests a turn for the next step. Reversing onto the current direction is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if self.death.is_some() {
            return;
        }

        match (&new_direction, &self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {},
            _ => self.pending_direction = new_direction,
        };
    }

    pub fn step(&mut self) -> StepResult {
        if let Some(cause) = self.death {
            return Died { score: self.score, cause };
        }

        self.direction = self.pending_direction;

        let new_head = match self.grid.advance(self.head(), self.direction, self.boundary) {
            Some(pos) => pos,
            None => return self.die(DeathCause::Boundary),
        };

        let new_target = if new_head == self.target {
            self.score += 1;
            self.length_target += 1;
            self.target = self.rng.gen_range(0..self.grid.cell_count());
            info!("Target eaten, score {}", self.score);
            Some(self.target)
        } else {
            None
        };

        // Checked against the body before the tail moves away
        if self.body.contains(&new_head) {
            return self.die(DeathCause::SelfCollision);
        }

        self.body.push_back(new_head);

        let vacated = if self.body.len() > self.length_target {
            self.body.pop_front()
        } else {
            None
        };

        Moved { vacated, new_head, new_target }
    }

    fn die(&mut self, cause: DeathCause) -> StepResult {
        info!("Snake died ({:?}) with score {}", cause, self.score);
        self.death = Some(cause);
        Died { score: self.score, cause }
    }
}

#[cfg(test)]
impl<R: Rng> GameState<R> {
    pub(crate) fn place_target(&mut self, pos: Position) {
        self.target = pos;
    }

    pub(crate) fn set_body(&mut self, body: &[Position], direction: Direction) {
        self.body = body.iter().copied().collect();
        self.length_target = body.len();
        self.direction = direction;
        self.pending_direction = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridSize;
    use rand::rngs::mock::StepRng;

    const SEED: u64 = 0x5EED;

    fn small() -> GameConfig {
        GameConfig::new(GridSize::Small)
    }

    fn state() -> GameState {
        let mut state = GameState::with_seed(&small(), SEED);
        // Keep the target out of the way unless a test places it
        state.place_target(255);
        state
    }

    fn body_of<R: Rng>(state: &GameState<R>) -> Vec<Position> {
        state.body().copied().collect()
    }

    #[test]
    fn test_initial_state() {
        for size in GridSize::ALL {
            let state = GameState::with_seed(&GameConfig::new(size), SEED);
            let side = size.side() as usize;

            assert_eq!(body_of(&state), vec![side * side / 3]);
            assert_eq!(state.length_target(), 1);
            assert_eq!(state.direction(), Left);
            assert_eq!(state.score(), 0);
            assert!(state.is_alive());
            assert!(state.target() < side * side);
        }
    }

    #[test]
    fn test_reverse_is_ignored() {
        for dir in [Up, Down, Left, Right] {
            let mut state = state();
            state.set_body(&[85], dir);

            state.set_direction(dir.opposite());
            state.step();

            assert_eq!(state.direction(), dir);
        }
    }

    #[test]
    fn test_reverse_checks_current_not_pending() {
        let mut state = state();
        // Current is Left: Up is accepted, then Right is still the reverse of Left
        state.set_direction(Up);
        state.set_direction(Right);
        state.step();

        assert_eq!(state.direction(), Up);
        assert_eq!(state.head(), 69);
    }

    #[test]
    fn test_first_step_moves_left() {
        let mut state = state();
        let res = state.step();

        assert_eq!(res, Moved { vacated: Some(85), new_head: 84, new_target: None });
        assert_eq!(body_of(&state), vec![84]);
        assert!(res.alive());
    }

    #[test]
    fn test_eating_target() {
        let mut state = state();
        state.place_target(84);

        let res = state.step();

        assert_eq!(state.score(), 1);
        assert_eq!(state.length_target(), 2);
        assert_eq!(body_of(&state), vec![85, 84]);
        match res {
            Moved { vacated: None, new_head: 84, new_target: Some(target) } => {
                assert_eq!(target, state.target());
                assert!(target < 256);
            }
            other => panic!("unexpected step result {:?}", other),
        }
    }

    #[test]
    fn test_growth_trimming() {
        let mut state = state();
        state.place_target(84);
        state.step();
        state.place_target(255);

        for _ in 0..3 {
            let res = state.step();
            assert!(matches!(res, Moved { vacated: Some(_), .. }));
            assert_eq!(state.body().len(), state.length_target());
        }
        assert_eq!(body_of(&state), vec![82, 81]);
    }

    #[test]
    fn test_boundary_death() {
        let cases = [(80, Left), (95, Right), (5, Up), (245, Down)];

        for (start, dir) in cases {
            let mut state = state();
            state.set_body(&[start], dir);

            let res = state.step();

            assert_eq!(res, Died { score: 0, cause: DeathCause::Boundary });
            assert!(!state.is_alive());
            assert_eq!(body_of(&state), vec![start]);
        }
    }

    #[test]
    fn test_wrap_boundary() {
        // Re-entry stays in the same row for Left/Right and the same column for Up/Down
        let cases = [(80, Left, 95), (95, Right, 80), (5, Up, 245), (245, Down, 5)];

        for (start, dir, expected) in cases {
            let mut state = GameState::with_seed(&small().with_boundary(Boundary::Wrap), SEED);
            state.place_target(128);
            state.set_body(&[start], dir);

            let res = state.step();

            assert_eq!(res, Moved { vacated: Some(start), new_head: expected, new_target: None });
            assert_eq!(body_of(&state), vec![expected]);
            assert!(state.is_alive());
        }
    }

    #[test]
    fn test_self_collision() {
        let mut state = state();
        // A square loop: heading Up from 101 runs into 85
        state.set_body(&[85, 86, 102, 101], Left);
        state.set_direction(Up);

        let res = state.step();

        assert_eq!(res, Died { score: 0, cause: DeathCause::SelfCollision });
    }

    #[test]
    fn test_collision_with_tail_cell() {
        let mut state = state();
        // The tail cell is still occupied when the head arrives
        state.set_body(&[85, 86, 102, 101], Left);
        state.set_direction(Up);
        let body_before = body_of(&state);

        state.step();

        assert_eq!(body_of(&state), body_before);
    }

    #[test]
    fn test_target_under_body_is_eaten_before_collision() {
        // Every re-placed target lands on cell 0
        let mut state = GameState::new(&small(), StepRng::new(0, 0));
        state.set_body(&[85, 86, 102, 101], Left);
        state.place_target(85);
        state.set_direction(Up);

        let res = state.step();

        assert_eq!(res, Died { score: 1, cause: DeathCause::SelfCollision });
        assert_eq!(res.score(), Some(1));
        assert_eq!(state.target(), 0);
        assert_eq!(state.length_target(), 5);
        assert_eq!(body_of(&state), vec![85, 86, 102, 101]);
    }

    #[test]
    fn test_step_result_score() {
        let mut state = state();
        let moved = state.step();
        assert_eq!(moved.score(), None);

        state.set_body(&[80], Left);
        assert_eq!(state.step().score(), Some(0));
    }

    #[test]
    fn test_dead_state_is_inert() {
        let mut state = state();
        state.set_body(&[80], Left);
        let first = state.step();

        state.set_direction(Up);
        let second = state.step();

        assert_eq!(first, second);
        assert_eq!(state.direction(), Left);
        assert_eq!(body_of(&state), vec![80]);
    }

    #[test]
    fn test_seeded_targets_are_reproducible() {
        let run = || {
            let mut state = GameState::with_seed(&small().with_boundary(Boundary::Wrap), SEED);
            let mut targets = vec![state.target()];
            for _ in 0..10 {
                state.place_target(state.grid().advance(state.head(), Left, Boundary::Wrap).unwrap());
                if let Moved { new_target: Some(t), .. } = state.step() {
                    targets.push(t);
                }
            }
            targets
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_vacated_target_stays_visible() {
        let res = Moved { vacated: Some(10), new_head: 11, new_target: None };

        assert_eq!(
            res.changed_cells(10),
            vec![CellChange::new(10, CellState::Target), CellChange::new(11, CellState::Body)]
        );
        assert_eq!(res.changed_cells(40)[0], CellChange::new(10, CellState::Empty));
    }

    #[test]
    fn test_cells_snapshot() {
        let state = state();
        let board = state.cells();

        assert_eq!(board.get(85), CellState::Body);
        assert_eq!(board.get(255), CellState::Target);
        assert_eq!(board.occupied().len(), 2);
    }
}
