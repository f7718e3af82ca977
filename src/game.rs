use log::{debug, info};
use rand::{rngs::StdRng, Rng};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::TICK_INTERVAL;
use crate::grid::CellChange;
use crate::snake::{Direction, GameState, StepResult};

/// Turns that can wait for the next tick before key presses are dropped
const MAILBOX_CAPACITY: usize = 4;
const INSTRUCTION_BUFFER: usize = 16;

/// What the renderer should do after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Render(Vec<CellChange>),
    ShowScore(u32),
}

impl Instruction {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Instruction::ShowScore(_))
    }

    pub fn text(&self) -> Option<String> {
        match self {
            Instruction::ShowScore(score) => Some(format!("Score: {}", score)),
            Instruction::Render(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Terminal,
}

/// Sole owner of the game state. Turns arrive through the mailbox and are
/// only applied at the start of a tick.
pub struct GameLoop<R = StdRng> {
    state: GameState<R>,
    directions: mpsc::Receiver<Direction>,
    status: LoopStatus,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(state: GameState<R>, directions: mpsc::Receiver<Direction>) -> Self {
        GameLoop { state, directions, status: LoopStatus::Running }
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Full redraw of the starting board
    pub fn initial_frame(&self) -> Instruction {
        Instruction::Render(self.state.cells().occupied())
    }

    pub fn tick(&mut self) -> Option<Instruction> {
        if self.status == LoopStatus::Terminal {
            return None;
        }

        while let Ok(direction) = self.directions.try_recv() {
            self.state.set_direction(direction);
        }

        match self.state.step() {
            StepResult::Died { score, .. } => {
                self.status = LoopStatus::Terminal;
                Some(Instruction::ShowScore(score))
            }
            moved => Some(Instruction::Render(moved.changed_cells(self.state.target()))),
        }
    }

    /// Ticks at a fixed rate until the game ends or the renderer goes away.
    pub async fn run(mut self, instructions: mpsc::Sender<Instruction>) {
        let mut ticker = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if instructions.send(self.initial_frame()).await.is_err() {
            return;
        }

        loop {
            ticker.tick().await;

            let instruction = match self.tick() {
                Some(instruction) => instruction,
                None => break,
            };
            let terminal = instruction.is_terminal();

            if instructions.send(instruction).await.is_err() {
                debug!("Renderer dropped, stopping game loop");
                break;
            }
            if terminal {
                break;
            }
        }

        info!("Game loop stopped with score {}", self.state.score());
    }
}

impl<R: Rng + Send + 'static> GameLoop<R> {
    /// Starts the loop on its own task
    pub fn spawn(state: GameState<R>) -> LoopHandle {
        let (direction_tx, direction_rx) = mpsc::channel(MAILBOX_CAPACITY);
        let (instruction_tx, instruction_rx) = mpsc::channel(INSTRUCTION_BUFFER);

        let task = tokio::spawn(GameLoop::new(state, direction_rx).run(instruction_tx));

        LoopHandle { directions: direction_tx, instructions: instruction_rx, task }
    }
}

/// Input and output ends of a running game loop. Dropping it stops the loop.
pub struct LoopHandle {
    directions: mpsc::Sender<Direction>,
    instructions: mpsc::Receiver<Instruction>,
    task: JoinHandle<()>,
}

impl LoopHandle {
    /// Queues a turn for the next tick, returns false if it was dropped
    pub fn send_direction(&self, direction: Direction) -> bool {
        match self.directions.try_send(direction) {
            Ok(()) => true,
            Err(TrySendError::Full(dir)) => {
                debug!("Mailbox full, dropping turn {:?}", dir);
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    pub async fn next_instruction(&mut self) -> Option<Instruction> {
        self.instructions.recv().await
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
