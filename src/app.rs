use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;

use crate::config::GameConfig;
use crate::game::{GameLoop, Instruction, LoopHandle};
use crate::input::Command;
use crate::snake::GameState;
use crate::term::TermManager;

enum Outcome {
    Quit,
    GameOver(Instruction),
}

/// Runs games in the terminal until the player quits
pub async fn run(config: GameConfig) -> Result<()> {
    let mut term = TermManager::new().context("Failed to read terminal size")?;
    term.setup().context("Failed to set up terminal")?;

    let result = play(&mut term, &config).await;

    term.restore().context("Failed to restore terminal")?;
    result
}

async fn play(term: &mut TermManager, config: &GameConfig) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        let state = GameState::from_config(config);
        info!(
            "Starting {} game, boundary {:?}, seed {:?}",
            config.grid_size, config.boundary, config.seed
        );
        term.start_board(state.grid())?;

        let last = match play_round(term, &mut events, GameLoop::spawn(state)).await? {
            Outcome::Quit => return Ok(()),
            Outcome::GameOver(instruction) => instruction,
        };

        let score = last.text().unwrap_or_default();
        term.show_message(&[score.as_str(), "", "Press any key to play again,", "or q to quit."])
            .context("Failed to draw score")?;

        if wait_for_key(&mut events).await? == Command::Quit {
            return Ok(());
        }
    }
}

async fn play_round(term: &mut TermManager, events: &mut EventStream, mut handle: LoopHandle) -> Result<Outcome> {
    loop {
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => match Command::from_key_event(&key) {
                    Command::Turn(dir) => {
                        handle.send_direction(dir);
                    }
                    Command::Quit => {
                        handle.stop();
                        return Ok(Outcome::Quit);
                    }
                    Command::None => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => return Ok(Outcome::Quit),
            },

            instruction = handle.next_instruction() => match instruction {
                Some(Instruction::Render(changes)) => term.apply(&changes).context("Failed to draw board")?,
                Some(last @ Instruction::ShowScore(_)) => return Ok(Outcome::GameOver(last)),
                None => return Ok(Outcome::Quit),
            },
        }
    }
}

async fn wait_for_key(events: &mut EventStream) -> Result<Command> {
    while let Some(event) = events.next().await {
        if let Event::Key(key) = event.context("Failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                return Ok(Command::from_key_event(&key));
            }
        }
    }

    Ok(Command::Quit)
}
