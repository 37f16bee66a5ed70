/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use crate::{print_perft, EngineCommand, Game, Move, Square};

/// The interactive front end: reads commands, applies them to a [`Game`], and prints the results.
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    ///
    /// Modified whenever moves are played or new positions are given,
    /// and reset whenever the engine is told to start a new game.
    game: Game,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::default(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Returns the game the engine is currently playing.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) {
        // Safe unwrap: `send` can only fail if it's corresponding receiver doesn't exist,
        //  and the only way our engine's `Receiver` can no longer exist is when our engine
        //  doesn't exist either, so this is always safe.
        self.sender.send(command).unwrap();
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.name());

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                log::debug!("Input handler thread stopping: {err:#}");
            }
        });

        while let Ok(cmd) = self.receiver.recv() {
            if matches!(cmd, EngineCommand::Exit) {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.execute(cmd) {
                log::debug!("Command failed: {e:?}");
                eprintln!("Error: {e:#}");
            }
        }

        Ok(())
    }

    /// Executes a single [`EngineCommand`] against the current game.
    ///
    /// Failed commands leave the game as it was.
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<()> {
        log::trace!("Executing {cmd:?}");

        match cmd {
            EngineCommand::Display => self.display(),

            EngineCommand::Exit => {}

            EngineCommand::Fen => println!("{}", self.game.to_fen()),

            EngineCommand::Flip => self.game.edit(|pos| -> Result<()> {
                pos.toggle_side_to_move();
                Ok(())
            })?,

            EngineCommand::Moves { square, debug } => self.moves(square, debug),

            EngineCommand::NewGame => self.game.reset(),

            EngineCommand::Perft { depth } => {
                print_perft::<false>(self.game.position(), depth);
            }

            EngineCommand::Place { piece, square } => {
                self.game.edit(|pos| pos.place(piece, square))?;
                log::debug!("Placed {} on {square}", piece.name());
            }

            EngineCommand::Play { mv } => self.play(mv)?,

            EngineCommand::Position { fen } => {
                self.game = match fen {
                    Some(fen) => Game::from_fen(&fen)?,
                    None => Game::new(),
                };
            }

            EngineCommand::Splitperft { depth } => {
                print_perft::<true>(self.game.position(), depth);
            }

            EngineCommand::Status => println!("{}", self.game.status()),

            EngineCommand::Take { square } => {
                let piece = self.game.edit(|pos| {
                    pos.take(square)
                        .ok_or_else(|| anyhow!("There is no piece on {square}"))
                })?;
                log::debug!("Removed {} from {square}", piece.name());
            }

            EngineCommand::Undo => match self.game.undo() {
                Some(mv) => println!("Took back {mv}"),
                None => bail!("There are no moves to take back"),
            },
        }

        Ok(())
    }

    /// Executes the `display` command, printing the current position.
    fn display(&self) {
        println!("{:?}", self.game);
    }

    /// Executes the `moves` command, printing every legal move (or only those of the piece on `square`).
    fn moves(&self, square: Option<Square>, debug: bool) {
        let moves = if let Some(square) = square {
            self.game.legal_moves_from(square)
        } else {
            self.game.legal_moves()
        };

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            // Otherwise, join them by comma-space
            moves
                .into_iter()
                .map(|mv| {
                    if debug {
                        format!("{mv:?}")
                    } else {
                        mv.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");
    }

    /// Executes the `play` command, reporting the result of the game if this move ended it.
    fn play(&mut self, mv: Move) -> Result<()> {
        self.game
            .make_move(mv)
            .context("Move was not played; the position is unchanged")?;

        let status = self.game.status();
        if status.is_over() {
            println!("{status}");
        }

        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing engine commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and exit this function
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            // If successful, send the command to the engine
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}
