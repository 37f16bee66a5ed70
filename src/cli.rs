/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::{Move, Piece, Square};

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Generate and print the text form of the current position.
    Fen,

    /// Flips the side-to-move, without playing a move.
    Flip,

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be printed using their debug formatter, which displays what kind of move it is.
        #[arg(short, long, default_value = "false")]
        debug: bool,
    },

    /// Start a new game from the standard starting position.
    #[command(alias = "new")]
    NewGame,

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Place a piece on the provided square.
    ///
    /// Pieces are written `d`/`l` for Dark and Light men, and `D`/`L` for kings.
    Place { piece: Piece, square: Square },

    /// Play the provided move, if it is legal.
    ///
    /// Simple moves are written `11-15`; captures list every landing square, as in `15x24x31`.
    #[command(aliases = ["move", "m"])]
    Play { mv: Move },

    /// Set the current position from its text form, or to the starting position if none is given.
    ///
    /// Example: `position D:D1-12:L21-32`.
    Position { fen: Option<String> },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Print whether the game is over, and who won.
    Status,

    /// Remove the piece at the provided square.
    Take { square: Square },

    /// Take back the last move played.
    Undo,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!("d".parse::<EngineCommand>(), Ok(EngineCommand::Display)));
        assert!(matches!("quit".parse::<EngineCommand>(), Ok(EngineCommand::Exit)));
        assert!(matches!(
            "perft 4".parse::<EngineCommand>(),
            Ok(EngineCommand::Perft { depth: 4 })
        ));

        let Ok(EngineCommand::Play { mv }) = "m 11-15".parse::<EngineCommand>() else {
            panic!("Failed to parse a move command");
        };
        assert_eq!(mv, "11-15");

        let Ok(EngineCommand::Place { piece, square }) = "place L 5,2".parse::<EngineCommand>()
        else {
            panic!("Failed to parse a place command");
        };
        assert_eq!(piece, Piece::LIGHT_KING);
        assert_eq!(square, Square::new(5, 2));
    }

    #[test]
    fn test_parse_moves_filter() {
        let Ok(EngineCommand::Moves { square, debug }) = "moves 12 -d".parse::<EngineCommand>()
        else {
            panic!("Failed to parse a moves command");
        };
        assert_eq!(square, Some(Square::new(5, 0)));
        assert!(debug);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("frobnicate".parse::<EngineCommand>().is_err());
        assert!("play 11-19".parse::<EngineCommand>().is_err());
        assert!("take 33".parse::<EngineCommand>().is_err());
    }
}
