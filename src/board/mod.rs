/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// A set of squares, stored as a 64-bit mask.
mod bitboard;

/// Following a capture through every jump it is forced to make.
mod chain;

/// A game in progress, with undo.
mod game;

/// Enumerating the legal moves of a position.
mod movegen;

/// Simple moves, jumps, and capture sequences.
mod moves;

/// Performance testing for the move generator.
mod perft;

/// Sides, piece kinds, and pieces.
mod piece;

/// The board itself and whose turn it is.
mod position;

/// Validating and applying moves, and the errors produced when a move is rejected.
mod rules;

/// Squares, directions, and official square numbering.
mod square;

/// Detecting the end of the game.
mod status;

pub use bitboard::*;
pub use game::*;
pub use movegen::{jump_landing, neighbor};
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use rules::*;
pub use square::*;
pub use status::*;
