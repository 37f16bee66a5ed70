/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Resolution of multi-jump capture sequences.
//!
//! Once a piece has made its first jump, it must keep jumping for as long as it can.
//! A man that lands on its king row is crowned and its turn ends, even if the new king could jump again.

use super::{
    movegen::jumps_from, Bitboard, Jump, JumpList, Move, MoveList, Piece, Position, Square,
};

/// Expands a single opening jump into every complete capture sequence that starts with it.
///
/// The returned moves are all maximal: none of them can be extended by another jump.
///
/// # Panics
/// If debug assertions are enabled and no piece stands on the starting square of `first`.
pub(crate) fn expand(position: &Position, first: Jump) -> MoveList {
    expand_from(position, &[first])
}

/// Expands a partial capture sequence into every complete sequence that begins with it.
///
/// `partial` must be non-empty and its jumps must chain together.
pub(crate) fn expand_from(position: &Position, partial: &[Jump]) -> MoveList {
    let mut moves = MoveList::new();

    let Some(first) = partial.first() else {
        return moves;
    };
    let Some(piece) = position.piece_at(first.from()) else {
        debug_assert!(false, "No piece on {} to start a capture", first.from());
        return moves;
    };

    let mut path = partial.iter().copied().collect::<JumpList>();
    let captured = partial.iter().map(Jump::over).collect::<Bitboard>();

    extend(position, piece, first.from(), captured, &mut path, &mut moves);
    moves
}

/// Recursively extends `path`, pushing every maximal sequence onto `moves`.
fn extend(
    position: &Position,
    piece: Piece,
    origin: Square,
    captured: Bitboard,
    path: &mut JumpList,
    moves: &mut MoveList,
) {
    // Safe unwrap: `path` always holds at least the opening jump
    let landing = path.last().unwrap().to();

    // Crowning ends the turn
    let mut extended = false;
    if !piece.crowns_on(landing.row()) {
        for jump in jumps_from(position, landing, piece, captured, origin) {
            // A sequence can never exceed the number of capturable squares
            if path.try_push(jump).is_err() {
                break;
            }

            extended = true;
            extend(position, piece, origin, captured.with(jump.over()), path, moves);
            path.pop();
        }
    }

    if !extended {
        moves.push(Move::Capture(path.clone()));
    }
}
