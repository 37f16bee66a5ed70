/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use super::{Move, Position, Square};

/// Why a move was rejected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The starting square is empty.
    #[error("there is no piece on {0}")]
    NoPiece(Square),

    /// The starting square holds a piece of the side that is not to move.
    #[error("the piece on {0} belongs to the opponent")]
    OpponentPiece(Square),

    /// A simple move was attempted while a capture is available.
    #[error("a capture is available and must be taken")]
    CaptureRequired,

    /// A capture sequence stopped while the piece could still jump.
    #[error("the capture sequence must continue while jumps remain")]
    IncompleteChain,

    /// Anything else: the move is simply not among the legal moves.
    #[error("it is not a legal move in this position")]
    NotLegal,
}

/// A move that the rules do not allow.
///
/// Returned as a value; the position the move was tried on is left untouched.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RuleViolation {
    /// The move is well-formed but not one of the legal moves.
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalMoveReason },

    /// A coordinate lies off the board or on a square that can never hold a piece.
    #[error("Square ({row}, {col}) is not a playable square")]
    OutOfBounds { row: i32, col: i32 },
}

impl Position {
    /// Applies `mv` to a copy of this position and returns the result.
    ///
    /// The move must match one of [`Position::legal_moves`] exactly, including every jump of a
    /// capture sequence. On success the moving piece leaves its square, every captured piece is
    /// removed, a man reaching its king row is crowned, and the turn passes to the opponent.
    ///
    /// `self` is never modified, so a rejected move leaves everything as it was.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Move, Position, Side};
    /// let pos = Position::initial();
    /// let next = pos.apply(&"11-15".parse().unwrap()).unwrap();
    /// assert_eq!(next.side_to_move(), Side::Light);
    ///
    /// // Light cannot move first
    /// let light = Move::from_text("21-17").unwrap();
    /// assert!(pos.apply(&light).is_err());
    /// ```
    pub fn apply(&self, mv: &Move) -> Result<Self, RuleViolation> {
        if mv.is_empty_capture() {
            log::debug!("Rejected a capture with no jumps in {self}");
            return Err(RuleViolation::IllegalMove {
                mv: mv.clone(),
                reason: IllegalMoveReason::NotLegal,
            });
        }

        if let Some(square) = mv.squares().into_iter().find(|sq| !sq.is_playable()) {
            log::debug!("Rejected {mv:?}: {square:?} is not playable");
            return Err(RuleViolation::OutOfBounds {
                row: square.row() as i32,
                col: square.col() as i32,
            });
        }

        let legal = self.legal_moves();
        if !legal.contains(mv) {
            let reason = self.diagnose(mv, &legal);
            log::debug!("Rejected {mv:?} in {self}: {reason}");
            return Err(RuleViolation::IllegalMove {
                mv: mv.clone(),
                reason,
            });
        }

        log::trace!("Applying {mv:?} to {self}");
        Ok(self.make_move_unchecked(mv))
    }

    /// Works out why `mv` is not among `legal`.
    fn diagnose(&self, mv: &Move, legal: &[Move]) -> IllegalMoveReason {
        let from = mv.from();
        let Some(piece) = self.piece_at(from) else {
            return IllegalMoveReason::NoPiece(from);
        };

        if piece.side() != self.side_to_move() {
            return IllegalMoveReason::OpponentPiece(from);
        }

        if mv.is_simple() && legal.iter().any(Move::is_capture) {
            return IllegalMoveReason::CaptureRequired;
        }

        if legal.iter().any(|full| mv.is_prefix_of(full)) {
            return IllegalMoveReason::IncompleteChain;
        }

        IllegalMoveReason::NotLegal
    }

    /// Applies `mv` to a copy of this position without checking that it is legal.
    ///
    /// Used internally once a move is known to have come from the move generator.
    pub(crate) fn make_move_unchecked(&self, mv: &Move) -> Self {
        let mut next = *self;

        let (from, to) = (mv.from(), mv.to());
        let Some(piece) = next.take(from) else {
            debug_assert!(false, "No piece on {from} to move in {self}");
            return next;
        };

        // The whole sequence is resolved before anything is removed
        for jump in mv.jumps() {
            next.set(jump.over(), None);
        }

        next.set(to, Some(piece.crowned_on(to.row())));

        next.toggle_side_to_move();
        next
    }
}
