/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::Result;

use super::{GameStatus, Move, Position, RuleViolation};

/// A game in progress: the current [`Position`] plus every move played to reach it.
///
/// Moves are validated by [`Position::apply`] before they are recorded, so the history only ever
/// holds legal moves, and [`Game::undo`] can step back through them.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Game {
    /// The current position.
    position: Position,

    /// Each move played, paired with the position it was played from.
    history: Vec<(Position, Move)>,
}

impl Game {
    /// Creates a new [`Game`] from the standard starting position.
    #[inline(always)]
    pub fn new() -> Self {
        Self::from_position(Position::initial())
    }

    /// Creates a new [`Game`] starting from `position`, with an empty history.
    #[inline(always)]
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    /// Creates a new [`Game`] from the text form of a position. See [`Position::from_fen`].
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns the current [`Position`].
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Edits the current [`Position`] by hand through `f`.
    ///
    /// `f` works on a copy. If it succeeds, the copy becomes the current position and the history is
    /// cleared, since it no longer describes how the position was reached. If it fails, the game is
    /// left exactly as it was.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Game, Square};
    /// let mut game = Game::new();
    /// game.make_move_str("11-15").unwrap();
    ///
    /// let empty = Square::from_number(14).unwrap();
    /// assert!(game.edit(|pos| pos.take(empty).ok_or("empty")).is_err());
    /// assert_eq!(game.history().len(), 1);
    ///
    /// game.edit(|pos| pos.take(Square::from_number(15).unwrap()).ok_or("empty")).unwrap();
    /// assert!(game.history().len() == 0);
    /// ```
    pub fn edit<T, E>(&mut self, f: impl FnOnce(&mut Position) -> Result<T, E>) -> Result<T, E> {
        let mut edited = self.position;
        let out = f(&mut edited)?;

        self.position = edited;
        self.history.clear();
        Ok(out)
    }

    /// Plays `mv` if it is legal.
    ///
    /// On failure, the game is left exactly as it was.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Game, Move, Side};
    /// let mut game = Game::new();
    /// game.make_move(Move::from_text("11-15").unwrap()).unwrap();
    /// assert_eq!(game.side_to_move(), Side::Light);
    /// assert!(game.make_move(Move::from_text("11-15").unwrap()).is_err());
    /// assert_eq!(game.history().len(), 1);
    /// ```
    pub fn make_move(&mut self, mv: Move) -> Result<(), RuleViolation> {
        let next = self.position.apply(&mv)?;
        let prev = std::mem::replace(&mut self.position, next);
        self.history.push((prev, mv));
        Ok(())
    }

    /// Parses `mv` and plays it.
    pub fn make_move_str(&mut self, mv: &str) -> Result<()> {
        let mv = Move::from_text(mv)?;
        Ok(self.make_move(mv)?)
    }

    /// Takes back the last move played, returning it.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Game, Position};
    /// let mut game = Game::new();
    /// game.make_move_str("11-15").unwrap();
    /// assert_eq!(game.undo().unwrap(), "11-15");
    /// assert_eq!(*game.position(), Position::initial());
    /// assert!(game.undo().is_none());
    /// ```
    pub fn undo(&mut self) -> Option<Move> {
        let (prev, mv) = self.history.pop()?;
        self.position = prev;
        Some(mv)
    }

    /// Returns an iterator over the moves played so far, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Move> + '_ {
        self.history.iter().map(|(_, mv)| mv)
    }

    /// Returns the [`GameStatus`] of the current position.
    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    /// Discards the history and returns to the standard starting position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Deref for Game {
    type Target = Position;
    /// A [`Game`] can be used wherever a [`Position`] is read.
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

impl fmt::Debug for Game {
    /// Draws the board, followed by the game's status and the moves played so far.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.position)?;
        writeln!(f, "Status: {}", self.status())?;

        let moves = self.history().map(Move::to_string).collect::<Vec<_>>();
        write!(f, "Moves: {}", moves.join(" "))
    }
}
