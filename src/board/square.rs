/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};

use super::RuleViolation;

/// One of the four diagonal directions a piece can travel in.
///
/// "North" points toward row `0`, which is the direction Dark advances in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All four diagonals.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// The two diagonals that lead toward row `0`.
    pub const NORTH: [Self; 2] = [Self::NorthWest, Self::NorthEast];

    /// The two diagonals that lead toward row `7`.
    pub const SOUTH: [Self; 2] = [Self::SouthWest, Self::SouthEast];

    /// Returns the `(row, column)` deltas of a single step in this direction.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Direction;
    /// assert_eq!(Direction::NorthWest.delta(), (-1, -1));
    /// assert_eq!(Direction::SouthEast.delta(), (1, 1));
    /// ```
    #[inline(always)]
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Self::NorthWest => (-1, -1),
            Self::NorthEast => (-1, 1),
            Self::SouthWest => (1, -1),
            Self::SouthEast => (1, 1),
        }
    }

    /// Returns the direction pointing the opposite way.
    #[inline(always)]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::NorthWest => Self::SouthEast,
            Self::NorthEast => Self::SouthWest,
            Self::SouthWest => Self::NorthEast,
            Self::SouthEast => Self::NorthWest,
        }
    }
}

/// Represents a single square on an `8x8` draughts board.
///
/// Internally encoded as `row * 8 + column`, where row `0` is the row Dark is
/// advancing toward and row `7` is Dark's home row:
/// ```text
/// 0|  0  1  2  3  4  5  6  7
/// 1|  8  9 10 11 12 13 14 15
///   ...
/// 7| 56 57 58 59 60 61 62 63
///  +------------------------
///     0  1  2  3  4  5  6  7
/// ```
///
/// Only the 32 squares where `row + column` is odd are *playable*.
/// Those carry an official number from `1` to `32`, assigned so that Dark's starting
/// squares are `1..=12` and Light's are `21..=32`:
/// ```text
/// 0| .. 32 .. 31 .. 30 .. 29
/// 1| 28 .. 27 .. 26 .. 25 ..
/// 2| .. 24 .. 23 .. 22 .. 21
/// 3| 20 .. 19 .. 18 .. 17 ..
/// 4| .. 16 .. 15 .. 14 .. 13
/// 5| 12 .. 11 .. 10 ..  9 ..
/// 6| ..  8 ..  7 ..  6 ..  5
/// 7|  4 ..  3 ..  2 ..  1 ..
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Number of playable squares.
    pub const PLAYABLE: usize = 32;

    /// Length of a side of the board.
    pub const SIDE: u8 = 8;

    const COL_MASK: u8 = 0b0000_0111;

    /// Returns an iterator over all 64 squares, playable or not.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Returns an iterator over the 32 playable squares, in order of their index.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// assert_eq!(Square::playable().count(), 32);
    /// assert!(Square::playable().all(|sq| sq.is_playable()));
    /// ```
    #[inline(always)]
    pub fn playable() -> impl Iterator<Item = Self> {
        Self::iter().filter(Self::is_playable)
    }

    /// Creates a new [`Square`] from a row and column, without error checking.
    ///
    /// Coordinates are caller-checked; use [`Square::try_new`] for untrusted input.
    /// Without debug assertions, out-of-range coordinates wrap around the board rather than
    /// producing a square outside it.
    ///
    /// # Panics
    /// If `row` or `col` is greater than `7` and debug assertions are enabled.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// let sq = Square::new(5, 0);
    /// assert_eq!(sq.row(), 5);
    /// assert_eq!(sq.col(), 0);
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < Self::SIDE && col < Self::SIDE, "Row and column must be in [0,8)");
        Self((row & Self::COL_MASK) << 3 | (col & Self::COL_MASK))
    }

    /// Creates a new playable [`Square`] from a row and column.
    ///
    /// Coordinates outside the board, or on a square that can never hold a piece,
    /// yield [`RuleViolation::OutOfBounds`].
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Square, RuleViolation};
    /// assert!(Square::try_new(5, 0).is_ok());
    /// assert_eq!(Square::try_new(5, 1), Err(RuleViolation::OutOfBounds { row: 5, col: 1 }));
    /// assert!(Square::try_new(8, 1).is_err());
    /// assert!(Square::try_new(-1, 0).is_err());
    /// ```
    pub fn try_new(row: i32, col: i32) -> Result<Self, RuleViolation> {
        let side = Self::SIDE as i32;
        if !(0..side).contains(&row) || !(0..side).contains(&col) || (row + col) % 2 == 0 {
            return Err(RuleViolation::OutOfBounds { row, col });
        }

        Ok(Self::new(row as u8, col as u8))
    }

    /// Creates a new [`Square`] from its index, `row * 8 + col`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from its index, without error checking.
    ///
    /// Like [`Square::new`], the index is caller-checked and wraps without debug assertions.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8 & Self::MAX)
    }

    /// Creates a playable [`Square`] from its official number (`1..=32`).
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// assert_eq!(Square::from_number(1).unwrap(), Square::new(7, 6));
    /// assert_eq!(Square::from_number(12).unwrap(), Square::new(5, 0));
    /// assert_eq!(Square::from_number(32).unwrap(), Square::new(0, 1));
    /// assert!(Square::from_number(33).is_err());
    /// ```
    pub fn from_number(number: u8) -> Result<Self> {
        if !(1..=Self::PLAYABLE as u8).contains(&number) {
            bail!("Square numbers must be between [1, 32]. Got {number}");
        }

        // Two playable squares share each half-row of four index pairs
        let half = Self::PLAYABLE as u8 - number;
        let row = half / 4;
        let col = 2 * (half % 4) + (row % 2 == 0) as u8;
        Ok(Self::new(row, col))
    }

    /// Fetches the row of this [`Square`], `0..=7`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 >> 3
    }

    /// Fetches the column of this [`Square`], `0..=7`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 & Self::COL_MASK
    }

    /// Fetches the index of this [`Square`], casted to a [`usize`].
    ///
    /// Useful when using a [`Square`] to index into things.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if a piece may ever stand on this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// assert!(Square::new(0, 1).is_playable());
    /// assert!(!Square::new(0, 0).is_playable());
    /// ```
    #[inline(always)]
    pub const fn is_playable(&self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Returns the official number (`1..=32`) of this [`Square`].
    ///
    /// Only meaningful for playable squares; an unplayable square shares the number of its row-neighbour.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// assert_eq!(Square::new(7, 6).number(), 1);
    /// assert_eq!(Square::new(0, 1).number(), 32);
    /// ```
    #[inline(always)]
    pub const fn number(&self) -> u8 {
        Self::PLAYABLE as u8 - self.0 / 2
    }

    /// Steps one square in `direction`, if that stays on the board.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Direction, Square};
    /// let sq = Square::new(5, 0);
    /// assert_eq!(sq.offset(Direction::NorthEast), Some(Square::new(4, 1)));
    /// assert_eq!(sq.offset(Direction::NorthWest), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();

        let Some(row) = self.row().checked_add_signed(dr) else {
            return None;
        };
        let Some(col) = self.col().checked_add_signed(dc) else {
            return None;
        };

        if row < Self::SIDE && col < Self::SIDE {
            Some(Self::new(row, col))
        } else {
            None
        }
    }

    /// If `self` and `other` are exactly two diagonal steps apart, returns the square between them.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// assert_eq!(Square::new(4, 1).midpoint(Square::new(2, 3)), Some(Square::new(3, 2)));
    /// assert_eq!(Square::new(4, 1).midpoint(Square::new(3, 2)), None);
    /// ```
    #[inline(always)]
    pub const fn midpoint(&self, other: Self) -> Option<Self> {
        if self.row().abs_diff(other.row()) == 2 && self.col().abs_diff(other.col()) == 2 {
            Some(Self::new(
                (self.row() + other.row()) / 2,
                (self.col() + other.col()) / 2,
            ))
        } else {
            None
        }
    }

    /// Returns `true` if `other` is one diagonal step away from `self`.
    #[inline(always)]
    pub const fn is_diagonal_neighbor(&self, other: Self) -> bool {
        self.row().abs_diff(other.row()) == 1 && self.col().abs_diff(other.col()) == 1
    }

    /// Parses a square from either its official number (`"12"`) or its coordinates (`"5,0"`).
    ///
    /// # Example
    /// ```
    /// # use kingrow::Square;
    /// assert_eq!(Square::from_text("12").unwrap(), Square::new(5, 0));
    /// assert_eq!(Square::from_text("5,0").unwrap(), Square::new(5, 0));
    /// assert_eq!(Square::from_text("(4, 1)").unwrap(), Square::new(4, 1));
    /// assert!(Square::from_text("4,2").is_err());
    /// ```
    pub fn from_text(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some((row, col)) = s
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split_once(',')
        {
            let row = row
                .trim()
                .parse::<i32>()
                .with_context(|| format!("Invalid row in square {s:?}"))?;
            let col = col
                .trim()
                .parse::<i32>()
                .with_context(|| format!("Invalid column in square {s:?}"))?;

            return Ok(Self::try_new(row, col)?);
        }

        let number = s
            .parse::<u8>()
            .map_err(|_| anyhow!("Square must be a number in [1, 32] or `row,col`. Got {s:?}"))?;
        Self::from_number(number)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_text`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl fmt::Display for Square {
    /// Playable squares display as their official number; anything else as `row,col`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_playable() {
            self.number().fmt(f)
        } else {
            write!(f, "{},{}", self.row(), self.col())
        }
    }
}

impl fmt::Debug for Square {
    /// Displays the coordinates of this square as well as its number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) [{self}]", self.row(), self.col())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_square_numbers_round_trip() {
        for number in 1..=32 {
            let square = Square::from_number(number).unwrap();
            assert!(square.is_playable(), "{number} mapped to {square:?}");
            assert_eq!(square.number(), number);
        }
    }

    #[test]
    fn test_square_numbers_home_rows() {
        // Dark's home rows hold 1..=12, Light's hold 21..=32
        for square in Square::playable() {
            match square.row() {
                5..=7 => assert!((1..=12).contains(&square.number())),
                0..=2 => assert!((21..=32).contains(&square.number())),
                _ => assert!((13..=20).contains(&square.number())),
            }
        }
    }

    #[test]
    fn test_playable_parity() {
        assert_eq!(Square::playable().count(), Square::PLAYABLE);
        assert!(Square::new(7, 0).is_playable());
        assert!(!Square::new(7, 7).is_playable());
        assert!(Square::new(0, 7).is_playable());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Square::new(0, 7);
        assert_eq!(corner.offset(Direction::NorthWest), None);
        assert_eq!(corner.offset(Direction::NorthEast), None);
        assert_eq!(corner.offset(Direction::SouthEast), None);
        assert_eq!(corner.offset(Direction::SouthWest), Some(Square::new(1, 6)));

        for square in Square::playable() {
            for direction in Direction::ALL {
                if let Some(next) = square.offset(direction) {
                    assert!(next.is_playable());
                    assert!(square.is_diagonal_neighbor(next));
                    assert_eq!(next.offset(direction.opposite()), Some(square));
                }
            }
        }
    }

    #[test]
    fn test_try_new_rejects_bad_coordinates() {
        assert!(Square::try_new(0, 1).is_ok());
        assert_eq!(
            Square::try_new(0, 0),
            Err(RuleViolation::OutOfBounds { row: 0, col: 0 })
        );
        assert!(Square::try_new(3, 8).is_err());
        assert!(Square::try_new(-2, 1).is_err());
    }

    #[test]
    fn test_square_parsing() {
        assert_eq!("1".parse::<Square>().unwrap(), Square::new(7, 6));
        assert_eq!("0,1".parse::<Square>().unwrap(), Square::new(0, 1));
        assert!("0".parse::<Square>().is_err());
        assert!("a1".parse::<Square>().is_err());
        assert!("1,1".parse::<Square>().is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_new_rejects_off_board_coordinates() {
        let _ = Square::new(9, 0);
    }

    #[test]
    fn test_every_square_fits_a_bitboard() {
        for square in Square::iter() {
            assert!(square.index() < Square::COUNT);
            assert_eq!(crate::Bitboard::from_square(square).population(), 1);
        }
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::new(5, 0).to_string(), "12");
        assert_eq!(Square::new(5, 1).to_string(), "5,1");
    }
}
