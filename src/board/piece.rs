/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::Direction;

/// One of the two players.
///
/// Dark always moves first, and therefore [`Side`] defaults to [`Side::Dark`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Side {
    #[default]
    Dark,
    Light,
}

impl Side {
    /// Number of sides.
    pub const COUNT: usize = 2;

    /// An array of both sides, starting with Dark.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Dark, Self::Light]
    }

    /// Returns this [`Side`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Side;
    /// assert_eq!(Side::Dark.opponent(), Side::Light);
    /// assert_eq!(Side::Light.opponent(), Side::Dark);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Returns this [`Side`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The diagonals that count as "forward" for this side's men.
    ///
    /// Dark advances toward row `0`, Light toward row `7`.
    #[inline(always)]
    pub const fn forward(&self) -> [Direction; 2] {
        match self {
            Self::Dark => Direction::NORTH,
            Self::Light => Direction::SOUTH,
        }
    }

    /// The row on which this side's men are crowned (the opponent's back row).
    ///
    /// # Example
    /// ```
    /// # use kingrow::Side;
    /// assert_eq!(Side::Dark.king_row(), 0);
    /// assert_eq!(Side::Light.king_row(), 7);
    /// ```
    #[inline(always)]
    pub const fn king_row(&self) -> u8 {
        match self {
            Self::Dark => 0,
            Self::Light => 7,
        }
    }

    /// The rows this side's men occupy at the start of a game.
    #[inline(always)]
    pub const fn home_rows(&self) -> [u8; 3] {
        match self {
            Self::Dark => [5, 6, 7],
            Self::Light => [0, 1, 2],
        }
    }

    /// Creates a [`Side`] from its single-character form, `D` or `L` (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use kingrow::Side;
    /// assert_eq!(Side::from_char('d').unwrap(), Side::Dark);
    /// assert!(Side::from_char('x').is_err());
    /// ```
    pub fn from_char(side: char) -> Result<Self> {
        match side {
            'd' | 'D' => Ok(Self::Dark),
            'l' | 'L' => Ok(Self::Light),
            _ => bail!("Side must be either 'D' or 'L' (case-insensitive). Found {side:?}"),
        }
    }

    /// Converts this [`Side`] to its single-character form.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        match self {
            Self::Dark => 'D',
            Self::Light => 'L',
        }
    }

    /// Fetches a human-readable name for this [`Side`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "dark" => Ok(Self::Dark),
            "l" | "light" => Ok(Self::Light),
            _ => bail!("Side must be one of \"dark\" or \"light\". Found {s:?}"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl<T> Index<Side> for [T; Side::COUNT] {
    type Output = T;
    /// Sides can be used to index into lists of two elements.
    #[inline(always)]
    fn index(&self, index: Side) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Side> for [T; Side::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

/// The rank of a piece: an uncrowned man or a king.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    #[default]
    Man,
    King,
}

impl PieceKind {
    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// A piece on the board: a [`Side`] and a [`PieceKind`].
///
/// Internally encoded using the following bit pattern:
/// ```text
///     000000 0 0
///        |   | |
///        |   | +- Side (0 = Dark, 1 = Light)
///        |   +- Kind (0 = Man, 1 = King)
///        +- Unused
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    pub const DARK_MAN: Self = Self::new(Side::Dark, PieceKind::Man);
    pub const DARK_KING: Self = Self::new(Side::Dark, PieceKind::King);
    pub const LIGHT_MAN: Self = Self::new(Side::Light, PieceKind::Man);
    pub const LIGHT_KING: Self = Self::new(Side::Light, PieceKind::King);

    const SIDE_MASK: u8 = 0b0000_0001;
    const KIND_MASK: u8 = 0b0000_0010;

    /// Creates a new [`Piece`] from a [`Side`] and a [`PieceKind`].
    #[inline(always)]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self((kind as u8) << 1 | side as u8)
    }

    /// Fetches the [`Side`] that owns this piece.
    #[inline(always)]
    pub const fn side(&self) -> Side {
        if self.0 & Self::SIDE_MASK == 0 {
            Side::Dark
        } else {
            Side::Light
        }
    }

    /// Fetches the [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        if self.0 & Self::KIND_MASK == 0 {
            PieceKind::Man
        } else {
            PieceKind::King
        }
    }

    #[inline(always)]
    pub const fn is_man(&self) -> bool {
        self.0 & Self::KIND_MASK == 0
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        !self.is_man()
    }

    /// Returns `true` if this piece and `other` belong to different sides.
    #[inline(always)]
    pub const fn is_opponent_of(&self, other: Self) -> bool {
        (self.0 ^ other.0) & Self::SIDE_MASK != 0
    }

    /// Returns this piece crowned. Kings are returned unchanged.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Piece;
    /// assert_eq!(Piece::DARK_MAN.promoted(), Piece::DARK_KING);
    /// assert_eq!(Piece::LIGHT_KING.promoted(), Piece::LIGHT_KING);
    /// ```
    #[inline(always)]
    pub const fn promoted(&self) -> Self {
        Self(self.0 | Self::KIND_MASK)
    }

    /// Returns `true` if this piece is a man that would be crowned on `row`.
    #[inline(always)]
    pub const fn crowns_on(&self, row: u8) -> bool {
        self.is_man() && row == self.side().king_row()
    }

    /// Returns this piece as it stands on `row`: promoted if it is a man on its king row, unchanged otherwise.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Piece;
    /// assert_eq!(Piece::LIGHT_MAN.crowned_on(7), Piece::LIGHT_KING);
    /// assert_eq!(Piece::LIGHT_MAN.crowned_on(0), Piece::LIGHT_MAN);
    /// ```
    #[inline(always)]
    pub const fn crowned_on(&self, row: u8) -> Self {
        if self.crowns_on(row) {
            self.promoted()
        } else {
            *self
        }
    }

    /// The diagonals this piece may step and capture along.
    ///
    /// Men only ever go forward; kings go both ways.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Direction, Piece};
    /// assert_eq!(Piece::DARK_MAN.directions(), &Direction::NORTH);
    /// assert_eq!(Piece::LIGHT_MAN.directions(), &Direction::SOUTH);
    /// assert_eq!(Piece::LIGHT_KING.directions().len(), 4);
    /// ```
    #[inline(always)]
    pub const fn directions(&self) -> &'static [Direction] {
        match (self.kind(), self.side()) {
            (PieceKind::King, _) => &Direction::ALL,
            (PieceKind::Man, Side::Dark) => &Direction::NORTH,
            (PieceKind::Man, Side::Light) => &Direction::SOUTH,
        }
    }

    /// Creates a [`Piece`] from its character form.
    ///
    /// `d`/`l` are Dark and Light men; `D`/`L` are Dark and Light kings.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'd' => Ok(Self::DARK_MAN),
            'D' => Ok(Self::DARK_KING),
            'l' => Ok(Self::LIGHT_MAN),
            'L' => Ok(Self::LIGHT_KING),
            _ => bail!("Piece chars must be one of [d, D, l, L]. Found {c:?}"),
        }
    }

    /// Converts this [`Piece`] to its character form.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Piece;
    /// assert_eq!(Piece::DARK_MAN.char(), 'd');
    /// assert_eq!(Piece::LIGHT_KING.char(), 'L');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match (self.side(), self.kind()) {
            (Side::Dark, PieceKind::Man) => 'd',
            (Side::Dark, PieceKind::King) => 'D',
            (Side::Light, PieceKind::Man) => 'l',
            (Side::Light, PieceKind::King) => 'L',
        }
    }

    /// Fetches a human-readable name for this [`Piece`], such as `"Dark king"`.
    pub fn name(&self) -> String {
        format!("{} {}", self.side(), self.kind())
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Piece must be a single character in [d, D, l, L]. Found {s:?}"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.name())
    }
}
