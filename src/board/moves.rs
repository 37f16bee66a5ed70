/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};
use arrayvec::ArrayVec;

use super::{Bitboard, Square};

/// Maximum number of jumps in a single capture sequence.
///
/// Every jump removes a distinct piece, and a piece can only be jumped if it stands on one of the
/// 18 playable squares that are not on the edge of the board.
pub const MAX_JUMPS: usize = 18;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_JUMPS`] jumps.
pub type JumpList = ArrayVec<Jump, MAX_JUMPS>;

/// A list of moves, as produced by the move generator.
pub type MoveList = Vec<Move>;

/// A single segment of a capture sequence: a piece on `from` jumps the piece on `over`, landing on `to`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    from: Square,
    over: Square,
    to: Square,
}

impl Jump {
    /// Creates a [`Jump`] from its start and landing squares.
    ///
    /// Returns `None` if the two squares are not exactly two diagonal steps apart.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Jump, Square};
    /// let jump = Jump::new(Square::new(4, 1), Square::new(2, 3)).unwrap();
    /// assert_eq!(jump.over(), Square::new(3, 2));
    /// assert!(Jump::new(Square::new(4, 1), Square::new(3, 2)).is_none());
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Option<Self> {
        match from.midpoint(to) {
            Some(over) => Some(Self { from, over, to }),
            None => None,
        }
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square of the piece being captured.
    #[inline(always)]
    pub const fn over(&self) -> Square {
        self.over
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }
}

impl fmt::Debug for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} (over {})", self.from, self.to, self.over)
    }
}

/// A complete move for one turn.
///
/// Either a single diagonal step, or an entire capture sequence.
/// A capture sequence always holds at least one [`Jump`], and each jump starts where the previous one landed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// A single diagonal step onto an empty square.
    Simple { from: Square, to: Square },

    /// One or more consecutive jumps by the same piece.
    Capture(JumpList),
}

impl Move {
    /// Creates a simple (non-capturing) move.
    #[inline(always)]
    pub const fn simple(from: Square, to: Square) -> Self {
        Self::Simple { from, to }
    }

    /// Creates a capture sequence from its jumps.
    ///
    /// Fails if `jumps` is empty, too long, or if consecutive jumps do not chain together.
    pub fn capture(jumps: impl IntoIterator<Item = Jump>) -> Result<Self> {
        let mut list = JumpList::new();
        for jump in jumps {
            if let Some(prev) = list.last() {
                if prev.to() != jump.from() {
                    bail!("Jump {jump:?} does not start where {prev:?} landed");
                }
            }
            list.try_push(jump)
                .map_err(|_| anyhow!("Capture sequences may hold at most {MAX_JUMPS} jumps"))?;
        }

        if list.is_empty() {
            bail!("A capture sequence must contain at least one jump");
        }

        Ok(Self::Capture(list))
    }

    /// Creates a capture sequence from the squares the piece visits, starting square included.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Move, Square};
    /// let mv = Move::capture_path([Square::new(5, 0), Square::new(3, 2), Square::new(1, 4)]).unwrap();
    /// assert_eq!(mv.num_captures(), 2);
    /// assert_eq!(mv.to_string(), "12x19x26");
    /// ```
    pub fn capture_path(path: impl IntoIterator<Item = Square>) -> Result<Self> {
        let mut squares = path.into_iter();
        let Some(mut from) = squares.next() else {
            bail!("A capture path must contain at least two squares");
        };

        let mut jumps = Vec::new();
        for to in squares {
            let jump = Jump::new(from, to)
                .ok_or(anyhow!("{from} and {to} are not two diagonal steps apart"))?;
            jumps.push(jump);
            from = to;
        }

        Self::capture(jumps)
    }

    /// The square the moving piece starts on.
    ///
    /// A hand-built capture with no jumps has no real squares, and reports [`Square::default`].
    #[inline(always)]
    pub fn from(&self) -> Square {
        match self {
            Self::Simple { from, .. } => *from,
            Self::Capture(jumps) => jumps.first().map(Jump::from).unwrap_or_default(),
        }
    }

    /// The square the moving piece ends on.
    ///
    /// See [`Move::from`] for captures with no jumps.
    #[inline(always)]
    pub fn to(&self) -> Square {
        match self {
            Self::Simple { to, .. } => *to,
            Self::Capture(jumps) => jumps.last().map(Jump::to).unwrap_or_default(),
        }
    }

    /// Returns `true` if this is a capture with no jumps in it.
    ///
    /// Such a move can only be built by hand, and is never legal.
    #[inline(always)]
    pub fn is_empty_capture(&self) -> bool {
        matches!(self, Self::Capture(jumps) if jumps.is_empty())
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        matches!(self, Self::Capture(_))
    }

    #[inline(always)]
    pub const fn is_simple(&self) -> bool {
        matches!(self, Self::Simple { .. })
    }

    /// The jumps of this move. Empty for simple moves.
    #[inline(always)]
    pub fn jumps(&self) -> &[Jump] {
        match self {
            Self::Simple { .. } => &[],
            Self::Capture(jumps) => jumps.as_slice(),
        }
    }

    /// Number of pieces this move removes from the board.
    #[inline(always)]
    pub fn num_captures(&self) -> usize {
        self.jumps().len()
    }

    /// The squares of every piece this move captures.
    #[inline(always)]
    pub fn captured(&self) -> Bitboard {
        self.jumps().iter().map(Jump::over).collect()
    }

    /// Every square this move mentions, in the order the piece meets them.
    pub fn squares(&self) -> Vec<Square> {
        match self {
            Self::Simple { from, to } => vec![*from, *to],
            Self::Capture(jumps) => std::iter::once(self.from())
                .chain(jumps.iter().flat_map(|jump| [jump.over(), jump.to()]))
                .collect(),
        }
    }

    /// Returns `true` if `self` is a capture sequence that `other` strictly extends.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Move, Square};
    /// let short = Move::capture_path([Square::new(5, 0), Square::new(3, 2)]).unwrap();
    /// let long = Move::capture_path([Square::new(5, 0), Square::new(3, 2), Square::new(1, 4)]).unwrap();
    /// assert!(short.is_prefix_of(&long));
    /// assert!(!long.is_prefix_of(&short));
    /// assert!(!long.is_prefix_of(&long));
    /// ```
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        let (mine, theirs) = (self.jumps(), other.jumps());
        !mine.is_empty() && mine.len() < theirs.len() && theirs.starts_with(mine)
    }

    /// Parses a move from its text form.
    ///
    /// Simple moves join two squares with `-` (`"11-15"`); captures join every landing square
    /// with `x` (`"15x24x31"`). Squares may be official numbers or `row,col` pairs.
    pub fn from_text(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.contains('x') {
            let squares = s
                .split('x')
                .map(Square::from_text)
                .collect::<Result<Vec<_>>>()?;

            if squares.len() < 2 {
                bail!("A capture must list at least two squares. Got {s:?}");
            }

            return Self::capture_path(squares);
        }

        let (from, to) = s
            .split_once('-')
            .ok_or(anyhow!("Moves must look like `11-15` or `15x24x31`. Got {s:?}"))?;
        let from = Square::from_text(from)?;
        let to = Square::from_text(to)?;

        if !from.is_diagonal_neighbor(to) {
            bail!("A simple move must be a single diagonal step. Got {s:?}");
        }

        Ok(Self::simple(from, to))
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    /// Wrapper for [`Move::from_text`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { from, to } => write!(f, "{from}-{to}"),
            Self::Capture(jumps) => {
                write!(f, "{}", self.from())?;
                for jump in jumps {
                    write!(f, "x{}", jump.to())?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Move {
    /// Displays the move in its text form, along with what kind of move it is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { .. } => write!(f, "{self} (Simple)"),
            Self::Capture(jumps) => write!(f, "{self} (Capture x{})", jumps.len()),
        }
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    #[inline(always)]
    fn eq(&self, other: &T) -> bool {
        self.to_string().eq(other.as_ref())
    }
}
