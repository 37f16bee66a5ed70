/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt::{self, Write},
    ops::Index,
    str::FromStr,
};

use anyhow::{anyhow, bail, Context, Result};

use super::{Bitboard, Piece, PieceKind, RuleViolation, Side, Square};

/// Text form of the standard starting position.
pub const FEN_STARTPOS: &str =
    "D:D1,2,3,4,5,6,7,8,9,10,11,12:L21,22,23,24,25,26,27,28,29,30,31,32";

/// The state of a game: which piece stands on each square, and whose turn it is.
///
/// A [`Position`] is a plain value. It is only ever changed by the caller that owns it,
/// and [`Position::apply`] returns a new [`Position`] rather than modifying its receiver.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Contents of every square, indexed by [`Square::index`]. Unplayable squares are always `None`.
    board: [Option<Piece>; Square::COUNT],

    /// The [`Side`] of the current player.
    side_to_move: Side,
}

impl Position {
    /// Creates a new, empty [`Position`] with Dark to move.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Position, Side};
    /// let pos = Position::new();
    /// assert_eq!(pos.to_fen(), "D:D:L");
    /// assert_eq!(pos.side_to_move(), Side::Dark);
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            board: [None; Square::COUNT],
            side_to_move: Side::Dark,
        }
    }

    /// Creates the standard starting position: twelve men per side on their three home rows, Dark to move.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Position, Side, FEN_STARTPOS};
    /// let pos = Position::initial();
    /// assert_eq!(pos.count(Side::Dark), 12);
    /// assert_eq!(pos.count(Side::Light), 12);
    /// assert_eq!(pos.to_fen(), FEN_STARTPOS);
    /// ```
    pub fn initial() -> Self {
        let mut pos = Self::new();

        for side in Side::all() {
            let man = Piece::new(side, PieceKind::Man);
            for square in Square::playable().filter(|sq| side.home_rows().contains(&sq.row())) {
                pos.board[square.index()] = Some(man);
            }
        }

        pos
    }

    /// Creates a new [`Position`] from its text form.
    ///
    /// The format is `<side to move>:D<squares>:L<squares>`, where each square list is a
    /// comma-separated list of official square numbers, kings prefixed by `K`.
    /// A range `a-b` may stand in for a run of men.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Piece, Position, Side, Square};
    /// let pos = Position::from_fen("L:D12,K1:L16").unwrap();
    /// assert_eq!(pos.side_to_move(), Side::Light);
    /// assert_eq!(pos.piece_at(Square::new(5, 0)), Some(Piece::DARK_MAN));
    /// assert_eq!(pos.piece_at(Square::new(7, 6)), Some(Piece::DARK_KING));
    /// assert_eq!(pos.piece_at(Square::new(4, 1)), Some(Piece::LIGHT_MAN));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut pos = Self::new();
        let mut split = fen.trim().split(':');

        let side = split
            .next()
            .ok_or(anyhow!("Position string must start with the side to move"))?;
        pos.side_to_move = side.parse()?;

        let mut seen = [false; Side::COUNT];
        for field in split {
            let field = field.trim();
            let mut chars = field.chars();
            let side = chars
                .next()
                .ok_or(anyhow!("Empty piece list in position string {fen:?}"))
                .and_then(Side::from_char)?;

            if seen[side] {
                bail!("{side} pieces are listed twice in position string {fen:?}");
            }
            seen[side] = true;

            for entry in chars.as_str().split(',').map(str::trim).filter(|s| !s.is_empty()) {
                pos.place_fen_entry(side, entry)
                    .with_context(|| format!("Invalid entry {entry:?} in position string {fen:?}"))?;
            }
        }

        Ok(pos)
    }

    /// Places the piece(s) described by a single entry of a square list.
    fn place_fen_entry(&mut self, side: Side, entry: &str) -> Result<()> {
        let (kind, squares) = match entry.strip_prefix(['K', 'k']) {
            Some(rest) => (PieceKind::King, rest),
            None => (PieceKind::Man, entry),
        };

        let (first, last) = match squares.split_once('-') {
            Some((first, last)) => (first.trim().parse::<u8>()?, last.trim().parse::<u8>()?),
            None => {
                let n = squares.trim().parse::<u8>()?;
                (n, n)
            }
        };

        if first > last {
            bail!("Square range {first}-{last} is backwards");
        }

        for number in first..=last {
            let square = Square::from_number(number)?;
            if let Some(existing) = self.piece_at(square) {
                bail!("Square {square} is already occupied by {}", existing.name());
            }
            self.board[square.index()] = Some(Piece::new(side, kind).crowned_on(square.row()));
        }

        Ok(())
    }

    /// Generates the text form of this [`Position`]. See [`Position::from_fen`].
    pub fn to_fen(&self) -> String {
        format!("{self}")
    }

    /// Returns the current player as a [`Side`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Toggles the side to move.
    ///
    /// This does not play a move. It exists for setting up positions.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Returns a copy of this [`Position`] with `side` to move.
    #[inline(always)]
    pub const fn with_side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = side;
        self
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Returns `true` if no piece stands on `square`.
    #[inline(always)]
    pub const fn is_empty_at(&self, square: Square) -> bool {
        self.board[square.index()].is_none()
    }

    /// Places `piece` on `square`, replacing whatever stood there.
    ///
    /// Unplayable squares can never hold a piece, so they yield [`RuleViolation::OutOfBounds`].
    /// A man placed on its own king row is crowned.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Piece, Position, Square};
    /// let mut pos = Position::new();
    /// assert!(pos.place(Piece::DARK_MAN, Square::new(4, 1)).is_ok());
    /// assert!(pos.place(Piece::DARK_MAN, Square::new(4, 2)).is_err());
    ///
    /// pos.place(Piece::DARK_MAN, Square::new(0, 1)).unwrap();
    /// assert_eq!(pos.piece_at(Square::new(0, 1)), Some(Piece::DARK_KING));
    /// ```
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<Option<Piece>, RuleViolation> {
        if !square.is_playable() {
            return Err(RuleViolation::OutOfBounds {
                row: square.row() as i32,
                col: square.col() as i32,
            });
        }

        Ok(self.board[square.index()].replace(piece.crowned_on(square.row())))
    }

    /// Builder-style version of [`Position::place`].
    pub fn with_piece(mut self, piece: Piece, square: Square) -> Result<Self, RuleViolation> {
        self.place(piece, square)?;
        Ok(self)
    }

    /// Removes and returns the piece on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.board[square.index()].take()
    }

    /// Writes `piece` onto `square` without checking the square. Only used when applying moves.
    #[inline(always)]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.index()] = piece;
    }

    /// Returns an iterator over every piece on the board, along with its square.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::playable().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Returns an iterator over the pieces belonging to `side`, along with their squares.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.side() == side)
    }

    /// Returns the number of pieces `side` has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    /// Returns the number of pieces on the board.
    pub fn total(&self) -> usize {
        self.iter().count()
    }

    /// Returns a [`Bitboard`] of every occupied square.
    pub fn occupied(&self) -> Bitboard {
        self.iter().map(|(sq, _)| sq).collect()
    }

    /// Returns a [`Bitboard`] of every square holding one of `side`'s pieces.
    pub fn occupied_by(&self, side: Side) -> Bitboard {
        self.pieces(side).map(|(sq, _)| sq).collect()
    }

    /// Formats the square list of `side` for the text form.
    fn fen_pieces(&self, side: Side) -> String {
        let mut pieces = self.pieces(side).collect::<Vec<_>>();
        pieces.sort_by_key(|(sq, _)| sq.number());

        pieces
            .into_iter()
            .map(|(sq, piece)| {
                if piece.is_king() {
                    format!("K{sq}")
                } else {
                    sq.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for Position {
    /// The default [`Position`] is the standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::initial()
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.board[index.index()]
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Display this position's text form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:D{}:L{}",
            self.side_to_move.to_char(),
            self.fen_pieces(Side::Dark),
            self.fen_pieces(Side::Light)
        )
    }
}

impl fmt::Debug for Position {
    /// Draws the board as a grid, with the side to move and text form alongside it.
    ///
    /// Empty playable squares are drawn as `.`; unplayable squares are left blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(256);

        for row in 0..Square::SIDE {
            write!(board, "{row}|")?;
            for col in 0..Square::SIDE {
                let square = Square::new(row, col);
                let occupant = match self.piece_at(square) {
                    Some(piece) => piece.char(),
                    None if square.is_playable() => '.',
                    None => ' ',
                };
                write!(board, " {occupant}")?;
            }

            match row {
                1 => write!(board, "      Side: {}", self.side_to_move)?,
                2 => write!(board, "      Dark: {}", self.count(Side::Dark))?,
                3 => write!(board, "     Light: {}", self.count(Side::Light))?,
                _ => {}
            }
            board.push('\n');
        }

        board += " +";
        for _ in 0..Square::SIDE {
            board += "--";
        }
        board += "\n  ";
        for col in 0..Square::SIDE {
            write!(board, " {col}")?;
        }
        write!(board, "\n\nPosition: {self}")?;

        write!(f, "{board}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_initial_position() {
        let pos = Position::initial();
        assert_eq!(pos.side_to_move(), Side::Dark);
        assert_eq!(pos.total(), 24);

        for (square, piece) in pos.iter() {
            assert!(square.is_playable());
            assert!(piece.is_man());
            assert!(piece.side().home_rows().contains(&square.row()));
        }

        // The two middle rows start out empty
        for square in Square::playable().filter(|sq| (3..=4).contains(&sq.row())) {
            assert!(pos.is_empty_at(square));
        }
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [FEN_STARTPOS, "L:DK1,12:L16", "D:D:L", "D:D5,K9:LK20,29,30"] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen, "{pos:?}");
        }
    }

    #[test]
    fn test_fen_ranges() {
        let pos = Position::from_fen("D:D1-12:L21-32").unwrap();
        assert_eq!(pos, Position::initial());
    }

    #[test]
    fn test_fen_rejects_garbage() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("X:D1:L2").is_err());
        assert!(Position::from_fen("D:D1:D2").is_err());
        assert!(Position::from_fen("D:D1:L1").is_err());
        assert!(Position::from_fen("D:D33").is_err());
        assert!(Position::from_fen("D:D5-3").is_err());
        assert!(Position::from_fen("D:Q1").is_err());
    }

    #[test]
    fn test_place_and_take() {
        let mut pos = Position::new();
        let square = Square::new(3, 2);
        assert_eq!(pos.place(Piece::LIGHT_KING, square), Ok(None));
        assert_eq!(pos[square], Some(Piece::LIGHT_KING));
        assert_eq!(pos.take(square), Some(Piece::LIGHT_KING));
        assert!(pos.is_empty_at(square));

        assert_eq!(
            pos.place(Piece::LIGHT_KING, Square::new(3, 3)),
            Err(RuleViolation::OutOfBounds { row: 3, col: 3 })
        );
    }

    #[test]
    fn test_men_placed_on_king_row_are_crowned() {
        let pos = Position::from_fen("D:D29:L1-4").unwrap();
        assert_eq!(pos[Square::new(0, 7)], Some(Piece::DARK_KING));
        assert_eq!(pos[Square::new(7, 0)], Some(Piece::LIGHT_KING));
        assert_eq!(pos.to_fen(), "D:DK29:LK1,K2,K3,K4");

        let mut pos = Position::new();
        pos.place(Piece::LIGHT_MAN, Square::new(7, 2)).unwrap();
        pos.place(Piece::DARK_MAN, Square::new(7, 4)).unwrap();
        assert_eq!(pos[Square::new(7, 2)], Some(Piece::LIGHT_KING));
        assert_eq!(pos[Square::new(7, 4)], Some(Piece::DARK_MAN));
    }

    #[test]
    fn test_occupancy() {
        let pos = Position::initial();
        assert_eq!(pos.occupied().population(), 24);
        assert_eq!(pos.occupied_by(Side::Dark).population(), 12);
        assert!(!pos
            .occupied_by(Side::Dark)
            .intersects(pos.occupied_by(Side::Light)));
    }
}
