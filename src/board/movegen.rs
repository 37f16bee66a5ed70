/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{chain, Bitboard, Direction, Jump, Move, MoveList, Piece, Position, Square};

/// A table indexed by a square and a direction, holding the square one diagonal step away (if any).
const NEIGHBORS: [[Option<Square>; 4]; Square::COUNT] = {
    let mut table = [[None; 4]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < Direction::ALL.len() {
            table[i][j] = from.offset(Direction::ALL[j]);
            j += 1;
        }
        i += 1;
    }

    table
};

/// A table indexed by a square and a direction, holding the landing square of a jump (if it stays on the board).
const JUMP_LANDINGS: [[Option<Square>; 4]; Square::COUNT] = {
    let mut table = [[None; 4]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let mut j = 0;
        while j < Direction::ALL.len() {
            if let Some(over) = NEIGHBORS[i][j] {
                table[i][j] = NEIGHBORS[over.index()][j];
            }
            j += 1;
        }
        i += 1;
    }

    table
};

/// Fetches the square one diagonal step from `square` in `direction`.
#[inline(always)]
pub const fn neighbor(square: Square, direction: Direction) -> Option<Square> {
    NEIGHBORS[square.index()][direction as usize]
}

/// Fetches the landing square of a jump from `square` in `direction`.
#[inline(always)]
pub const fn jump_landing(square: Square, direction: Direction) -> Option<Square> {
    JUMP_LANDINGS[square.index()][direction as usize]
}

/// Computes the single jumps available to `piece` standing on `from`.
///
/// `captured` holds the pieces already jumped earlier in the same sequence. They still occupy their
/// squares, but cannot be jumped again. `vacated` is the square the sequence started from, which
/// counts as empty even though the board still shows the moving piece there.
pub(crate) fn jumps_from(
    position: &Position,
    from: Square,
    piece: Piece,
    captured: Bitboard,
    vacated: Square,
) -> impl Iterator<Item = Jump> + '_ {
    piece.directions().iter().filter_map(move |&direction| {
        let over = neighbor(from, direction)?;
        let to = jump_landing(from, direction)?;

        let victim = position.piece_at(over)?;
        if !victim.is_opponent_of(piece) || captured.contains(over) {
            return None;
        }

        if !position.is_empty_at(to) && to != vacated {
            return None;
        }

        Jump::new(from, to)
    })
}

impl Position {
    /// Generates every legal move for the side to move.
    ///
    /// If any capture is available, only complete capture sequences are returned.
    /// Otherwise, every simple move is returned. An empty list means the side to move has lost.
    ///
    /// Moves are ordered by their starting square, then by direction, so the output is deterministic.
    ///
    /// # Example
    /// ```
    /// # use kingrow::Position;
    /// let pos = Position::initial();
    /// let moves = pos.legal_moves();
    /// assert_eq!(moves.len(), 7);
    /// assert!(moves.iter().all(|mv| mv.is_simple()));
    /// ```
    pub fn legal_moves(&self) -> MoveList {
        let captures = self.captures();
        if !captures.is_empty() {
            return captures;
        }

        self.pieces(self.side_to_move())
            .flat_map(|(from, piece)| self.simple_moves_from(from, piece))
            .collect()
    }

    /// Generates the legal moves of the piece on `square`.
    ///
    /// Respects the mandatory capture rule: if the side to move can capture anywhere on the board,
    /// a piece that cannot capture has no legal moves.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Position, Square};
    /// let pos = Position::initial();
    /// assert_eq!(pos.legal_moves_from(Square::new(5, 0)).len(), 1);
    /// assert_eq!(pos.legal_moves_from(Square::new(6, 1)).len(), 0);
    /// assert_eq!(pos.legal_moves_from(Square::new(4, 1)).len(), 0);
    /// ```
    pub fn legal_moves_from(&self, square: Square) -> MoveList {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.from() == square)
            .collect()
    }

    /// Returns `true` if the side to move has at least one capture available.
    pub fn has_captures(&self) -> bool {
        self.pieces(self.side_to_move()).any(|(from, piece)| {
            jumps_from(self, from, piece, Bitboard::EMPTY_BOARD, from)
                .next()
                .is_some()
        })
    }

    /// Returns `true` if `mv` is one of the legal moves in this position.
    #[inline(always)]
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    /// Generates every maximal capture sequence for the side to move.
    fn captures(&self) -> MoveList {
        let mut moves = MoveList::new();

        for (from, piece) in self.pieces(self.side_to_move()) {
            for jump in jumps_from(self, from, piece, Bitboard::EMPTY_BOARD, from) {
                moves.extend(chain::expand(self, jump));
            }
        }

        moves
    }

    /// Generates the single-step moves of `piece` on `from`.
    fn simple_moves_from(&self, from: Square, piece: Piece) -> impl Iterator<Item = Move> + '_ {
        piece.directions().iter().filter_map(move |&direction| {
            let to = neighbor(from, direction)?;
            self.is_empty_at(to).then(|| Move::simple(from, to))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_tables() {
        let sq = Square::new(5, 0);
        assert_eq!(neighbor(sq, Direction::NorthEast), Some(Square::new(4, 1)));
        assert_eq!(neighbor(sq, Direction::NorthWest), None);
        assert_eq!(jump_landing(sq, Direction::NorthEast), Some(Square::new(3, 2)));
        assert_eq!(jump_landing(Square::new(1, 2), Direction::NorthEast), None);
        assert_eq!(jump_landing(Square::new(6, 1), Direction::SouthEast), None);
    }

    #[test]
    fn test_initial_moves() {
        let moves = Position::initial().legal_moves();
        let expected = ["9-13", "9-14", "10-14", "10-15", "11-15", "11-16", "12-16"];
        assert_eq!(moves.len(), expected.len());
        for mv in expected {
            assert!(moves.iter().any(|m| *m == mv), "missing {mv} in {moves:?}");
        }
    }

    #[test]
    fn test_capture_is_mandatory() {
        // Dark man on 16, Light man on 19; Dark also has a free man on 9
        let pos = pos("D:D9,16:L19");
        let moves = pos.legal_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0], "16x23");
        assert!(pos.has_captures());
        assert!(pos.legal_moves_from(Square::from_number(9).unwrap()).is_empty());
    }

    #[test]
    fn test_men_cannot_capture_backwards() {
        // Light man behind the Dark man, from Dark's point of view
        let pos = pos("D:D19:L16");
        assert!(!pos.has_captures());
        assert!(pos.legal_moves().iter().all(Move::is_simple));
    }

    #[test]
    fn test_kings_capture_backwards() {
        let pos = pos("D:DK19:L16");
        assert!(pos.has_captures());
        assert_eq!(pos.legal_moves(), vec![Move::from_text("19x12").unwrap()]);
    }

    #[test]
    fn test_cannot_jump_own_piece() {
        let pos = pos("D:D16,19:L");
        assert!(!pos.has_captures());
    }

    #[test]
    fn test_blocked_landing() {
        let pos = pos("D:D16:L19,23");
        assert!(!pos.has_captures());
    }

    #[test]
    fn test_is_legal() {
        let pos = Position::initial();
        assert!(pos.is_legal(&Move::from_text("11-15").unwrap()));
        // Light's move, but Dark is to play
        assert!(!pos.is_legal(&Move::from_text("21-17").unwrap()));
        // Backwards onto an occupied square
        assert!(!pos.is_legal(&Move::simple(Square::new(5, 0), Square::new(6, 1))));
    }

    #[test]
    fn test_no_pieces_no_moves() {
        assert!(pos("D:D:L5").legal_moves().is_empty());
    }
}
