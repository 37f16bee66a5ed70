/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Position, Side};

/// Whether a game is still being played, and if not, who won it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,

    /// The given side has won: its opponent was left without a legal move.
    Won(Side),
}

impl GameStatus {
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Won(_))
    }

    /// Returns the winning [`Side`], if the game has ended.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Side> {
        match self {
            Self::InProgress => None,
            Self::Won(side) => Some(*side),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "In progress"),
            Self::Won(side) => write!(f, "{side} wins"),
        }
    }
}

impl Position {
    /// Determines whether the game has ended in this position.
    ///
    /// A player with no legal moves on their turn has lost. This covers both having no pieces left
    /// and having every piece blocked.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{GameStatus, Position, Side};
    /// assert_eq!(Position::initial().status(), GameStatus::InProgress);
    ///
    /// // Light has nothing left to move
    /// let pos = Position::from_fen("L:D12:L").unwrap();
    /// assert_eq!(pos.status(), GameStatus::Won(Side::Dark));
    /// ```
    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            GameStatus::Won(self.side_to_move().opponent())
        } else {
            GameStatus::InProgress
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_blocked_side_loses() {
        // Dark man on 28 is stuck in the corner behind the Light man on 32
        let pos = Position::from_fen("D:D28:L32").unwrap();
        assert!(pos.legal_moves().is_empty());
        assert_eq!(pos.status(), GameStatus::Won(Side::Light));
        assert!(pos.status().is_over());
        assert_eq!(pos.status().winner(), Some(Side::Light));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GameStatus::InProgress.to_string(), "In progress");
        assert_eq!(GameStatus::Won(Side::Dark).to_string(), "Dark wins");
        assert_eq!(GameStatus::InProgress.winner(), None);
    }
}
