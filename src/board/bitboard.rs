/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not};

use super::Square;

/// A set of [`Square`]s, stored as one bit per square.
///
/// Bit `i` corresponds to the square with index `i` (`row * 8 + col`).
/// Used for occupancy queries and for tracking which pieces a capture sequence has already jumped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);

    /// All 32 squares where `row + col` is odd.
    pub const PLAYABLE_SQUARES: Self = Self(0x55AA55AA55AA55AA);

    /// Constructs a new [`Bitboard`] from the provided bit pattern.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a [`Bitboard`] containing only `square`.
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.0)
    }

    /// Returns the inner bits.
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Returns a copy of `self` that also contains `square`.
    ///
    /// # Example
    /// ```
    /// # use kingrow::{Bitboard, Square};
    /// let set = Bitboard::EMPTY_BOARD.with(Square::new(3, 2));
    /// assert!(set.contains(Square::new(3, 2)));
    /// assert_eq!(set.population(), 1);
    /// ```
    #[inline(always)]
    pub const fn with(self, square: Square) -> Self {
        Self(self.0 | 1 << square.0)
    }

    /// Returns a copy of `self` that does not contain `square`.
    #[inline(always)]
    pub const fn without(self, square: Square) -> Self {
        Self(self.0 & !(1 << square.0))
    }

    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & 1 << square.0 != 0
    }

    /// Returns `true` if `self` and `other` share at least one square.
    #[inline(always)]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in this set.
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Returns the lowest-indexed square in this set, if there is one.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        (!self.is_empty()).then(|| Square(self.0.trailing_zeros() as u8))
    }

    /// Pops and returns the lowest-indexed square in this set.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.0 &= self.0.wrapping_sub(1);
        lsb
    }

    /// Returns a [`BitboardIter`] over all squares in this set, in increasing index order.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl FromIterator<Square> for Bitboard {
    /// A [`Bitboard`] can be created from an iterator over [`Square`]s.
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

macro_rules! impl_bitwise_op {
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Bitboard {
    /// Prints the set as an `8x8` grid, row `0` first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Square::SIDE {
            for col in 0..Square::SIDE {
                let c = if self.contains(Square::new(row, col)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterates over the [`Square`]s of a [`Bitboard`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_playable_mask_matches_squares() {
        let playable = Square::playable().collect::<Bitboard>();
        assert_eq!(playable, Bitboard::PLAYABLE_SQUARES);
        assert_eq!(playable.population(), 32);
    }

    #[test]
    fn test_with_without() {
        let a = Square::new(3, 2);
        let b = Square::new(4, 1);
        let set = Bitboard::EMPTY_BOARD.with(a).with(b);
        assert!(set.contains(a) && set.contains(b));
        assert!(!set.without(a).contains(a));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_bitwise_ops() {
        let a = Bitboard::from_square(Square::new(0, 1));
        let b = Bitboard::from_square(Square::new(7, 0));
        assert_eq!((a | b).population(), 2);
        assert!((a & b).is_empty());
        assert!(!(a | b).intersects(!(a | b)));
    }
}
