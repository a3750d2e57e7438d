// Copyright 2018-2023 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Word types selecting the PCG variant.
//!
//! A [`PcgEngine`](crate::PcgEngine) is parameterized by its output word.
//! Each output word fixes the state word (twice as wide), the LCG
//! multiplier and the default state and increment. Both traits are sealed:
//! only `u32` (64-bit state) and `u64` (128-bit state) are supported.

use core::fmt;
use core::num::ParseIntError;
use core::ops::{BitAnd, BitOr, BitXor, Rem, Shl, Shr};

mod private {
    pub trait Sealed {}

    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for u128 {}
}

/// Unsigned integer holding the LCG state and increment.
///
/// All arithmetic wraps modulo `2^BITS`.
pub trait StateWord:
    Copy
    + Eq
    + fmt::Debug
    + From<u32>
    + From<u64>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + private::Sealed
{
    /// Width of the word in bits.
    const BITS: u32;
    /// `0`
    const ZERO: Self;
    /// `1`
    const ONE: Self;

    /// Wrapping addition.
    fn wrapping_add(self, rhs: Self) -> Self;
    /// Wrapping multiplication.
    fn wrapping_mul(self, rhs: Self) -> Self;
    /// Two's complement negation.
    fn wrapping_neg(self) -> Self;
    /// The lowest 32 bits.
    fn low_u32(self) -> u32;

    /// Pack `BITS / 32` words, least significant first.
    fn from_le_words(words: &[u32]) -> Self {
        debug_assert_eq!(words.len() as u32, Self::BITS / 32);
        words
            .iter()
            .rev()
            .fold(Self::ZERO, |acc, &w| (acc << 32) | Self::from(w))
    }

    /// Lowercase hexadecimal, no prefix.
    ///
    /// Values that fit in the lower half of a 128-bit word are zero-padded
    /// to 16 digits.
    fn fmt_hex(self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Parse the output of [`StateWord::fmt_hex`].
    fn parse_hex(src: &str) -> Result<Self, ParseIntError>;
}

macro_rules! impl_state_word {
    ($ty:ty, $bits:expr, $low_pad:expr) => {
        impl StateWord for $ty {
            const BITS: u32 = $bits;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$ty>::wrapping_mul(self, rhs)
            }

            #[inline(always)]
            fn wrapping_neg(self) -> Self {
                <$ty>::wrapping_neg(self)
            }

            #[inline(always)]
            fn low_u32(self) -> u32 {
                self as u32
            }

            fn fmt_hex(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let pad = if self >> ($bits / 2) == 0 { $low_pad } else { 0 };
                write!(f, "{:0pad$x}", self, pad = pad)
            }

            fn parse_hex(src: &str) -> Result<Self, ParseIntError> {
                // `fmt_hex` never writes a sign; a lone "+" fails as an invalid digit.
                if src.starts_with('+') {
                    return <$ty>::from_str_radix("+", 16);
                }
                <$ty>::from_str_radix(src, 16)
            }
        }
    };
}

impl_state_word!(u64, 64, 0);
impl_state_word!(u128, 128, 16);

/// Output word of a PCG engine; selects the variant.
///
/// | output | state  | output function |
/// |--------|--------|-----------------|
/// | `u32`  | `u64`  | XSH RR          |
/// | `u64`  | `u128` | XSL RR          |
pub trait OutputWord:
    Copy + Ord + fmt::Debug + fmt::Display + Rem<Output = Self> + private::Sealed
{
    /// State and increment type, twice as wide as the output.
    type State: StateWord;

    /// Width of the output in bits.
    const BITS: u32;
    /// `0`
    const ZERO: Self;
    /// Largest output value.
    const MAX: Self;

    /// LCG multiplier for `Self::State`.
    const MULTIPLIER: Self::State;
    /// Increment of a default-constructed engine.
    const DEFAULT_INCREMENT: Self::State;
    /// State of a default-constructed engine.
    const DEFAULT_STATE: Self::State;

    /// Keep the low `BITS` bits of a state word.
    fn truncate(state: Self::State) -> Self;
    /// Rotate right by `n` bits, `n < BITS`.
    fn rotate_right(self, n: u32) -> Self;
    /// Two's complement negation.
    fn wrapping_neg(self) -> Self;
}

impl OutputWord for u32 {
    type State = u64;

    const BITS: u32 = 32;
    const ZERO: Self = 0;
    const MAX: Self = u32::MAX;

    const MULTIPLIER: u64 = 6364136223846793005;
    const DEFAULT_INCREMENT: u64 = 1442695040888963407;
    const DEFAULT_STATE: u64 = 0x4d595df4d0f33173;

    #[inline(always)]
    fn truncate(state: u64) -> Self {
        state as u32
    }

    #[inline(always)]
    fn rotate_right(self, n: u32) -> Self {
        u32::rotate_right(self, n)
    }

    #[inline(always)]
    fn wrapping_neg(self) -> Self {
        u32::wrapping_neg(self)
    }
}

impl OutputWord for u64 {
    type State = u128;

    const BITS: u32 = 64;
    const ZERO: Self = 0;
    const MAX: Self = u64::MAX;

    const MULTIPLIER: u128 = (2549297995355413924u128 << 64) | 4865540595714422341;
    const DEFAULT_INCREMENT: u128 = (6364136223846793005u128 << 64) | 1442695040888963407;
    const DEFAULT_STATE: u128 = (0xb8dc10e158a92392u128 << 64) | 0x98046df007ec0a53;

    #[inline(always)]
    fn truncate(state: u128) -> Self {
        state as u64
    }

    #[inline(always)]
    fn rotate_right(self, n: u32) -> Self {
        u64::rotate_right(self, n)
    }

    #[inline(always)]
    fn wrapping_neg(self) -> Self {
        u64::wrapping_neg(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::string::ToString;

    struct Hex<W>(W);

    impl<W: StateWord> fmt::Display for Hex<W> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fmt_hex(f)
        }
    }

    #[test]
    fn test_multipliers_are_odd() {
        assert_eq!(<u32 as OutputWord>::MULTIPLIER & 1, 1);
        assert_eq!(<u64 as OutputWord>::MULTIPLIER & 1, 1);
        assert_eq!(<u32 as OutputWord>::DEFAULT_INCREMENT & 1, 1);
        assert_eq!(<u64 as OutputWord>::DEFAULT_INCREMENT & 1, 1);
    }

    #[test]
    fn test_wide_constants() {
        assert_eq!(
            <u64 as OutputWord>::MULTIPLIER,
            0x2360ed051fc65da44385df649fccf645
        );
        assert_eq!(
            <u64 as OutputWord>::DEFAULT_INCREMENT,
            0x5851f42d4c957f2d14057b7ef767814f
        );
    }

    #[test]
    fn test_from_le_words() {
        assert_eq!(u64::from_le_words(&[0x89abcdef, 0x01234567]), 0x0123456789abcdef);
        assert_eq!(
            u128::from_le_words(&[4, 3, 2, 1]),
            0x00000001_00000002_00000003_00000004
        );
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(StateWord::wrapping_add(u64::MAX, 2), 1);
        assert_eq!(StateWord::wrapping_neg(1u128), u128::MAX);
        assert_eq!(StateWord::wrapping_mul(1u128 << 127, 2), 0);
        assert_eq!(StateWord::low_u32(0x1_0000_0002u64), 2);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Hex(0x2au64).to_string(), "2a");
        assert_eq!(Hex(0x2au128).to_string(), "000000000000002a");
        assert_eq!(Hex(u128::MAX).to_string(), "ffffffffffffffffffffffffffffffff");
        assert_eq!(
            Hex((0x9ae5ab94ac973bcu128 << 64) | 0x0d2161282538436b).to_string(),
            "9ae5ab94ac973bc0d2161282538436b"
        );

        assert_eq!(u128::parse_hex("000000000000002a"), Ok(0x2a));
        assert_eq!(u64::parse_hex("2a"), Ok(0x2a));
        assert!(u64::parse_hex("xyz").is_err());
        assert!(u64::parse_hex("1ffffffffffffffff").is_err());
        assert!(u64::parse_hex("+2a").is_err());
        assert!(u128::parse_hex("+2a").is_err());
    }
}
