// Copyright 2018-2023 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Textual save and restore of engine state.
//!
//! An engine is written as three whitespace-separated lowercase hexadecimal
//! fields, `multiplier increment state`:
//!
//! ```
//! use rand_pcg_engine::Pcg32;
//!
//! let rng = Pcg32::with_stream(42, 54);
//! let text = rng.to_string();
//! assert_eq!(text, "5851f42d4c957f2d 6d 185706b82c2e03f8");
//!
//! let restored: Pcg32 = text.parse().unwrap();
//! assert_eq!(restored, rng);
//! ```

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use crate::word::{OutputWord, StateWord};
use crate::PcgEngine;

/// A field of the textual engine representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The LCG multiplier.
    Multiplier,
    /// The increment (stream).
    Increment,
    /// The state.
    State,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Multiplier => "multiplier",
            Field::Increment => "increment",
            Field::State => "state",
        })
    }
}

/// Error restoring an engine from text.
///
/// Whenever this is returned the target engine is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input ended before the given field.
    MissingField(Field),
    /// The given field is not a valid hexadecimal number of the state width.
    InvalidNumber {
        /// Field being parsed.
        field: Field,
        /// Underlying integer parsing error.
        source: ParseIntError,
    },
    /// The multiplier belongs to a different PCG variant.
    MultiplierMismatch,
    /// The increment is even, which no engine can have.
    EvenIncrement,
    /// Extra input follows the three fields.
    TrailingInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingField(field) => write!(f, "missing {} field", field),
            ParseError::InvalidNumber { field, source } => {
                write!(f, "invalid {} field: {}", field, source)
            }
            ParseError::MultiplierMismatch => {
                f.write_str("multiplier does not match this PCG variant")
            }
            ParseError::EvenIncrement => f.write_str("increment must be odd"),
            ParseError::TrailingInput => f.write_str("unexpected input after state field"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

struct Hex<W>(W);

impl<W: StateWord> fmt::Display for Hex<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_hex(f)
    }
}

fn next_word<'a, W, I>(fields: &mut I, field: Field) -> Result<W, ParseError>
where
    W: StateWord,
    I: Iterator<Item = &'a str>,
{
    let src = fields.next().ok_or(ParseError::MissingField(field))?;
    W::parse_hex(src).map_err(|source| ParseError::InvalidNumber { field, source })
}

impl<T: OutputWord> PcgEngine<T> {
    /// Restore from the next three fields of `fields`.
    ///
    /// Exactly three fields are consumed on success, so several engines can
    /// be read in turn from one whitespace-split text. On error `self` is
    /// left unchanged.
    pub fn read_fields<'a, I>(&mut self, fields: &mut I) -> Result<(), ParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let result = Self::parse_fields(fields);
        match result {
            Ok(pcg) => {
                *self = pcg;
                Ok(())
            }
            Err(err) => {
                debug!("PcgEngine: rejected textual state: {}", err);
                Err(err)
            }
        }
    }

    fn parse_fields<'a, I>(fields: &mut I) -> Result<Self, ParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let multiplier: T::State = next_word(fields, Field::Multiplier)?;
        if multiplier != T::MULTIPLIER {
            warn!("PcgEngine: multiplier {:?} belongs to another variant", multiplier);
            return Err(ParseError::MultiplierMismatch);
        }
        let increment: T::State = next_word(fields, Field::Increment)?;
        if increment & T::State::ONE != T::State::ONE {
            return Err(ParseError::EvenIncrement);
        }
        let state = next_word(fields, Field::State)?;
        Ok(PcgEngine { state, increment })
    }
}

/// Writes `multiplier increment state` in hexadecimal.
impl<T: OutputWord> fmt::Display for PcgEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            Hex(T::MULTIPLIER),
            Hex(self.increment),
            Hex(self.state)
        )
    }
}

/// Parses the output of the `Display` implementation.
impl<T: OutputWord> FromStr for PcgEngine<T> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let mut fields = s.split_ascii_whitespace();
        let mut pcg = Self::new();
        pcg.read_fields(&mut fields)?;
        if fields.next().is_some() {
            return Err(ParseError::TrailingInput);
        }
        Ok(pcg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Pcg32, Pcg64};
    use std::string::ToString;

    #[test]
    fn test_default_text() {
        assert_eq!(
            Pcg32::new().to_string(),
            "5851f42d4c957f2d 14057b7ef767814f 4d595df4d0f33173"
        );
        assert_eq!(
            Pcg64::new().to_string(),
            "2360ed051fc65da44385df649fccf645 \
             5851f42d4c957f2d14057b7ef767814f \
             b8dc10e158a9239298046df007ec0a53"
        );
    }

    #[test]
    fn test_wide_low_half_is_padded() {
        let rng = Pcg64::with_stream(42, 54);
        assert_eq!(
            rng.to_string(),
            "2360ed051fc65da44385df649fccf645 \
             000000000000006d \
             de2bce05be013be3d3f6c45a41e54320"
        );
    }

    #[test]
    fn test_read_fields_in_sequence() {
        let a = Pcg32::with_stream(1, 2);
        let b = Pcg32::with_stream(3, 4);
        let text = a.to_string() + "\n" + &b.to_string();

        let mut fields = text.split_ascii_whitespace();
        let mut x = Pcg32::new();
        let mut y = Pcg32::new();
        x.read_fields(&mut fields).unwrap();
        y.read_fields(&mut fields).unwrap();
        assert_eq!(fields.next(), None);
        assert_eq!((x, y), (a, b));
    }

    #[test]
    fn test_errors_leave_engine_unchanged() {
        let original = Pcg32::from_state(42);

        let cases = [
            ("", ParseError::MissingField(Field::Multiplier)),
            ("5851f42d4c957f2d", ParseError::MissingField(Field::Increment)),
            ("5851f42d4c957f2d 6d", ParseError::MissingField(Field::State)),
            ("5851f42d4c957f2e 6d 1", ParseError::MultiplierMismatch),
            ("5851f42d4c957f2d 6c 1", ParseError::EvenIncrement),
        ];
        for (text, expected) in cases {
            let mut rng = original;
            let mut fields = text.split_ascii_whitespace();
            assert_eq!(rng.read_fields(&mut fields), Err(expected));
            assert_eq!(rng, original);
        }

        let mut rng = original;
        let err = rng
            .read_fields(&mut "5851f42d4c957f2d 6d zz".split_ascii_whitespace())
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: Field::State, .. }));
        assert_eq!(rng, original);
    }

    #[test]
    fn test_sign_prefix_rejected() {
        assert!(matches!(
            "+5851f42d4c957f2d +6d +1".parse::<Pcg32>(),
            Err(ParseError::InvalidNumber { field: Field::Multiplier, .. })
        ));
        assert!(matches!(
            "5851f42d4c957f2d 6d +1".parse::<Pcg32>(),
            Err(ParseError::InvalidNumber { field: Field::State, .. })
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_error_source() {
        use std::error::Error;

        let err = "5851f42d4c957f2d zz 1".parse::<Pcg32>().unwrap_err();
        let source = err.source().expect("invalid number has a source");
        assert_eq!(source.to_string(), "invalid digit found in string");
        assert!(ParseError::EvenIncrement.source().is_none());
    }

    #[test]
    fn test_variant_mismatch() {
        let text = Pcg64::new().to_string();
        assert!(matches!(
            text.parse::<Pcg32>(),
            Err(ParseError::InvalidNumber { field: Field::Multiplier, .. })
        ));

        let text = Pcg32::new().to_string();
        assert_eq!(text.parse::<Pcg64>(), Err(ParseError::MultiplierMismatch));
    }

    #[test]
    fn test_trailing_input() {
        let text = Pcg32::new().to_string() + " 1";
        assert_eq!(text.parse::<Pcg32>(), Err(ParseError::TrailingInput));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::MissingField(Field::State).to_string(),
            "missing state field"
        );
        assert_eq!(ParseError::EvenIncrement.to_string(), "increment must be odd");
    }
}
