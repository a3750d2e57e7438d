// Copyright 2018-2023 Developers of the Rand project.
// Copyright 2017 Paul Dicker.
// Copyright 2014-2017 Melissa O'Neill and PCG Project contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! PCG engine with explicit stream selection

use core::fmt;
use core::marker::PhantomData;
use core::ops::Sub;
#[cfg(feature = "serde1")] use serde::{Deserialize, Serialize};

use crate::seed_seq::SeedSequence;
use crate::word::{OutputWord, StateWord};

/// A PCG random number generator with explicitly chosen stream.
///
/// Permuted Congruential Generator with a state twice as wide as the output
/// word `T`, an internal Linear Congruential Generator and an xorshift and
/// random rotation output function:
///
/// - `PcgEngine<u32>`: 64-bit state, XSH RR output. This corresponds to
///   `pcg_engines::setseq_xsh_rr_64_32` from pcg_cpp and `pcg32` from the
///   PCG reference implementations.
/// - `PcgEngine<u64>`: 128-bit state, XSL RR output. This corresponds to
///   `pcg_engines::setseq_xsl_rr_128_64` and `pcg64`.
///
/// The engine stores the state and the increment. The increment is always
/// odd and selects one of `2^STREAMS_POW2` streams; the multiplier is a
/// constant of the variant.
///
/// Equality compares state and increment, so two engines are equal exactly
/// when they will produce the same sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(
        try_from = "RawEngine<T>",
        bound(
            serialize = "T::State: Serialize",
            deserialize = "T::State: Deserialize<'de>"
        )
    )
)]
pub struct PcgEngine<T: OutputWord> {
    pub(crate) state: T::State,
    pub(crate) increment: T::State,
}

// Unchecked serialized form; an even increment is rejected on conversion.
#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(
    rename = "PcgEngine",
    bound(deserialize = "T::State: Deserialize<'de>")
)]
struct RawEngine<T: OutputWord> {
    state: T::State,
    increment: T::State,
}

#[cfg(feature = "serde1")]
impl<T: OutputWord> core::convert::TryFrom<RawEngine<T>> for PcgEngine<T> {
    type Error = crate::text::ParseError;

    fn try_from(raw: RawEngine<T>) -> Result<Self, Self::Error> {
        if raw.increment & T::State::ONE != T::State::ONE {
            return Err(crate::text::ParseError::EvenIncrement);
        }
        Ok(PcgEngine {
            state: raw.state,
            increment: raw.increment,
        })
    }
}

/// A PCG random number generator (XSH RR 64/32 (LCG) variant).
pub type Lcg64Xsh32 = PcgEngine<u32>;

/// [`Lcg64Xsh32`] is also officially known as `pcg32`.
pub type Pcg32 = Lcg64Xsh32;

/// A PCG random number generator (XSL RR 128/64 (LCG) variant).
pub type Lcg128Xsl64 = PcgEngine<u64>;

/// [`Lcg128Xsl64`] is also officially known as `pcg64`.
pub type Pcg64 = Lcg128Xsl64;

impl<T: OutputWord> PcgEngine<T> {
    /// Smallest value returned by [`PcgEngine::next_value`].
    pub const MIN: T = T::ZERO;

    /// Largest value returned by [`PcgEngine::next_value`].
    pub const MAX: T = T::MAX;

    /// The LCG multiplier.
    pub const MULTIPLIER: T::State = T::MULTIPLIER;

    /// The period of each stream is `2^PERIOD_POW2`.
    pub const PERIOD_POW2: u32 = <T::State as StateWord>::BITS;

    /// There are `2^STREAMS_POW2` distinct streams.
    pub const STREAMS_POW2: u32 = <T::State as StateWord>::BITS - 1;

    // Permute the state before stepping when it fits a machine word.
    const OUTPUT_PREVIOUS: bool = <T::State as StateWord>::BITS <= 64;

    const SEED_WORDS: usize = 2 * (<T::State as StateWord>::BITS / 32) as usize;

    /// Construct the default engine.
    ///
    /// The default is a fixed, documented starting point: every
    /// default-constructed engine yields the same sequence.
    pub const fn new() -> Self {
        PcgEngine {
            state: T::DEFAULT_STATE,
            increment: T::DEFAULT_INCREMENT,
        }
    }

    /// Construct an engine seeded with `state` on the default stream.
    ///
    /// Equivalent to [`PcgEngine::new`] followed by [`PcgEngine::seed`].
    pub fn from_state(state: T::State) -> Self {
        let mut pcg = Self::new();
        pcg.seed(state);
        pcg
    }

    /// Construct an instance compatible with PCG seed and stream.
    ///
    /// Note that the highest bit of the `stream` parameter is discarded
    /// to simplify upholding internal invariants.
    pub fn with_stream(state: T::State, stream: T::State) -> Self {
        let mut pcg = Self::new();
        pcg.seed_with_stream(state, stream);
        pcg
    }

    /// Construct an engine from a [`SeedSequence`].
    ///
    /// See [`PcgEngine::seed_from_sequence`].
    pub fn from_seed_sequence<S: SeedSequence + ?Sized>(seq: &mut S) -> Self {
        let mut pcg = Self::new();
        pcg.seed_from_sequence(seq);
        pcg
    }

    #[inline]
    pub(crate) fn from_state_incr(state: T::State, increment: T::State) -> Self {
        debug_assert!(increment & T::State::ONE == T::State::ONE);
        let mut pcg = PcgEngine { state, increment };
        pcg.seed(state);
        pcg
    }

    /// Reseed with `state`, keeping the current stream.
    ///
    /// The state is offset by the increment and then stepped once, so the
    /// first output never comes directly from the raw seed.
    pub fn seed(&mut self, state: T::State) {
        // Move away from initial value:
        self.state = state.wrapping_add(self.increment);
        self.step();
    }

    /// Select stream `stream` and reseed with `state`.
    pub fn seed_with_stream(&mut self, state: T::State, stream: T::State) {
        // The increment must be odd, hence we discard one bit:
        self.increment = (stream << 1) | T::State::ONE;
        self.seed(state);
    }

    /// Reseed from a [`SeedSequence`].
    ///
    /// Exactly `2 * STATE_BITS / 32` words are requested in one call. The
    /// first half, least significant word first, becomes the stream
    /// selector; the second half becomes the state passed to
    /// [`PcgEngine::seed_with_stream`].
    pub fn seed_from_sequence<S: SeedSequence + ?Sized>(&mut self, seq: &mut S) {
        let mut buf = [0u32; 8];
        let words = &mut buf[..Self::SEED_WORDS];
        seq.generate(words);
        let (stream, state) = words.split_at(Self::SEED_WORDS / 2);
        let stream = T::State::from_le_words(stream);
        let state = T::State::from_le_words(state);
        trace!("PcgEngine: seeded from sequence, stream {:?}", stream);
        self.seed_with_stream(state, stream);
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> T::State {
        self.state
    }

    /// The increment; always odd.
    #[inline]
    pub fn increment(&self) -> T::State {
        self.increment
    }

    /// The stream selector, i.e. the increment without its low bit.
    #[inline]
    pub fn stream(&self) -> T::State {
        self.increment >> 1
    }

    /// Return the next output and advance by one step.
    #[inline]
    pub fn next_value(&mut self) -> T {
        if Self::OUTPUT_PREVIOUS {
            let val = output_xsh_rr::<T>(self.state);
            self.step();
            val
        } else {
            self.step();
            output_xsh_rr::<T>(self.state)
        }
    }

    /// Return a value uniformly distributed in `[0, bound)`.
    ///
    /// Uses rejection sampling, so the number of steps consumed varies.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn next_bounded(&mut self, bound: T) -> T {
        assert!(bound != T::ZERO, "PcgEngine::next_bounded: bound is zero");
        // (MAX - bound + 1) % bound
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_value();
            if r >= threshold {
                return r % bound;
            }
        }
    }

    /// Skip `n` outputs.
    ///
    /// Equivalent to calling [`PcgEngine::next_value`] `n` times, in
    /// `O(log n)` time.
    #[inline]
    pub fn discard(&mut self, n: u64) {
        self.advance(T::State::from(n));
    }

    /// Multi-step advance functions (jump-ahead, jump-back)
    ///
    /// The method used here is based on Brown, "Random Number Generation
    /// with Arbitrary Stride,", Transactions of the American Nuclear
    /// Society (Nov. 1994).  The algorithm is very similar to fast
    /// exponentiation.
    ///
    /// Even though delta is an unsigned integer, we can pass a
    /// negated integer to go backwards, it just goes "the long way round".
    ///
    /// Using this function is equivalent to calling `next_value()` `delta`
    /// number of times.
    pub fn advance(&mut self, delta: T::State) {
        let one = T::State::ONE;
        let mut acc_mult = one;
        let mut acc_plus = T::State::ZERO;
        let mut cur_mult = T::MULTIPLIER;
        let mut cur_plus = self.increment;
        let mut mdelta = delta;

        while mdelta != T::State::ZERO {
            if mdelta & one == one {
                acc_mult = acc_mult.wrapping_mul(cur_mult);
                acc_plus = acc_plus.wrapping_mul(cur_mult).wrapping_add(cur_plus);
            }
            cur_plus = cur_mult.wrapping_add(one).wrapping_mul(cur_plus);
            cur_mult = cur_mult.wrapping_mul(cur_mult);
            mdelta = mdelta >> 1;
        }
        self.state = acc_mult.wrapping_mul(self.state).wrapping_add(acc_plus);
    }

    /// Step backwards by `delta` outputs.
    ///
    /// After `backstep(n)` the next `n` outputs are the `n` outputs most
    /// recently returned, in the same order.
    #[inline]
    pub fn backstep(&mut self, delta: T::State) {
        self.advance(delta.wrapping_neg());
    }

    /// Number of steps from `self` to `other`.
    ///
    /// Returns `k` such that `self.advance(k)` leaves `self` equal to
    /// `other`. Both engines are expected to be on the same stream; the
    /// result is computed with `other`'s increment.
    ///
    /// Also available as `other - self`.
    pub fn distance(&self, other: &Self) -> T::State {
        debug_assert!(
            self.increment == other.increment,
            "PcgEngine::distance: engines are on different streams"
        );
        other.steps_from(self.state)
    }

    // Invert `advance`: find the delta that takes `from` to `self.state`,
    // fixing one bit per iteration from the least significant up.
    fn steps_from(&self, from: T::State) -> T::State {
        let one = T::State::ONE;
        let mut cur_state = from;
        let mut cur_mult = T::MULTIPLIER;
        let mut cur_plus = self.increment;
        let mut the_bit = one;
        let mut delta = T::State::ZERO;

        while self.state != cur_state {
            if self.state & the_bit != cur_state & the_bit {
                cur_state = cur_state.wrapping_mul(cur_mult).wrapping_add(cur_plus);
                delta = delta | the_bit;
            }
            cur_plus = cur_mult.wrapping_add(one).wrapping_mul(cur_plus);
            cur_mult = cur_mult.wrapping_mul(cur_mult);
            the_bit = the_bit << 1;
        }
        delta
    }

    #[inline(always)]
    fn step(&mut self) {
        // prepare the LCG for the next round
        self.state = self
            .state
            .wrapping_mul(T::MULTIPLIER)
            .wrapping_add(self.increment);
    }
}

impl<T: OutputWord> Default for PcgEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Custom Debug implementation that does not expose the internal state
impl<T: OutputWord> fmt::Debug for PcgEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcgEngine").finish_non_exhaustive()
    }
}

/// `later - earlier` is the number of steps from `earlier` to `later`.
impl<T: OutputWord> Sub for PcgEngine<T> {
    type Output = T::State;

    fn sub(self, earlier: Self) -> T::State {
        earlier.distance(&self)
    }
}

impl<'a, T: OutputWord> Sub<&'a PcgEngine<T>> for &'a PcgEngine<T> {
    type Output = T::State;

    fn sub(self, earlier: &'a PcgEngine<T>) -> T::State {
        earlier.distance(self)
    }
}

/// Shift and rotation amounts of the output function for output word `T`.
struct Permutation<T>(PhantomData<T>);

impl<T: OutputWord> Permutation<T> {
    const STATE_BITS: u32 = <T::State as StateWord>::BITS;
    const SPARE: u32 = Self::STATE_BITS - T::BITS;
    const OP: u32 = T::BITS.ilog2();
    // Only machine-word states drop low bits before truncation.
    const BOTTOM_SPARE: u32 = if Self::STATE_BITS <= 64 {
        Self::SPARE - Self::OP
    } else {
        0
    };
    const XSHIFT: u32 = (Self::SPARE + T::BITS - Self::BOTTOM_SPARE) / 2;
    const RSHIFT: u32 = Self::STATE_BITS - Self::OP;
}

/// Xorshift, truncate, then rotate by the top bits of the state.
///
/// For 64-bit state this is XSH RR; for 128-bit state the same construction
/// reduces to XSL RR (high half xor low half).
#[inline(always)]
fn output_xsh_rr<T: OutputWord>(state: T::State) -> T {
    let internal = state ^ (state >> Permutation::<T>::XSHIFT);
    let result = T::truncate(internal >> Permutation::<T>::BOTTOM_SPARE);
    let rot = (state >> Permutation::<T>::RSHIFT).low_u32();
    result.rotate_right(rot)
}
