// Copyright 2018-2023 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Seed sequences

/// A source of seeding words.
///
/// A seed sequence expands some (usually small) amount of entropy into any
/// requested number of 32-bit words. [`PcgEngine::seed_from_sequence`]
/// only ever calls [`SeedSequence::generate`] once per seeding.
///
/// [`PcgEngine::seed_from_sequence`]: crate::PcgEngine::seed_from_sequence
pub trait SeedSequence {
    /// Fill `dest` with seeding words, in order.
    fn generate(&mut self, dest: &mut [u32]);
}

impl<S: SeedSequence + ?Sized> SeedSequence for &mut S {
    #[inline]
    fn generate(&mut self, dest: &mut [u32]) {
        (**self).generate(dest)
    }
}

/// A seed sequence compatible with C++ `std::seed_seq`.
///
/// The output for a given entropy slice and request length is identical to
/// that of `std::seed_seq::generate`, which makes it possible to reproduce
/// engines seeded by C++ programs.
///
/// Generation does not consume the sequence: requesting the same number of
/// words twice yields the same words.
///
/// ```
/// use rand_pcg_engine::{Pcg32, SeedSeq};
///
/// let mut seq = SeedSeq::new(&[42, 54]);
/// let mut rng = Pcg32::from_seed_sequence(&mut seq);
/// let _ = rng.next_value();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSeq<'a> {
    entropy: &'a [u32],
}

impl<'a> SeedSeq<'a> {
    /// Construct a seed sequence over the given entropy words.
    pub const fn new(entropy: &'a [u32]) -> Self {
        SeedSeq { entropy }
    }

    /// The number of entropy words.
    pub fn size(&self) -> usize {
        self.entropy.len()
    }

    /// The entropy words this sequence was built from.
    pub fn param(&self) -> &'a [u32] {
        self.entropy
    }
}

#[inline(always)]
fn mix(x: u32) -> u32 {
    x ^ (x >> 27)
}

impl SeedSequence for SeedSeq<'_> {
    fn generate(&mut self, dest: &mut [u32]) {
        let n = dest.len();
        if n == 0 {
            return;
        }
        dest.fill(0x8b8b_8b8b);

        let s = self.entropy.len();
        let t = if n >= 623 {
            11
        } else if n >= 68 {
            7
        } else if n >= 39 {
            5
        } else if n >= 7 {
            3
        } else {
            (n - 1) / 2
        };
        let p = (n - t) / 2;
        let q = p + t;
        let m = core::cmp::max(s + 1, n);

        for k in 0..m {
            let r1 = 1_664_525u32
                .wrapping_mul(mix(dest[k % n] ^ dest[(k + p) % n] ^ dest[(k + n - 1) % n]));
            let r2 = if k == 0 {
                r1.wrapping_add(s as u32)
            } else if k <= s {
                r1.wrapping_add((k % n) as u32)
                    .wrapping_add(self.entropy[k - 1])
            } else {
                r1.wrapping_add((k % n) as u32)
            };
            dest[(k + p) % n] = dest[(k + p) % n].wrapping_add(r1);
            dest[(k + q) % n] = dest[(k + q) % n].wrapping_add(r2);
            dest[k % n] = r2;
        }

        for k in m..m + n {
            let sum = dest[k % n]
                .wrapping_add(dest[(k + p) % n])
                .wrapping_add(dest[(k + n - 1) % n]);
            let r3 = 1_566_083_941u32.wrapping_mul(mix(sum));
            let r4 = r3.wrapping_sub((k % n) as u32);
            dest[(k + p) % n] ^= r3;
            dest[(k + q) % n] ^= r4;
            dest[k % n] = r4;
        }
    }
}
