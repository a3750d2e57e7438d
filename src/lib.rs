// Copyright 2018-2023 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! PCG engines with stream selection, jump-ahead and distance.
//!
//! This is a native Rust implementation of the two classic
//! [PCG generators] with explicitly chosen streams:
//!
//! -   [`Pcg32`] aka [`Lcg64Xsh32`] aka `PcgEngine<u32>`, officially known as
//!     `pcg32`: 64-bit state, 32-bit output via XSH RR.
//! -   [`Pcg64`] aka [`Lcg128Xsl64`] aka `PcgEngine<u64>`, officially known as
//!     `pcg64`: 128-bit state, 64-bit output via XSL RR.
//!
//! Both are deterministic and portable, and tested against the reference
//! vectors of the PCG C++ library. They are not cryptographically secure:
//! the internal state is easily recovered from the output.
//!
//! ## Seeding
//!
//! An engine is seeded from a state value, a state value plus a stream
//! selector, or a [`SeedSequence`]:
//! ```
//! use rand_pcg_engine::{Pcg32, SeedSeq};
//!
//! let mut rng = Pcg32::with_stream(42, 54);
//! assert_eq!(rng.next_value(), 0xa15c02b7);
//!
//! let mut rng = Pcg32::from_state(42);
//! assert_eq!(rng.next_value(), 0xc2f57bd6);
//!
//! let rng = Pcg32::from_seed_sequence(&mut SeedSeq::new(&[42, 54]));
//! # let _ = rng;
//! ```
//!
//! The engines also implement [`SeedableRng`], so all of its methods may be
//! used.
//!
//! ## Generation and jumps
//!
//! [`PcgEngine::next_value`] returns the next output;
//! [`PcgEngine::next_bounded`] samples uniformly from `[0, bound)` without
//! modulo bias. [`PcgEngine::discard`], [`PcgEngine::advance`] and
//! [`PcgEngine::backstep`] move through the sequence in `O(log n)` time, and
//! [`PcgEngine::distance`] recovers how far apart two engines are:
//! ```
//! use rand_pcg_engine::Pcg64;
//!
//! let start = Pcg64::from_state(7);
//! let mut rng = start;
//! rng.discard(1_000_000);
//! assert_eq!(start.distance(&rng), 1_000_000);
//! assert_eq!(rng - start, 1_000_000);
//! ```
//!
//! Engines implement [`RngCore`] and can be used with everything in the
//! `rand` ecosystem.
//!
//! ## Saving state
//!
//! `Display` and `FromStr` round-trip the engine through the text
//! `multiplier increment state` (see [`ParseError`]). With the `serde1`
//! feature the engines also implement `Serialize` and `Deserialize`.
//!
//! [PCG generators]: https://www.pcg-random.org/
//! [`RngCore`]: rand_core::RngCore
//! [`SeedableRng`]: rand_core::SeedableRng

#![doc(
    html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128-blk.png",
    html_favicon_url = "https://www.rust-lang.org/favicon.ico",
    html_root_url = "https://rust-random.github.io/rand/"
)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![allow(clippy::unreadable_literal)]
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

#[macro_use]
mod log_macros;

mod engine;
mod rng;
mod seed_seq;
mod text;
pub mod word;

pub use rand_core;

pub use self::engine::{Lcg128Xsl64, Lcg64Xsh32, PcgEngine, Pcg32, Pcg64};
pub use self::seed_seq::{SeedSeq, SeedSequence};
pub use self::text::{Field, ParseError};
pub use self::word::{OutputWord, StateWord};
