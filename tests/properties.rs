//! Property tests for both engine widths.

use proptest::prelude::*;
use rand_pcg_engine::{Pcg32, Pcg64, SeedSeq};

proptest! {
    /// Property: Same seed always produces identical sequence.
    #[test]
    fn prop_determinism(seed in any::<u64>(), stream in any::<u64>()) {
        let mut rng1 = Pcg32::with_stream(seed, stream);
        let mut rng2 = Pcg32::with_stream(seed, stream);
        for _ in 0..100 {
            prop_assert_eq!(rng1.next_value(), rng2.next_value());
        }

        let mut rng1 = Pcg64::from_state(u128::from(seed));
        let mut rng2 = Pcg64::from_state(u128::from(seed));
        for _ in 0..100 {
            prop_assert_eq!(rng1.next_value(), rng2.next_value());
        }
    }

    /// Property: Different streams with the same seed diverge.
    #[test]
    fn prop_streams_differ(seed in any::<u64>(), a in any::<u64>(), b in any::<u64>()) {
        // The top bit of the stream selector is discarded.
        prop_assume!((a << 1) != (b << 1));

        let mut rng_a = Pcg32::with_stream(seed, a);
        let mut rng_b = Pcg32::with_stream(seed, b);
        prop_assert_ne!(rng_a, rng_b);
        prop_assert_eq!(rng_a.increment() & 1, 1);
        prop_assert_eq!(rng_b.increment() & 1, 1);

        let first_a: Vec<u32> = (0..4).map(|_| rng_a.next_value()).collect();
        let first_b: Vec<u32> = (0..4).map(|_| rng_b.next_value()).collect();
        prop_assert_ne!(first_a, first_b);
    }

    /// Property: `discard(n)` lands where `n` calls to `next_value` do.
    #[test]
    fn prop_discard_matches_stepping(seed in any::<u64>(), n in 0u64..2000) {
        let mut stepped = Pcg32::from_state(seed);
        let mut jumped = stepped;
        for _ in 0..n {
            stepped.next_value();
        }
        jumped.discard(n);
        prop_assert_eq!(stepped, jumped);
        prop_assert_eq!(stepped.next_value(), jumped.next_value());

        let mut stepped = Pcg64::from_state(u128::from(seed));
        let mut jumped = stepped;
        for _ in 0..n {
            stepped.next_value();
        }
        jumped.discard(n);
        prop_assert_eq!(stepped, jumped);
    }

    /// Property: `distance` inverts `advance`.
    #[test]
    fn prop_distance_inverts_advance(seed in any::<u64>(), stream in any::<u64>(), n in any::<u64>()) {
        let start = Pcg32::with_stream(seed, stream);
        let mut rng = start;
        rng.discard(n);
        prop_assert_eq!(start.distance(&rng), n);
        prop_assert_eq!(rng - start, n);
    }

    /// Property: `distance` inverts `advance` over the full 128-bit period.
    #[test]
    fn prop_distance_inverts_advance_wide(seed in any::<u128>(), delta in any::<u128>()) {
        let start = Pcg64::from_state(seed);
        let mut rng = start;
        rng.advance(delta);
        prop_assert_eq!(start.distance(&rng), delta);
    }

    /// Property: `backstep` undoes `advance`.
    #[test]
    fn prop_backstep_undoes_advance(seed in any::<u64>(), delta in any::<u64>()) {
        let start = Pcg32::from_state(seed);
        let mut rng = start;
        rng.advance(delta);
        rng.backstep(delta);
        prop_assert_eq!(rng, start);
    }

    /// Property: Text form round-trips.
    #[test]
    fn prop_text_round_trip(seed in any::<u128>(), stream in any::<u128>(), skip in 0u64..100) {
        let mut rng = Pcg64::with_stream(seed, stream);
        rng.discard(skip);
        let restored: Pcg64 = rng.to_string().parse().unwrap();
        prop_assert_eq!(restored, rng);

        let mut rng = Pcg32::with_stream(seed as u64, stream as u64);
        rng.discard(skip);
        let restored: Pcg32 = rng.to_string().parse().unwrap();
        prop_assert_eq!(restored, rng);
    }

    /// Property: Bounded samples stay below the bound.
    #[test]
    fn prop_bounded_in_range(seed in any::<u64>(), bound in 1u32..=u32::MAX) {
        let mut rng = Pcg32::from_state(seed);
        for _ in 0..100 {
            prop_assert!(rng.next_bounded(bound) < bound);
        }

        let bound = u64::from(bound) << 31 | 1;
        let mut rng = Pcg64::from_state(u128::from(seed));
        for _ in 0..100 {
            prop_assert!(rng.next_bounded(bound) < bound);
        }
    }

    /// Property: Seeding from the same sequence is deterministic.
    #[test]
    fn prop_seed_sequence_determinism(entropy in proptest::collection::vec(any::<u32>(), 0..8)) {
        let a = Pcg64::from_seed_sequence(&mut SeedSeq::new(&entropy));
        let b = Pcg64::from_seed_sequence(&mut SeedSeq::new(&entropy));
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.increment() & 1, 1);
    }
}
