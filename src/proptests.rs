#![cfg(all(test, feature = "std"))]

//! Property-based tests for the hasher's universal laws: chunking invariance, reset
//! idempotence, and isolation, checked over arbitrary inputs and arbitrary chunk splits rather
//! than the fixed boundary cases each algorithm module checks inline.

use alloc::vec::Vec;

use proptest::collection::vec;
use proptest::prelude::*;

use crate::algorithms::{Blake2b, Crc32, Sha256, Sha3_256, XxHash64};
use crate::facade::{Algorithm, Hasher};

fn arb_data() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..512)
}

/// Splits `data` into chunks at the given cut points (clamped into range and sorted), feeding
/// each chunk through its own `update` call.
fn digest_chunked<A: Algorithm>(algorithm: A, data: &[u8], mut cuts: Vec<usize>) -> Vec<u8> {
    cuts.retain(|&c| c <= data.len());
    cuts.sort_unstable();
    cuts.dedup();

    let mut hasher = Hasher::new(algorithm);
    let mut start = 0;
    for cut in cuts {
        hasher.update(&data[start..cut]).unwrap();
        start = cut;
    }
    hasher.update(&data[start..]).unwrap();
    hasher.digest().unwrap()
}

fn digest_whole<A: Algorithm>(algorithm: A, data: &[u8]) -> Vec<u8> {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data).unwrap();
    hasher.digest().unwrap()
}

macro_rules! chunking_invariance_test {
    ($name:ident, $default_ctor:expr) => {
        proptest! {
            #[test]
            fn $name(data in arb_data(), cuts in vec(0usize..512, 0..6)) {
                let whole = digest_whole($default_ctor, &data);
                let chunked = digest_chunked($default_ctor, &data, cuts);
                prop_assert_eq!(whole, chunked);
            }
        }
    };
}

chunking_invariance_test!(chunking_invariance_sha256, Sha256::default());
chunking_invariance_test!(chunking_invariance_sha3_256, Sha3_256::default());
chunking_invariance_test!(chunking_invariance_crc32, Crc32::default());
chunking_invariance_test!(chunking_invariance_xxhash64, XxHash64::new(0));
chunking_invariance_test!(chunking_invariance_blake2b, Blake2b::new(32));

proptest! {
    #[test]
    fn reset_idempotence_sha256(garbage in arb_data(), data in arb_data()) {
        let mut hasher = Hasher::new(Sha256::default());
        hasher.update(&garbage).unwrap();
        hasher.init();
        hasher.update(&data).unwrap();
        let reset_digest = hasher.digest().unwrap();

        let fresh_digest = digest_whole(Sha256::default(), &data);
        prop_assert_eq!(reset_digest, fresh_digest);
    }

    #[test]
    fn isolation_two_instances_do_not_observe_each_others_updates(a in arb_data(), b in arb_data()) {
        let mut first = Hasher::new(Sha256::default());
        let mut second = Hasher::new(Sha256::default());

        first.update(&a).unwrap();
        second.update(&b).unwrap();

        let first_digest = first.digest().unwrap();
        let second_digest = second.digest().unwrap();

        prop_assert_eq!(first_digest, digest_whole(Sha256::default(), &a));
        prop_assert_eq!(second_digest, digest_whole(Sha256::default(), &b));
    }
}
