//! xxHash32 and xxHash64 (Cyan4973's xxHash, non-cryptographic). Both variants absorb input in
//! fixed-size stripes, carry a running accumulator set, and fold the accumulators together with
//! a byte-by-byte tail mix at the end. Neither supports HMAC.

use byteorder::{ByteOrder, LittleEndian};

use crate::facade::Algorithm;

const PRIME32_1: u32 = 0x9E3779B1;
const PRIME32_2: u32 = 0x85EBCA77;
const PRIME32_3: u32 = 0xC2B2AE3D;
const PRIME32_4: u32 = 0x27D4EB2F;
const PRIME32_5: u32 = 0x165667B1;

const PRIME64_1: u64 = 0x9E3779B185EBCA87;
const PRIME64_2: u64 = 0xC2B2AE3D27D4EB4F;
const PRIME64_3: u64 = 0x165667B19E3779F9;
const PRIME64_4: u64 = 0x85EBCA77C2B2AE63;
const PRIME64_5: u64 = 0x27D4EB2F165667C5;

fn round32(acc: u32, input: u32) -> u32 {
    acc.wrapping_add(input.wrapping_mul(PRIME32_2))
        .rotate_left(13)
        .wrapping_mul(PRIME32_1)
}

fn round64(acc: u64, input: u64) -> u64 {
    acc.wrapping_add(input.wrapping_mul(PRIME64_2))
        .rotate_left(31)
        .wrapping_mul(PRIME64_1)
}

/// xxHash32's streaming state: four 32-bit accumulators plus the seed.
#[derive(Clone)]
pub struct XxHash32 {
    seed: u32,
    acc: [u32; 4],
}

impl XxHash32 {
    pub fn new(seed: u32) -> Self {
        XxHash32 {
            seed,
            acc: [
                seed.wrapping_add(PRIME32_1).wrapping_add(PRIME32_2),
                seed.wrapping_add(PRIME32_2),
                seed,
                seed.wrapping_sub(PRIME32_1),
            ],
        }
    }
}

impl Default for XxHash32 {
    fn default() -> Self {
        XxHash32::new(0)
    }
}

impl Algorithm for XxHash32 {
    const BLOCK_SIZE: usize = 16;
    const DIGEST_SIZE: usize = 4;
    const NAME: &'static str = "xxhash32";
    const SUPPORTS_HMAC: bool = false;

    fn reset(&mut self) {
        *self = XxHash32::new(self.seed);
    }

    fn compress(&mut self, block: &[u8], _is_final: bool) {
        let mut lanes = [0u32; 4];
        LittleEndian::read_u32_into(block, &mut lanes);
        for i in 0..4 {
            self.acc[i] = round32(self.acc[i], lanes[i]);
        }
    }

    fn finalize(self, trailing: &[u8], total_len: u128, out: &mut [u8]) {
        let mut h = if total_len >= 16 {
            self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18))
        } else {
            self.seed.wrapping_add(PRIME32_5)
        };
        h = h.wrapping_add(total_len as u32);

        let mut rest = trailing;
        while rest.len() >= 4 {
            let lane = LittleEndian::read_u32(rest);
            h = h
                .wrapping_add(lane.wrapping_mul(PRIME32_3))
                .rotate_left(17)
                .wrapping_mul(PRIME32_4);
            rest = &rest[4..];
        }
        for &byte in rest {
            h = h
                .wrapping_add((byte as u32).wrapping_mul(PRIME32_5))
                .rotate_left(11)
                .wrapping_mul(PRIME32_1);
        }

        h ^= h >> 15;
        h = h.wrapping_mul(PRIME32_2);
        h ^= h >> 13;
        h = h.wrapping_mul(PRIME32_3);
        h ^= h >> 16;

        BigEndian::write_u32(out, h);
    }
}

/// xxHash64's streaming state: four 64-bit accumulators plus the seed.
#[derive(Clone)]
pub struct XxHash64 {
    seed: u64,
    acc: [u64; 4],
}

impl XxHash64 {
    pub fn new(seed: u64) -> Self {
        XxHash64 {
            seed,
            acc: [
                seed.wrapping_add(PRIME64_1).wrapping_add(PRIME64_2),
                seed.wrapping_add(PRIME64_2),
                seed,
                seed.wrapping_sub(PRIME64_1),
            ],
        }
    }
}

impl Default for XxHash64 {
    fn default() -> Self {
        XxHash64::new(0)
    }
}

impl XxHash64 {
    /// Builds the 64-bit seed from two 32-bit halves assembled little-endian
    /// (`seed = low | high << 32`), matching bindings that only expose a pair of 32-bit
    /// integers rather than a native 64-bit one.
    pub fn from_parts(low: u32, high: u32) -> Self {
        XxHash64::new((low as u64) | ((high as u64) << 32))
    }
}

impl Algorithm for XxHash64 {
    const BLOCK_SIZE: usize = 32;
    const DIGEST_SIZE: usize = 8;
    const NAME: &'static str = "xxhash64";
    const SUPPORTS_HMAC: bool = false;

    fn reset(&mut self) {
        *self = XxHash64::new(self.seed);
    }

    fn compress(&mut self, block: &[u8], _is_final: bool) {
        let mut lanes = [0u64; 4];
        LittleEndian::read_u64_into(block, &mut lanes);
        for i in 0..4 {
            self.acc[i] = round64(self.acc[i], lanes[i]);
        }
    }

    fn finalize(self, trailing: &[u8], total_len: u128, out: &mut [u8]) {
        let mut h = if total_len >= 32 {
            let mut h = self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18));
            for a in self.acc {
                h ^= round64(0, a);
                h = h.wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
            }
            h
        } else {
            self.seed.wrapping_add(PRIME64_5)
        };
        h = h.wrapping_add(total_len as u64);

        let mut rest = trailing;
        while rest.len() >= 8 {
            let lane = LittleEndian::read_u64(rest);
            h ^= round64(0, lane);
            h = h.rotate_left(27).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
            rest = &rest[8..];
        }
        if rest.len() >= 4 {
            let lane = LittleEndian::read_u32(rest);
            h ^= (lane as u64).wrapping_mul(PRIME64_1);
            h = h.rotate_left(23).wrapping_mul(PRIME64_2).wrapping_add(PRIME64_3);
            rest = &rest[4..];
        }
        for &byte in rest {
            h ^= (byte as u64).wrapping_mul(PRIME64_5);
            h = h.rotate_left(11).wrapping_mul(PRIME64_1);
        }

        h ^= h >> 33;
        h = h.wrapping_mul(PRIME64_2);
        h ^= h >> 29;
        h = h.wrapping_mul(PRIME64_3);
        h ^= h >> 32;

        BigEndian::write_u64(out, h);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::facade::{Algorithm as _, Hasher};

    fn digest_hex<A: Algorithm>(algorithm: A, data: &[u8]) -> String {
        let mut hasher = Hasher::new(algorithm);
        hasher.update(data).unwrap();
        hex::encode(hasher.digest().unwrap())
    }

    #[test]
    fn xxh32_empty_seed_zero() {
        assert_eq!(digest_hex(XxHash32::new(0), b""), "02cc5d05");
    }

    #[test]
    fn xxh64_empty_seed_zero() {
        assert_eq!(digest_hex(XxHash64::new(0), b""), "ef46db3751d8e999");
    }

    #[test]
    fn chunking_invariance_32() {
        let mut whole = Hasher::new(XxHash32::new(0));
        whole.update(b"the quick brown fox jumps over the lazy dog").unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(XxHash32::new(0));
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        assert_eq!(whole_digest, chunked.digest().unwrap());
    }

    #[test]
    fn chunking_invariance_64() {
        let mut whole = Hasher::new(XxHash64::new(0));
        whole.update(b"the quick brown fox jumps over the lazy dog").unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(XxHash64::new(0));
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        assert_eq!(whole_digest, chunked.digest().unwrap());
    }

    #[test]
    fn seed_changes_digest() {
        assert_ne!(digest_hex(XxHash64::new(0), b"abc"), digest_hex(XxHash64::new(1), b"abc"));
        assert_ne!(digest_hex(XxHash32::new(0), b"abc"), digest_hex(XxHash32::new(1), b"abc"));
    }

    #[test]
    fn from_parts_zero_extends_rather_than_sign_extends() {
        // A `low` half with its high bit set would sign-extend to 0xFFFFFFFF_80000000 if
        // assembled via a signed i32->i64 cast instead of a zero-extending u32->u64 one.
        let low = 0x8000_0000u32;
        assert_eq!(
            digest_hex(XxHash64::from_parts(low, 0), b"abc"),
            digest_hex(XxHash64::new(low as u64), b"abc")
        );
    }

    #[test]
    fn from_parts_assembles_high_half_above_bit_32() {
        let seed = XxHash64::from_parts(0x1234_5678, 0x9abc_def0);
        let expected = XxHash64::new(0x9abc_def0_1234_5678);
        assert_eq!(digest_hex(seed, b"abc"), digest_hex(expected, b"abc"));
    }
}
