//! BLAKE2b (RFC 7693). 128-byte blocks, a 1..=64 byte configurable digest, and an optional
//! 0..=64 byte key. Unlike the Merkle–Damgård family, BLAKE2b's compression function must know
//! whether the block it is compressing is the last one, so this is the one algorithm that sets
//! [`Algorithm::DEFERRED_FINAL_BLOCK`] and uses [`Algorithm::initial_buffer`] for keyed mode.

use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

use crate::facade::Algorithm;

const IV: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

const SIGMA: [[usize; 16]; 12] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

fn compress(h: &mut [u64; 8], block: &[u8; 128], t: u128, is_last: bool) {
    let mut m = [0u64; 16];
    LittleEndian::read_u64_into(block, &mut m);

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);
    v[12] ^= t as u64;
    v[13] ^= (t >> 64) as u64;
    if is_last {
        v[14] = !v[14];
    }

    for round in 0..12 {
        let s = &SIGMA[round];
        g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
        g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    for i in 0..8 {
        h[i] ^= v[i] ^ v[i + 8];
    }
}

/// BLAKE2b's streaming state. `key` holds the zero-padded 128-byte key block (if any), which is
/// zeroized as soon as it has been absorbed as the first compressed block.
#[derive(Clone)]
pub struct Blake2b {
    h: [u64; 8],
    digest_size: usize,
    key_block: Option<([u8; 128], usize)>,
    absorbed: u128,
}

impl Blake2b {
    /// An unkeyed instance producing `digest_size` bytes (1..=64).
    pub fn new(digest_size: usize) -> Self {
        Blake2b::with_key(digest_size, &[])
    }

    /// A keyed instance (0..=64 byte key) producing `digest_size` bytes (1..=64). An empty key
    /// is equivalent to [`Blake2b::new`].
    pub fn with_key(digest_size: usize, key: &[u8]) -> Self {
        debug_assert!((1..=64).contains(&digest_size));
        debug_assert!(key.len() <= 64);

        let mut h = IV;
        h[0] ^= 0x0101_0000 ^ ((key.len() as u64) << 8) ^ digest_size as u64;

        let key_block = if key.is_empty() {
            None
        } else {
            let mut block = [0u8; 128];
            block[..key.len()].copy_from_slice(key);
            Some((block, key.len()))
        };

        Blake2b { h, digest_size, key_block, absorbed: 0 }
    }
}

impl Default for Blake2b {
    fn default() -> Self {
        Blake2b::new(64)
    }
}

impl Algorithm for Blake2b {
    const BLOCK_SIZE: usize = 128;
    const DIGEST_SIZE: usize = 64; // overridden per-instance by `digest_size`; see `digest_size()`.
    const NAME: &'static str = "blake2b";
    const SUPPORTS_HMAC: bool = false;
    const DEFERRED_FINAL_BLOCK: bool = true;

    fn reset(&mut self) {
        let digest_size = self.digest_size;
        *self = match self.key_block {
            Some((block, key_len)) => Blake2b::with_key(digest_size, &block[..key_len]),
            None => Blake2b::new(digest_size),
        };
    }

    fn compress(&mut self, block: &[u8], is_final: bool) {
        let mut buf = [0u8; 128];
        buf.copy_from_slice(block);
        self.absorbed += block.len() as u128;
        // `t` is the cumulative byte count absorbed so far, including the key block
        // (RFC 7693 §3.3). Only the final call (handled in `finalize`) sets the finalization flag.
        compress(&mut self.h, &buf, self.absorbed, is_final);
    }

    fn finalize(mut self, trailing: &[u8], total_len: u128, out: &mut [u8]) {
        let mut last = [0u8; 128];
        last[..trailing.len()].copy_from_slice(trailing);
        compress(&mut self.h, &last, total_len, true);

        let mut full = [0u8; 64];
        LittleEndian::write_u64_into(&self.h, &mut full);
        out.copy_from_slice(&full[..self.digest_size]);

        if let Some((mut block, _)) = self.key_block.take() {
            block.zeroize();
        }
    }

    fn initial_buffer(&self) -> Vec<u8> {
        match self.key_block {
            Some((block, _)) => block.to_vec(),
            None => Vec::new(),
        }
    }

    fn output_len(&self) -> usize {
        self.digest_size
    }
}

impl Blake2b {
    /// The output width this instance was configured with. `Algorithm::DIGEST_SIZE` cannot vary
    /// per-instance, so callers sizing an output buffer should use this rather than the const.
    pub const fn digest_size(&self) -> usize {
        self.digest_size
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::facade::Hasher;

    fn digest_hex(algorithm: Blake2b, data: &[u8]) -> String {
        let mut hasher = Hasher::new(algorithm);
        hasher.update(data).unwrap();
        hex::encode(hasher.digest().unwrap())
    }

    #[test]
    fn empty_string_64_has_expected_length_and_is_deterministic() {
        let a = digest_hex(Blake2b::new(64), b"");
        let b = digest_hex(Blake2b::new(64), b"");
        assert_eq!(a.len(), 128);
        assert_eq!(a, b);
    }

    #[test]
    fn abc_64() {
        assert_eq!(
            digest_hex(Blake2b::new(64), b"abc"),
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
        );
    }

    #[test]
    fn keyed_empty_input() {
        // Official BLAKE2 KAT: BLAKE2b-512, 64-byte key equal to 0..63, empty message. Must
        // not equal the unkeyed hash of the key itself.
        let key: alloc::vec::Vec<u8> = (0u8..64).collect();
        let digest = digest_hex(Blake2b::with_key(64, &key), b"");
        assert_eq!(
            digest,
            "10ebb67700b1868efb4417987acf4690ae9d972fb7a590c2f02871799aaa4786b5e996e8f0f4eb9\
81fc214b005f42d2ff4233499391653df7aefcbc13fc51568"
        );
        assert_ne!(digest, digest_hex(Blake2b::new(64), &key));
    }

    #[test]
    fn chunking_invariance() {
        let mut whole = Hasher::new(Blake2b::new(32));
        whole
            .update(b"the quick brown fox jumps over the lazy dog")
            .unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(Blake2b::new(32));
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        assert_eq!(whole_digest, chunked.digest().unwrap());
    }

    #[test]
    fn reset_idempotence() {
        let mut hasher = Hasher::new(Blake2b::new(32));
        hasher.update(b"garbage").unwrap();
        hasher.init();
        hasher.update(b"abc").unwrap();
        let reset_digest = hasher.digest().unwrap();

        let mut fresh = Hasher::new(Blake2b::new(32));
        fresh.update(b"abc").unwrap();
        assert_eq!(reset_digest, fresh.digest().unwrap());
    }
}
