//! MD4 (RFC 1320). Retained for legacy interoperability only; not a secure hash.

use byteorder::{ByteOrder, LittleEndian};

use crate::algorithms::md5::md_pad_le;
use crate::facade::{Algorithm, HmacCapable};

/// MD4's streaming state: four 32-bit words, reset to the RFC 1320 IV (shared with MD5).
#[derive(Clone)]
pub struct Md4 {
    h: [u32; 4],
}

impl Default for Md4 {
    fn default() -> Self {
        Md4 { h: [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476] }
    }
}

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

impl Md4 {
    fn compress_block(&mut self, block: &[u8]) {
        let mut m = [0u32; 16];
        LittleEndian::read_u32_into(block, &mut m);

        let (mut a, mut b, mut c, mut d) = (self.h[0], self.h[1], self.h[2], self.h[3]);

        // Round 1: F, no constant, word order 0..16, shifts 3/7/11/19.
        for &i in &[0usize, 4, 8, 12] {
            for (k, s) in [(0, 3), (1, 7), (2, 11), (3, 19)] {
                let x = f(b, c, d).wrapping_add(a).wrapping_add(m[i + k]);
                a = d;
                d = c;
                c = b;
                b = x.rotate_left(s);
            }
        }

        // Round 2: G, constant 0x5A827999, word order column-major, shifts 3/5/9/13.
        for i in 0..4 {
            for (k, s) in [(0, 3), (4, 5), (8, 9), (12, 13)] {
                let x = g(b, c, d)
                    .wrapping_add(a)
                    .wrapping_add(m[i + k])
                    .wrapping_add(0x5A827999);
                a = d;
                d = c;
                c = b;
                b = x.rotate_left(s);
            }
        }

        // Round 3: H, constant 0x6ED9EBA1, word order 0,8,4,12,2,10,6,14,..., shifts 3/9/11/15.
        const ORDER: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];
        for chunk in ORDER.chunks(4) {
            for (&idx, s) in chunk.iter().zip([3u32, 9, 11, 15]) {
                let x = h(b, c, d)
                    .wrapping_add(a)
                    .wrapping_add(m[idx])
                    .wrapping_add(0x6ED9EBA1);
                a = d;
                d = c;
                c = b;
                b = x.rotate_left(s);
            }
        }

        self.h[0] = self.h[0].wrapping_add(a);
        self.h[1] = self.h[1].wrapping_add(b);
        self.h[2] = self.h[2].wrapping_add(c);
        self.h[3] = self.h[3].wrapping_add(d);
    }
}

impl Algorithm for Md4 {
    const BLOCK_SIZE: usize = 64;
    const DIGEST_SIZE: usize = 16;
    const NAME: &'static str = "md4";

    fn reset(&mut self) {
        *self = Md4::default();
    }

    fn compress(&mut self, block: &[u8], _is_final: bool) {
        self.compress_block(block);
    }

    fn finalize(mut self, trailing: &[u8], total_len: u128, out: &mut [u8]) {
        for block in md_pad_le(trailing, total_len, 64, 8) {
            self.compress_block(&block);
        }
        LittleEndian::write_u32_into(&self.h, out);
    }
}

impl HmacCapable for Md4 {}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::facade::Hasher;

    fn digest_hex(data: &[u8]) -> String {
        let mut hasher = Hasher::new(Md4::default());
        hasher.update(data).unwrap();
        hex::encode(hasher.digest().unwrap())
    }

    #[test]
    fn empty_string() {
        assert_eq!(digest_hex(b""), "31d6cfe0d16ae931b73c59d7e0c089c0");
    }

    #[test]
    fn abc() {
        assert_eq!(digest_hex(b"abc"), "a448017aaf21d8525fc10ae87aa6729d");
    }

    #[test]
    fn chunking_invariance() {
        let mut whole = Hasher::new(Md4::default());
        whole.update(b"the quick brown fox jumps over the lazy dog").unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(Md4::default());
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        assert_eq!(whole_digest, chunked.digest().unwrap());
    }
}
