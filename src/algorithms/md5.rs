//! MD5 (RFC 1321). Retained for legacy interoperability only; not a secure hash.

use byteorder::{ByteOrder, LittleEndian};

use crate::facade::{Algorithm, HmacCapable};

const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9,
    14, 20, 5, 9, 14, 20, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 6, 10, 15,
    21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// MD5's streaming state: four 32-bit words, reset to the RFC 1321 IV.
#[derive(Clone)]
pub struct Md5 {
    h: [u32; 4],
}

impl Default for Md5 {
    fn default() -> Self {
        Md5 { h: [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476] }
    }
}

impl Md5 {
    fn compress_block(&mut self, block: &[u8]) {
        let mut m = [0u32; 16];
        LittleEndian::read_u32_into(block, &mut m);

        let (mut a, mut b, mut c, mut d) = (self.h[0], self.h[1], self.h[2], self.h[3]);
        for i in 0..64 {
            let (f, g) = match i {
                0..=15 => ((b & c) | (!b & d), i),
                16..=31 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
                _ => (c ^ (b | !d), (7 * i) % 16),
            };
            let f = f
                .wrapping_add(a)
                .wrapping_add(K[i])
                .wrapping_add(m[g]);
            a = d;
            d = c;
            c = b;
            b = b.wrapping_add(f.rotate_left(S[i]));
        }

        self.h[0] = self.h[0].wrapping_add(a);
        self.h[1] = self.h[1].wrapping_add(b);
        self.h[2] = self.h[2].wrapping_add(c);
        self.h[3] = self.h[3].wrapping_add(d);
    }
}

impl Algorithm for Md5 {
    const BLOCK_SIZE: usize = 64;
    const DIGEST_SIZE: usize = 16;
    const NAME: &'static str = "md5";

    fn reset(&mut self) {
        *self = Md5::default();
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

impl HmacCapable for Md5 {}

/// Merkle–Damgård padding shared by the little-endian-length family (MD4, MD5, RIPEMD-160):
/// `0x80`, zero bytes until `length_field_bytes` remain in the final block(s), then the
/// bit-length as a little-endian integer of that width.
pub(crate) fn md_pad_le(
    trailing: &[u8],
    total_len: u128,
    block_size: usize,
    length_field_bytes: usize,
) -> alloc::vec::Vec<[u8; 64]> {
    debug_assert!(block_size <= 64, "md_pad_le only supports block sizes up to 64 bytes");
    let bit_len = (total_len * 8).to_le_bytes();

    let mut msg = alloc::vec::Vec::with_capacity(block_size * 2);
    msg.extend_from_slice(trailing);
    msg.push(0x80);
    while msg.len() % block_size != block_size - length_field_bytes {
        msg.push(0);
    }
    msg.extend_from_slice(&bit_len[..length_field_bytes]);

    msg.chunks(block_size)
        .map(|chunk| {
            let mut block = [0u8; 64];
            block[..chunk.len()].copy_from_slice(chunk);
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::facade::Hasher;

    fn digest_hex(data: &[u8]) -> String {
        let mut h = Hasher::new(Md5::default());
        h.update(data).unwrap();
        hex::encode(h.digest().unwrap())
    }

    #[test]
    fn empty_string() {
        assert_eq!(digest_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn abc() {
        assert_eq!(digest_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn chunking_invariance() {
        let mut whole = Hasher::new(Md5::default());
        whole.update(b"the quick brown fox jumps over the lazy dog").unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(Md5::default());
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        let chunked_digest = chunked.digest().unwrap();

        assert_eq!(whole_digest, chunked_digest);
    }

    #[test]
    fn boundary_lengths_around_block_minus_9() {
        // Exercises the MD-padding-carry corner: inputs of length B-9, B-8, B, B+1.
        for len in [55usize, 56, 64, 65] {
            let data = alloc::vec![0x61u8; len];
            let mut h = Hasher::new(Md5::default());
            h.update(&data).unwrap();
            // No panics, and the digest is stable across a differently-chunked equivalent call.
            let direct = h.digest().unwrap();

            let mut chunked = Hasher::new(Md5::default());
            chunked.update(&data[..len / 2]).unwrap();
            chunked.update(&data[len / 2..]).unwrap();
            assert_eq!(direct, chunked.digest().unwrap());
        }
    }
}
