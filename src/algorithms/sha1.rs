//! SHA-1 (FIPS 180-4). Retained for legacy interoperability only; not collision-resistant.

use byteorder::{BigEndian, ByteOrder};

use crate::facade::{Algorithm, HmacCapable};

/// SHA-1's streaming state: five 32-bit words, reset to the FIPS 180-4 IV.
#[derive(Clone)]
pub struct Sha1 {
    h: [u32; 5],
}

impl Default for Sha1 {
    fn default() -> Self {
        Sha1 { h: [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0] }
    }
}

impl Sha1 {
    fn compress_block(&mut self, block: &[u8]) {
        let mut w = [0u32; 80];
        BigEndian::read_u32_into(block, &mut w[..16]);
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let (mut a, mut b, mut c, mut d, mut e) =
            (self.h[0], self.h[1], self.h[2], self.h[3], self.h[4]);

        for (i, &wi) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), 0x5A827999u32),
                20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
                _ => (b ^ c ^ d, 0xCA62C1D6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(wi);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        self.h[0] = self.h[0].wrapping_add(a);
        self.h[1] = self.h[1].wrapping_add(b);
        self.h[2] = self.h[2].wrapping_add(c);
        self.h[3] = self.h[3].wrapping_add(d);
        self.h[4] = self.h[4].wrapping_add(e);
    }
}

impl Algorithm for Sha1 {
    const BLOCK_SIZE: usize = 64;
    const DIGEST_SIZE: usize = 20;
    const NAME: &'static str = "sha1";

    fn reset(&mut self) {
        *self = Sha1::default();
    }

    fn compress(&mut self, block: &[u8], _is_final: bool) {
        self.compress_block(block);
    }

    fn finalize(mut self, trailing: &[u8], total_len: u128, out: &mut [u8]) {
        for block in md_pad_be(trailing, total_len, 64, 8) {
            self.compress_block(&block);
        }
        BigEndian::write_u32_into(&self.h, out);
    }
}

impl HmacCapable for Sha1 {}

/// Merkle–Damgård padding shared by the big-endian-length family (SHA-1, SHA-2): `0x80`, zero
/// bytes until `length_field_bytes` remain in the final block(s), then the bit-length as a
/// big-endian integer of that width (which may exceed one `u64` for SHA-384/512).
pub(crate) fn md_pad_be(
    trailing: &[u8],
    total_len: u128,
    block_size: usize,
    length_field_bytes: usize,
) -> alloc::vec::Vec<alloc::vec::Vec<u8>> {
    let bit_len = (total_len * 8).to_be_bytes();
    let bit_len = &bit_len[16 - length_field_bytes..];

    let mut msg = alloc::vec::Vec::with_capacity(block_size * 2);
    msg.extend_from_slice(trailing);
    msg.push(0x80);
    while msg.len() % block_size != block_size - length_field_bytes {
        msg.push(0);
    }
    msg.extend_from_slice(bit_len);

    msg.chunks(block_size).map(|c| c.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::facade::Hasher;

    fn digest_hex(data: &[u8]) -> String {
        let mut hasher = Hasher::new(Sha1::default());
        hasher.update(data).unwrap();
        hex::encode(hasher.digest().unwrap())
    }

    #[test]
    fn empty_string() {
        assert_eq!(digest_hex(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn abc() {
        assert_eq!(digest_hex(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn chunking_invariance() {
        let mut whole = Hasher::new(Sha1::default());
        whole.update(b"the quick brown fox jumps over the lazy dog").unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(Sha1::default());
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        assert_eq!(whole_digest, chunked.digest().unwrap());
    }

    #[test]
    fn boundary_lengths_around_block_minus_9() {
        for len in [55usize, 56, 64, 65] {
            let data = alloc::vec![0x61u8; len];
            let mut h = Hasher::new(Sha1::default());
            h.update(&data).unwrap();
            let direct = h.digest().unwrap();

            let mut chunked = Hasher::new(Sha1::default());
            chunked.update(&data[..len / 2]).unwrap();
            chunked.update(&data[len / 2..]).unwrap();
            assert_eq!(direct, chunked.digest().unwrap());
        }
    }
}
