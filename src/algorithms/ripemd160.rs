//! RIPEMD-160. Dual independent 80-step lines (left/right) whose states are combined at the
//! end of each block, per the original Dobbertin/Bosselaers/Preneel specification.

use byteorder::{ByteOrder, LittleEndian};

use crate::algorithms::md5::md_pad_le;
use crate::facade::{Algorithm, HmacCapable};

const ZL: [usize; 80] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5,
    2, 14, 11, 8, 3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12, 1, 9, 11, 10, 0, 8, 12, 4,
    13, 3, 7, 15, 14, 5, 6, 2, 4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13,
];

const ZR: [usize; 80] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12, 6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12,
    4, 9, 1, 2, 15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13, 8, 6, 4, 1, 3, 11, 15, 0, 5,
    12, 2, 13, 9, 7, 10, 14, 12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11,
];

const SL: [u32; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8, 7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15,
    9, 11, 7, 13, 12, 11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5, 11, 12, 14, 15, 14,
    15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12, 9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];

const SR: [u32; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6, 9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12,
    7, 6, 15, 13, 11, 9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5, 15, 5, 8, 11, 14,
    14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8, 8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

const KL: [u32; 5] = [0x00000000, 0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xA953FD4E];
const KR: [u32; 5] = [0x50A28BE6, 0x5C4DD124, 0x6D703EF3, 0x7A6D76E9, 0x00000000];

fn f(j: usize, x: u32, y: u32, z: u32) -> u32 {
    match j / 16 {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        3 => (x & z) | (y & !z),
        _ => x ^ (y | !z),
    }
}

/// RIPEMD-160's streaming state: five 32-bit words.
#[derive(Clone)]
pub struct Ripemd160 {
    h: [u32; 5],
}

impl Default for Ripemd160 {
    fn default() -> Self {
        Ripemd160 { h: [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0] }
    }
}

impl Ripemd160 {
    fn compress_block(&mut self, block: &[u8]) {
        let mut x = [0u32; 16];
        LittleEndian::read_u32_into(block, &mut x);

        let (mut al, mut bl, mut cl, mut dl, mut el) =
            (self.h[0], self.h[1], self.h[2], self.h[3], self.h[4]);
        let (mut ar, mut br, mut cr, mut dr, mut er) =
            (self.h[0], self.h[1], self.h[2], self.h[3], self.h[4]);

        for j in 0..80 {
            let round = j / 16;
            let t = al
                .wrapping_add(f(j, bl, cl, dl))
                .wrapping_add(x[ZL[j]])
                .wrapping_add(KL[round])
                .rotate_left(SL[j])
                .wrapping_add(el);
            al = el;
            el = dl;
            dl = cl.rotate_left(10);
            cl = bl;
            bl = t;

            let t = ar
                .wrapping_add(f(79 - j, br, cr, dr))
                .wrapping_add(x[ZR[j]])
                .wrapping_add(KR[round])
                .rotate_left(SR[j])
                .wrapping_add(er);
            ar = er;
            er = dr;
            dr = cr.rotate_left(10);
            cr = br;
            br = t;
        }

        let t = self.h[1].wrapping_add(cl).wrapping_add(dr);
        self.h[1] = self.h[2].wrapping_add(dl).wrapping_add(er);
        self.h[2] = self.h[3].wrapping_add(el).wrapping_add(ar);
        self.h[3] = self.h[4].wrapping_add(al).wrapping_add(br);
        self.h[4] = self.h[0].wrapping_add(bl).wrapping_add(cr);
        self.h[0] = t;
    }
}

impl Algorithm for Ripemd160 {
    const BLOCK_SIZE: usize = 64;
    const DIGEST_SIZE: usize = 20;
    const NAME: &'static str = "ripemd160";

    fn reset(&mut self) {
        *self = Ripemd160::default();
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

impl HmacCapable for Ripemd160 {}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::facade::Hasher;

    fn digest_hex(data: &[u8]) -> String {
        let mut hasher = Hasher::new(Ripemd160::default());
        hasher.update(data).unwrap();
        hex::encode(hasher.digest().unwrap())
    }

    #[test]
    fn empty_string() {
        assert_eq!(digest_hex(b""), "9c1185a5c5e9fc54612808977ee8f548b2258d31");
    }

    #[test]
    fn abc() {
        assert_eq!(digest_hex(b"abc"), "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc");
    }

    #[test]
    fn chunking_invariance() {
        let mut whole = Hasher::new(Ripemd160::default());
        whole.update(b"the quick brown fox jumps over the lazy dog").unwrap();
        let whole_digest = whole.digest().unwrap();

        let mut chunked = Hasher::new(Ripemd160::default());
        for chunk in [b"the quick ".as_slice(), b"brown fox jumps ", b"over the lazy dog"] {
            chunked.update(chunk).unwrap();
        }
        assert_eq!(whole_digest, chunked.digest().unwrap());
    }
}
