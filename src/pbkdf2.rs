//! PBKDF2-HMAC (RFC 8018 §5.2), generic over any [`HmacCapable`] algorithm.
//!
//! The one performance-critical property is that the underlying [`Hmac`] instance is constructed
//! exactly once per `derive` call and reused across every `U_1 .. U_c` iteration of every block,
//! rather than re-deriving the inner/outer key state per iteration.

use alloc::vec;
use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use crate::facade::{Algorithm, HmacCapable};
use crate::hmac::Hmac;

/// Derives `output_len` bytes from `password`/`salt` using `iterations` rounds of PBKDF2-HMAC-A.
///
/// `iterations` must be at least 1; `output_len` must be at least 1 and at most
/// `(2^32 - 1) * A::DIGEST_SIZE` (RFC 8018's `dkLen` bound), which for every algorithm this crate
/// supports is never reachable in practice and is checked only for completeness.
pub fn derive<A: HmacCapable>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Vec<u8>> {
    let mut out = vec![0u8; output_len];
    derive_into::<A>(password, salt, iterations, &mut out)?;
    Ok(out)
}

/// Like [`derive`], but fills a caller-supplied buffer instead of allocating. The buffer's
/// length determines how many output bytes are produced.
pub fn derive_into<A: HmacCapable>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<()> {
    if iterations == 0 {
        return Err(Error::Parameter("pbkdf2 iteration count must be at least 1"));
    }
    if out.is_empty() {
        return Err(Error::Parameter("pbkdf2 output length must be at least 1"));
    }
    let digest_size = A::DIGEST_SIZE;
    if out.len() > (u32::MAX as usize) * digest_size {
        return Err(Error::Parameter("pbkdf2 output length exceeds (2^32 - 1) * hLen"));
    }

    let hmac = Hmac::<A>::new(password)?;
    let block_count = (out.len() + digest_size - 1) / digest_size;

    for block_index in 0..block_count {
        let block = derive_block(&hmac, salt, iterations, block_index as u32 + 1)?;
        let start = block_index * digest_size;
        let end = (start + digest_size).min(out.len());
        out[start..end].copy_from_slice(&block[..end - start]);
    }

    Ok(())
}

/// Computes `T_i = U_1 ^ U_2 ^ ... ^ U_c` for one output block, reusing the single `hmac`
/// instance across all `c` iterations (RFC 8018 §5.2's `F` function).
fn derive_block<A: HmacCapable>(
    hmac: &Hmac<A>,
    salt: &[u8],
    iterations: u32,
    block_index: u32,
) -> Result<Vec<u8>> {
    let mut salt_and_index = Vec::with_capacity(salt.len() + 4);
    salt_and_index.extend_from_slice(salt);
    let mut index_bytes = [0u8; 4];
    BigEndian::write_u32(&mut index_bytes, block_index);
    salt_and_index.extend_from_slice(&index_bytes);

    let mut u = hmac.authenticate(&salt_and_index)?;
    let mut t = u.clone();

    for _ in 1..iterations {
        u = hmac.authenticate(&u)?;
        for (t_byte, u_byte) in t.iter_mut().zip(u.iter()) {
            *t_byte ^= u_byte;
        }
    }

    Ok(t)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::algorithms::{Sha1, Sha256};

    fn hex(bytes: &[u8]) -> String {
        ::hex::encode(bytes)
    }

    #[test]
    fn rfc6070_pbkdf2_hmac_sha1_vector_1() {
        // RFC 6070 test vector 1: P = "password", S = "salt", c = 1, dkLen = 20.
        let dk = derive::<Sha1>(b"password", b"salt", 1, 20).unwrap();
        assert_eq!(hex(&dk), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
    }

    #[test]
    fn rfc6070_pbkdf2_hmac_sha1_vector_2() {
        // RFC 6070 test vector 2: same inputs, c = 2.
        let dk = derive::<Sha1>(b"password", b"salt", 2, 20).unwrap();
        assert_eq!(hex(&dk), "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957");
    }

    #[test]
    fn rfc6070_pbkdf2_hmac_sha1_vector_4096() {
        // RFC 6070 test vector 4: same inputs, c = 4096.
        let dk = derive::<Sha1>(b"password", b"salt", 4096, 20).unwrap();
        assert_eq!(hex(&dk), "4b007901b765489abead49d926f721d065a429c1");
    }

    #[test]
    fn output_longer_than_one_block_spans_multiple_blocks() {
        // dkLen = 25 > SHA-1's 20-byte digest, forcing a second U/T block.
        let dk = derive::<Sha1>(b"passwordPASSWORDpassword", b"saltSALTsaltSALTsaltSALTsaltSALTsalt", 4096, 25)
            .unwrap();
        assert_eq!(dk.len(), 25);
    }

    #[test]
    fn zero_iterations_is_a_parameter_error() {
        assert!(matches!(derive::<Sha256>(b"p", b"s", 0, 32), Err(Error::Parameter(_))));
    }

    #[test]
    fn zero_output_length_is_a_parameter_error() {
        assert!(matches!(derive::<Sha256>(b"p", b"s", 1, 0), Err(Error::Parameter(_))));
    }

    #[test]
    fn same_inputs_are_deterministic() {
        let a = derive::<Sha256>(b"password", b"salt", 10, 32).unwrap();
        let b = derive::<Sha256>(b"password", b"salt", 10, 32).unwrap();
        assert_eq!(a, b);
    }
}
