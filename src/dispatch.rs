//! One-shot, hex-encoded convenience API, dispatched dynamically over a [`HashId`] rather than
//! a generic type parameter. This is the layer most callers reach for; it pools one shared
//! hasher instance per fixed-parameter algorithm behind a [`Mutex`], so repeated one-shot calls
//! don't pay an allocation per call, and serializes concurrent callers through the lock rather
//! than exposing unsynchronized shared state.
//!
//! Only available with the `std` feature, since pooling needs [`Mutex`] and [`OnceLock`].

use std::sync::{Mutex, OnceLock};

use alloc::string::String;
use alloc::vec::Vec;

use crate::algorithms::{
    Blake2b, Crc32, Keccak224, Keccak256, Keccak384, Keccak512, Md4, Md5, Ripemd160, Sha1,
    Sha224, Sha256, Sha384, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Sha512, XxHash32, XxHash64,
};
use crate::error::{Error, Result};
use crate::facade::{Algorithm, Hasher};
use crate::hmac::Hmac;
use crate::pbkdf2;

/// A descriptor for a hash algorithm: the properties a caller needs to allocate buffers and
/// decide whether keyed use is possible, without committing to a concrete type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub name: &'static str,
    pub block_size_bytes: usize,
    pub digest_size_bytes: usize,
    pub supports_hmac: bool,
}

/// Every algorithm this crate implements, selectable at runtime. Parametrized variants
/// (`Blake2b`'s output width, `XxHash32`/`XxHash64`'s seed) carry their parameter inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashId {
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Ripemd160,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Keccak224,
    Keccak256,
    Keccak384,
    Keccak512,
    Crc32,
    XxHash32(u32),
    XxHash64(u64),
    Blake2b(usize),
}

impl HashId {
    /// The static properties of this algorithm, independent of any particular instance.
    pub fn descriptor(self) -> AlgorithmDescriptor {
        macro_rules! descriptor_of {
            ($ty:ty) => {
                AlgorithmDescriptor {
                    name: <$ty>::NAME,
                    block_size_bytes: <$ty>::BLOCK_SIZE,
                    digest_size_bytes: <$ty>::DIGEST_SIZE,
                    supports_hmac: <$ty>::SUPPORTS_HMAC,
                }
            };
        }
        match self {
            HashId::Md4 => descriptor_of!(Md4),
            HashId::Md5 => descriptor_of!(Md5),
            HashId::Sha1 => descriptor_of!(Sha1),
            HashId::Sha224 => descriptor_of!(Sha224),
            HashId::Sha256 => descriptor_of!(Sha256),
            HashId::Sha384 => descriptor_of!(Sha384),
            HashId::Sha512 => descriptor_of!(Sha512),
            HashId::Ripemd160 => descriptor_of!(Ripemd160),
            HashId::Sha3_224 => descriptor_of!(Sha3_224),
            HashId::Sha3_256 => descriptor_of!(Sha3_256),
            HashId::Sha3_384 => descriptor_of!(Sha3_384),
            HashId::Sha3_512 => descriptor_of!(Sha3_512),
            HashId::Keccak224 => descriptor_of!(Keccak224),
            HashId::Keccak256 => descriptor_of!(Keccak256),
            HashId::Keccak384 => descriptor_of!(Keccak384),
            HashId::Keccak512 => descriptor_of!(Keccak512),
            HashId::Crc32 => descriptor_of!(Crc32),
            HashId::XxHash32(_) => descriptor_of!(XxHash32),
            HashId::XxHash64(_) => descriptor_of!(XxHash64),
            HashId::Blake2b(digest_size) => AlgorithmDescriptor {
                name: Blake2b::NAME,
                block_size_bytes: Blake2b::BLOCK_SIZE,
                digest_size_bytes: digest_size,
                supports_hmac: Blake2b::SUPPORTS_HMAC,
            },
        }
    }
}

/// Lazily-initialized, mutex-guarded hasher, reused across one-shot calls for a single
/// fixed-parameter algorithm. `digest()` is preceded by `init()`, so a poisoned or mid-use
/// instance is never observed by the next caller past the lock itself.
fn digest_pooled<A: Algorithm + Default>(
    pool: &'static OnceLock<Mutex<Hasher<A>>>,
    data: &[u8],
) -> Vec<u8> {
    let mutex = pool.get_or_init(|| Mutex::new(Hasher::new(A::default())));
    let mut hasher = mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    hasher.init();
    hasher.update(data).expect("freshly init()ed hasher accepts update");
    hasher.digest().expect("freshly updated hasher accepts digest")
}

macro_rules! pool_static {
    ($name:ident, $ty:ty) => {
        static $name: OnceLock<Mutex<Hasher<$ty>>> = OnceLock::new();
    };
}

pool_static!(MD4_POOL, Md4);
pool_static!(MD5_POOL, Md5);
pool_static!(SHA1_POOL, Sha1);
pool_static!(SHA224_POOL, Sha224);
pool_static!(SHA256_POOL, Sha256);
pool_static!(SHA384_POOL, Sha384);
pool_static!(SHA512_POOL, Sha512);
pool_static!(RIPEMD160_POOL, Ripemd160);
pool_static!(SHA3_224_POOL, Sha3_224);
pool_static!(SHA3_256_POOL, Sha3_256);
pool_static!(SHA3_384_POOL, Sha3_384);
pool_static!(SHA3_512_POOL, Sha3_512);
pool_static!(KECCAK224_POOL, Keccak224);
pool_static!(KECCAK256_POOL, Keccak256);
pool_static!(KECCAK384_POOL, Keccak384);
pool_static!(KECCAK512_POOL, Keccak512);
pool_static!(CRC32_POOL, Crc32);

/// Computes `id`'s digest over `data` and hex-encodes it.
///
/// BLAKE2b and the xxHash variants carry construction-time parameters (output width, seed) and
/// so are built fresh per call rather than drawn from the shared pools above.
pub fn hash_hex(id: HashId, data: &[u8]) -> String {
    let digest = match id {
        HashId::Md4 => digest_pooled(&MD4_POOL, data),
        HashId::Md5 => digest_pooled(&MD5_POOL, data),
        HashId::Sha1 => digest_pooled(&SHA1_POOL, data),
        HashId::Sha224 => digest_pooled(&SHA224_POOL, data),
        HashId::Sha256 => digest_pooled(&SHA256_POOL, data),
        HashId::Sha384 => digest_pooled(&SHA384_POOL, data),
        HashId::Sha512 => digest_pooled(&SHA512_POOL, data),
        HashId::Ripemd160 => digest_pooled(&RIPEMD160_POOL, data),
        HashId::Sha3_224 => digest_pooled(&SHA3_224_POOL, data),
        HashId::Sha3_256 => digest_pooled(&SHA3_256_POOL, data),
        HashId::Sha3_384 => digest_pooled(&SHA3_384_POOL, data),
        HashId::Sha3_512 => digest_pooled(&SHA3_512_POOL, data),
        HashId::Keccak224 => digest_pooled(&KECCAK224_POOL, data),
        HashId::Keccak256 => digest_pooled(&KECCAK256_POOL, data),
        HashId::Keccak384 => digest_pooled(&KECCAK384_POOL, data),
        HashId::Keccak512 => digest_pooled(&KECCAK512_POOL, data),
        HashId::Crc32 => digest_pooled(&CRC32_POOL, data),
        HashId::XxHash32(seed) => one_shot(XxHash32::new(seed), data),
        HashId::XxHash64(seed) => one_shot(XxHash64::new(seed), data),
        HashId::Blake2b(digest_size) => one_shot(Blake2b::new(digest_size), data),
    };
    hex::encode(digest)
}

fn one_shot<A: Algorithm>(algorithm: A, data: &[u8]) -> Vec<u8> {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data).expect("fresh hasher accepts update");
    hasher.digest().expect("fresh hasher accepts digest")
}

/// Computes `HMAC(id, key, message)` and hex-encodes it. Fails with
/// [`Error::Unsupported`] for algorithms whose descriptor reports `supports_hmac: false`
/// (BLAKE2b, CRC32, xxHash32, xxHash64).
pub fn hmac_hex(id: HashId, key: &[u8], message: &[u8]) -> Result<String> {
    macro_rules! hmac_of {
        ($ty:ty) => {{
            Hmac::<$ty>::new(key)?.authenticate(message)?
        }};
    }
    let mac = match id {
        HashId::Md4 => hmac_of!(Md4),
        HashId::Md5 => hmac_of!(Md5),
        HashId::Sha1 => hmac_of!(Sha1),
        HashId::Sha224 => hmac_of!(Sha224),
        HashId::Sha256 => hmac_of!(Sha256),
        HashId::Sha384 => hmac_of!(Sha384),
        HashId::Sha512 => hmac_of!(Sha512),
        HashId::Ripemd160 => hmac_of!(Ripemd160),
        HashId::Sha3_224 => hmac_of!(Sha3_224),
        HashId::Sha3_256 => hmac_of!(Sha3_256),
        HashId::Sha3_384 => hmac_of!(Sha3_384),
        HashId::Sha3_512 => hmac_of!(Sha3_512),
        HashId::Keccak224 => hmac_of!(Keccak224),
        HashId::Keccak256 => hmac_of!(Keccak256),
        HashId::Keccak384 => hmac_of!(Keccak384),
        HashId::Keccak512 => hmac_of!(Keccak512),
        HashId::Crc32 | HashId::XxHash32(_) | HashId::XxHash64(_) | HashId::Blake2b(_) => {
            return Err(Error::Unsupported(hmac_unsupported_message(id)));
        }
    };
    Ok(hex::encode(mac))
}

fn hmac_unsupported_message(id: HashId) -> &'static str {
    match id {
        HashId::Crc32 => "CRC32 is a checksum, not a MAC-eligible digest",
        HashId::XxHash32(_) | HashId::XxHash64(_) => "xxHash is not MAC-eligible",
        HashId::Blake2b(_) => "BLAKE2b has its own native keyed mode; use Blake2b::with_key",
        _ => unreachable!("only HMAC-ineligible ids reach this function"),
    }
}

/// Computes PBKDF2-HMAC-`id`(`password`, `salt`, `iterations`, `output_len`) and hex-encodes it.
/// Same eligibility rule as [`hmac_hex`], since PBKDF2 is defined in terms of HMAC.
pub fn pbkdf2_hex(
    id: HashId,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<String> {
    macro_rules! pbkdf2_of {
        ($ty:ty) => {{
            pbkdf2::derive::<$ty>(password, salt, iterations, output_len)?
        }};
    }
    let derived = match id {
        HashId::Md4 => pbkdf2_of!(Md4),
        HashId::Md5 => pbkdf2_of!(Md5),
        HashId::Sha1 => pbkdf2_of!(Sha1),
        HashId::Sha224 => pbkdf2_of!(Sha224),
        HashId::Sha256 => pbkdf2_of!(Sha256),
        HashId::Sha384 => pbkdf2_of!(Sha384),
        HashId::Sha512 => pbkdf2_of!(Sha512),
        HashId::Ripemd160 => pbkdf2_of!(Ripemd160),
        HashId::Sha3_224 => pbkdf2_of!(Sha3_224),
        HashId::Sha3_256 => pbkdf2_of!(Sha3_256),
        HashId::Sha3_384 => pbkdf2_of!(Sha3_384),
        HashId::Sha3_512 => pbkdf2_of!(Sha3_512),
        HashId::Keccak224 => pbkdf2_of!(Keccak224),
        HashId::Keccak256 => pbkdf2_of!(Keccak256),
        HashId::Keccak384 => pbkdf2_of!(Keccak384),
        HashId::Keccak512 => pbkdf2_of!(Keccak512),
        HashId::Crc32 | HashId::XxHash32(_) | HashId::XxHash64(_) | HashId::Blake2b(_) => {
            return Err(Error::Unsupported(hmac_unsupported_message(id)));
        }
    };
    Ok(hex::encode(derived))
}
