//! Concrete [`crate::facade::Algorithm`] implementations, one module per hash family.

pub mod blake2b;
pub mod crc32;
pub mod md4;
pub mod md5;
pub mod ripemd160;
pub mod sha1;
pub mod sha2;
pub mod sha3;
pub mod xxhash;

pub use blake2b::Blake2b;
pub use crc32::Crc32;
pub use md4::Md4;
pub use md5::Md5;
pub use ripemd160::Ripemd160;
pub use sha1::Sha1;
pub use sha2::{Sha224, Sha256, Sha384, Sha512};
pub use sha3::{Keccak224, Keccak256, Keccak384, Keccak512, Sha3_224, Sha3_256, Sha3_384, Sha3_512};
pub use xxhash::{XxHash32, XxHash64};
