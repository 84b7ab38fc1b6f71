//! A portable hash, HMAC, and PBKDF2 library covering the common block- and sponge-based digest
//! families: MD4, MD5, SHA-1, SHA-2 (224/256/384/512), SHA-3/Keccak (224/256/384/512), RIPEMD-160,
//! BLAKE2b, CRC32, and xxHash (32/64).
//!
//! The streaming facade (`init` → `update*` → `digest`) lives in [`facade`], and every concrete
//! algorithm in [`algorithms`] plugs into it. HMAC and PBKDF2-HMAC build on top of the facade
//! generically, so both work over any MD/SHA-family or SHA-3/Keccak algorithm without
//! per-algorithm HMAC or PBKDF2 code. [`dispatch`] offers a hex-encoded, runtime-selected
//! convenience API (`std` only) for callers who don't want to name a concrete algorithm type.
//!
//! This crate performs no logging and holds no global error state beyond the dispatch layer's
//! hasher pools; every fallible operation returns a [`error::Result`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod algorithms;
#[cfg(feature = "std")]
pub mod dispatch;
pub mod error;
pub mod facade;
pub mod hmac;
pub mod pbkdf2;

#[cfg(test)]
mod proptests;

pub use error::{Error, Result};
pub use facade::{Algorithm, Hasher, HmacCapable};
pub use hmac::{Hmac, HmacStream};

#[cfg(feature = "std")]
pub use dispatch::{hash_hex, hmac_hex, pbkdf2_hex, AlgorithmDescriptor, HashId};
