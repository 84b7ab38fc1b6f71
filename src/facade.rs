//! The generic streaming facade: `init` → `update*` → `digest`, parameterized over any
//! [`Algorithm`]. This is the component every concrete hash family (MD-style, sponge, BLAKE2b,
//! CRC32, xxHash) plugs into, and the only thing HMAC (`crate::hmac`) and PBKDF2
//! (`crate::pbkdf2`) depend on.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// The capability set a concrete hash family implements: reset to IV, compress one block, and
/// finalize into a digest. This crate uses one concrete type per family and dispatches over it
/// generically rather than through a trait object.
pub trait Algorithm: Clone {
    /// Input block width in bytes (the "rate" for sponge constructions).
    const BLOCK_SIZE: usize;

    /// Output digest width in bytes. For algorithms with a fixed digest size this is the only
    /// source of truth; for algorithms configurable at construction time (BLAKE2b) it is the
    /// maximum, and [`Algorithm::output_len`] must be overridden to report the actual width.
    const DIGEST_SIZE: usize;

    /// Algorithm identifier, for diagnostics and the dispatch layer.
    const NAME: &'static str;

    /// True if this algorithm may be used under HMAC.
    const SUPPORTS_HMAC: bool = true;

    /// Set for algorithms (BLAKE2b) whose compression function needs to know whether the block
    /// it's compressing is the last one. The facade withholds one full block of input so that
    /// `finalize` can compress it with the final-block flag set.
    const DEFERRED_FINAL_BLOCK: bool = false;

    /// Resets internal state to the algorithm's IV. Keeps any construction-time parameters
    /// (BLAKE2b key/output length, Keccak domain, xxHash/CRC32 seed).
    fn reset(&mut self);

    /// Compresses exactly one `BLOCK_SIZE`-byte block. `is_final` is only meaningful when
    /// `DEFERRED_FINAL_BLOCK` is set.
    fn compress(&mut self, block: &[u8], is_final: bool);

    /// Consumes the algorithm state, pads/encodes `trailing` (fewer than `BLOCK_SIZE` bytes,
    /// except when `DEFERRED_FINAL_BLOCK` is set, in which case it may hold exactly one full
    /// block) plus `total_len` (the total number of bytes absorbed), and writes `DIGEST_SIZE`
    /// bytes into `out`.
    fn finalize(self, trailing: &[u8], total_len: u128, out: &mut [u8]);

    /// Bytes the algorithm has already pre-absorbed into its initial buffer before any `update`
    /// call (BLAKE2b's keyed mode prepends a zero-padded key block, counted in `total_len`).
    fn initial_buffer(&self) -> Vec<u8> {
        Vec::new()
    }

    /// The actual digest width this instance will produce. Defaults to `DIGEST_SIZE`; BLAKE2b
    /// overrides it to report its construction-time-configured width instead.
    fn output_len(&self) -> usize {
        Self::DIGEST_SIZE
    }
}

/// Marker trait for algorithms eligible for HMAC: any `Algorithm` whose block size is defined
/// in the Merkle–Damgård/sponge sense. Deliberately not implemented for BLAKE2b, CRC32,
/// xxHash32, xxHash64.
pub trait HmacCapable: Algorithm + Default {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Fresh,
    Absorbing,
    Finalized,
}

/// The mutable hasher state: an algorithm instance, a pending partial block, the cumulative
/// input length, and a phase tag enforcing the `init` → `update*` → `digest` state machine.
#[derive(Clone)]
pub struct Hasher<A: Algorithm> {
    algorithm: A,
    buffer: Vec<u8>,
    total_len: u128,
    phase: Phase,
}

impl<A: Algorithm> Hasher<A> {
    /// Wraps an already-parameterized algorithm instance (e.g. a keyed BLAKE2b, or a seeded
    /// xxHash) in the streaming facade. `init()` is called immediately so the returned hasher
    /// is in the `absorbing` phase.
    pub fn new(algorithm: A) -> Self {
        let mut hasher = Hasher { algorithm, buffer: Vec::new(), total_len: 0, phase: Phase::Fresh };
        hasher.init();
        hasher
    }

    /// Resets to the algorithm's IV. Idempotent; valid from any phase.
    pub fn init(&mut self) {
        self.algorithm.reset();
        self.buffer = self.algorithm.initial_buffer();
        self.total_len = self.buffer.len() as u128;
        self.phase = Phase::Absorbing;
    }

    /// The block width this algorithm's compression function consumes.
    pub const fn block_size(&self) -> usize {
        A::BLOCK_SIZE
    }

    /// The output width this hasher's algorithm instance will produce.
    pub fn digest_size(&self) -> usize {
        self.algorithm.output_len()
    }

    /// Appends `data` to the logical input. `update(a); update(b)` is byte-for-byte equivalent
    /// to `update(a || b)`.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.phase == Phase::Finalized {
            return Err(Error::Usage("update called after digest; call init() first"));
        }
        self.buffer.extend_from_slice(data);
        self.total_len += data.len() as u128;

        let hold_back = if A::DEFERRED_FINAL_BLOCK { A::BLOCK_SIZE } else { 0 };
        while self.buffer.len() > hold_back {
            let block: Vec<u8> = self.buffer.drain(..A::BLOCK_SIZE).collect();
            self.algorithm.compress(&block, false);
        }
        Ok(())
    }

    /// Finalizes the hasher, transitioning to `finalized`, and returns the raw digest bytes.
    /// Not idempotent: a second call without an intervening `init()` fails with `UsageError`.
    /// The hasher remains reusable afterward only via `init()`.
    pub fn digest(&mut self) -> Result<Vec<u8>> {
        if self.phase == Phase::Finalized {
            return Err(Error::Usage("digest called twice; call init() first"));
        }
        self.phase = Phase::Finalized;
        let mut out = alloc::vec![0u8; self.algorithm.output_len()];
        // `Algorithm::finalize` consumes the algorithm state (so BLAKE2b can zeroize its
        // absorbed key block on the way out); finalize a clone and leave `self` as a record
        // of "already finalized" until the caller calls `init()` again.
        self.algorithm.clone().finalize(&self.buffer, self.total_len, &mut out);
        Ok(out)
    }

    /// Finalizes into a caller-supplied buffer of exactly `DIGEST_SIZE` bytes. Avoids the `Vec`
    /// allocation in `digest()` for `no_std` callers.
    pub fn digest_into(&mut self, out: &mut [u8]) -> Result<()> {
        if self.phase == Phase::Finalized {
            return Err(Error::Usage("digest called twice; call init() first"));
        }
        if out.len() != self.algorithm.output_len() {
            return Err(Error::Parameter("output buffer length must equal digest_size"));
        }
        self.phase = Phase::Finalized;
        self.algorithm.clone().finalize(&self.buffer, self.total_len, out);
        Ok(())
    }
}
