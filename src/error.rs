use thiserror::Error;

/// Errors surfaced by the streaming facade, HMAC, PBKDF2, and the dispatch layer.
///
/// No retries, no logging, no global error state: every fallible operation returns one of
/// these variants directly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An operation was attempted in a phase that forbids it (e.g. `update` after `digest`).
    #[error("usage error: {0}")]
    Usage(&'static str),

    /// HMAC or PBKDF2 was requested over an algorithm that doesn't support keyed use.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// A construction-time parameter was out of range.
    #[error("parameter error: {0}")]
    Parameter(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
