/// Failure kinds surfaced by the codec and signing routines. Callers branch
/// on the variant to decide whether to skip the item, reprompt the user, or
/// abort, so every fallible function returns one of these instead of a
/// sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Base58Check checksum, length or version failures, including WIF keys
    /// and TorV3 onion payloads.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Well-formed input whose network prefix or address family is not one
    /// we handle.
    #[error("unsupported address: {0}")]
    UnsupportedAddress(String),

    /// A locking script that matches none of the known templates.
    #[error("non-standard locking script: {reason} (len is {len})")]
    NonStandardScript { reason: String, len: usize },

    /// Truncated or inconsistent binary buffers, bad hex, oversize payloads.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A freshly produced signature failed its own verification. Fatal;
    /// never retried.
    #[error("signature integrity: {0}")]
    SignatureIntegrity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
