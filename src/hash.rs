use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Double SHA-256, the checksum and digest function used throughout the
/// wire protocol.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// SHA-256 followed by RIPEMD-160 (the pubkey-hash function).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}
