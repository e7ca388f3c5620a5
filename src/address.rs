//! Base58Check address and WIF handling.
//!
//! Scripts, hashes and keys are raw byte sequences everywhere inside the
//! crate; Base58/hex text only appears at this boundary.

use crate::chainparams::{ChainParams, MAINNET_PARAMS, TESTNET_PARAMS};
use crate::error::{Error, Result};
use crate::hash;

/// Base58Check-encodes `payload` (version byte included) by appending the
/// first four bytes of its double SHA-256.
pub fn encode_base58check(payload: &[u8]) -> String {
    let checksum = hash::sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// Decodes a Base58Check string and verifies the 4-byte checksum, returning
/// the payload with the checksum stripped (version byte still leading).
pub fn decode_base58check(input: &str) -> Result<Vec<u8>> {
    let bytes = bs58::decode(input)
        .into_vec()
        .map_err(|e| Error::InvalidAddress(format!("base58 decode failed: {}", e)))?;
    if bytes.len() < 5 {
        return Err(Error::InvalidAddress(format!(
            "base58 payload too short ({} bytes)",
            bytes.len()
        )));
    }
    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    if hash::sha256d(payload)[..4] != *checksum {
        return Err(Error::InvalidAddress("base58 checksum mismatch".into()));
    }
    Ok(payload.to_vec())
}

/// True iff `address` carries a recognized prefix for the network and its
/// Base58Check checksum verifies. Never errors; any malformed input is
/// simply invalid.
pub fn validate_address(address: &str, testnet: bool) -> bool {
    let params = ChainParams::for_network(testnet);
    if !params.has_p2pkh_prefix(address) && !params.has_p2sh_prefix(address) {
        return false;
    }
    decode_base58check(address).is_ok()
}

/// Strips the Base58Check envelope and version byte, leaving the 20-byte
/// pubkey (or script) hash.
pub fn address_to_pubkey_hash(address: &str) -> Result<[u8; 20]> {
    let payload = decode_base58check(address)?;
    let body = &payload[1..];
    if body.len() != 20 {
        return Err(Error::InvalidAddress(format!(
            "public key hash is {} bytes, expected 20",
            body.len()
        )));
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(body);
    Ok(out)
}

/// Encodes a 20-byte pubkey hash as a Base58Check address with the
/// network's pubkey version byte.
pub fn pubkey_hash_to_address(pubkey_hash: &[u8; 20], testnet: bool) -> String {
    let params = ChainParams::for_network(testnet);
    let mut payload = Vec::with_capacity(21);
    payload.push(params.pubkey_address_version);
    payload.extend_from_slice(pubkey_hash);
    encode_base58check(&payload)
}

/// HASH160 of a serialized public key, encoded as an address.
pub fn pubkey_to_address(pubkey: &[u8], testnet: bool) -> String {
    pubkey_hash_to_address(&hash::hash160(pubkey), testnet)
}

/// Recovers the raw 32-byte secret key from a WIF string. The returned
/// flag is true when the key was exported for compressed public keys
/// (33-byte body with a trailing 0x01). Either network's WIF version byte
/// is accepted; the caller knows which chain it is talking to.
pub fn wif_to_secret_key(wif: &str) -> Result<([u8; 32], bool)> {
    let payload = decode_base58check(wif)?;
    let version = payload[0];
    if version != MAINNET_PARAMS.wif_version && version != TESTNET_PARAMS.wif_version {
        return Err(Error::InvalidAddress(format!(
            "unrecognized WIF version byte {:#04x}",
            version
        )));
    }
    let body = &payload[1..];
    let (secret, compressed) = match body.len() {
        32 => (body, false),
        33 if body[32] == 0x01 => (&body[..32], true),
        n => {
            return Err(Error::InvalidAddress(format!(
                "WIF secret key body is {} bytes",
                n
            )))
        }
    };
    let mut key = [0u8; 32];
    key.copy_from_slice(secret);
    Ok((key, compressed))
}
