//! Message and digest signing with recoverable ECDSA.
//!
//! Signatures are 65 bytes: a header byte (27 + recovery id, +4 when the
//! key is compressed) followed by r and s. A signature is never handed
//! back without first being verified against the key that produced it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

use crate::address;
use crate::chainparams::MAINNET_PARAMS;
use crate::error::{Error, Result};
use crate::hash;
use crate::varint;

/// Envelope prefix of the signed-message digest; the leading byte is the
/// varint length of the text that follows.
const MSG_MAGIC: &[u8] = b"\x18DarkNet Signed Message:\n";

pub const SIGNATURE_LEN: usize = 65;

/// Digest an address-ownership or legacy vote message: double SHA-256 of
/// the envelope prefix, the varint message length, and the message bytes.
pub fn message_digest(message: &str) -> [u8; 32] {
    let body = message.as_bytes();
    let mut padded = Vec::with_capacity(MSG_MAGIC.len() + 9 + body.len());
    padded.extend_from_slice(MSG_MAGIC);
    padded.extend_from_slice(&varint::encode_varint(body.len() as u64));
    padded.extend_from_slice(body);
    hash::sha256d(&padded)
}

/// Signs a text message through the signed-message envelope.
pub fn sign_message(message: &str, wif: &str) -> Result<[u8; SIGNATURE_LEN]> {
    sign_hash(&message_digest(message), wif)
}

/// Signs a 32-byte digest with the WIF-encoded key and self-verifies the
/// result before returning it.
pub fn sign_hash(digest: &[u8; 32], wif: &str) -> Result<[u8; SIGNATURE_LEN]> {
    let (key_bytes, compressed) = address::wif_to_secret_key(wif)?;
    let secret = SecretKey::from_slice(&key_bytes)
        .map_err(|e| Error::InvalidAddress(format!("WIF secret key rejected: {}", e)))?;

    let msg = Message::from_digest(*digest);
    let recoverable = SECP256K1.sign_ecdsa_recoverable(&msg, &secret);
    let (rec_id, compact) = recoverable.serialize_compact();

    let mut sig = [0u8; SIGNATURE_LEN];
    sig[0] = 27 + rec_id.to_i32() as u8 + if compressed { 4 } else { 0 };
    sig[1..].copy_from_slice(&compact);

    let pubkey = PublicKey::from_secret_key(SECP256K1, &secret);
    let recovered = SECP256K1
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|e| Error::SignatureIntegrity(format!("public key recovery failed: {}", e)))?;
    if recovered != pubkey
        || SECP256K1
            .verify_ecdsa(&msg, &recoverable.to_standard(), &pubkey)
            .is_err()
    {
        log::warn!(
            "self-check failed for signature over digest {}",
            hex::encode(digest)
        );
        return Err(Error::SignatureIntegrity(
            "freshly produced signature failed verification".into(),
        ));
    }
    Ok(sig)
}

/// Checks that `sig` over `message` was produced by the key behind
/// `address`. Testnet-ness is inferred from the leading character being
/// outside the mainnet pubkey-address prefix set. Pure predicate; every
/// malformed input is simply `false`.
pub fn verify_address_signature(message: &str, sig: &[u8], address: &str) -> bool {
    let testnet = !MAINNET_PARAMS.has_p2pkh_prefix(address);
    if !address::validate_address(address, testnet) {
        return false;
    }
    if sig.len() != SIGNATURE_LEN || sig[0] < 27 {
        return false;
    }
    let header = sig[0];
    let rec_id = match RecoveryId::from_i32(((header - 27) & 3) as i32) {
        Ok(id) => id,
        Err(_) => return false,
    };
    let recoverable = match RecoverableSignature::from_compact(&sig[1..], rec_id) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let msg = Message::from_digest(message_digest(message));
    let pubkey = match SECP256K1.recover_ecdsa(&msg, &recoverable) {
        Ok(pk) => pk,
        Err(_) => return false,
    };
    let encoded = if header >= 31 {
        pubkey.serialize().to_vec()
    } else {
        pubkey.serialize_uncompressed().to_vec()
    };
    address::pubkey_to_address(&encoded, testnet) == address
}

/// Base64 form of a signature, as the RPC interface transmits it.
pub fn signature_to_base64(sig: &[u8]) -> String {
    BASE64.encode(sig)
}
