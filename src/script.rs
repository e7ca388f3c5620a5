//! Locking-script construction and classification.

use crate::address;
use crate::chainparams::ChainParams;
use crate::error::{Error, Result};
use crate::hash;
use crate::varint;

// Opcodes used by the script templates below.
pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_CHECKCOLDSTAKEVERIFY: u8 = 0xd1;
pub const OP_ROT: u8 = 0x7b;

/// Builds the locking script (scriptPubKey) paying to `dest_address`.
/// The template is chosen from the address prefix: P2PKH for pubkey-hash
/// addresses, P2SH for script-hash addresses.
pub fn compose_locking_script(dest_address: &str, testnet: bool) -> Result<Vec<u8>> {
    let pubkey_hash = address::address_to_pubkey_hash(dest_address)?;
    let params = ChainParams::for_network(testnet);

    let mut script = Vec::with_capacity(25);
    if params.has_p2pkh_prefix(dest_address) {
        script.push(OP_DUP);
        script.push(OP_HASH160);
        script.extend_from_slice(&varint::encode_varint(pubkey_hash.len() as u64));
        script.extend_from_slice(&pubkey_hash);
        script.push(OP_EQUALVERIFY);
        script.push(OP_CHECKSIG);
    } else if params.has_p2sh_prefix(dest_address) {
        script.push(OP_HASH160);
        script.extend_from_slice(&varint::encode_varint(pubkey_hash.len() as u64));
        script.extend_from_slice(&pubkey_hash);
        script.push(OP_EQUAL);
    } else {
        let leading = dest_address.chars().next().unwrap_or_default();
        let mut mess = format!("invalid dest address prefix: {}", leading);
        if testnet {
            mess.push_str(" for testnet");
        }
        return Err(Error::UnsupportedAddress(mess));
    }
    Ok(script)
}

/// Builds an OP_RETURN locking script carrying `message`. Only the
/// single-byte length form is produced; longer payloads are rejected
/// instead of silently emitting a malformed script.
pub fn compose_op_return_script(message: &str) -> Result<Vec<u8>> {
    let data = message.as_bytes();
    if data.len() > 0xfc {
        return Err(Error::MalformedInput(format!(
            "OP_RETURN payload is {} bytes, max is 252",
            data.len()
        )));
    }
    let mut script = Vec::with_capacity(2 + data.len());
    script.push(OP_RETURN);
    script.extend_from_slice(&varint::encode_varint(data.len() as u64));
    script.extend_from_slice(data);
    Ok(script)
}

/// Classifies a locking script by length and shape and returns the 20-byte
/// hash it pays to: the embedded hash for P2PKH, HASH160 of the pubkey for
/// P2PK, and the spend-path hash for the cold-staking template.
pub fn extract_pkh_from_locking_script(script: &[u8]) -> Result<[u8; 20]> {
    if script.len() == 25 && script[0] == OP_DUP && script[1] == OP_HASH160 {
        let (hash_len, _) = varint::decode_varint(script, 2)?;
        if hash_len != 20 {
            return Err(Error::NonStandardScript {
                reason: "public key hash length should be 20".into(),
                len: script.len(),
            });
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&script[3..23]);
        return Ok(out);
    }

    if script.len() == 35 {
        let (key_len, _) = varint::decode_varint(script, 0)?;
        if key_len != 32 && key_len != 33 {
            return Err(Error::NonStandardScript {
                reason: "public key length should be 32 or 33".into(),
                len: script.len(),
            });
        }
        return Ok(hash::hash160(&script[1..1 + key_len as usize]));
    }

    if is_pay_to_cold_staking(script) {
        let mut out = [0u8; 20];
        out.copy_from_slice(&script[28..48]);
        return Ok(out);
    }

    Err(Error::NonStandardScript {
        reason: "should be P2PKH or P2PK".into(),
        len: script.len(),
    })
}

/// Fixed-offset pattern match for the 51-byte cold-staking template. No
/// opcode stream is parsed; only the bytes at the fixed positions decide.
pub fn is_pay_to_cold_staking(script: &[u8]) -> bool {
    script.len() == 51
        && script[2] == OP_ROT
        && script[4] == OP_CHECKCOLDSTAKEVERIFY
        && script[5] == 20
        && script[27] == 20
        && script[49] == OP_EQUALVERIFY
        && script[50] == OP_CHECKSIG
}

/// The hash checked on the staking path of a cold-staking script
/// (bytes 6..26). The spend-path hash at 28..48 is what
/// [`extract_pkh_from_locking_script`] returns; pick the one matching the
/// lookup being done.
pub fn delegated_staker_hash(script: &[u8]) -> Result<[u8; 20]> {
    if !is_pay_to_cold_staking(script) {
        return Err(Error::NonStandardScript {
            reason: "not a cold-staking script".into(),
            len: script.len(),
        });
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&script[6..26]);
    Ok(out)
}
