//! Budget-proposal vote construction.
//!
//! A vote commits to (collateral txid, output index, proposal hash, vote
//! code, sign time). Nodes past the new-signature activation expect the
//! double-SHA256 of the binary serialization; older nodes expect the legacy
//! concatenated string pushed through the signed-message envelope. Which
//! one applies is a chain-height decision the caller makes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash;
use crate::signer;

/// Vote wire values. The order is fixed; the discriminant is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteCode {
    #[serde(rename = "abstains")]
    Abstain = 0,
    #[serde(rename = "yes")]
    Yes = 1,
    #[serde(rename = "no")]
    No = 2,
}

impl VoteCode {
    /// The string form the `mnbudgetrawvote` RPC expects.
    pub fn as_str(self) -> &'static str {
        match self {
            VoteCode::Abstain => "abstains",
            VoteCode::Yes => "yes",
            VoteCode::No => "no",
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(VoteCode::Abstain),
            1 => Ok(VoteCode::Yes),
            2 => Ok(VoteCode::No),
            n => Err(Error::MalformedInput(format!("vote code {} out of range", n))),
        }
    }
}

/// A budget proposal row as returned by the `getbudgetinfo` RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "FeeHash")]
    pub fee_hash: String,
    #[serde(rename = "BlockStart")]
    pub block_start: i64,
    #[serde(rename = "BlockEnd")]
    pub block_end: i64,
    #[serde(rename = "TotalPaymentCount")]
    pub total_payment_count: i64,
    #[serde(rename = "RemainingPaymentCount")]
    pub remaining_payment_count: i64,
    #[serde(rename = "PaymentAddress")]
    pub payment_address: String,
    #[serde(rename = "Yeas")]
    pub yeas: i64,
    #[serde(rename = "Nays")]
    pub nays: i64,
    #[serde(rename = "Abstains")]
    pub abstains: i64,
    #[serde(rename = "TotalPayment")]
    pub total_payment: f64,
    #[serde(rename = "MonthlyPayment")]
    pub monthly_payment: f64,
}

/// What gets signed for a single vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VotePayload {
    /// Double-SHA256 of the binary vote serialization (new signatures).
    Binary([u8; 32]),
    /// Legacy concatenated string; goes through the message envelope.
    Legacy(String),
}

/// Builds the signature payload for one vote. `new_sigs` selects the
/// binary format; `txid` and `proposal_hash` are the usual 64-char
/// display-order hex.
pub fn budget_vote_payload(
    new_sigs: bool,
    txid: &str,
    vout: u32,
    proposal_hash: &str,
    vote: VoteCode,
    sig_time: i64,
) -> Result<VotePayload> {
    if new_sigs {
        let mut ss = Vec::with_capacity(85);
        ss.extend_from_slice(&reversed_hash32(txid)?);
        ss.extend_from_slice(&vout.to_le_bytes());
        // scriptSig length, scriptSig and nSequence of the null input
        ss.extend_from_slice(&[0x00, 0xff, 0xff, 0xff, 0xff]);
        ss.extend_from_slice(&reversed_hash32(proposal_hash)?);
        ss.extend_from_slice(&vote.code().to_le_bytes());
        ss.extend_from_slice(&sig_time.to_le_bytes());
        Ok(VotePayload::Binary(hash::sha256d(&ss)))
    } else {
        // no separator between the output index and the proposal hash;
        // older nodes reproduce exactly this concatenation
        Ok(VotePayload::Legacy(format!(
            "{}-{}{} {} {}",
            txid,
            vout,
            proposal_hash,
            vote.code(),
            sig_time
        )))
    }
}

/// Signs a vote payload with the masternode key, picking the signer that
/// matches the payload format.
pub fn sign_budget_vote(payload: &VotePayload, mn_priv_key: &str) -> Result<[u8; 65]> {
    match payload {
        VotePayload::Binary(digest) => {
            log::debug!("signing binary vote payload {}", hex::encode(digest));
            signer::sign_hash(digest, mn_priv_key)
        }
        VotePayload::Legacy(text) => {
            log::debug!("signing legacy vote payload '{}'", text);
            signer::sign_message(text, mn_priv_key)
        }
    }
}

/// Offsets a vote timestamp by a uniform random amount in
/// `[-max_minus, +max_plus]` seconds, so a batch of votes does not carry
/// identical sign times.
pub fn offset_sig_time(sig_time: i64, max_minus: u32, max_plus: u32) -> i64 {
    let mut rng = rand::thread_rng();
    sig_time + rng.gen_range(-(max_minus as i64)..=(max_plus as i64))
}

fn reversed_hash32(hex_hash: &str) -> Result<[u8; 32]> {
    let mut bytes = hex::decode(hex_hash)
        .map_err(|e| Error::MalformedInput(format!("invalid hash hex: {}", e)))?;
    if bytes.len() != 32 {
        return Err(Error::MalformedInput(format!(
            "hash is {} bytes, expected 32",
            bytes.len()
        )));
    }
    bytes.reverse();
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIG_TIME: i64 = 1589023200;

    fn fixture_hashes() -> (String, String) {
        let txid: Vec<u8> = (0u8..32).collect();
        let proposal: Vec<u8> = (100u8..132).collect();
        (hex::encode(txid), hex::encode(proposal))
    }

    #[test]
    fn binary_payload_is_double_sha256_of_serialization() {
        let (txid, proposal) = fixture_hashes();
        let payload =
            budget_vote_payload(true, &txid, 1, &proposal, VoteCode::Yes, SIG_TIME).unwrap();

        let mut expected = Vec::new();
        let mut txid_bytes: Vec<u8> = (0u8..32).collect();
        txid_bytes.reverse();
        expected.extend_from_slice(&txid_bytes);
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&[0x00, 0xff, 0xff, 0xff, 0xff]);
        let mut prop_bytes: Vec<u8> = (100u8..132).collect();
        prop_bytes.reverse();
        expected.extend_from_slice(&prop_bytes);
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&SIG_TIME.to_le_bytes());
        assert_eq!(expected.len(), 85);

        assert_eq!(payload, VotePayload::Binary(hash::sha256d(&expected)));
    }

    #[test]
    fn binary_payload_is_deterministic_and_input_sensitive() {
        let (txid, proposal) = fixture_hashes();
        let a = budget_vote_payload(true, &txid, 0, &proposal, VoteCode::No, SIG_TIME).unwrap();
        let b = budget_vote_payload(true, &txid, 0, &proposal, VoteCode::No, SIG_TIME).unwrap();
        let c = budget_vote_payload(true, &txid, 0, &proposal, VoteCode::Yes, SIG_TIME).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn legacy_payload_has_no_separator_before_proposal_hash() {
        let (txid, proposal) = fixture_hashes();
        let payload =
            budget_vote_payload(false, &txid, 3, &proposal, VoteCode::No, SIG_TIME).unwrap();
        assert_eq!(
            payload,
            VotePayload::Legacy(format!("{}-3{} 2 {}", txid, proposal, SIG_TIME))
        );
    }

    #[test]
    fn bad_hashes_rejected() {
        assert!(matches!(
            budget_vote_payload(true, "zz", 0, &"00".repeat(32), VoteCode::Yes, 0),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            budget_vote_payload(true, &"00".repeat(31), 0, &"00".repeat(32), VoteCode::Yes, 0),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn vote_codes() {
        assert_eq!(VoteCode::Abstain.code(), 0);
        assert_eq!(VoteCode::Yes.code(), 1);
        assert_eq!(VoteCode::No.code(), 2);
        assert_eq!(VoteCode::from_code(2).unwrap(), VoteCode::No);
        assert!(VoteCode::from_code(3).is_err());
        assert_eq!(VoteCode::Abstain.as_str(), "abstains");
        assert_eq!(serde_json::to_string(&VoteCode::Yes).unwrap(), "\"yes\"");
    }

    #[test]
    fn sig_time_offset_stays_in_bounds() {
        for _ in 0..50 {
            let t = offset_sig_time(SIG_TIME, 10, 20);
            assert!(t >= SIG_TIME - 10 && t <= SIG_TIME + 20);
        }
        assert_eq!(offset_sig_time(SIG_TIME, 0, 0), SIG_TIME);
    }

    #[test]
    fn proposal_parses_from_rpc_row() {
        let raw = r#"{
            "Name": "dev-fund",
            "URL": "https://forum.example/dev-fund",
            "Hash": "b512c88b35b22e1a1c8a655db4544cbbcc57f47949a8b2d350e8eac6e5a37a7b",
            "FeeHash": "63d8cb538683f54e28354471ee4d1249fdd11ab5ae663b0335f7a575f4b7f3ae",
            "BlockStart": 2880000,
            "BlockEnd": 3225600,
            "TotalPaymentCount": 8,
            "RemainingPaymentCount": 3,
            "PaymentAddress": "DLskWhAbErwb5RzQK6Y482vpkkbnv6nb5C",
            "Yeas": 420,
            "Nays": 12,
            "Abstains": 3,
            "TotalPayment": 48000.0,
            "MonthlyPayment": 6000.0
        }"#;
        let proposal: Proposal = serde_json::from_str(raw).unwrap();
        assert_eq!(proposal.name, "dev-fund");
        assert_eq!(proposal.remaining_payment_count, 3);
        assert_eq!(proposal.yeas, 420);
        assert_eq!(proposal.monthly_payment, 6000.0);
    }
}
