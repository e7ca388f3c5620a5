const NULL_TXID: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Textual `CTxIn(COutPoint(...))` serialization of a transaction input,
/// matching the daemon's own string form. Used when composing the message
/// a masternode start signature commits to.
pub fn serialize_input_str(txid: &str, prevout_n: u32, sequence: u32, script_sig: &str) -> String {
    let mut s = String::from("CTxIn(");
    s.push_str(&format!("COutPoint({}, {})", txid, prevout_n));
    s.push_str(", ");
    if txid == NULL_TXID && prevout_n == 0xffff_ffff {
        s.push_str(&format!("coinbase {}", script_sig));
    } else {
        let short = script_sig.get(..24).unwrap_or(script_sig);
        s.push_str(&format!("scriptSig={}", short));
    }
    if sequence != 0xffff_ffff {
        s.push_str(&format!(", nSequence={}", sequence));
    }
    s.push(')');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_input_truncates_script_sig() {
        let txid = "aa".repeat(32);
        let script_sig = format!("76a914{}88ac", "1".repeat(40));
        let out = serialize_input_str(&txid, 1, 0xffff_ffff, &script_sig);
        assert_eq!(
            out,
            format!("CTxIn(COutPoint({}, 1), scriptSig={})", txid, &script_sig[..24])
        );
    }

    #[test]
    fn short_script_sig_kept_whole() {
        let txid = "bb".repeat(32);
        let out = serialize_input_str(&txid, 0, 0xffff_ffff, "76a914");
        assert_eq!(out, format!("CTxIn(COutPoint({}, 0), scriptSig=76a914)", txid));
    }

    #[test]
    fn coinbase_input() {
        let out = serialize_input_str(NULL_TXID, 0xffff_ffff, 0xffff_ffff, "03abcdef");
        assert_eq!(
            out,
            format!("CTxIn(COutPoint({}, 4294967295), coinbase 03abcdef)", NULL_TXID)
        );
    }

    #[test]
    fn non_final_sequence_is_printed() {
        let txid = "cc".repeat(32);
        let out = serialize_input_str(&txid, 2, 100, "00");
        assert_eq!(
            out,
            format!("CTxIn(COutPoint({}, 2), scriptSig=00, nSequence=100)", txid)
        );
    }
}
