//! Wire-format address maps for masternode broadcast and ping messages.
//!
//! The daemon expects the endpoint as a hex string: 16 bytes of
//! IPv6(-mapped) address followed by a big-endian 2-byte port. TorV3
//! endpoints use the prefixed onion pubkey instead of an IPv6 address.

use std::net::IpAddr;

use crate::error::{Error, Result};

const TORV3_HOST_LEN: usize = 62;
const TORV3_ADDR_PREFIX: [u8; 2] = [0x04, 32];
const IPV4_MAPPED_PREFIX: &str = "00000000000000000000ffff";

/// Encodes `ip` (IPv4 dotted, IPv6 literal, or 62-char TorV3 `.onion`
/// host) and `port` into the hex address map used in masternode messages.
pub fn map_address(ip: &str, port: u16) -> Result<String> {
    if ip.len() == TORV3_HOST_LEN && ip.ends_with(".onion") {
        return map_onion_address(ip, port);
    }

    let parsed: IpAddr = ip.parse().map_err(|_| {
        Error::UnsupportedAddress(format!(
            "'{}' is not an IPv4/IPv6 literal or a TorV3 host",
            ip
        ))
    })?;

    let mut map = String::with_capacity(36);
    match parsed {
        IpAddr::V4(v4) => {
            map.push_str(IPV4_MAPPED_PREFIX);
            map.push_str(&hex::encode(v4.octets()));
        }
        IpAddr::V6(v6) => {
            for hextet in v6.segments() {
                map.push_str(&format!("{:04x}", hextet));
            }
        }
    }
    map.push_str(&hex::encode(port.to_be_bytes()));

    if map.len() != 36 {
        return Err(Error::MalformedInput(format!(
            "address map is {} chars, expected 36",
            map.len()
        )));
    }
    Ok(map)
}

fn map_onion_address(ip: &str, port: u16) -> Result<String> {
    let host = &ip[..ip.len() - ".onion".len()];
    let decoded = base32::decode(
        base32::Alphabet::Rfc4648 { padding: false },
        &host.to_ascii_uppercase(),
    )
    .ok_or_else(|| Error::InvalidAddress(format!("invalid TorV3 address {}", ip)))?;
    // 56 base32 chars decode to 35 bytes: 32-byte pubkey, 2-byte checksum,
    // version byte. Only the pubkey goes on the wire.
    if decoded.len() != 35 {
        return Err(Error::InvalidAddress(format!(
            "invalid TorV3 address {}",
            ip
        )));
    }
    let mut addr = Vec::with_capacity(34);
    addr.extend_from_slice(&TORV3_ADDR_PREFIX);
    addr.extend_from_slice(&decoded[..32]);

    let mut map = hex::encode(addr);
    map.push_str(&hex::encode(port.to_be_bytes()));
    Ok(map)
}
