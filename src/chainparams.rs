// src/chainparams.rs
// Static per-network parameters. Base58 version bytes and prefix characters
// from PIVX chainparams; testnet pubkey addresses start with 'x' or 'y'.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn is_testnet(self) -> bool {
        matches!(self, Network::Testnet)
    }

    pub fn from_testnet_flag(testnet: bool) -> Self {
        if testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChainParams {
    pub network_id_string: &'static str,
    /// Leading characters of pay-to-pubkey-hash addresses on this network.
    pub p2pkh_prefixes: &'static [char],
    /// Leading characters of pay-to-script-hash addresses on this network.
    pub p2sh_prefixes: &'static [char],
    /// Base58Check version byte used when encoding pubkey-hash addresses.
    pub pubkey_address_version: u8,
    /// Base58Check version byte of WIF-encoded secret keys.
    pub wif_version: u8,
}

pub const MAINNET_PARAMS: ChainParams = ChainParams {
    network_id_string: "mainnet",
    p2pkh_prefixes: &['D'],
    p2sh_prefixes: &['7'],
    pubkey_address_version: 30,
    wif_version: 212,
};

pub const TESTNET_PARAMS: ChainParams = ChainParams {
    network_id_string: "testnet",
    p2pkh_prefixes: &['x', 'y'],
    p2sh_prefixes: &['8', '9'],
    pubkey_address_version: 139,
    wif_version: 239,
};

impl ChainParams {
    pub fn for_network(testnet: bool) -> &'static ChainParams {
        if testnet {
            &TESTNET_PARAMS
        } else {
            &MAINNET_PARAMS
        }
    }

    pub fn has_p2pkh_prefix(&self, address: &str) -> bool {
        address
            .chars()
            .next()
            .map_or(false, |c| self.p2pkh_prefixes.contains(&c))
    }

    pub fn has_p2sh_prefix(&self, address: &str) -> bool {
        address
            .chars()
            .next()
            .map_or(false, |c| self.p2sh_prefixes.contains(&c))
    }
}
