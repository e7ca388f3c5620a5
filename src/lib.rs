//! Codec and signing core of a PIVX masternode controller.
//!
//! Builds and classifies locking scripts, validates Base58Check addresses,
//! encodes endpoint address maps for masternode broadcast messages, and
//! produces the recoverable ECDSA signatures behind budget votes and
//! address-ownership proofs. Everything here is a pure function over its
//! inputs: keys and RPC data come from the caller, results go back to the
//! caller, nothing is stored and nothing blocks, so the vote and sweep
//! workflows can fan calls out across masternodes freely.

pub mod address;
pub mod chainparams;
pub mod error;
pub mod governance;
pub mod hash;
pub mod netaddr;
pub mod script;
pub mod signer;
pub mod tx;
pub mod varint;

pub use chainparams::Network;
pub use error::{Error, Result};
