// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chain: per-network constants (address prefixes, WIF prefix, BIP32 magics,
// bech32 HRP) and the lookups that resolve an encoded input to its network
//
// Types:
//   Network      — main / test / regtest / signet tag
//   ChainParams  — immutable record of one network's wire constants
// Functions:
//   from_pubkey_prefix(), from_wif_prefix(), from_xkey_magic(), from_hrp()

use serde::{Deserialize, Serialize};

/// Network tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Main,
    Test,
    Regtest,
    Signet,
}

/// One network's wire-visible constants.
///
/// Always passed explicitly; nothing in the crate reads a process-wide
/// default network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub network: Network,
    /// Version byte of P2PKH addresses ('D' on mainnet)
    pub b58_pubkey_prefix: u8,
    /// Version byte of P2SH addresses
    pub b58_script_prefix: u8,
    /// Version byte of WIF-encoded private keys
    pub b58_secret_prefix: u8,
    /// Extended private key magic, big-endian
    pub bip32_privkey_magic: [u8; 4],
    /// Extended public key magic, big-endian
    pub bip32_pubkey_magic: [u8; 4],
    /// Human-readable part of P2WPKH addresses
    pub bech32_hrp: &'static str,
}

pub const MAIN: ChainParams = ChainParams {
    network: Network::Main,
    b58_pubkey_prefix: 0x1E,
    b58_script_prefix: 0x16,
    b58_secret_prefix: 0x9E,
    bip32_privkey_magic: [0x02, 0xFA, 0xC3, 0x98],
    bip32_pubkey_magic: [0x02, 0xFA, 0xCA, 0xFD],
    bech32_hrp: "doge",
};

pub const TEST: ChainParams = ChainParams {
    network: Network::Test,
    b58_pubkey_prefix: 0x71,
    b58_script_prefix: 0xC4,
    b58_secret_prefix: 0xF1,
    bip32_privkey_magic: [0x04, 0x32, 0xA2, 0x43],
    bip32_pubkey_magic: [0x04, 0x32, 0xA9, 0xA8],
    bech32_hrp: "tdge",
};

// Regtest and signet reuse the testnet serialization constants; only the
// address version byte (regtest) and the HRP differ.
pub const REGTEST: ChainParams = ChainParams {
    network: Network::Regtest,
    b58_pubkey_prefix: 0x6F,
    b58_script_prefix: 0xC4,
    b58_secret_prefix: 0xEF,
    bip32_privkey_magic: [0x04, 0x32, 0xA2, 0x43],
    bip32_pubkey_magic: [0x04, 0x32, 0xA9, 0xA8],
    bech32_hrp: "dcrt",
};

pub const SIGNET: ChainParams = ChainParams {
    network: Network::Signet,
    b58_pubkey_prefix: 0x71,
    b58_script_prefix: 0xC4,
    b58_secret_prefix: 0xF1,
    bip32_privkey_magic: [0x04, 0x32, 0xA2, 0x43],
    bip32_pubkey_magic: [0x04, 0x32, 0xA9, 0xA8],
    bech32_hrp: "tdge",
};

// Lookup order: values shared between networks (signet mirrors test)
// resolve to the earliest entry.
const ALL: [&ChainParams; 4] = [&MAIN, &TEST, &REGTEST, &SIGNET];

impl ChainParams {
    pub fn for_network(network: Network) -> &'static ChainParams {
        match network {
            Network::Main => &MAIN,
            Network::Test => &TEST,
            Network::Regtest => &REGTEST,
            Network::Signet => &SIGNET,
        }
    }
}

/// Resolve the network of a P2PKH address from its version byte.
pub fn from_pubkey_prefix(version: u8) -> Option<&'static ChainParams> {
    ALL.iter().find(|p| p.b58_pubkey_prefix == version).copied()
}

/// Resolve the network of a WIF private key from its version byte.
pub fn from_wif_prefix(version: u8) -> Option<&'static ChainParams> {
    ALL.iter().find(|p| p.b58_secret_prefix == version).copied()
}

/// Resolve an extended-key magic to its network and key visibility.
///
/// Returns `(params, is_private)`.
pub fn from_xkey_magic(magic: &[u8; 4]) -> Option<(&'static ChainParams, bool)> {
    for params in ALL {
        if &params.bip32_privkey_magic == magic {
            return Some((params, true));
        }
        if &params.bip32_pubkey_magic == magic {
            return Some((params, false));
        }
    }
    None
}

/// Resolve a bech32 human-readable part to its network.
pub fn from_hrp(hrp: &str) -> Option<&'static ChainParams> {
    ALL.iter().find(|p| p.bech32_hrp == hrp).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubkey_prefixes_disjoint() {
        assert_eq!(from_pubkey_prefix(0x1E).unwrap().network, Network::Main);
        assert_eq!(from_pubkey_prefix(0x71).unwrap().network, Network::Test);
        assert_eq!(from_pubkey_prefix(0x6F).unwrap().network, Network::Regtest);
        assert!(from_pubkey_prefix(0x00).is_none());
    }

    #[test]
    fn test_wif_prefix_lookup() {
        assert_eq!(from_wif_prefix(0x9E).unwrap().network, Network::Main);
        assert_eq!(from_wif_prefix(0xF1).unwrap().network, Network::Test);
        assert_eq!(from_wif_prefix(0xEF).unwrap().network, Network::Regtest);
        assert!(from_wif_prefix(0x80).is_none());
    }

    #[test]
    fn test_xkey_magic_lookup() {
        let (params, is_private) = from_xkey_magic(&[0x02, 0xFA, 0xC3, 0x98]).unwrap();
        assert_eq!(params.network, Network::Main);
        assert!(is_private);

        let (params, is_private) = from_xkey_magic(&[0x02, 0xFA, 0xCA, 0xFD]).unwrap();
        assert_eq!(params.network, Network::Main);
        assert!(!is_private);

        // Test, regtest and signet share magics; the lookup settles on test.
        let (params, is_private) = from_xkey_magic(&[0x04, 0x32, 0xA2, 0x43]).unwrap();
        assert_eq!(params.network, Network::Test);
        assert!(is_private);

        assert!(from_xkey_magic(&[0x04, 0x88, 0xAD, 0xE4]).is_none());
    }

    #[test]
    fn test_hrp_lookup() {
        assert_eq!(from_hrp("doge").unwrap().network, Network::Main);
        assert_eq!(from_hrp("tdge").unwrap().network, Network::Test);
        assert_eq!(from_hrp("dcrt").unwrap().network, Network::Regtest);
        assert!(from_hrp("bc").is_none());
    }

    #[test]
    fn test_serde_network_tag() {
        let json = serde_json::to_string(&Network::Regtest).unwrap();
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Network::Regtest);
    }
}
