// Doge Core — Pure Rust Dogecoin key and address engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// doge-core: key/address crypto library with zero UI dependencies
//
// Modules:
//   chain        — Per-network prefixes, extended-key magics, bech32 HRPs
//   base58check  — Base58 with double-SHA256 checksum
//   keys         — secp256k1 private/public keys, WIF, signing
//   address      — P2PKH, P2SH-P2WPKH and P2WPKH derivation
//   hd           — BIP32 extended keys (seed, CKD, serialize/parse)
//   path         — Derivation path parsing (m/44'/3'/0'/0/5)
//   bip39_utils  — Mnemonic generation, validation & seed derivation
//   bip44        — Fixed 5-level Dogecoin account layout
//   message      — Magic-prefixed message signing & verification
//   wallet       — Flat operation surface consumed by front-ends

pub mod address;
pub mod base58check;
pub mod bip39_utils;
pub mod bip44;
pub mod chain;
pub mod error;
pub mod hd;
pub mod keys;
pub mod message;
pub mod path;
pub mod wallet;

pub use chain::{ChainParams, Network};
pub use error::{Error, Result};
pub use hd::{HdKey, HdNode};
pub use keys::{PrivKey, PubKey};
pub use path::DerivationPath;
