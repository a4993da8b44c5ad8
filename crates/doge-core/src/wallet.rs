// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// wallet: the flat operation surface consumed by front-ends
//
// Functions:
//   generate_priv_pub_keypair()  — fresh WIF + P2PKH address
//   generate_hd_master_keypair() — fresh extended master + P2PKH
//   derive_hd_pub_from_master()  — P2PKH of an extended key's pubkey
//   verify_priv_pub_keypair()    — WIF/address consistency (boolean)
//   verify_hd_master_keypair()   — xpriv/address consistency (boolean)
//   verify_p2pkh_address()       — checksum-only address validation
//   derive_by_path() / hd_derive() / derive_bip44()
//   addresses_from_pubkey() / pubkey_from_privatekey()
//   gen_privatekey() / hd_gen_master() / address_from_privkey()
//   seed_from_mnemonic() / derive_from_mnemonic()
//   sign_message() / verify_message()

use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::address;
use crate::base58check;
use crate::bip39_utils;
use crate::bip44;
use crate::chain::{self, ChainParams};
use crate::error::{Error, Result};
use crate::hd::HdNode;
use crate::keys::{PrivKey, PubKey};
use crate::message;
use crate::path::DerivationPath;

/// Entropy fed to a fresh HD master; BIP32 allows 16-64 bytes, 32 is the
/// conventional choice.
const MASTER_SEED_LEN: usize = 32;

/// Fresh random keypair: `(wif, p2pkh_address)`.
pub fn generate_priv_pub_keypair(params: &ChainParams) -> Result<(String, String)> {
    let key = PrivKey::generate()?;
    let pubkey = key.public_key()?;
    Ok((key.to_wif(params), address::p2pkh(params, &pubkey)))
}

/// Fresh random HD master: `(xpriv, p2pkh_of_master)`.
pub fn generate_hd_master_keypair(params: &ChainParams) -> Result<(String, String)> {
    let master = random_master()?;
    let pubkey = master.public_key()?;
    Ok((master.serialize(params), address::p2pkh(params, &pubkey)))
}

/// P2PKH address of an extended key's public half. Works for both xpriv
/// and xpub input; the network comes from the key's magic.
pub fn derive_hd_pub_from_master(extkey: &str) -> Result<String> {
    let (node, params) = HdNode::parse(extkey)?;
    Ok(address::p2pkh(params, &node.public_key()?))
}

/// Does this WIF generate this P2PKH address on this chain?
pub fn verify_priv_pub_keypair(wif: &str, p2pkh_address: &str, params: &ChainParams) -> bool {
    check_priv_pub_keypair(wif, p2pkh_address, params).unwrap_or(false)
}

fn check_priv_pub_keypair(wif: &str, p2pkh_address: &str, params: &ChainParams) -> Result<bool> {
    let key = PrivKey::from_wif(params, wif)?;
    let pubkey = key.public_key()?;
    Ok(address::p2pkh(params, &pubkey) == p2pkh_address)
}

/// Does this extended master key generate this P2PKH address on this
/// chain? The supplied address must carry the chain-correct version byte;
/// anything else compares unequal.
pub fn verify_hd_master_keypair(extkey: &str, p2pkh_address: &str, params: &ChainParams) -> bool {
    check_hd_master_keypair(extkey, p2pkh_address, params).unwrap_or(false)
}

fn check_hd_master_keypair(extkey: &str, p2pkh_address: &str, params: &ChainParams) -> Result<bool> {
    let (node, parsed_params) = HdNode::parse(extkey)?;
    // Test, regtest and signet share serialization magics, so the network
    // check compares magic bytes rather than tags.
    if parsed_params.bip32_privkey_magic != params.bip32_privkey_magic {
        return Err(Error::WrongNetwork);
    }
    if node.depth() != 0 {
        return Err(Error::MalformedExtKey);
    }
    Ok(address::p2pkh(params, &node.public_key()?) == p2pkh_address)
}

/// Checksum-only validation of a P2PKH address string.
pub fn verify_p2pkh_address(p2pkh_address: &str) -> bool {
    address::verify_p2pkh(p2pkh_address)
}

/// Walk `path` from a serialized master key and return the serialized
/// result. `want_private` asks for the extended private form; it requires
/// a private input key and a lowercase-m path.
pub fn derive_by_path(master: &str, path: &str, want_private: bool) -> Result<String> {
    let (node, params) = HdNode::parse(master)?;
    derive_with_params(&node, params, path, want_private)
}

/// Same as [`derive_by_path`] with the network fixed by the caller:
/// the key's magic must belong to `params`.
pub fn hd_derive(params: &ChainParams, extkey: &str, path: &str) -> Result<String> {
    let (node, parsed_params) = HdNode::parse(extkey)?;
    if parsed_params.bip32_privkey_magic != params.bip32_privkey_magic {
        return Err(Error::WrongNetwork);
    }
    let want_private = node.is_private();
    derive_with_params(&node, params, path, want_private)
}

fn derive_with_params(
    node: &HdNode,
    params: &ChainParams,
    path: &str,
    want_private: bool,
) -> Result<String> {
    let parsed: DerivationPath = path.parse()?;
    let derived = node.derive_path(&parsed)?;
    serialize_node(&derived, params, want_private && !parsed.public)
}

/// BIP44 derivation from a serialized master key. With `index` the result
/// is the leaf at `m/44'/coin'/account'/change/index`; without it, the
/// account-level key.
pub fn derive_bip44(
    master: &str,
    account: u32,
    change: u32,
    index: Option<u32>,
    want_private: bool,
) -> Result<String> {
    let (node, params) = HdNode::parse(master)?;
    let derived = match index {
        Some(index) => bip44::derive_leaf(&node, params, account, change, index)?,
        None => bip44::derive_account(&node, params, account)?,
    };
    serialize_node(&derived, params, want_private)
}

fn serialize_node(node: &HdNode, params: &ChainParams, want_private: bool) -> Result<String> {
    if want_private {
        if !node.is_private() {
            return Err(Error::HardenedOnPublic);
        }
        Ok(node.serialize(params))
    } else {
        Ok(node.neuter()?.serialize(params))
    }
}

/// All three address forms of a hex-encoded public key:
/// `(p2pkh, p2sh_p2wpkh, p2wpkh)`.
pub fn addresses_from_pubkey(
    params: &ChainParams,
    pubkey_hex: &str,
) -> Result<(String, String, String)> {
    let pubkey = PubKey::from_hex(pubkey_hex)?;
    Ok((
        address::p2pkh(params, &pubkey),
        address::p2sh_p2wpkh(params, &pubkey),
        address::p2wpkh(params, &pubkey)?,
    ))
}

/// Hex of the compressed public key behind a WIF private key.
pub fn pubkey_from_privatekey(params: &ChainParams, wif: &str) -> Result<String> {
    let key = PrivKey::from_wif(params, wif)?;
    Ok(key.public_key()?.to_hex())
}

/// Fresh private key as `(wif, hex)`.
pub fn gen_privatekey(params: &ChainParams) -> Result<(String, String)> {
    let key = PrivKey::generate()?;
    Ok((key.to_wif(params), key.to_hex()))
}

/// Fresh extended master private key.
pub fn hd_gen_master(params: &ChainParams) -> Result<String> {
    Ok(random_master()?.serialize(params))
}

fn random_master() -> Result<HdNode> {
    let mut entropy = Zeroizing::new([0u8; MASTER_SEED_LEN]);
    rand::thread_rng()
        .try_fill_bytes(&mut *entropy)
        .map_err(|_| Error::Rng)?;
    HdNode::from_seed(&*entropy)
}

/// P2PKH address of a WIF private key; the network is read off the WIF
/// version byte.
pub fn address_from_privkey(wif: &str) -> Result<String> {
    let mut data = base58check::decode(wif)?;
    let prefix = data[0];
    data.zeroize();
    let params = chain::from_wif_prefix(prefix).ok_or(Error::WrongNetwork)?;
    let key = PrivKey::from_wif(params, wif)?;
    Ok(address::p2pkh(params, &key.public_key()?))
}

/// 64-byte BIP39 seed, wiped on drop.
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> Result<Zeroizing<[u8; 64]>> {
    bip39_utils::mnemonic_to_seed(mnemonic, passphrase)
}

/// P2PKH address at `m/44'/coin'/account'/change/index` for a mnemonic.
pub fn derive_from_mnemonic(
    params: &ChainParams,
    mnemonic: &str,
    passphrase: &str,
    account: u32,
    change: u32,
    index: u32,
) -> Result<String> {
    let seed = bip39_utils::mnemonic_to_seed(mnemonic, passphrase)?;
    let master = HdNode::from_seed(&*seed)?;
    let leaf = bip44::derive_leaf(&master, params, account, change, index)?;
    Ok(address::p2pkh(params, &leaf.public_key()?))
}

/// Sign a UTF-8 message with a hex-encoded private key; returns the
/// base64 recoverable signature.
pub fn sign_message(privkey_hex: &str, msg: &str) -> Result<String> {
    let key = PrivKey::from_hex(privkey_hex)?;
    message::sign_message(&key, msg)
}

/// Verify a base64 message signature against a P2PKH address. `false` on
/// any failure, without distinguishing why.
pub fn verify_message(p2pkh_address: &str, signature_b64: &str, msg: &str) -> bool {
    message::verify_message(p2pkh_address, signature_b64, msg)
}
