// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// address: the three receive-address forms over a compressed pubkey
//
// Functions:
//   p2pkh()        — base58check(version + HASH160(pubkey))
//   p2sh_p2wpkh()  — segwit program wrapped in a P2SH redeem script
//   p2wpkh()       — native segwit v0, bech32
//   decode_p2pkh() — version-resolved decode, used by message verification

use bech32::Hrp;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::base58check;
use crate::chain::{self, ChainParams};
use crate::error::{Error, Result};
use crate::keys::PubKey;

/// Legacy pay-to-public-key-hash.
pub fn p2pkh(params: &ChainParams, pubkey: &PubKey) -> String {
    p2pkh_from_hash160(params, &pubkey.hash160())
}

/// P2PKH over an already-computed HASH160 (message recovery path).
pub fn p2pkh_from_hash160(params: &ChainParams, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(params.b58_pubkey_prefix);
    payload.extend_from_slice(hash);
    base58check::encode(&payload)
}

/// Segwit-in-P2SH: the redeem script is the v0 witness program
/// `OP_0 PUSH20 <hash160>`, and the address commits to its HASH160.
pub fn p2sh_p2wpkh(params: &ChainParams, pubkey: &PubKey) -> String {
    let mut redeem = Vec::with_capacity(22);
    redeem.push(0x00);
    redeem.push(0x14);
    redeem.extend_from_slice(&pubkey.hash160());

    let sha = Sha256::digest(&redeem);
    let script_hash = Ripemd160::digest(sha);

    let mut payload = Vec::with_capacity(21);
    payload.push(params.b58_script_prefix);
    payload.extend_from_slice(&script_hash);
    base58check::encode(&payload)
}

/// Native segwit v0 pay-to-witness-public-key-hash, bech32-encoded.
pub fn p2wpkh(params: &ChainParams, pubkey: &PubKey) -> Result<String> {
    let hrp = Hrp::parse(params.bech32_hrp).map_err(|_| Error::BadEncoding)?;
    bech32::segwit::encode_v0(hrp, &pubkey.hash160()).map_err(|_| Error::BadEncoding)
}

/// Checksum-only validation of a base58 P2PKH address.
pub fn verify_p2pkh(address: &str) -> bool {
    matches!(base58check::decode(address), Ok(payload) if payload.len() == 21)
}

/// Decode a P2PKH address; the network is resolved from the version byte.
pub fn decode_p2pkh(address: &str) -> Result<([u8; 20], &'static ChainParams)> {
    let decoded = base58check::decode(address)?;
    if decoded.len() != 21 {
        return Err(Error::BadLength);
    }
    let params = chain::from_pubkey_prefix(decoded[0]).ok_or(Error::WrongNetwork)?;
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&decoded[1..]);
    Ok((hash, params))
}

/// Decode a bech32 P2WPKH address to its 20-byte witness program.
/// Rejects HRP mismatch, non-zero witness version and any program
/// length other than 20.
pub fn decode_p2wpkh(params: &ChainParams, address: &str) -> Result<[u8; 20]> {
    let (hrp, version, program) =
        bech32::segwit::decode(address).map_err(|_| Error::BadEncoding)?;
    if hrp.as_str() != params.bech32_hrp {
        return Err(Error::WrongNetwork);
    }
    if version.to_u8() != 0 {
        return Err(Error::BadEncoding);
    }
    if program.len() != 20 {
        return Err(Error::BadLength);
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&program);
    Ok(out)
}
