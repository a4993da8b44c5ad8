// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// base58check: Base58 with a trailing 4-byte double-SHA256 checksum,
// standard Bitcoin alphabet

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Decoded payloads larger than this are rejected outright; nothing this
/// crate produces comes close (extended keys are 78 bytes).
const MAX_PAYLOAD_LEN: usize = 128;

/// Base58check-encode `payload` (version byte included by the caller).
pub fn encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));

    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode and verify; returns the payload without the checksum.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|_| Error::BadEncoding)?;

    if data.len() < 5 || data.len() - 4 > MAX_PAYLOAD_LEN {
        return Err(Error::BadLength);
    }

    let (payload, expected) = data.split_at(data.len() - 4);
    if checksum(payload) != expected {
        return Err(Error::BadChecksum);
    }

    Ok(payload.to_vec())
}

/// First 4 bytes of SHA256(SHA256(payload)).
fn checksum(payload: &[u8]) -> [u8; 4] {
    let hash1 = Sha256::digest(payload);
    let hash2 = Sha256::digest(hash1);
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash2[..4]);
    out
}
