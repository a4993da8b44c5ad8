// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// message: magic-prefixed message signing and verification
//
// Digest: SHA256d(varint(25) + "Dogecoin Signed Message:\n"
//                 + varint(len) + message)
// Wire form: base64 of [27 + recid + 4, r, s] (65 bytes)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use k256::ecdsa::VerifyingKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::address;
use crate::error::{Error, Result};
use crate::keys::{PrivKey, RecoveryId, Signature};

const MESSAGE_MAGIC: &[u8] = b"Dogecoin Signed Message:\n";

/// Double-SHA256 of the magic-prefixed, varint-framed message.
pub fn message_hash(message: &[u8]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(1 + MESSAGE_MAGIC.len() + 9 + message.len());
    push_varint(&mut buf, MESSAGE_MAGIC.len() as u64);
    buf.extend_from_slice(MESSAGE_MAGIC);
    push_varint(&mut buf, message.len() as u64);
    buf.extend_from_slice(message);
    double_sha256(&buf)
}

/// Sign the message digest with recoverable ECDSA and pack the result as
/// base64. The +4 in the header marks a compressed public key, the only
/// form this crate emits.
pub fn sign_message(key: &PrivKey, message: &str) -> Result<String> {
    let hash = message_hash(message.as_bytes());
    let (signature, recovery_id) = key.sign_hash_recoverable(&hash)?;

    let mut packed = [0u8; 65];
    packed[0] = 27 + recovery_id.to_byte() + 4;
    packed[1..65].copy_from_slice(&signature.to_bytes());
    Ok(STANDARD.encode(packed))
}

/// Recover the signer from the signature, rebuild their P2PKH address on
/// the network named by `address`'s version byte, and compare. Uniformly
/// `false` on any failure; callers learn nothing about which step broke.
pub fn verify_message(address: &str, signature_b64: &str, message: &str) -> bool {
    match recovered_address(address, signature_b64, message) {
        Ok(recovered) => recovered == address,
        Err(_) => false,
    }
}

fn recovered_address(address: &str, signature_b64: &str, message: &str) -> Result<String> {
    let (_, params) = address::decode_p2pkh(address)?;

    let packed = STANDARD.decode(signature_b64).map_err(|_| Error::BadEncoding)?;
    if packed.len() != 65 {
        return Err(Error::BadLength);
    }
    let header = packed[0];
    if !(27..=34).contains(&header) {
        return Err(Error::BadSignature);
    }
    let compressed = header - 27 >= 4;
    let recovery_id = RecoveryId::from_byte((header - 27) & 3).ok_or(Error::BadSignature)?;
    let signature = Signature::from_slice(&packed[1..65]).map_err(|_| Error::BadSignature)?;

    let hash = message_hash(message.as_bytes());
    let key = VerifyingKey::recover_from_prehash(&hash, &signature, recovery_id)
        .map_err(|_| Error::BadSignature)?;

    // Hash the serialization form the header claims was signed with
    let point = key.to_encoded_point(compressed);
    let sha = Sha256::digest(point.as_bytes());
    let hash160 = Ripemd160::digest(sha);
    let mut program = [0u8; 20];
    program.copy_from_slice(&hash160);

    Ok(address::p2pkh_from_hash160(params, &program))
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

fn push_varint(buf: &mut Vec<u8>, val: u64) {
    if val < 0xFD {
        buf.push(val as u8);
    } else if val <= 0xFFFF {
        buf.push(0xFD);
        buf.extend_from_slice(&(val as u16).to_le_bytes());
    } else if val <= 0xFFFFFFFF {
        buf.push(0xFE);
        buf.extend_from_slice(&(val as u32).to_le_bytes());
    } else {
        buf.push(0xFF);
        buf.extend_from_slice(&val.to_le_bytes());
    }
}
