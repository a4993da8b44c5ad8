// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// keys: secp256k1 key material — generation, WIF round-trip, signing
//
// Types:
//   PrivKey — 32-byte secret scalar, wiped on drop
//   PubKey  — 33-byte compressed SEC1 point
// Functions:
//   PrivKey::generate()/from_wif()/to_wif()/sign_hash{,_recoverable}()
//   PubKey::from_priv()/hash160()/verify_hash()/recover()

use std::fmt;

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::RngCore;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::base58check;
use crate::chain::ChainParams;
use crate::error::{Error, Result};

pub use k256::ecdsa::{RecoveryId, Signature};

/// WIF payloads: version byte + 32-byte key, optionally + 0x01 marker.
const WIF_LEN_UNCOMPRESSED: usize = 33;
const WIF_LEN_COMPRESSED: usize = 34;

/// A secp256k1 private key. The scalar is guaranteed to lie in [1, n-1]
/// and is overwritten with zeros when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivKey {
    bytes: [u8; 32],
}

/// Redacts the scalar so key material cannot reach logs or panics.
impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivKey([32 bytes REDACTED])")
    }
}

/// Constant-time comparison; secrets never short-circuit.
impl PartialEq for PrivKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl Eq for PrivKey {}

impl PrivKey {
    /// Draw from the thread CSPRNG until the scalar is in [1, n-1].
    pub fn generate() -> Result<Self> {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let mut bytes = [0u8; 32];
            rng.try_fill_bytes(&mut bytes).map_err(|_| Error::Rng)?;
            if SigningKey::from_bytes((&bytes).into()).is_ok() {
                return Ok(Self { bytes });
            }
            bytes.zeroize();
        }
        Err(Error::Rng)
    }

    /// Accepts any scalar in [1, n-1].
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        SigningKey::from_bytes(bytes.into()).map_err(|_| Error::InvalidScalar)?;
        Ok(Self { bytes: *bytes })
    }

    /// Internal constructor for scalars already validated by derivation.
    pub(crate) fn from_raw(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn from_hex(encoded: &str) -> Result<Self> {
        let mut decoded = hex::decode(encoded).map_err(|_| Error::BadEncoding)?;
        if decoded.len() != 32 {
            decoded.zeroize();
            return Err(Error::BadLength);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Hex of the raw scalar. Only for callers that asked for it; the
    /// encoding is as sensitive as the key itself.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// WIF encode: version byte + key + 0x01 compression marker.
    /// Only the compressed form is ever emitted.
    pub fn to_wif(&self, params: &ChainParams) -> String {
        let mut payload = Vec::with_capacity(WIF_LEN_COMPRESSED);
        payload.push(params.b58_secret_prefix);
        payload.extend_from_slice(&self.bytes);
        payload.push(0x01);
        let encoded = base58check::encode(&payload);
        payload.zeroize();
        encoded
    }

    /// WIF decode against a specific network. Accepts both the 33-byte
    /// (uncompressed) and 34-byte (compressed) payload forms.
    pub fn from_wif(params: &ChainParams, wif: &str) -> Result<Self> {
        let mut data = base58check::decode(wif)?;
        let result = Self::from_wif_payload(params, &data);
        data.zeroize();
        result
    }

    fn from_wif_payload(params: &ChainParams, data: &[u8]) -> Result<Self> {
        if data.len() != WIF_LEN_UNCOMPRESSED && data.len() != WIF_LEN_COMPRESSED {
            return Err(Error::BadLength);
        }
        if data[0] != params.b58_secret_prefix {
            return Err(Error::WrongNetwork);
        }
        if data.len() == WIF_LEN_COMPRESSED && data[33] != 0x01 {
            return Err(Error::NotCompressed);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&data[1..33]);
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    pub fn public_key(&self) -> Result<PubKey> {
        PubKey::from_priv(self)
    }

    pub(crate) fn signing_key(&self) -> Result<SigningKey> {
        SigningKey::from_bytes((&self.bytes).into()).map_err(|_| Error::InvalidScalar)
    }

    /// Deterministic (RFC 6979) ECDSA over a 32-byte digest; the returned
    /// signature is low-S normalized.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature> {
        let key = self.signing_key()?;
        let signature: Signature = key.sign_prehash(hash).map_err(|_| Error::BadSignature)?;
        Ok(signature)
    }

    /// Same as [`sign_hash`](Self::sign_hash) but also yields the recovery
    /// id needed to reconstruct the public key from the signature.
    pub fn sign_hash_recoverable(&self, hash: &[u8; 32]) -> Result<(Signature, RecoveryId)> {
        let key = self.signing_key()?;
        let (signature, recovery_id) =
            key.sign_prehash(hash).map_err(|_| Error::BadSignature)?;
        Ok((signature, recovery_id))
    }
}

/// A secp256k1 public key, stored as the 33-byte compressed SEC1 form.
/// Uncompressed input is accepted but never re-emitted.
#[derive(Clone, PartialEq, Eq)]
pub struct PubKey {
    bytes: [u8; 33],
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", self.to_hex())
    }
}

impl PubKey {
    /// Scalar-base multiplication via k256.
    pub fn from_priv(key: &PrivKey) -> Result<Self> {
        let signing_key = key.signing_key()?;
        let point = signing_key.verifying_key().to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Ok(Self { bytes })
    }

    /// Accepts 33-byte compressed or 65-byte uncompressed SEC1 encodings.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.len() != 33 && data.len() != 65 {
            return Err(Error::BadLength);
        }
        let key = VerifyingKey::from_sec1_bytes(data).map_err(|_| Error::InvalidPoint)?;
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Ok(Self { bytes })
    }

    pub fn from_hex(encoded: &str) -> Result<Self> {
        let decoded = hex::decode(encoded).map_err(|_| Error::BadEncoding)?;
        Self::from_slice(&decoded)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.bytes
    }

    /// RIPEMD160(SHA256(compressed_pubkey))
    pub fn hash160(&self) -> [u8; 20] {
        let sha = Sha256::digest(self.bytes);
        let hash = Ripemd160::digest(sha);
        let mut out = [0u8; 20];
        out.copy_from_slice(&hash);
        out
    }

    /// First 4 bytes of HASH160; identifies this key as a BIP32 parent.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = self.hash160();
        let mut out = [0u8; 4];
        out.copy_from_slice(&hash[..4]);
        out
    }

    fn verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_sec1_bytes(&self.bytes).map_err(|_| Error::InvalidPoint)
    }

    /// Verify a DER-encoded ECDSA signature over a 32-byte digest.
    /// High-S signatures are normalized before verification.
    pub fn verify_hash(&self, hash: &[u8; 32], signature_der: &[u8]) -> bool {
        let Ok(key) = self.verifying_key() else {
            return false;
        };
        let Ok(mut signature) = Signature::from_der(signature_der) else {
            return false;
        };
        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
        }
        key.verify_prehash(hash, &signature).is_ok()
    }

    /// Reconstruct the signer's public key from a compact signature, its
    /// recovery id and the signed digest.
    pub fn recover(hash: &[u8; 32], signature: &Signature, recovery_id: RecoveryId) -> Result<Self> {
        let key = VerifyingKey::recover_from_prehash(hash, signature, recovery_id)
            .map_err(|_| Error::BadSignature)?;
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Ok(Self { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain;

    fn fixed_key() -> PrivKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x2A;
        PrivKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_generate_valid_and_distinct() {
        let a = PrivKey::generate().unwrap();
        let b = PrivKey::generate().unwrap();
        assert_ne!(a, b);
        assert!(PrivKey::from_bytes(a.as_bytes()).is_ok());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        assert_eq!(PrivKey::from_bytes(&[0u8; 32]), Err(Error::InvalidScalar));
    }

    #[test]
    fn test_order_rejected() {
        // secp256k1 group order n
        let n: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        assert_eq!(PrivKey::from_bytes(&n), Err(Error::InvalidScalar));
    }

    #[test]
    fn test_wif_roundtrip() {
        let key = fixed_key();
        let wif = key.to_wif(&chain::MAIN);
        assert!(wif.starts_with('Q'), "Got: {}", wif);
        let decoded = PrivKey::from_wif(&chain::MAIN, &wif).unwrap();
        assert_eq!(key, decoded);
    }

    #[test]
    fn test_wif_cross_network_rejected() {
        let key = fixed_key();
        let wif = key.to_wif(&chain::MAIN);
        assert_eq!(
            PrivKey::from_wif(&chain::TEST, &wif),
            Err(Error::WrongNetwork)
        );
    }

    #[test]
    fn test_wif_bad_compression_marker() {
        let key = fixed_key();
        let mut payload = vec![chain::MAIN.b58_secret_prefix];
        payload.extend_from_slice(key.as_bytes());
        payload.push(0x02);
        let wif = crate::base58check::encode(&payload);
        assert_eq!(
            PrivKey::from_wif(&chain::MAIN, &wif),
            Err(Error::NotCompressed)
        );
    }

    #[test]
    fn test_wif_uncompressed_payload_accepted() {
        let key = fixed_key();
        let mut payload = vec![chain::MAIN.b58_secret_prefix];
        payload.extend_from_slice(key.as_bytes());
        let wif = crate::base58check::encode(&payload);
        let decoded = PrivKey::from_wif(&chain::MAIN, &wif).unwrap();
        assert_eq!(key, decoded);
    }

    #[test]
    fn test_hex_roundtrip() {
        let key = fixed_key();
        let decoded = PrivKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key, decoded);
        assert_eq!(PrivKey::from_hex("abcd"), Err(Error::BadLength));
        assert_eq!(PrivKey::from_hex("zz"), Err(Error::BadEncoding));
    }

    #[test]
    fn test_pubkey_deterministic_and_compressed() {
        let key = fixed_key();
        let a = PubKey::from_priv(&key).unwrap();
        let b = PubKey::from_priv(&key).unwrap();
        assert_eq!(a, b);
        assert!(a.as_bytes()[0] == 0x02 || a.as_bytes()[0] == 0x03);
    }

    #[test]
    fn test_pubkey_uncompressed_input_compressed_output() {
        let key = fixed_key();
        let compressed = PubKey::from_priv(&key).unwrap();
        let uncompressed = key
            .signing_key()
            .unwrap()
            .verifying_key()
            .to_encoded_point(false);
        let decoded = PubKey::from_slice(uncompressed.as_bytes()).unwrap();
        assert_eq!(decoded, compressed);
    }

    #[test]
    fn test_pubkey_bad_sec1_rejected() {
        // 0x05 is not a valid SEC1 tag
        let bytes = [0x05u8; 33];
        assert!(matches!(
            PubKey::from_slice(&bytes),
            Err(Error::InvalidPoint)
        ));
        assert_eq!(PubKey::from_slice(&[0x02u8; 10]), Err(Error::BadLength));
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let key = fixed_key();
        let pubkey = key.public_key().unwrap();
        let hash = [0x5Au8; 32];
        let signature = key.sign_hash(&hash).unwrap();
        assert!(pubkey.verify_hash(&hash, signature.to_der().as_bytes()));

        let mut wrong = hash;
        wrong[0] ^= 0x01;
        assert!(!pubkey.verify_hash(&wrong, signature.to_der().as_bytes()));
    }

    #[test]
    fn test_sign_deterministic() {
        let key = fixed_key();
        let hash = [0x11u8; 32];
        let a = key.sign_hash(&hash).unwrap();
        let b = key.sign_hash(&hash).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_low_s_emitted() {
        let key = fixed_key();
        let signature = key.sign_hash(&[0x77u8; 32]).unwrap();
        assert!(signature.normalize_s().is_none());
    }

    #[test]
    fn test_recover_matches_signer() {
        let key = fixed_key();
        let hash = [0xC3u8; 32];
        let (signature, recovery_id) = key.sign_hash_recoverable(&hash).unwrap();
        let recovered = PubKey::recover(&hash, &signature, recovery_id).unwrap();
        assert_eq!(recovered, key.public_key().unwrap());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = fixed_key();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("2a"));
        assert!(rendered.contains("REDACTED"));
    }
}
