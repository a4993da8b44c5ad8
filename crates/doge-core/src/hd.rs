// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// hd: BIP32 hierarchical deterministic key tree
//
// Types:
//   HdKey   — private or public key material of a node
//   HdNode  — extended key record (depth, child number, fingerprint,
//             chain code, key material)
// Functions:
//   HdNode::from_seed()     — HMAC-SHA512("Bitcoin seed") master node
//   HdNode::derive_child()  — CKD for private and public parents
//   HdNode::serialize()/parse() — 78-byte base58check extended keys
//   HdNode::derive_path()   — walk a parsed DerivationPath

use std::fmt;

use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{ProjectivePoint, Scalar};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::base58check;
use crate::chain::{self, ChainParams};
use crate::error::{Error, Result};
use crate::keys::{PrivKey, PubKey};
use crate::path::{DerivationPath, HARDENED};

type HmacSha512 = Hmac<Sha512>;

/// Serialized extended keys are exactly 78 bytes before the checksum.
const SERIALIZED_LEN: usize = 78;

/// Key material of a node: private nodes can derive everything, public
/// nodes only non-hardened children.
#[derive(Clone)]
pub enum HdKey {
    Private(PrivKey),
    Public(PubKey),
}

/// A BIP32 extended key.
#[derive(Clone)]
pub struct HdNode {
    depth: u8,
    child_number: u32,
    parent_fingerprint: [u8; 4],
    chain_code: [u8; 32],
    key: HdKey,
}

/// Chain codes extend the key material; wipe them with it.
impl Drop for HdNode {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

/// Redacts chain code and key material.
impl fmt::Debug for HdNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdNode")
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("chain_code", &"[32 bytes REDACTED]")
            .field(
                "key",
                &match self.key {
                    HdKey::Private(_) => "Private([REDACTED])",
                    HdKey::Public(_) => "Public(..)",
                },
            )
            .finish()
    }
}

impl HdNode {
    /// Master node from entropy of 16 to 64 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(Error::InvalidSeed);
        }

        let mut mac =
            HmacSha512::new_from_slice(b"Bitcoin seed").map_err(|_| Error::InvalidSeed)?;
        mac.update(seed);
        let mut i = [0u8; 64];
        i.copy_from_slice(&mac.finalize().into_bytes());

        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let key = PrivKey::from_bytes(&il).map_err(|_| Error::InvalidSeed);
        il.zeroize();
        let key = match key {
            Ok(key) => key,
            Err(e) => {
                chain_code.zeroize();
                return Err(e);
            }
        };

        Ok(Self {
            depth: 0,
            child_number: 0,
            parent_fingerprint: [0u8; 4],
            chain_code,
            key: HdKey::Private(key),
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, HdKey::Private(_))
    }

    pub fn private_key(&self) -> Option<&PrivKey> {
        match &self.key {
            HdKey::Private(key) => Some(key),
            HdKey::Public(_) => None,
        }
    }

    pub fn public_key(&self) -> Result<PubKey> {
        match &self.key {
            HdKey::Private(key) => PubKey::from_priv(key),
            HdKey::Public(key) => Ok(key.clone()),
        }
    }

    /// First 4 bytes of HASH160 of this node's public key.
    pub fn fingerprint(&self) -> Result<[u8; 4]> {
        Ok(self.public_key()?.fingerprint())
    }

    /// Drop the private half; the result serializes as an extended
    /// public key and can only derive non-hardened children.
    pub fn neuter(&self) -> Result<Self> {
        Ok(Self {
            depth: self.depth,
            child_number: self.child_number,
            parent_fingerprint: self.parent_fingerprint,
            chain_code: self.chain_code,
            key: HdKey::Public(self.public_key()?),
        })
    }

    /// Child key derivation. A child whose tweak falls outside the group
    /// (or whose scalar would be zero) is reported as `InvalidDerivation`
    /// so the caller can move on to the next index instead of receiving
    /// an unusable key.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        if self.depth == u8::MAX {
            return Err(Error::InvalidDerivation);
        }
        match &self.key {
            HdKey::Private(key) => self.ckd_priv(key, index),
            HdKey::Public(key) => self.ckd_pub(key, index),
        }
    }

    fn ckd_priv(&self, parent: &PrivKey, index: u32) -> Result<Self> {
        let parent_pub = PubKey::from_priv(parent)?;

        let mut data = Vec::with_capacity(37);
        if index >= HARDENED {
            data.push(0x00);
            data.extend_from_slice(parent.as_bytes());
        } else {
            data.extend_from_slice(parent_pub.as_bytes());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|_| Error::InvalidDerivation)?;
        mac.update(&data);
        data.zeroize();
        let mut i = [0u8; 64];
        i.copy_from_slice(&mac.finalize().into_bytes());

        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let tweak = Option::<Scalar>::from(Scalar::from_repr(il.into()));
        il.zeroize();
        let Some(mut tweak) = tweak else {
            chain_code.zeroize();
            return Err(Error::InvalidDerivation);
        };

        let parent_scalar = Option::<Scalar>::from(Scalar::from_repr((*parent.as_bytes()).into()));
        let Some(mut parent_scalar) = parent_scalar else {
            tweak.zeroize();
            chain_code.zeroize();
            return Err(Error::InvalidScalar);
        };

        let mut child_scalar = tweak + parent_scalar;
        tweak.zeroize();
        parent_scalar.zeroize();

        if bool::from(child_scalar.is_zero()) {
            chain_code.zeroize();
            return Err(Error::InvalidDerivation);
        }

        let mut child_bytes = [0u8; 32];
        child_bytes.copy_from_slice(&child_scalar.to_bytes());
        child_scalar.zeroize();
        let key = PrivKey::from_raw(child_bytes);
        child_bytes.zeroize();

        Ok(Self {
            depth: self.depth + 1,
            child_number: index,
            parent_fingerprint: parent_pub.fingerprint(),
            chain_code,
            key: HdKey::Private(key),
        })
    }

    fn ckd_pub(&self, parent: &PubKey, index: u32) -> Result<Self> {
        if index >= HARDENED {
            return Err(Error::HardenedOnPublic);
        }

        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(parent.as_bytes());
        data.extend_from_slice(&index.to_be_bytes());

        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|_| Error::InvalidDerivation)?;
        mac.update(&data);
        let mut i = [0u8; 64];
        i.copy_from_slice(&mac.finalize().into_bytes());

        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let tweak = Option::<Scalar>::from(Scalar::from_repr(il.into()));
        il.zeroize();
        let Some(tweak) = tweak else {
            return Err(Error::InvalidDerivation);
        };

        let parent_point =
            k256::PublicKey::from_sec1_bytes(parent.as_bytes()).map_err(|_| Error::InvalidPoint)?;
        let child_point = ProjectivePoint::GENERATOR * tweak + parent_point.to_projective();
        // from_affine rejects the point at infinity
        let child = k256::PublicKey::from_affine(child_point.to_affine())
            .map_err(|_| Error::InvalidDerivation)?;
        let key = PubKey::from_slice(child.to_encoded_point(true).as_bytes())?;

        Ok(Self {
            depth: self.depth + 1,
            child_number: index,
            parent_fingerprint: parent.fingerprint(),
            chain_code,
            key: HdKey::Public(key),
        })
    }

    /// Walk every index of `path` from this node. With a capital-M path
    /// the result is neutered; hardened steps still work as long as the
    /// starting node is private.
    ///
    /// The supplied node is the root of the walk: the result's depth
    /// counts steps from here, whatever depth the input carries. Keys
    /// handed out mid-tree re-derive the same way a true master does.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        if path.indices.len() > u8::MAX as usize {
            return Err(Error::InvalidDerivation);
        }
        let mut node = self.clone();
        if !path.indices.is_empty() {
            node.depth = 0;
        }
        for &index in &path.indices {
            node = node.derive_child(index)?;
        }
        if path.public && node.is_private() {
            node = node.neuter()?;
        }
        Ok(node)
    }

    /// 78-byte extended-key serialization, base58check-encoded. The magic
    /// carries both the network and the private/public distinction.
    pub fn serialize(&self, params: &ChainParams) -> String {
        let mut buf = [0u8; SERIALIZED_LEN];
        let magic = match self.key {
            HdKey::Private(_) => params.bip32_privkey_magic,
            HdKey::Public(_) => params.bip32_pubkey_magic,
        };
        buf[0..4].copy_from_slice(&magic);
        buf[4] = self.depth;
        buf[5..9].copy_from_slice(&self.parent_fingerprint);
        buf[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        buf[13..45].copy_from_slice(&self.chain_code);
        match &self.key {
            HdKey::Private(key) => {
                buf[45] = 0x00;
                buf[46..78].copy_from_slice(key.as_bytes());
            }
            HdKey::Public(key) => {
                buf[45..78].copy_from_slice(key.as_bytes());
            }
        }
        let encoded = base58check::encode(&buf);
        buf.zeroize();
        encoded
    }

    /// Parse a base58check extended key; the network is resolved from
    /// the magic and returned alongside the node.
    pub fn parse(encoded: &str) -> Result<(Self, &'static ChainParams)> {
        let mut data = base58check::decode(encoded)?;
        let result = Self::parse_payload(&data);
        data.zeroize();
        result
    }

    fn parse_payload(data: &[u8]) -> Result<(Self, &'static ChainParams)> {
        if data.len() != SERIALIZED_LEN {
            return Err(Error::MalformedExtKey);
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&data[0..4]);
        let (params, is_private) =
            chain::from_xkey_magic(&magic).ok_or(Error::MalformedExtKey)?;

        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let mut child_bytes = [0u8; 4];
        child_bytes.copy_from_slice(&data[9..13]);
        let child_number = u32::from_be_bytes(child_bytes);

        // A depth-0 node has no parent to point at
        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_number != 0) {
            return Err(Error::MalformedExtKey);
        }

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let key = if is_private {
            if data[45] != 0x00 {
                chain_code.zeroize();
                return Err(Error::MalformedExtKey);
            }
            let mut key_bytes = [0u8; 32];
            key_bytes.copy_from_slice(&data[46..78]);
            let key = PrivKey::from_bytes(&key_bytes);
            key_bytes.zeroize();
            match key {
                Ok(key) => HdKey::Private(key),
                Err(e) => {
                    chain_code.zeroize();
                    return Err(e);
                }
            }
        } else {
            match PubKey::from_slice(&data[45..78]) {
                Ok(key) => HdKey::Public(key),
                Err(e) => {
                    chain_code.zeroize();
                    return Err(e);
                }
            }
        };

        Ok((
            Self {
                depth,
                child_number,
                parent_fingerprint,
                chain_code,
                key,
            },
            params,
        ))
    }
}
