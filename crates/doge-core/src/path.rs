// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// path: derivation-path parsing (m/44'/3'/0'/0/5, M/0/1)

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// High bit of a child number marks a hardened index.
pub const HARDENED: u32 = 0x8000_0000;

/// A parsed derivation path. `public` records a capital-M head: the walk
/// runs the same, but the final node is neutered before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    pub public: bool,
    pub indices: Vec<u32>,
}

impl DerivationPath {
    pub fn new(public: bool, indices: Vec<u32>) -> Self {
        Self { public, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// True if any step requires a private parent.
    pub fn has_hardened(&self) -> bool {
        self.indices.iter().any(|&i| i >= HARDENED)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('/');
        let public = match parts.next() {
            Some("m") => false,
            Some("M") => true,
            _ => return Err(Error::InvalidPath),
        };

        let mut indices = Vec::new();
        for token in parts {
            let (digits, hardened) = match token
                .strip_suffix('\'')
                .or_else(|| token.strip_suffix('h'))
            {
                Some(digits) => (digits, true),
                None => (token, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidPath);
            }
            let index: u32 = digits.parse().map_err(|_| Error::InvalidPath)?;
            if index >= HARDENED {
                return Err(Error::InvalidPath);
            }
            indices.push(if hardened { index | HARDENED } else { index });
        }

        Ok(Self { public, indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.public { "M" } else { "m" })?;
        for &index in &self.indices {
            if index >= HARDENED {
                write!(f, "/{}'", index - HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}
