// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// bip39_utils: mnemonic handling and seed derivation
//
// Wordlist membership and checksum rules live in the bip39 crate; the
// seed KDF (PBKDF2-HMAC-SHA512, 2048 rounds) runs here so its parameters
// stay visible to this crate's callers.

use bip39::{Language, Mnemonic};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// PBKDF2-HMAC-SHA512 rounds fixed by BIP39.
const SEED_ITERATIONS: u32 = 2048;

/// Mnemonic lengths the engine hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    W12,
    W15,
    W18,
    W21,
    W24,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            Self::W12 => 12,
            Self::W15 => 15,
            Self::W18 => 18,
            Self::W21 => 21,
            Self::W24 => 24,
        }
    }
}

/// Fresh English mnemonic from the thread CSPRNG.
pub fn generate_mnemonic(word_count: WordCount) -> Result<String> {
    let mnemonic = Mnemonic::generate_in(Language::English, word_count.words())
        .map_err(|_| Error::InvalidMnemonic)?;
    Ok(mnemonic.to_string())
}

/// Wordlist membership and checksum check.
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    parse_phrase(phrase).map(|_| ())
}

/// Derive the 64-byte seed: PBKDF2-HMAC-SHA512 over the normalized
/// phrase, salt `"mnemonic" + passphrase`, 2048 iterations. The seed and
/// every working copy of the phrase are wiped when dropped.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<Zeroizing<[u8; 64]>> {
    let normalized = Zeroizing::new(parse_phrase(phrase)?.to_string());

    let mut salt = Zeroizing::new(String::with_capacity(8 + passphrase.len()));
    salt.push_str("mnemonic");
    salt.push_str(passphrase);

    let mut seed = Zeroizing::new([0u8; 64]);
    pbkdf2_hmac::<Sha512>(
        normalized.as_bytes(),
        salt.as_bytes(),
        SEED_ITERATIONS,
        &mut *seed,
    );
    Ok(seed)
}

fn parse_phrase(phrase: &str) -> Result<Mnemonic> {
    Mnemonic::parse_in(Language::English, phrase).map_err(|_| Error::InvalidMnemonic)
}
