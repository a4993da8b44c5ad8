// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// error: failure taxonomy shared by every module

use thiserror::Error;

/// Everything that can go wrong while encoding, deriving or signing.
///
/// The boolean `verify_*` entry points in [`crate::wallet`] collapse any
/// variant to `false`; the rest of the API surfaces the kind directly.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("malformed base58/base64/bech32 input")]
    BadEncoding,
    #[error("checksum mismatch")]
    BadChecksum,
    #[error("input belongs to a different network")]
    WrongNetwork,
    #[error("unexpected input length")]
    BadLength,
    #[error("WIF payload lacks the compression marker")]
    NotCompressed,
    #[error("scalar is zero or not below the curve order")]
    InvalidScalar,
    #[error("point is not on the curve or is the point at infinity")]
    InvalidPoint,
    #[error("child key at this index is invalid, retry with the next index")]
    InvalidDerivation,
    #[error("operation requires a private node")]
    HardenedOnPublic,
    #[error("malformed extended key")]
    MalformedExtKey,
    #[error("seed rejected")]
    InvalidSeed,
    #[error("invalid mnemonic phrase")]
    InvalidMnemonic,
    #[error("signature rejected")]
    BadSignature,
    #[error("random number generator failed")]
    Rng,
    #[error("malformed derivation path")]
    InvalidPath,
}

pub type Result<T> = std::result::Result<T, Error>;
