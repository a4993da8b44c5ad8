// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// bip44: the fixed m/44'/coin'/account'/change/index account layout
//
// Coin type is 3 on mainnet and 1 everywhere else.

use crate::chain::{ChainParams, Network};
use crate::error::{Error, Result};
use crate::hd::HdNode;
use crate::path::{DerivationPath, HARDENED};

pub const PURPOSE: u32 = 44;

/// Registered BIP44 coin type for the network.
pub fn coin_type(params: &ChainParams) -> u32 {
    match params.network {
        Network::Main => 3,
        _ => 1,
    }
}

/// `m/44'/coin'/account'`
pub fn account_path(params: &ChainParams, account: u32) -> Result<DerivationPath> {
    if account >= HARDENED {
        return Err(Error::InvalidPath);
    }
    Ok(DerivationPath::new(
        false,
        vec![
            PURPOSE | HARDENED,
            coin_type(params) | HARDENED,
            account | HARDENED,
        ],
    ))
}

/// `m/44'/coin'/account'/change/index`, change restricted to 0 (external)
/// or 1 (internal).
pub fn leaf_path(
    params: &ChainParams,
    account: u32,
    change: u32,
    index: u32,
) -> Result<DerivationPath> {
    if change > 1 || index >= HARDENED {
        return Err(Error::InvalidPath);
    }
    let mut path = account_path(params, account)?;
    path.indices.push(change);
    path.indices.push(index);
    Ok(path)
}

/// Account-level extended key of `master`.
pub fn derive_account(master: &HdNode, params: &ChainParams, account: u32) -> Result<HdNode> {
    master.derive_path(&account_path(params, account)?)
}

/// Leaf key at `m/44'/coin'/account'/change/index`.
pub fn derive_leaf(
    master: &HdNode,
    params: &ChainParams,
    account: u32,
    change: u32,
    index: u32,
) -> Result<HdNode> {
    master.derive_path(&leaf_path(params, account, change, index)?)
}
