// Doge Core — Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// Cross-implementation wire vectors: every literal here was produced by
// an independent implementation and must keep matching byte for byte.

use doge_core::chain::{MAIN, TEST};
use doge_core::wallet;
use doge_core::{HdNode, PrivKey};

const PUBKEY_HEX: &str = "039ca1fdedbe160cb7b14df2a798c8fed41ad4ed30b06a85ad23e03abe43c413b2";

#[test]
fn mainnet_address_triple_from_pubkey() {
    let (p2pkh, p2sh_p2wpkh, p2wpkh) = wallet::addresses_from_pubkey(&MAIN, PUBKEY_HEX).unwrap();
    assert_eq!(p2pkh, "DTwqVfB7tbwca2PzwBvPV1g1xDB2YPrCYh");
    assert_eq!(p2sh_p2wpkh, "A6JS4r6BucWmrMXeTuuxbVCrS9iHPckeBf");
    assert_eq!(p2wpkh, "doge1qlg5uydlgue7ywqcnt6rumf8743pm5usr5rlvmd");
}

#[test]
fn pubkey_from_mainnet_wif() {
    let pubkey = wallet::pubkey_from_privatekey(
        &MAIN,
        "QUaohmokNWroj71dRtmPSses5eRw5SGLKsYSRSVisJHyZdxhdDCZ",
    )
    .unwrap();
    assert_eq!(
        pubkey,
        "024c33fbb2f6accde1db907e88ebf5dd1693e31433c62aaeef42f7640974f602ba"
    );
}

#[test]
fn hd_derive_first_normal_child() {
    let parent = "dgpv557t1z21sLCnAz3cJPW5DiVErXdAi7iWpSJwBBaeN87umwje8LuTKREPTYPTNGXGnB3oNd2z6RmFFDU99WKbiRDJKKXfHxf48puZibauJYB";
    let child = wallet::hd_derive(&MAIN, parent, "m/0").unwrap();
    assert_eq!(
        child,
        "dgpv544MJMFeoz5LXkwbZTWwouwFje2Yp9c1A8ReNaapDFjW44jEcLXv3B3KQg3fjWXWVC9FGRyxLaCHjN1DUeGgoYJxMYM723wrLN6BArKUxe3"
    );
}

#[test]
fn generated_wifs_are_distinct_valid_scalars() {
    let (wif_a, _) = wallet::gen_privatekey(&MAIN).unwrap();
    let (wif_b, _) = wallet::gen_privatekey(&MAIN).unwrap();
    assert_ne!(wif_a, wif_b);

    for wif in [&wif_a, &wif_b] {
        let payload = doge_core::base58check::decode(wif).unwrap();
        assert_eq!(payload[0], 0x9E);
        // decodes to a scalar in [1, n-1]
        assert!(PrivKey::from_wif(&MAIN, wif).is_ok());
    }
}

#[test]
fn keypair_verification_and_tamper_detection() {
    let (wif, address) = wallet::generate_priv_pub_keypair(&MAIN).unwrap();
    assert!(wallet::verify_priv_pub_keypair(&wif, &address, &MAIN));

    let alphabet = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
    for position in 1..wif.len() {
        let original = wif.as_bytes()[position] as char;
        let replacement = alphabet.chars().find(|&c| c != original).unwrap();
        let mut tampered: Vec<char> = wif.chars().collect();
        tampered[position] = replacement;
        let tampered: String = tampered.into_iter().collect();
        assert!(
            !wallet::verify_priv_pub_keypair(&tampered, &address, &MAIN),
            "flip at {} not caught",
            position
        );
    }
}

#[test]
fn message_sign_verify_and_case_flip() {
    let (wif, address) = wallet::generate_priv_pub_keypair(&MAIN).unwrap();
    let key = PrivKey::from_wif(&MAIN, &wif).unwrap();

    let signature = wallet::sign_message(&key.to_hex(), "hello").unwrap();
    assert!(wallet::verify_message(&address, &signature, "hello"));
    assert!(!wallet::verify_message(&address, &signature, "hellO"));
}

#[test]
fn hd_master_roundtrip_across_networks() {
    for params in [&MAIN, &TEST] {
        let (xpriv, address) = wallet::generate_hd_master_keypair(params).unwrap();
        assert!(wallet::verify_hd_master_keypair(&xpriv, &address, params));
        assert_eq!(wallet::derive_hd_pub_from_master(&xpriv).unwrap(), address);

        let (node, parsed) = HdNode::parse(&xpriv).unwrap();
        assert_eq!(parsed.bech32_hrp, params.bech32_hrp);
        assert_eq!(node.depth(), 0);
        assert_eq!(node.serialize(params), xpriv);
    }
}

#[test]
fn bip44_flow_from_mnemonic_matches_path_walk() {
    let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    let seed = wallet::seed_from_mnemonic(phrase, "").unwrap();
    let master = HdNode::from_seed(&*seed).unwrap();
    let xpriv = master.serialize(&MAIN);

    let by_adapter = wallet::derive_from_mnemonic(&MAIN, phrase, "", 0, 0, 0).unwrap();
    let leaf = wallet::derive_by_path(&xpriv, "m/44'/3'/0'/0/0", false).unwrap();
    assert_eq!(wallet::derive_hd_pub_from_master(&leaf).unwrap(), by_adapter);
}

#[test]
fn hardened_paths_fail_on_public_keys() {
    let xpriv = wallet::hd_gen_master(&MAIN).unwrap();
    let xpub = wallet::derive_by_path(&xpriv, "M", false).unwrap();
    for path in ["m/0'", "m/44'/3'/0'", "m/1/2'/3"] {
        assert!(wallet::derive_by_path(&xpub, path, false).is_err());
    }
}
