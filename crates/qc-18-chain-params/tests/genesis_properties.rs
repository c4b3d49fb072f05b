//! End-to-end properties of genesis loading, assembly and verification.

use proptest::prelude::*;
use qc_04_state_management::{compute_state_root, AccountMap, GenesisAccount, PrecompiledMap};
use qc_18_chain_params::{
    ChainParams, ChainParamsError, GenesisHeaderFields, SealData, SealEngineRegistry,
    BASIC_FIELD_COUNT,
};
use serde_json::{json, Value};
use shared_types::rlp::encode_bytes;
use shared_types::{Rlp, RlpStream, EMPTY_TRIE_ROOT, U256};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const ZERO_HASH_HEX: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const ZERO_ADDRESS_HEX: &str = "0x0000000000000000000000000000000000000000";

fn document(seal_engine: &str, genesis: Value, accounts: Option<Value>) -> String {
    let mut doc = json!({
        "sealEngine": seal_engine,
        "params": {
            "accountStartNonce": "0x00",
            "maximumExtraDataSize": "0x20",
            "blockReward": "0x4563918244F40000",
            "networkID": "0x01"
        },
        "genesis": genesis
    });
    if let Some(accounts) = accounts {
        doc["accounts"] = accounts;
    }
    doc.to_string()
}

fn minimal_genesis() -> Value {
    json!({
        "parentHash": ZERO_HASH_HEX,
        "author": ZERO_ADDRESS_HEX,
        "gasLimit": "0x2FEFD8",
        "timestamp": "0x00",
        "extraData": "0x"
    })
}

fn funded_accounts() -> Value {
    json!({
        "0x0000000000000000000000000000000000000001": {
            "precompiled": { "name": "ecrecover", "linear": { "base": 3000, "word": 0 } }
        },
        "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b": { "balance": "0x09184e72a000" },
        "0x095e7baea6a6c7c4c2dfeb977efac326af552d87": {
            "balance": "0x0de0b6b3a7640000",
            "code": "0x600160005401600055",
            "nonce": "0x01",
            "storage": { "0x00": "0x02" }
        }
    })
}

#[test]
fn worked_example_assembles_empty_state_genesis() {
    init_tracing();
    let json = document("NoProof", minimal_genesis(), None);
    let params = ChainParams::from_json(&json, None).unwrap();

    assert_eq!(params.account_start_nonce(), U256::zero());
    assert_eq!(params.maximum_extra_data_size(), U256::from(0x20));
    assert_eq!(params.block_reward(), U256::from(0x4563918244F40000u64));
    assert_eq!(params.state_root(), EMPTY_TRIE_ROOT);

    let block = params.genesis_block();
    let top = Rlp::new(&block).unwrap();
    assert_eq!(top.item_count().unwrap(), 3);

    let header = top.at(0).unwrap().items().unwrap();
    assert_eq!(header.len(), BASIC_FIELD_COUNT);
    assert_eq!(header[3].as_fixed::<32>().unwrap(), EMPTY_TRIE_ROOT);
    assert_eq!(header[9].as_u256().unwrap(), U256::from(0x2fefd8));
}

#[test]
fn state_root_is_deterministic_over_loads() {
    init_tracing();
    let json = document("NoProof", minimal_genesis(), Some(funded_accounts()));
    let a = ChainParams::from_json(&json, None).unwrap();
    let b = ChainParams::from_json(&json, None).unwrap();

    assert_eq!(a.state_root(), b.state_root());
    assert_eq!(a.genesis_block(), b.genesis_block());
    assert_eq!(
        a.state_root(),
        compute_state_root(a.genesis_state()).unwrap()
    );
}

#[test]
fn assembled_block_verifies_against_same_state() {
    init_tracing();
    let json = document("Ethash", minimal_genesis(), Some(funded_accounts()));
    let (params, _) = ChainParams::from_json(&json, None)
        .unwrap()
        .create_seal_engine(&SealEngineRegistry::with_defaults())
        .unwrap();

    let block = params.genesis_block();
    let verified = ChainParams::default()
        .populate_from_genesis(&block, params.genesis_state().clone())
        .unwrap();

    assert_eq!(verified.genesis_hash(), params.genesis_hash());
    assert_eq!(verified.genesis().seal.field_count, 2);

    let header = params.genesis_header();
    assert!(ChainParams::default()
        .populate_from_genesis(&header, params.genesis_state().clone())
        .is_ok());
}

#[test]
fn document_seal_takes_precedence_over_engine_default() {
    let mut genesis = minimal_genesis();
    genesis["mixHash"] = json!(format!("0x{}", "5e".repeat(32)));
    genesis["nonce"] = json!("0x0000000000000042");

    let (params, _) = ChainParams::from_json(&document("Ethash", genesis, None), None)
        .unwrap()
        .create_seal_engine(&SealEngineRegistry::with_defaults())
        .unwrap();

    let mut expected = encode_bytes(&[0x5e; 32]);
    expected.extend_from_slice(&encode_bytes(&[0, 0, 0, 0, 0, 0, 0, 0x42]));

    let header = params.genesis_header();
    let items = Rlp::new(&header).unwrap().items().unwrap();
    let suffix: Vec<u8> = items[BASIC_FIELD_COUNT..]
        .iter()
        .flat_map(|item| item.as_raw())
        .copied()
        .collect();
    assert_eq!(items.len(), BASIC_FIELD_COUNT + 2);
    assert_eq!(suffix, expected);
}

#[test]
fn engine_default_seal_only_without_document_seal() {
    let registry = SealEngineRegistry::with_defaults();
    let json = document("Ethash", minimal_genesis(), None);
    let loaded = ChainParams::from_json(&json, None).unwrap();
    assert!(loaded.genesis().seal.is_empty());

    let (sealed, engine) = loaded.create_seal_engine(&registry).unwrap();
    assert_eq!(sealed.genesis().seal, SealData::ethash(&[0; 32], &[0; 8]));
    assert_eq!(
        engine.chain_params().map(|p| p.genesis_hash()),
        Some(loaded.genesis_hash())
    );
    assert_ne!(sealed.genesis_hash(), loaded.genesis_hash());
}

#[test]
fn omitted_difficulty_and_gas_used_are_zero() {
    let json = document("NoProof", minimal_genesis(), None);
    let params = ChainParams::from_json(&json, None).unwrap();
    let header = params.genesis_header();
    let items = Rlp::new(&header).unwrap().items().unwrap();

    assert_eq!(items[7].as_u256().unwrap(), U256::zero());
    assert_eq!(items[10].as_u256().unwrap(), U256::zero());
    assert_eq!(items[7].as_raw(), &[0x80]);
    assert_eq!(items[10].as_raw(), &[0x80]);
}

#[test]
fn coinbase_and_author_give_identical_headers() {
    let address = "0x8888f1f195afa192cfee860698584c030f4c9db1";

    let mut with_author = minimal_genesis();
    with_author["author"] = json!(address);

    let mut with_coinbase = minimal_genesis();
    with_coinbase.as_object_mut().unwrap().remove("author");
    with_coinbase["coinbase"] = json!(address);

    let a = ChainParams::from_json(&document("NoProof", with_author, None), None).unwrap();
    let b = ChainParams::from_json(&document("NoProof", with_coinbase, None), None).unwrap();
    assert_eq!(a.genesis_header(), b.genesis_header());
}

/// Rebuild `header` with item `index` replaced by `raw`.
fn replace_item(header: &[u8], index: usize, raw: &[u8]) -> Vec<u8> {
    let items = Rlp::new(header).unwrap().items().unwrap();
    let mut stream = RlpStream::new();
    for (i, item) in items.iter().enumerate() {
        if i == index {
            stream.append_raw(raw, 1);
        } else {
            stream.append_raw(item.as_raw(), 1);
        }
    }
    stream.out_list()
}

#[test]
fn single_byte_difference_is_a_mismatch() {
    init_tracing();
    let json = document("NoProof", minimal_genesis(), Some(funded_accounts()));
    let params = ChainParams::from_json(&json, None).unwrap();
    let header = params.genesis_header();

    // Block number 1 instead of 0: 0x01 in place of 0x80.
    let renumbered = replace_item(&header, 8, &[0x01]);
    assert_eq!(renumbered.len(), header.len());
    let differing = renumbered.iter().zip(&header).filter(|(a, b)| a != b);
    assert_eq!(differing.count(), 1);

    let result = ChainParams::default()
        .populate_from_genesis(&renumbered, params.genesis_state().clone());
    assert!(matches!(
        result,
        Err(ChainParamsError::GenesisMismatch { .. })
    ));
}

#[test]
fn state_disagreeing_with_supplied_root_is_a_mismatch() {
    let json = document("NoProof", minimal_genesis(), Some(funded_accounts()));
    let params = ChainParams::from_json(&json, None).unwrap();
    let block = params.genesis_block();

    let mut state = params.genesis_state().clone();
    if let Some(account) = state.values_mut().next() {
        account.balance += U256::one();
    }

    let result = ChainParams::default().populate_from_genesis(&block, state);
    assert!(matches!(
        result,
        Err(ChainParamsError::GenesisMismatch { .. })
    ));
}

#[test]
fn flipped_state_root_byte_is_a_mismatch() {
    let json = document("NoProof", minimal_genesis(), None);
    let params = ChainParams::from_json(&json, None).unwrap();
    let header = params.genesis_header();

    let mut root = EMPTY_TRIE_ROOT;
    root[31] ^= 0x01;
    let tampered = replace_item(&header, 3, &encode_bytes(&root));

    let result = ChainParams::default().populate_from_genesis(&tampered, AccountMap::new());
    match result {
        Err(ChainParamsError::GenesisMismatch { expected, actual, .. }) => {
            assert_eq!(expected, hex::encode(&header));
            assert_eq!(actual, hex::encode(&tampered));
        }
        other => panic!(
            "expected mismatch, got {:?}",
            other.map(|p| p.genesis_hash())
        ),
    }
}

#[test]
fn trusted_root_is_kept_and_checked() {
    let trusted = [0x77; 32];
    let json = document("NoProof", minimal_genesis(), Some(funded_accounts()));
    let params = ChainParams::from_json(&json, Some(trusted)).unwrap();
    assert_eq!(params.state_root(), trusted);

    let reloaded = params
        .load_genesis_state(r#"{}"#, PrecompiledMap::new())
        .unwrap();
    assert_eq!(reloaded.state_root(), trusted);
    assert!(reloaded.genesis_state().is_empty());

    let header = params.genesis_header();
    let root = Rlp::new(&header).unwrap().at(3).unwrap();
    assert_eq!(root.as_fixed::<32>().unwrap(), trusted);
}

#[test]
fn frontier_mainnet_genesis_hash() {
    let genesis = json!({
        "nonce": "0x0000000000000042",
        "difficulty": "0x400000000",
        "mixHash": ZERO_HASH_HEX,
        "author": ZERO_ADDRESS_HEX,
        "timestamp": "0x00",
        "parentHash": ZERO_HASH_HEX,
        "extraData": "0x11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa",
        "gasLimit": "0x1388"
    });
    let mut state_root = [0u8; 32];
    hex::decode_to_slice(
        "d7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544",
        &mut state_root,
    )
    .unwrap();

    let json = document("Ethash", genesis, None);
    let params = ChainParams::from_json(&json, Some(state_root)).unwrap();
    assert_eq!(params.genesis().seal.field_count, 2);
    assert_eq!(
        hex::encode(params.genesis_hash()),
        "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
    );
}

#[test]
fn extras_survive_every_derive() {
    let json = document("NoProof", minimal_genesis(), None);
    let params = ChainParams::from_json(&json, None)
        .unwrap()
        .load_genesis(&minimal_genesis().to_string(), None)
        .unwrap()
        .load_genesis_state(&funded_accounts().to_string(), PrecompiledMap::new())
        .unwrap()
        .create_seal_engine(&SealEngineRegistry::with_defaults())
        .unwrap()
        .0;

    assert_eq!(params.other_param("networkID"), Some("0x01"));
    assert_eq!(params.precompiled().len(), 1);
}

#[test]
fn missing_genesis_field_is_reported() {
    let mut genesis = minimal_genesis();
    genesis.as_object_mut().unwrap().remove("gasLimit");
    let result = ChainParams::from_json(&document("NoProof", genesis, None), None);
    assert!(matches!(
        result,
        Err(ChainParamsError::MissingField(field)) if field == "genesis.gasLimit"
    ));
}

fn genesis_fields() -> impl Strategy<Value = GenesisHeaderFields> {
    (
        any::<[u8; 20]>(),
        any::<u64>(),
        any::<u64>(),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..32),
        prop::option::of((any::<[u8; 32]>(), any::<[u8; 8]>())),
    )
        .prop_map(|(author, difficulty, gas_limit, timestamp, extra_data, seal)| {
            GenesisHeaderFields {
                author,
                difficulty: U256::from(difficulty),
                gas_limit: U256::from(gas_limit),
                timestamp: U256::from(timestamp),
                extra_data,
                seal: seal
                    .map(|(mix, nonce)| SealData::ethash(&mix, &nonce))
                    .unwrap_or_default(),
                ..Default::default()
            }
        })
}

proptest! {
    #[test]
    fn prop_assembled_genesis_round_trips(
        fields in genesis_fields(),
        balances in prop::collection::vec((any::<[u8; 20]>(), 1u64..), 0..6),
    ) {
        let state: AccountMap = balances
            .into_iter()
            .map(|(address, balance)| {
                (address, GenesisAccount::new(U256::from(balance)))
            })
            .collect();
        let params = ChainParams::default()
            .with_genesis_state(state.clone(), PrecompiledMap::new())
            .unwrap()
            .with_genesis_fields(fields, None);

        let verified = ChainParams::default()
            .populate_from_genesis(&params.genesis_block(), state)
            .unwrap();
        prop_assert_eq!(verified.genesis(), params.genesis());
        prop_assert_eq!(verified.genesis_block(), params.genesis_block());
    }
}
