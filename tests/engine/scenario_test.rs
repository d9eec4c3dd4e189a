// Genesis, split, re-split, and double spend driven through the engine shell

use utxo_ledger::engine::{BatchResource, EngineConfig, EngineRegistry, LedgerLine};
use utxo_ledger::identity::{Keypair, OwnerId};
use utxo_ledger::ledger::{UTXOKey, UTXOPool};
use utxo_ledger::tx::{Transaction, TransactionBuilder};

fn pay(key: UTXOKey, signer: &Keypair, outputs: &[(i64, &Keypair)]) -> Transaction {
    let mut builder = TransactionBuilder::new();
    builder.spend(&key);
    for (value, owner) in outputs {
        builder.add_output(*value, owner.public_key());
    }
    builder.sign_input(0, signer).unwrap();
    builder.finalize()
}

fn holdings(lines: &[LedgerLine]) -> Vec<(i64, OwnerId)> {
    let mut rows: Vec<(i64, OwnerId)> = lines.iter().map(|l| (l.value, l.owner)).collect();
    rows.sort();
    rows
}

#[test]
fn test_full_walkthrough() {
    let registry = EngineRegistry::with_defaults(EngineConfig::default());
    let mut engine = registry.create("basic").unwrap();

    let k1 = Keypair::generate();
    let k2 = Keypair::generate();
    let k3 = Keypair::generate();
    let k4 = Keypair::generate();

    // genesis: 10 to K1 from a root placeholder
    let mut root = TransactionBuilder::new();
    root.add_input(None, 0).add_output(10, k1.public_key());
    root.sign_input(0, &k1).unwrap();
    let root = root.finalize();

    engine.init(Some(UTXOPool::from_transaction(&root)));
    let lines = engine.dump_ledger().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].key, UTXOKey::new(*root.hash(), 0));
    assert_eq!((lines[0].value, lines[0].owner), (10, k1.public_key().owner_id()));

    // split: 10 -> 5/3/2 to K2
    let split = pay(UTXOKey::new(*root.hash(), 0), &k1, &[(5, &k2), (3, &k2), (2, &k2)]);
    let accepted = engine
        .on_resource_created(&BatchResource::with_transactions(vec![split.clone()]))
        .unwrap();
    assert_eq!(accepted.len(), 1);
    let lines = engine.dump_ledger().unwrap();
    let k2_id = k2.public_key().owner_id();
    assert_eq!(holdings(&lines), vec![(2, k2_id), (3, k2_id), (5, k2_id)]);
    assert!(lines.iter().all(|l| l.key.tx_hash() == split.hash()));

    // re-split: the 3 -> 2 to K3, 1 to K4
    let resplit = pay(UTXOKey::new(*split.hash(), 1), &k2, &[(2, &k3), (1, &k4)]);
    let accepted = engine
        .on_resource_created(&BatchResource::with_transactions(vec![resplit]))
        .unwrap();
    assert_eq!(accepted.len(), 1);
    let mut expected = vec![
        (5, k2_id),
        (2, k2_id),
        (2, k3.public_key().owner_id()),
        (1, k4.public_key().owner_id()),
    ];
    expected.sort();
    assert_eq!(holdings(&engine.dump_ledger().unwrap()), expected);

    // double spend: two spends of the 5 in one batch
    let five = UTXOKey::new(*split.hash(), 0);
    let to_k3 = pay(five, &k2, &[(5, &k3)]);
    let to_k4 = pay(five, &k2, &[(5, &k4)]);
    let accepted = engine
        .on_resource_created(&BatchResource::with_transactions(vec![to_k3, to_k4]))
        .unwrap();
    assert_eq!(accepted.len(), 1);

    let lines = engine.dump_ledger().unwrap();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.key != five));
    assert_eq!(lines.iter().map(|l| l.value).sum::<i64>(), 10);

    engine.destroy();
}
