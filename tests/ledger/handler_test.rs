use utxo_ledger::identity::Keypair;
use utxo_ledger::ledger::{TxHandler, UTXOKey, UTXOPool, ValidationError};
use utxo_ledger::tx::{Transaction, TransactionBuilder, TxHash};

/// Root transaction minting `value` to `owner`, plus a pool holding its output
fn genesis(owner: &Keypair, value: i64) -> (Transaction, UTXOPool) {
    let mut builder = TransactionBuilder::new();
    builder.add_input(None, 0).add_output(value, owner.public_key());
    builder.sign_input(0, owner).unwrap();
    let tx = builder.finalize();
    let pool = UTXOPool::from_transaction(&tx);
    (tx, pool)
}

fn spend(key: UTXOKey, signer: &Keypair, outputs: &[(i64, &Keypair)]) -> Transaction {
    let mut builder = TransactionBuilder::new();
    builder.spend(&key);
    for (value, owner) in outputs {
        builder.add_output(*value, owner.public_key());
    }
    builder.sign_input(0, signer).unwrap();
    builder.finalize()
}

#[test]
fn test_valid_spend() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(UTXOKey::new(*root.hash(), 0), &alice, &[(6, &bob), (4, &alice)]);

    assert!(handler.is_valid_tx(&tx));
    assert!(handler.violations(&tx).is_empty());
}

#[test]
fn test_unknown_input_is_invalid() {
    let alice = Keypair::generate();
    let (_, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);
    let missing = UTXOKey::new(TxHash::from_bytes([7; 32]), 0);

    let tx = spend(missing, &alice, &[(1, &alice)]);

    assert!(!handler.is_valid_tx(&tx));
    assert!(handler.violations(&tx).contains(&ValidationError::MissingInput {
        index: 0,
        key: Some(missing),
    }));
}

#[test]
fn test_output_index_past_end_is_invalid() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(UTXOKey::new(*root.hash(), 1), &alice, &[(1, &alice)]);

    assert!(!handler.is_valid_tx(&tx));
}

#[test]
fn test_tampered_signature_is_invalid() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);
    let tx = spend(UTXOKey::new(*root.hash(), 0), &alice, &[(10, &alice)]);

    let mut signature = tx.input(0).unwrap().signature().unwrap().to_vec();
    signature[0] ^= 0x80;
    let mut builder = tx.into_builder();
    builder.add_signature(0, &signature).unwrap();
    let tampered = builder.finalize();

    assert_eq!(
        handler.violations(&tampered),
        vec![ValidationError::InvalidSignature { index: 0 }]
    );
}

#[test]
fn test_signature_by_non_owner_is_invalid() {
    let alice = Keypair::generate();
    let mallory = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(UTXOKey::new(*root.hash(), 0), &mallory, &[(10, &mallory)]);

    assert!(!handler.is_valid_tx(&tx));
}

#[test]
fn test_unsigned_input_is_invalid() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let mut builder = TransactionBuilder::new();
    builder
        .add_input(Some(*root.hash()), 0)
        .add_output(10, alice.public_key());
    let tx = builder.finalize();

    assert_eq!(
        handler.violations(&tx),
        vec![ValidationError::InvalidSignature { index: 0 }]
    );
}

#[test]
fn test_malformed_signature_bytes_are_invalid_not_fatal() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let mut builder = TransactionBuilder::new();
    builder
        .add_input(Some(*root.hash()), 0)
        .add_output(10, alice.public_key());
    builder.add_signature(0, &[1, 2, 3]).unwrap();

    assert!(!handler.is_valid_tx(&builder.finalize()));
}

#[test]
fn test_signature_bound_to_outputs() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(UTXOKey::new(*root.hash(), 0), &alice, &[(10, &bob)]);
    let mut builder = tx.into_builder();
    builder.add_output(0, alice.public_key());

    assert!(!handler.is_valid_tx(&builder.finalize()));
}

#[test]
fn test_same_output_spent_twice_in_one_transaction() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);
    let key = UTXOKey::new(*root.hash(), 0);

    let mut builder = TransactionBuilder::new();
    builder.spend(&key).spend(&key).add_output(20, alice.public_key());
    builder.sign_input(0, &alice).unwrap();
    builder.sign_input(1, &alice).unwrap();
    let tx = builder.finalize();

    assert!(!handler.is_valid_tx(&tx));
    assert_eq!(handler.violations(&tx), vec![ValidationError::DuplicateInput { key }]);
}

#[test]
fn test_negative_output_is_invalid() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(UTXOKey::new(*root.hash(), 0), &alice, &[(12, &bob), (-2, &alice)]);

    assert_eq!(
        handler.violations(&tx),
        vec![ValidationError::NegativeOutput { index: 1, value: -2 }]
    );
}

#[test]
fn test_outputs_exceeding_inputs_is_invalid() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(UTXOKey::new(*root.hash(), 0), &alice, &[(6, &alice), (5, &alice)]);

    assert_eq!(
        handler.violations(&tx),
        vec![ValidationError::InsufficientInputValue { inputs: 10, outputs: 11 }]
    );
}

#[test]
fn test_exact_and_surplus_spends_are_valid() {
    let alice = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);
    let key = UTXOKey::new(*root.hash(), 0);

    assert!(handler.is_valid_tx(&spend(key, &alice, &[(10, &alice)])));
    assert!(handler.is_valid_tx(&spend(key, &alice, &[(7, &alice)])));
    assert!(handler.is_valid_tx(&spend(key, &alice, &[(0, &alice)])));
}

#[test]
fn test_every_violation_is_reported() {
    let alice = Keypair::generate();
    let mallory = Keypair::generate();
    let (root, pool) = genesis(&alice, 10);
    let handler = TxHandler::new(pool);

    let tx = spend(
        UTXOKey::new(*root.hash(), 0),
        &mallory,
        &[(30, &mallory), (-1, &mallory)],
    );
    let violations = handler.violations(&tx);

    assert_eq!(violations.len(), 3);
    assert!(violations.contains(&ValidationError::InvalidSignature { index: 0 }));
    assert!(violations.contains(&ValidationError::NegativeOutput { index: 1, value: -1 }));
    assert!(violations.contains(&ValidationError::InsufficientInputValue { inputs: 10, outputs: 29 }));
}

#[test]
fn test_multi_input_spend() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let mut builder = TransactionBuilder::new();
    builder
        .add_input(None, 0)
        .add_output(4, alice.public_key())
        .add_output(6, bob.public_key());
    let root = builder.finalize();
    let handler = TxHandler::new(UTXOPool::from_transaction(&root));

    let mut builder = TransactionBuilder::new();
    builder
        .spend(&UTXOKey::new(*root.hash(), 0))
        .spend(&UTXOKey::new(*root.hash(), 1))
        .add_output(10, alice.public_key());
    builder.sign_input(0, &alice).unwrap();
    builder.sign_input(1, &bob).unwrap();
    let tx = builder.finalize();

    assert!(handler.is_valid_tx(&tx));
}
