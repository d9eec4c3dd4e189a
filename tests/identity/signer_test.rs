use utxo_ledger::identity::{Keypair, Signature, SignatureError, Signer};

#[test]
fn test_signature_verifies_for_signer_only() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let sig = Signer::sign(&alice, b"spend output 0");

    assert!(Signer::verify(&alice.public_key(), b"spend output 0", &sig));
    assert!(!Signer::verify(&bob.public_key(), b"spend output 0", &sig));
}

#[test]
fn test_signature_bytes_roundtrip() {
    let kp = Keypair::generate();
    let sig = Signer::sign(&kp, b"message");
    let parsed = Signature::from_bytes(&sig.to_bytes()).unwrap();
    assert_eq!(sig, parsed);
}

#[test]
fn test_signature_rejects_wrong_length() {
    assert!(matches!(
        Signature::from_bytes(&[0u8; 10]),
        Err(SignatureError::InvalidLength(10))
    ));
}

#[test]
fn test_verify_bytes_tampered_signature_fails() {
    let kp = Keypair::generate();
    let mut sig = Signer::sign(&kp, b"message").to_bytes();
    sig[5] ^= 0x01;
    assert!(!Signer::verify_bytes(&kp.public_key(), b"message", &sig));
}

#[test]
fn test_verify_bytes_garbage_is_false_not_error() {
    let kp = Keypair::generate();
    assert!(!Signer::verify_bytes(&kp.public_key(), b"message", &[]));
    assert!(!Signer::verify_bytes(&kp.public_key(), b"message", &[0xff; 64]));
}
