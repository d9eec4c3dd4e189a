// Byte-exact encodings shared by signers and validators.
//
// Field layout (all integers big-endian):
//   input  := [source tx hash (32)]? output index (4) [signature]?
//   output := value (8, two's complement) owner public key (32)
//
// Signing payload for input i  := input i without its signature, then every output.
// Canonical encoding           := every input, then every output.

use crate::tx::{Input, Output, TransactionError, TxHash};
use sha2::{Digest, Sha256};

fn push_input_pointer(bytes: &mut Vec<u8>, input: &Input) {
    if let Some(hash) = input.source_tx_hash() {
        bytes.extend_from_slice(hash.as_bytes());
    }
    bytes.extend_from_slice(&input.output_index().to_be_bytes());
}

fn push_outputs(bytes: &mut Vec<u8>, outputs: &[Output]) {
    for output in outputs {
        bytes.extend_from_slice(&output.value().to_be_bytes());
        bytes.extend_from_slice(output.owner().as_bytes());
    }
}

/// Bytes that authorize spending through `inputs[input_index]`.
///
/// Binds that input's source pointer to all outputs; other inputs are not
/// covered.
pub fn signing_payload(
    inputs: &[Input],
    outputs: &[Output],
    input_index: usize,
) -> Result<Vec<u8>, TransactionError> {
    let input = inputs
        .get(input_index)
        .ok_or(TransactionError::InputIndexOutOfRange {
            index: input_index,
            len: inputs.len(),
        })?;

    let mut bytes = Vec::with_capacity(36 + outputs.len() * 40);
    push_input_pointer(&mut bytes, input);
    push_outputs(&mut bytes, outputs);
    Ok(bytes)
}

/// Canonical encoding of a whole transaction, signatures included
pub fn canonical_bytes(inputs: &[Input], outputs: &[Output]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(inputs.len() * 100 + outputs.len() * 40);
    for input in inputs {
        push_input_pointer(&mut bytes, input);
        if let Some(signature) = input.signature() {
            bytes.extend_from_slice(signature);
        }
    }
    push_outputs(&mut bytes, outputs);
    bytes
}

/// SHA-256 of the canonical encoding
pub fn identity_hash(inputs: &[Input], outputs: &[Output]) -> TxHash {
    let digest = Sha256::digest(canonical_bytes(inputs, outputs));
    TxHash::from_bytes(digest.into())
}
