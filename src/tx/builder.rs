use crate::identity::{Keypair, PublicKey, Signer};
use crate::ledger::UTXOKey;
use crate::tx::encoding;
use crate::tx::{Amount, Input, Output, Transaction, TransactionError, TxHash};

/// Mutable stage of a transaction.
///
/// Inputs and outputs can be added, removed, and signed here. `finalize`
/// consumes the builder and fixes the identity hash.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Self { inputs, outputs }
    }

    /// Append an unsigned reference to an output. Nothing is validated here.
    pub fn add_input(&mut self, source_tx_hash: Option<TxHash>, output_index: u32) -> &mut Self {
        self.inputs.push(Input::new(source_tx_hash, output_index));
        self
    }

    /// Append an input spending the output named by `key`
    pub fn spend(&mut self, key: &UTXOKey) -> &mut Self {
        self.add_input(Some(*key.tx_hash()), key.output_index())
    }

    /// Append an output. Any value is accepted; validation happens at commit.
    pub fn add_output(&mut self, value: Amount, owner: PublicKey) -> &mut Self {
        self.outputs.push(Output::new(value, owner));
        self
    }

    pub fn remove_input(&mut self, index: usize) -> Result<Input, TransactionError> {
        if index >= self.inputs.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.inputs.remove(index))
    }

    /// Remove the first input spending `key`, if any
    pub fn remove_input_by_key(&mut self, key: &UTXOKey) -> Option<Input> {
        let position = self
            .inputs
            .iter()
            .position(|input| input.utxo_key().as_ref() == Some(key))?;
        Some(self.inputs.remove(position))
    }

    pub fn signing_payload(&self, input_index: usize) -> Result<Vec<u8>, TransactionError> {
        encoding::signing_payload(&self.inputs, &self.outputs, input_index)
    }

    /// Attach raw signature bytes to an input, replacing any earlier ones
    pub fn add_signature(&mut self, input_index: usize, signature: &[u8]) -> Result<(), TransactionError> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(input_index)
            .ok_or(TransactionError::InputIndexOutOfRange { index: input_index, len })?;
        input.set_signature(signature);
        Ok(())
    }

    /// Sign the payload of one input with `keypair` and attach the signature
    pub fn sign_input(&mut self, input_index: usize, keypair: &Keypair) -> Result<(), TransactionError> {
        let payload = self.signing_payload(input_index)?;
        let signature = Signer::sign(keypair, &payload);
        self.add_signature(input_index, &signature.to_bytes())
    }

    /// Hash `finalize` would produce for the current fields
    pub fn identity_hash(&self) -> TxHash {
        encoding::identity_hash(&self.inputs, &self.outputs)
    }

    pub fn finalize(self) -> Transaction {
        Transaction::from_parts(self.inputs, self.outputs)
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    fn out_of_range(&self, index: usize) -> TransactionError {
        TransactionError::InputIndexOutOfRange {
            index,
            len: self.inputs.len(),
        }
    }
}
