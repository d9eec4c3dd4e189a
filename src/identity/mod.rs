// Identity module - Ed25519 keys, signatures, and owner identifiers

mod keypair;
mod owner;
mod signer;

pub use keypair::*;
pub use owner::*;
pub use signer::*;
