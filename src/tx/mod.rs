// Transaction module - inputs, outputs, and deterministic identity

mod builder;
mod codec;
mod encoding;
mod model;

pub use builder::*;
pub use codec::*;
pub use encoding::{canonical_bytes, identity_hash, signing_payload};
pub use model::*;
