//! Fault model, taxonomy, and fingerprinting
//!
//! The value type describing one raised condition, the rules mapping it to a
//! severity category, and the dedup key derivation.

mod fingerprint;
mod taxonomy;
mod types;

pub use fingerprint::fingerprint;
pub use taxonomy::{classify, FaultCategory};
pub use types::{Fault, FaultKind, RUNTIME_FAULT_CODE};
