//! Fault fingerprinting
//!
//! Derives the stable deduplication key used by the throttle store. Two
//! faults with identical type, message, and code always collapse to the same
//! key; collisions across genuinely distinct faults are an accepted
//! trade-off, dedup is approximate and not a security boundary.

use super::types::Fault;

/// Compute the dedup fingerprint for a fault
///
/// Concatenates `type_name + message + code` (code in decimal) and strips
/// every character that is not an ASCII letter or digit, yielding a
/// cache-key-safe token.
pub fn fingerprint(fault: &Fault) -> String {
    let raw = format!("{}{}{}", fault.type_name, fault.message, fault.code);
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
