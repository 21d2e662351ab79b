//! Entry Codec Module
//!
//! Canonical byte serialization for stored documents, used for size
//! accounting.
//!
//! The canonical form is compact JSON (no extraneous whitespace) with
//! object members in sorted key order. Sorted order comes from
//! `serde_json::Value` itself: with the `preserve_order` feature off, a
//! `Value` object keeps its members in a `BTreeMap`, so two documents with
//! the same content always encode to the same bytes regardless of the
//! order their fields were supplied in. Enabling `preserve_order` would
//! silently break that guarantee.

use serde_json::Value;

use crate::error::Result;

// == Encode ==
/// Serializes a document to its canonical byte representation.
///
/// Pure function, no side effects. Fails with an encode error if the
/// document cannot be represented in canonical JSON; in that case nothing
/// is produced. For documents that already live in a `Value`, failure is
/// not reachable in practice, but callers still propagate the error so
/// the write path can reject a value rather than account for it wrongly.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

// == Encoded Size ==
/// Returns the size in bytes of a document's canonical serialization.
///
/// This is the figure reported as the entry's memory footprint: the UTF-8
/// byte length of the canonical JSON dump of the document only, excluding
/// key and timestamp.
pub fn encoded_size(value: &Value) -> Result<usize> {
    Ok(encode(value)?.len())
}
