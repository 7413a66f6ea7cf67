//! BLAKE3 hashing helpers.
//!
//! BLAKE3 is the canonical hash for every derived identity in the engine:
//! signer addresses, token ids, and external-pool ids. Using an alternate
//! hash for any of these breaks compatibility with previously derived
//! identities, so there is exactly one set of helpers and no fallback.

/// Single-shot BLAKE3 hash
pub fn hash_blake3(data: &[u8]) -> [u8; 32] {
    blake3::hash(data).into()
}

/// Hash multiple data segments as one message.
///
/// Segments are concatenated; callers that hash variable-length segments
/// must length-prefix them to keep the encoding unambiguous.
pub fn hash_blake3_multiple(segments: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for segment in segments {
        hasher.update(segment);
    }
    hasher.finalize().into()
}
