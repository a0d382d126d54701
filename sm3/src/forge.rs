//! Length-extension forgery.
//!
//! SM3 serializes its last internal state as the digest with no output
//! transformation, so anyone holding `SM3(secret)` can resume compression
//! where the original computation stopped. The only other thing needed is
//! `len(secret)`, to reproduce the glue padding the original hash appended.

use crate::compress::compress;
use crate::pad::{pad_len, padding};
use crate::{digest_to_state, state_to_digest, LengthOverflow, BLOCK_SIZE, DIGEST_SIZE};

/// Forges `SM3(secret || pad(secret) || suffix)` from `SM3(secret)` and
/// `len(secret)` alone.
///
/// `original_digest` must be a digest produced by [`crate::sm3_hash`] and
/// `secret_len` must be the byte length of the hashed message; a mismatch
/// is not detectable here and simply yields a digest that matches nothing
/// (verify by comparison). Returns [`LengthOverflow`] if the extended
/// message's bit length would not fit in the 64-bit padding length field.
pub fn sm3_forge(
    original_digest: &[u8; DIGEST_SIZE],
    secret_len: u64,
    suffix: &[u8],
) -> Result<[u8; DIGEST_SIZE], LengthOverflow> {
    // Length of secret || pad(secret) || suffix, i.e. the full message the
    // forged digest will be valid for, before its own final padding. The
    // embedded bit-length field must reflect this total, not the suffix.
    let full_len = secret_len
        .checked_add(pad_len(secret_len) + 8)
        .and_then(|n| n.checked_add(suffix.len() as u64))
        .ok_or(LengthOverflow)?;
    if full_len > u64::MAX / 8 {
        return Err(LengthOverflow);
    }

    // The original computation stopped on a block boundary, so its final
    // state is exactly the parsed digest.
    let mut state = digest_to_state(original_digest);

    // suffix || pad-for-full_len is block-aligned by construction.
    let mut tail = suffix.to_vec();
    tail.extend_from_slice(&padding(full_len));
    debug_assert_eq!(tail.len() % BLOCK_SIZE, 0);

    let mut block = [0u8; BLOCK_SIZE];
    for chunk in tail.chunks_exact(BLOCK_SIZE) {
        block.copy_from_slice(chunk);
        compress(&mut state, &block);
    }

    Ok(state_to_digest(&state))
}
