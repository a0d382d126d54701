//! Merkle-Damgard padding.
//!
//! The attack path in [`crate::sm3_forge`] recomputes the padding the hash
//! would have produced for an unseen message, so everything here must be
//! bit-for-bit reproducible from the message length alone.

use alloc::vec;
use alloc::vec::Vec;

use crate::BLOCK_SIZE;

/// Number of bytes appended before the 8-byte length field (the `0x80`
/// marker plus zeros) for a message of `len` bytes.
///
/// `len + pad_len(len) + 8` is always a multiple of 64; a tail within 8
/// bytes of the block boundary rolls the length field into a fresh block.
pub(crate) fn pad_len(len: u64) -> u64 {
    let r = len % BLOCK_SIZE as u64;
    if r < 56 {
        56 - r
    } else {
        120 - r
    }
}

/// The padding tail for a message of `len` bytes: `0x80`, zeros, then the
/// bit length as a big-endian `u64`.
///
/// Callers guarantee `8 * len` fits in 64 bits; `sm3_forge` checks claimed
/// lengths before calling, and a message held in memory cannot get close.
pub(crate) fn padding(len: u64) -> Vec<u8> {
    let pad = pad_len(len) as usize;
    let mut tail = vec![0u8; pad + 8];
    tail[0] = 0x80;
    tail[pad..].copy_from_slice(&(len * 8).to_be_bytes());
    tail
}

/// Pads `msg` per the SM3 Merkle-Damgard rule, returning a fresh buffer
/// whose length is a multiple of 64.
///
/// The caller's buffer is never mutated. A zero-length message pads to a
/// single 64-byte block.
pub fn pad(msg: &[u8]) -> Vec<u8> {
    let tail = padding(msg.len() as u64);
    let mut padded = Vec::with_capacity(msg.len() + tail.len());
    padded.extend_from_slice(msg);
    padded.extend_from_slice(&tail);
    padded
}

#[cfg(test)]
mod tests {
    use super::pad_len;

    #[test]
    fn glue_length_rule() {
        assert_eq!(pad_len(0), 56);
        assert_eq!(pad_len(11), 45);
        assert_eq!(pad_len(55), 1);
        assert_eq!(pad_len(56), 64);
        assert_eq!(pad_len(63), 57);
        assert_eq!(pad_len(64), 56);
        for len in 0..=256u64 {
            assert_eq!((len + pad_len(len) + 8) % 64, 0);
        }
    }
}
