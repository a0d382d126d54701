//! Portable message schedule.

use super::p1;

/// Expands a 64-byte block into the 68-word `W` schedule and the 64
/// derived words `W'[j] = W[j] ^ W[j+4]`.
pub(super) fn expand(block: &[u8; 64]) -> ([u32; 68], [u32; 64]) {
    let mut w = [0u32; 68];
    for i in 0..16 {
        w[i] = u32::from_be_bytes([
            block[4 * i],
            block[4 * i + 1],
            block[4 * i + 2],
            block[4 * i + 3],
        ]);
    }
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    let mut w1 = [0u32; 64];
    for j in 0..64 {
        w1[j] = w[j] ^ w[j + 4];
    }

    (w, w1)
}
