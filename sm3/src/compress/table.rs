//! Table-driven message schedule.
//!
//! `P1` is linear over GF(2) and commutes with rotation, so
//! `P1(x) = T[b0] ^ ROTL(T[b1], 8) ^ ROTL(T[b2], 16) ^ ROTL(T[b3], 24)`
//! where `T[b] = P1(b)` for a single byte `b`. The 256-entry table is built
//! at compile time.

use super::p1;

static P1_TABLE: [u32; 256] = build_p1_table();

const fn build_p1_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut b = 0;
    while b < 256 {
        table[b] = p1(b as u32);
        b += 1;
    }
    table
}

#[inline(always)]
fn p1_lookup(x: u32) -> u32 {
    P1_TABLE[(x & 0xFF) as usize]
        ^ P1_TABLE[((x >> 8) & 0xFF) as usize].rotate_left(8)
        ^ P1_TABLE[((x >> 16) & 0xFF) as usize].rotate_left(16)
        ^ P1_TABLE[(x >> 24) as usize].rotate_left(24)
}

/// Expands a 64-byte block into the 68-word `W` schedule and the 64
/// derived words `W'[j] = W[j] ^ W[j+4]`, using the precomputed `P1` table.
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
        w[j] = p1_lookup(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    let mut w1 = [0u32; 64];
    for j in 0..64 {
        w1[j] = w[j] ^ w[j + 4];
    }

    (w, w1)
}
