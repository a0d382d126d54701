//! SM3 compression function.

use crate::consts::T_ROTATED;

cfg_if::cfg_if! {
    if #[cfg(feature = "table")] {
        mod table;
        use table::expand;
    } else {
        mod soft;
        use soft::expand;
    }
}

#[inline(always)]
fn ff1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn gg1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
pub(crate) const fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// SM3 compression function.
///
/// Updates `state` in place with the XOR feedback mandated by the
/// Merkle-Damgard construction: `state[i] ^= reg[i]` after 64 rounds.
pub fn compress(state: &mut [u32; 8], block: &[u8; 64]) {
    let (w, w1) = expand(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let a12 = a.rotate_left(12);
        let ss1 = a12.wrapping_add(e).wrapping_add(T_ROTATED[j]).rotate_left(7);
        let ss2 = ss1 ^ a12;

        // Boolean functions switch from plain XOR to majority/choose at
        // round 16.
        let (ff, gg) = if j < 16 {
            (a ^ b ^ c, e ^ f ^ g)
        } else {
            (ff1(a, b, c), gg1(e, f, g))
        };

        let tt1 = ff.wrapping_add(d).wrapping_add(ss2).wrapping_add(w1[j]);
        let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    state[0] ^= a;
    state[1] ^= b;
    state[2] ^= c;
    state[3] ^= d;
    state[4] ^= e;
    state[5] ^= f;
    state[6] ^= g;
    state[7] ^= h;
}
