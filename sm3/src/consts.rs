//! SM3 round constants (GB/T 32905-2016).

/// Initial hash state.
pub(crate) const H0: [u32; 8] = [
    0x7380_166F,
    0x4914_B2B9,
    0x1724_42D7,
    0xDA8A_0600,
    0xA96F_30BC,
    0x1631_38AA,
    0xE38D_EE4D,
    0xB0FB_0E4E,
];

/// Round constant for rounds 0..16.
const T0: u32 = 0x79CC_4519;
/// Round constant for rounds 16..64.
const T16: u32 = 0x7A87_9D8A;

/// `T[j]` pre-rotated by `j mod 32`.
///
/// The reduction mod 32 is load-bearing: `j` runs up to 63 and a rotate
/// amount of 32 or more is not meaningful for a 32-bit word.
pub(crate) const T_ROTATED: [u32; 64] = build_t_rotated();

const fn build_t_rotated() -> [u32; 64] {
    let mut t = [0u32; 64];
    let mut j = 0;
    while j < 64 {
        let base = if j < 16 { T0 } else { T16 };
        t[j] = base.rotate_left((j % 32) as u32);
        j += 1;
    }
    t
}
