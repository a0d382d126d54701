use hex_literal::hex;
use sm3::{pad, sm3_forge, sm3_hash, LengthOverflow};

#[test]
fn empty_message() {
    assert_eq!(
        sm3_hash(b""),
        hex!("1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b")
    );
}

#[test]
fn abc() {
    assert_eq!(
        sm3_hash(b"abc"),
        hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0")
    );
}

#[test]
fn block_aligned_message() {
    // GB/T 32905-2016 appendix vector: "abcd" repeated 16 times fills one
    // block exactly, so the padding rolls into a second block.
    let msg = b"abcd".repeat(16);
    assert_eq!(msg.len(), 64);
    assert_eq!(
        sm3_hash(&msg),
        hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732")
    );
}

#[test]
fn repeatable() {
    let msg = b"the same bytes in, the same digest out";
    assert_eq!(sm3_hash(msg), sm3_hash(msg));
}

#[test]
fn padding_block_boundaries() {
    // Tail lengths around the 56-byte cutoff and the block boundary.
    for &len in &[0usize, 1, 54, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 200] {
        let msg = vec![0xA5u8; len];
        let padded = pad(&msg);

        assert_eq!(padded.len() % 64, 0, "len={}", len);
        // At least the marker byte and the length field fit.
        assert!(padded.len() >= len + 9, "len={}", len);
        assert_eq!(&padded[..len], &msg[..], "len={}", len);
        assert_eq!(padded[len], 0x80, "len={}", len);
        for (i, &b) in padded[len + 1..padded.len() - 8].iter().enumerate() {
            assert_eq!(b, 0, "len={} zero-fill offset {}", len, i);
        }

        let mut field = [0u8; 8];
        field.copy_from_slice(&padded[padded.len() - 8..]);
        assert_eq!(u64::from_be_bytes(field), 8 * len as u64, "len={}", len);
    }
}

#[test]
fn forged_digest_matches_true_hash() {
    let secret = b"Hello world";
    let suffix = b"yyyyy";

    let digest = sm3_hash(secret);
    let forged = sm3_forge(&digest, secret.len() as u64, suffix).unwrap();

    // What a verifier hashing the extended message actually computes.
    let mut extended = pad(secret);
    extended.extend_from_slice(suffix);
    assert_eq!(forged, sm3_hash(&extended));

    // And it is a different message, so a different digest.
    assert_ne!(forged, digest);
}

#[test]
fn forgery_across_secret_lengths() {
    let suffix = b";admin=true";
    for &secret_len in &[0usize, 1, 11, 31, 55, 56, 57, 63, 64, 65, 119, 120, 128, 200] {
        let secret = vec![0x5Au8; secret_len];
        let digest = sm3_hash(&secret);

        let forged = sm3_forge(&digest, secret_len as u64, suffix).unwrap();

        let mut extended = pad(&secret);
        extended.extend_from_slice(suffix);
        assert_eq!(forged, sm3_hash(&extended), "secret_len={}", secret_len);
    }
}

#[test]
fn forgery_with_multi_block_suffix() {
    let secret = b"top secret key material";
    let suffix = vec![0x42u8; 150];

    let digest = sm3_hash(secret);
    let forged = sm3_forge(&digest, secret.len() as u64, &suffix).unwrap();

    let mut extended = pad(secret);
    extended.extend_from_slice(&suffix);
    assert_eq!(forged, sm3_hash(&extended));
}

#[test]
fn forge_rejects_overflowing_length() {
    let digest = sm3_hash(b"secret");
    assert_eq!(
        sm3_forge(&digest, u64::MAX - 64, b"x"),
        Err(LengthOverflow)
    );
    // Bit length of the extended message must also fit in 64 bits.
    assert_eq!(
        sm3_forge(&digest, u64::MAX / 8, b"x"),
        Err(LengthOverflow)
    );
}

#[test]
fn avalanche() {
    let msg = *b"an input for the avalanche smoke test...";
    let base = sm3_hash(&msg);

    for &(byte, bit) in &[(0usize, 0u8), (7, 3), (20, 6), (39, 7)] {
        let mut flipped = msg;
        flipped[byte] ^= 1 << bit;

        let other = sm3_hash(&flipped);
        let diff: u32 = base
            .iter()
            .zip(other.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        // ~128 expected for a healthy compression function.
        assert!(diff > 64, "only {} of 256 bits changed", diff);
    }
}
