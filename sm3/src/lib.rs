//! An implementation of the [SM3][1] cryptographic hash algorithm and a
//! length-extension forgery over it.
//!
//! SM3 is a Merkle-Damgard hash with a 256-bit output and no output
//! finalization, so a digest exposes the full internal state. [`sm3_forge`]
//! exploits this: given only `SM3(secret)` and `len(secret)` it computes
//! `SM3(secret || pad(secret) || suffix)` without ever seeing `secret`.
//!
//! # Usage
//!
//! ```rust
//! use hex_literal::hex;
//! use sm3::sm3_hash;
//!
//! let digest = sm3_hash(b"abc");
//! assert_eq!(
//!     digest,
//!     hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0")
//! );
//! ```
//!
//! Forging an extended digest from a secret's digest and length alone:
//!
//! ```rust
//! use sm3::{pad, sm3_forge, sm3_hash};
//!
//! let secret = b"Hello world";
//! let digest = sm3_hash(secret);
//!
//! let forged = sm3_forge(&digest, secret.len() as u64, b"yyyyy").unwrap();
//!
//! // The victim hashes the full extended message and gets the same digest.
//! let mut extended = pad(secret);
//! extended.extend_from_slice(b"yyyyy");
//! assert_eq!(forged, sm3_hash(&extended));
//! ```
//!
//! The [`merkle`] module builds an RFC 6962-style Merkle tree over SM3 with
//! inclusion and exclusion proofs:
//!
//! ```rust
//! use sm3::merkle::{ExclusionIndex, MerkleTree};
//!
//! let index = ExclusionIndex::new((0..10).map(|i| format!("leaf-{}", i)));
//! let root = index.root();
//!
//! let (i, proof) = index.inclusion(b"leaf-3").unwrap();
//! assert!(MerkleTree::verify_inclusion(&root, b"leaf-3", i, index.len(), &proof));
//!
//! let absent = index.exclusion(b"leaf-3.5").unwrap();
//! assert!(absent.verify(&root, b"leaf-3.5"));
//! ```
//!
//! Also see [RustCrypto/hashes][2] readme.
//!
//! [1]: https://en.wikipedia.org/wiki/SM3_(hash_function)
//! [2]: https://github.com/RustCrypto/hashes

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use core::fmt;

mod compress;
mod consts;
mod forge;
pub mod merkle;
mod pad;

#[cfg(feature = "compress")]
pub use crate::compress::compress;
pub use crate::forge::sm3_forge;
pub use crate::pad::pad;

/// Size of an SM3 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Size of an SM3 message block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Error returned when a claimed message length is too large for its bit
/// length to be encoded in the 64-bit padding length field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LengthOverflow;

impl fmt::Display for LengthOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("message length overflows the 64-bit SM3 length field")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LengthOverflow {}

/// Computes the SM3 digest of `msg`.
///
/// Total for every input length, including the empty message.
pub fn sm3_hash(msg: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut state = consts::H0;
    let padded = pad::pad(msg);

    let mut block = [0u8; BLOCK_SIZE];
    for chunk in padded.chunks_exact(BLOCK_SIZE) {
        block.copy_from_slice(chunk);
        compress::compress(&mut state, &block);
    }

    state_to_digest(&state)
}

/// Big-endian serialization of the final state, MSB of `state[0]` first.
pub(crate) fn state_to_digest(state: &[u32; 8]) -> [u8; DIGEST_SIZE] {
    let mut digest = [0u8; DIGEST_SIZE];
    for (chunk, v) in digest.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&v.to_be_bytes());
    }
    digest
}

/// Exact inverse of [`state_to_digest`]; the forgery relies on this.
pub(crate) fn digest_to_state(digest: &[u8; DIGEST_SIZE]) -> [u32; 8] {
    let mut state = [0u32; 8];
    for (v, chunk) in state.iter_mut().zip(digest.chunks_exact(4)) {
        *v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    state
}
