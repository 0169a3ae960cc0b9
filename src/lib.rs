//! PudgyTurtle: a nibble-oriented stream cipher driven by a nonlinear
//! feedback shift register.
//!
//! Each plaintext nibble is matched against keystream nibbles until one lies
//! within Hamming distance 1; the number of failures plus the differing bit
//! position form a codeword, which is masked with keystream and emitted as
//! one ciphertext byte. Ciphertext is therefore at least twice as long as the
//! plaintext.
//!
//! The crate provides:
//! - The generator (`nlfsr`)
//! - Match tables and the per-nibble codec (`codec`)
//! - Whole-buffer entry points (`engine`) and streaming drivers (`stream`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use pudgyturtle::engine;
//! use pudgyturtle::nlfsr::{NlfsrConfig, DEFAULT_KEY};
//!
//! let mut enc = engine::initialize_state(DEFAULT_KEY, NlfsrConfig::default()).unwrap();
//! let ciphertext = engine::encrypt(&mut enc, b"A").unwrap();
//! assert_eq!(ciphertext, [0x54, 0x4E]);
//!
//! let mut dec = engine::initialize_state(DEFAULT_KEY, NlfsrConfig::default()).unwrap();
//! assert_eq!(engine::decrypt(&mut dec, &ciphertext).unwrap(), b"A");
//! ```
//!
//! # Security
//!
//! There is no nonce, IV or authentication tag. Encrypting two messages
//! from the same key yields identical masks for identical prefixes, and
//! ciphertext can be altered without detection. The 24-bit state is far too
//! small to resist exhaustive key search.

pub mod codec;
pub mod engine;
pub mod io;
pub mod nlfsr;
pub mod stream;

#[cfg(feature = "cli")]
pub mod cli;
