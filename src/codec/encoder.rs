// Encode state machine.
//
// Per plaintext nibble:
//   1. draw a mask (two keystream nibbles);
//   2. draw keystream nibbles until one is within Hamming distance 1 of the
//      plaintext nibble, counting rejects;
//   3. on the 32nd consecutive reject emit `0xFF ^ mask`, draw a fresh mask,
//      reset the count and keep searching for the same nibble;
//   4. on a match emit `codeword ^ mask`.
//
// Plaintext bytes are split high nibble first.

use log::trace;
use thiserror::Error;

use crate::nlfsr::Register;

use super::codeword::{Codeword, OVERFLOW_FAILS};
use super::tables::Discrepancy;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum EncryptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The escape loop came back to the register state where the search for
    /// this nibble started; it would repeat forever.
    #[error("keystream never matches plaintext nibble {nibble:#x} at nibble offset {offset}")]
    KeystreamStalled { nibble: u8, offset: u64 },
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Encode-side counters. The register is passed in on every call so a
/// single trajectory threads through the whole message.
#[derive(Debug, Default)]
pub struct Encoder {
    nibbles_in: u64,
    bytes_out: u64,
    escapes: u64,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one plaintext byte (high nibble, then low nibble).
    pub fn encode_byte(
        &mut self,
        register: &mut Register,
        byte: u8,
        out: &mut Vec<u8>,
    ) -> Result<(), EncryptError> {
        self.encode_nibble(register, byte >> 4, out)?;
        self.encode_nibble(register, byte & 0x0F, out)
    }

    /// Encode one plaintext nibble, appending one codeword byte plus any
    /// escape bytes to `out`.
    pub fn encode_nibble(
        &mut self,
        register: &mut Register,
        nibble: u8,
        out: &mut Vec<u8>,
    ) -> Result<(), EncryptError> {
        debug_assert!(nibble < 16);
        let offset = self.nibbles_in;
        self.nibbles_in += 1;

        let mut mask = register.next_mask();
        let search_start = register.state();
        let mut fails = 0u8;

        let discrepancy = loop {
            let keystream = register.next_nibble();
            if let Some(d) = Discrepancy::from_pattern(nibble ^ keystream) {
                break d;
            }
            fails += 1;
            if fails == OVERFLOW_FAILS {
                out.push(Codeword::Escape.masked(mask));
                self.bytes_out += 1;
                self.escapes += 1;
                trace!("escape for nibble {nibble:#x} at nibble offset {offset}");

                mask = register.next_mask();
                fails = 0;
                if register.state() == search_start {
                    return Err(EncryptError::KeystreamStalled { nibble, offset });
                }
            }
        };

        out.push(Codeword::Match { fails, discrepancy }.masked(mask));
        self.bytes_out += 1;
        Ok(())
    }

    /// Plaintext nibbles consumed so far.
    pub fn nibbles_in(&self) -> u64 {
        self.nibbles_in
    }

    /// Ciphertext bytes produced so far, escapes included.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    /// Escape sentinels emitted so far.
    pub fn escapes(&self) -> u64 {
        self.escapes
    }
}
