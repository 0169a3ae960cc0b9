// Core API: seed a register, then encrypt or decrypt a whole buffer along
// one continuous generator trajectory.
//
// The register is borrowed mutably and left at the end of the trajectory,
// so consecutive calls continue the same keystream. Never run two messages
// from the same seeded state: identical trajectories give identical masks.

use crate::codec::decoder::{DecryptError, Decoder};
use crate::codec::encoder::{Encoder, EncryptError};
use crate::nlfsr::{ConfigError, NlfsrConfig, Register};

/// Derive the initial register from `key`, masked to the configured width.
pub fn initialize_state(key: u64, config: NlfsrConfig) -> Result<Register, ConfigError> {
    Register::new(config, key)
}

/// Encrypt `plaintext`. Output is at least twice as long as the input.
pub fn encrypt(register: &mut Register, plaintext: &[u8]) -> Result<Vec<u8>, EncryptError> {
    let mut out = Vec::with_capacity(plaintext.len() * 2);
    let mut encoder = Encoder::new();
    for &byte in plaintext {
        encoder.encode_byte(register, byte, &mut out)?;
    }
    Ok(out)
}

/// Decrypt `ciphertext`.
pub fn decrypt(register: &mut Register, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
    let mut out = Vec::with_capacity(ciphertext.len() / 2);
    let mut decoder = Decoder::new();
    decoder.decode_into(register, ciphertext, &mut out)?;
    decoder.finish()?;
    Ok(out)
}
