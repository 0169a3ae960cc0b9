// Decode state machine.
//
// Per ciphertext byte:
//   1. draw a mask exactly as the encoder did and unmask the codeword;
//   2. escape (0xFF): discard 32 keystream nibbles, no plaintext;
//   3. otherwise discard `fails` nibbles, keep the next one and XOR it with
//      the discrepancy pattern to recover the plaintext nibble.
//
// Recovered nibbles pair up high-then-low into plaintext bytes.

use log::trace;
use thiserror::Error;

use crate::nlfsr::Register;

use super::codeword::{Codeword, OVERFLOW_FAILS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Discrepancy field 5..=7: not produced by any encoder.
    #[error("malformed ciphertext: discrepancy code {discrepancy} at byte offset {offset}")]
    MalformedCodeword { offset: u64, discrepancy: u8 },
    /// Input ended between the high and low nibble of a plaintext byte.
    #[error("malformed ciphertext: stream ends with an unpaired nibble after {offset} bytes")]
    UnpairedNibble { offset: u64 },
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decode-side state: the pending high nibble plus counters.
#[derive(Debug, Default)]
pub struct Decoder {
    pending_high: Option<u8>,
    bytes_in: u64,
    bytes_out: u64,
    escapes: u64,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one ciphertext byte. Returns a plaintext byte once a full
    /// nibble pair has been recovered.
    pub fn decode_byte(
        &mut self,
        register: &mut Register,
        byte: u8,
    ) -> Result<Option<u8>, DecryptError> {
        let offset = self.bytes_in;
        self.bytes_in += 1;

        let mask = register.next_mask();
        let (fails, discrepancy) = match Codeword::unmask(byte, mask) {
            Ok(Codeword::Escape) => {
                register.discard_nibbles(u32::from(OVERFLOW_FAILS));
                self.escapes += 1;
                trace!("escape at byte offset {offset}");
                return Ok(None);
            }
            Ok(Codeword::Match { fails, discrepancy }) => (fails, discrepancy),
            Err(discrepancy) => {
                return Err(DecryptError::MalformedCodeword {
                    offset,
                    discrepancy,
                });
            }
        };

        register.discard_nibbles(u32::from(fails));
        let nibble = register.next_nibble() ^ discrepancy.pattern();

        match self.pending_high.take() {
            None => {
                self.pending_high = Some(nibble);
                Ok(None)
            }
            Some(high) => {
                self.bytes_out += 1;
                Ok(Some((high << 4) | nibble))
            }
        }
    }

    /// Decode a buffer, appending recovered plaintext to `out`.
    pub fn decode_into(
        &mut self,
        register: &mut Register,
        ciphertext: &[u8],
        out: &mut Vec<u8>,
    ) -> Result<(), DecryptError> {
        for &byte in ciphertext {
            if let Some(plain) = self.decode_byte(register, byte)? {
                out.push(plain);
            }
        }
        Ok(())
    }

    /// Check that the stream ended on a byte boundary.
    pub fn finish(&self) -> Result<(), DecryptError> {
        match self.pending_high {
            Some(_) => Err(DecryptError::UnpairedNibble {
                offset: self.bytes_in,
            }),
            None => Ok(()),
        }
    }

    /// Ciphertext bytes consumed so far.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Plaintext bytes completed so far.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    /// Escape sentinels consumed so far.
    pub fn escapes(&self) -> u64 {
        self.escapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder::Encoder;
    use crate::nlfsr::{DEFAULT_KEY, NlfsrConfig};

    fn register(key: u64) -> Register {
        Register::new(NlfsrConfig::default(), key).unwrap()
    }

    fn decode(key: u64, ciphertext: &[u8]) -> Result<(Vec<u8>, Decoder, Register), DecryptError> {
        let mut reg = register(key);
        let mut dec = Decoder::new();
        let mut out = Vec::new();
        dec.decode_into(&mut reg, ciphertext, &mut out)?;
        dec.finish()?;
        Ok((out, dec, reg))
    }

    #[test]
    fn decodes_reference_byte() {
        let (out, dec, _) = decode(DEFAULT_KEY, &[0x54, 0x4E]).unwrap();
        assert_eq!(out, [0x41]);
        assert_eq!(dec.bytes_in(), 2);
        assert_eq!(dec.bytes_out(), 1);
    }

    #[test]
    fn output_only_after_low_nibble() {
        let mut reg = register(DEFAULT_KEY);
        let mut dec = Decoder::new();
        assert_eq!(dec.decode_byte(&mut reg, 0x54).unwrap(), None);
        assert_eq!(dec.decode_byte(&mut reg, 0x4E).unwrap(), Some(0x41));
    }

    #[test]
    fn escape_resynchronizes() {
        let (out, dec, reg) = decode(0x2765, &[0xD4, 0x35, 0xAA]).unwrap();
        assert_eq!(out, [0xF1]);
        assert_eq!(dec.escapes(), 1);
        // Same trajectory end point as the encoder.
        assert_eq!(reg.state(), 0xB8_4840);
    }

    #[test]
    fn register_ends_where_encoder_ended() {
        let data = b"nibble framing keeps both sides in lockstep";
        let mut enc_reg = register(0x5A5A5A);
        let mut ct = Vec::new();
        let mut enc = Encoder::new();
        for &b in data {
            enc.encode_byte(&mut enc_reg, b, &mut ct).unwrap();
        }
        let (out, _, dec_reg) = decode(0x5A5A5A, &ct).unwrap();
        assert_eq!(out, data);
        assert_eq!(dec_reg, enc_reg);
    }

    #[test]
    fn bad_discrepancy_is_an_error() {
        // First mask under the default key is 0x55; codeword 0x05 carries
        // discrepancy 5.
        let err = decode(DEFAULT_KEY, &[0x05 ^ 0x55]).unwrap_err();
        assert!(matches!(
            err,
            DecryptError::MalformedCodeword {
                offset: 0,
                discrepancy: 5
            }
        ));
    }

    #[test]
    fn odd_nibble_count_is_an_error() {
        let err = decode(DEFAULT_KEY, &[0x54]).unwrap_err();
        assert!(matches!(err, DecryptError::UnpairedNibble { offset: 1 }));
    }

    #[test]
    fn empty_is_fine() {
        let (out, dec, reg) = decode(DEFAULT_KEY, &[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(dec.bytes_in(), 0);
        assert_eq!(reg.state(), 0xAA_AAAA);
    }

    #[test]
    fn error_messages() {
        let err = DecryptError::MalformedCodeword {
            offset: 9,
            discrepancy: 6,
        };
        assert_eq!(
            err.to_string(),
            "malformed ciphertext: discrepancy code 6 at byte offset 9"
        );
    }
}
