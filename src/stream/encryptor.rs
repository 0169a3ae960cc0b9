// Streaming encryptor.
//
// StreamEncryptor owns the register for one message:
//   - Plaintext is fed in chunks via write_plaintext()
//   - Each chunk is encoded and written through immediately
//   - finish() flushes the writer and reports totals

use std::io::Write;

use log::debug;

use crate::codec::encoder::{Encoder, EncryptError};
use crate::nlfsr::Register;

use super::StreamStats;

/// Streaming encryptor over any `Write` sink.
///
/// # Example
/// ```
/// use pudgyturtle::nlfsr::{NlfsrConfig, Register, DEFAULT_KEY};
/// use pudgyturtle::stream::StreamEncryptor;
///
/// let register = Register::new(NlfsrConfig::default(), DEFAULT_KEY).unwrap();
/// let mut enc = StreamEncryptor::new(Vec::new(), register);
/// enc.write_plaintext(b"A").unwrap();
/// let (ciphertext, stats) = enc.finish().unwrap();
/// assert_eq!(ciphertext, [0x54, 0x4E]);
/// assert_eq!(stats.bytes_in, 1);
/// ```
pub struct StreamEncryptor<W: Write> {
    writer: W,
    register: Register,
    encoder: Encoder,
    /// Ciphertext staging buffer, reused across chunks.
    buffer: Vec<u8>,
    /// Totals for chunks fully written to `writer`.
    written: StreamStats,
}

impl<W: Write> StreamEncryptor<W> {
    pub fn new(writer: W, register: Register) -> Self {
        Self {
            writer,
            register,
            encoder: Encoder::new(),
            buffer: Vec::new(),
            written: StreamStats::default(),
        }
    }

    /// Encrypt a chunk of plaintext and write the ciphertext through.
    ///
    /// On error the register has already moved past the failed chunk, so
    /// the encryptor cannot continue the message; `stats()` still reports
    /// only what reached the writer.
    pub fn write_plaintext(&mut self, data: &[u8]) -> Result<(), EncryptError> {
        self.buffer.clear();
        self.buffer.reserve(data.len() * 2);
        for &byte in data {
            self.encoder
                .encode_byte(&mut self.register, byte, &mut self.buffer)?;
        }
        self.writer.write_all(&self.buffer)?;
        self.written.bytes_in += data.len() as u64;
        self.written.bytes_out += self.buffer.len() as u64;
        self.written.escapes = self.encoder.escapes();
        Ok(())
    }

    /// Flush and return the writer along with totals.
    pub fn finish(mut self) -> Result<(W, StreamStats), EncryptError> {
        self.writer.flush()?;
        let stats = self.stats();
        debug!(
            "encrypt finished: {} plaintext bytes, {} ciphertext bytes, {} escapes",
            stats.bytes_in, stats.bytes_out, stats.escapes
        );
        Ok((self.writer, stats))
    }

    /// Totals for the plaintext whose ciphertext has been written.
    pub fn stats(&self) -> StreamStats {
        self.written
    }

    /// Current generator state.
    pub fn register(&self) -> &Register {
        &self.register
    }
}

// ---------------------------------------------------------------------------
// Convenience function
// ---------------------------------------------------------------------------

/// Encrypt `plaintext` in one call, writing ciphertext to `writer`.
pub fn encrypt_all<W: Write>(
    writer: W,
    register: Register,
    plaintext: &[u8],
) -> Result<StreamStats, EncryptError> {
    let mut enc = StreamEncryptor::new(writer, register);
    enc.write_plaintext(plaintext)?;
    let (_, stats) = enc.finish()?;
    Ok(stats)
}
