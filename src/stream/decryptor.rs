// Streaming decryptor.
//
// StreamDecryptor pulls ciphertext from any `Read` in fixed-size chunks and
// writes recovered plaintext to any `Write`. Memory use is bounded by the
// chunk size; the nibble-pair buffer carries across chunk boundaries.

use std::io::{ErrorKind, Read, Write};

use log::debug;

use crate::codec::decoder::{DecryptError, Decoder};
use crate::nlfsr::Register;

use super::{DEFAULT_CHUNK_SIZE, StreamStats};

/// Streaming decryptor with progress tracking.
pub struct StreamDecryptor<R: Read> {
    reader: R,
    register: Register,
    decoder: Decoder,
    chunk: Vec<u8>,
    /// Reusable buffer for recovered plaintext (cleared between chunks).
    plain: Vec<u8>,
    finished: bool,
}

impl<R: Read> StreamDecryptor<R> {
    pub fn new(reader: R, register: Register) -> Self {
        Self::with_chunk_size(reader, register, DEFAULT_CHUNK_SIZE)
    }

    /// Create a decryptor that reads `chunk_size` bytes at a time.
    pub fn with_chunk_size(reader: R, register: Register, chunk_size: usize) -> Self {
        Self {
            reader,
            register,
            decoder: Decoder::new(),
            chunk: vec![0u8; chunk_size.max(1)],
            plain: Vec::new(),
            finished: false,
        }
    }

    /// Decrypt the whole input, writing plaintext to `writer`.
    ///
    /// Returns the total number of plaintext bytes written.
    pub fn decrypt_to<W: Write>(&mut self, writer: &mut W) -> Result<u64, DecryptError> {
        while self.decrypt_chunk_to(writer)?.is_some() {}
        Ok(self.decoder.bytes_out())
    }

    /// Decrypt the next chunk of input.
    ///
    /// Returns `Some(plaintext_len)` if ciphertext was consumed, or `None`
    /// once the input is exhausted and the stream ended on a byte boundary.
    pub fn decrypt_chunk_to<W: Write>(
        &mut self,
        writer: &mut W,
    ) -> Result<Option<u64>, DecryptError> {
        if self.finished {
            return Ok(None);
        }

        let n = loop {
            match self.reader.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecryptError::Io(e)),
            }
        };

        if n == 0 {
            self.finished = true;
            self.decoder.finish()?;
            let stats = self.stats();
            debug!(
                "decrypt finished: {} ciphertext bytes, {} plaintext bytes, {} escapes",
                stats.bytes_in, stats.bytes_out, stats.escapes
            );
            return Ok(None);
        }

        self.plain.clear();
        let decoded = self
            .decoder
            .decode_into(&mut self.register, &self.chunk[..n], &mut self.plain);
        // Plaintext recovered ahead of a bad codeword is still delivered.
        writer.write_all(&self.plain)?;
        decoded?;
        Ok(Some(self.plain.len() as u64))
    }

    /// Totals so far.
    pub fn stats(&self) -> StreamStats {
        StreamStats {
            bytes_in: self.decoder.bytes_in(),
            bytes_out: self.decoder.bytes_out(),
            escapes: self.decoder.escapes(),
        }
    }

    /// Current generator state.
    pub fn register(&self) -> &Register {
        &self.register
    }
}

// ---------------------------------------------------------------------------
// Convenience function
// ---------------------------------------------------------------------------

/// Decrypt an in-memory ciphertext.
pub fn decrypt_all(mut register: Register, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
    crate::engine::decrypt(&mut register, ciphertext)
}
