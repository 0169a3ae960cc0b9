// File-level I/O helpers for encryption/decryption.
//
// Provides `encrypt_file()` and `decrypt_file()` convenience functions that
// wrap the streaming driver with buffered I/O. Optionally computes a
// streaming SHA-256 of the plaintext (feature-gated behind `file-io`), so an
// encrypt/decrypt pair can be checked end to end.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;
use thiserror::Error;

use crate::codec::decoder::DecryptError;
use crate::codec::encoder::EncryptError;
use crate::nlfsr::Register;
use crate::stream::{StreamDecryptor, StreamEncryptor};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `encrypt_file()`.
#[derive(Debug, Clone)]
pub struct EncryptStats {
    /// Plaintext size in bytes.
    pub plaintext_size: u64,
    /// Ciphertext size in bytes.
    pub ciphertext_size: u64,
    /// Escape sentinels emitted.
    pub escapes: u64,
    /// SHA-256 of the plaintext (if `file-io` feature is enabled).
    pub plaintext_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `decrypt_file()`.
#[derive(Debug, Clone)]
pub struct DecryptStats {
    /// Ciphertext size in bytes.
    pub ciphertext_size: u64,
    /// Recovered plaintext size in bytes.
    pub plaintext_size: u64,
    /// Escape sentinels consumed.
    pub escapes: u64,
    /// SHA-256 of the recovered plaintext (if `file-io` feature is enabled).
    pub plaintext_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Encryption error.
    #[error("encrypt error: {0}")]
    Encrypt(#[from] EncryptError),
    /// Decryption error.
    #[error("decrypt error: {0}")]
    Decrypt(#[from] DecryptError),
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// encrypt_file
// ---------------------------------------------------------------------------

/// Encrypt `input_path` into `output_path` using `register`.
///
/// The plaintext is streamed through a `BufReader`; the ciphertext goes
/// through a `BufWriter`.
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    register: Register,
) -> Result<EncryptStats, IoError> {
    let input = File::open(input_path)?;
    let mut reader = BufReader::with_capacity(BUF_SIZE, input);

    let output = File::create(output_path)?;
    let writer = BufWriter::with_capacity(BUF_SIZE, output);

    let mut encryptor = StreamEncryptor::new(writer, register);

    #[cfg(feature = "file-io")]
    let mut hasher = sha2::Sha256::new();

    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        #[cfg(feature = "file-io")]
        {
            hasher.update(&buf[..n]);
        }
        encryptor.write_plaintext(&buf[..n])?;
    }

    let (_, stats) = encryptor.finish()?;

    #[cfg(feature = "file-io")]
    let plaintext_sha256 = Some(hasher.finalize().into());
    #[cfg(not(feature = "file-io"))]
    let plaintext_sha256: Option<[u8; 32]> = None;

    Ok(EncryptStats {
        plaintext_size: stats.bytes_in,
        ciphertext_size: stats.bytes_out,
        escapes: stats.escapes,
        plaintext_sha256,
    })
}

// ---------------------------------------------------------------------------
// decrypt_file
// ---------------------------------------------------------------------------

/// Decrypt `input_path` into `output_path` using `register`.
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    register: Register,
) -> Result<DecryptStats, IoError> {
    let input = File::open(input_path)?;
    let reader = BufReader::with_capacity(BUF_SIZE, input);

    let output = File::create(output_path)?;
    let mut output_writer = BufWriter::with_capacity(BUF_SIZE, output);

    let mut decryptor = StreamDecryptor::new(reader, register);

    #[cfg(feature = "file-io")]
    let mut hasher = sha2::Sha256::new();

    #[cfg(feature = "file-io")]
    {
        let mut hashing_writer = HashingWriter {
            inner: &mut output_writer,
            hasher: &mut hasher,
        };
        decryptor.decrypt_to(&mut hashing_writer)?;
    }

    #[cfg(not(feature = "file-io"))]
    decryptor.decrypt_to(&mut output_writer)?;

    output_writer.flush()?;
    let stats = decryptor.stats();

    #[cfg(feature = "file-io")]
    let plaintext_sha256 = Some(hasher.finalize().into());
    #[cfg(not(feature = "file-io"))]
    let plaintext_sha256: Option<[u8; 32]> = None;

    Ok(DecryptStats {
        ciphertext_size: stats.bytes_in,
        plaintext_size: stats.bytes_out,
        escapes: stats.escapes,
        plaintext_sha256,
    })
}

// ---------------------------------------------------------------------------
// Hashing writer (used with file-io feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
struct HashingWriter<'a, W: Write> {
    inner: &'a mut W,
    hasher: &'a mut sha2::Sha256,
}

#[cfg(feature = "file-io")]
impl<W: Write> Write for HashingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
