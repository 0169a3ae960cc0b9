// Stream driver.
//
// Byte-level orchestration of the codec over arbitrary-length input:
//
// - `encryptor`: StreamEncryptor, push plaintext chunks into any `Write`
// - `decryptor`: StreamDecryptor, pull ciphertext from any `Read`
//
// Ciphertext has no header, length prefix or framing; its length is simply
// the number of bytes produced.

pub mod decryptor;
pub mod encryptor;

pub use decryptor::{StreamDecryptor, decrypt_all};
pub use encryptor::{StreamEncryptor, encrypt_all};

/// Ciphertext bytes read per chunk by [`StreamDecryptor`].
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Running totals for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Bytes consumed (plaintext when encrypting, ciphertext when decrypting).
    pub bytes_in: u64,
    /// Bytes produced.
    pub bytes_out: u64,
    /// Escape sentinels emitted or consumed.
    pub escapes: u64,
}
