// PudgyTurtle codeword encoding.
//
// Each 4-bit plaintext nibble becomes one 8-bit ciphertext byte (plus an
// occasional escape byte):
//
// - `tables`: match / discrepancy / inverse tables
// - `codeword`: 5-bit fail count + 3-bit discrepancy layout, escape sentinel
// - `encoder`: retry-until-match search with escape on overflow
// - `decoder`: mirror of the encoder's keystream consumption

pub mod codeword;
pub mod decoder;
pub mod encoder;
pub mod tables;

pub use codeword::{Codeword, ESCAPE, OVERFLOW_FAILS};
pub use decoder::{DecryptError, Decoder};
pub use encoder::{Encoder, EncryptError};
pub use tables::{Discrepancy, MATCH_TABLE, is_match};
