// Codeword layout.
//
//   bit  7 6 5 4 3 | 2 1 0
//        fail_count | discrepancy
//
// `fail_count` is how many keystream nibbles were rejected before the match.
// The byte 0xFF is reserved as the escape sentinel: 32 consecutive nibbles
// failed and both sides resynchronize by skipping 32 nibbles. 0xFF can never
// collide with a real codeword because discrepancy 7 is out of domain.

use super::tables::Discrepancy;

/// Escape sentinel byte.
pub const ESCAPE: u8 = 0xFF;

/// Consecutive failures that trigger an escape.
pub const OVERFLOW_FAILS: u8 = 32;

const FAIL_SHIFT: u32 = 3;
const DISCREPANCY_MASK: u8 = 0x07;

/// An unmasked codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codeword {
    /// Overflow: 32 rejected nibbles, no plaintext produced.
    Escape,
    /// `fails` rejected nibbles (0..=31), then a match.
    Match { fails: u8, discrepancy: Discrepancy },
}

impl Codeword {
    /// Pack into the 8-bit wire layout.
    #[inline]
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Escape => ESCAPE,
            Self::Match { fails, discrepancy } => {
                debug_assert!(fails < OVERFLOW_FAILS);
                (fails << FAIL_SHIFT) | discrepancy.code()
            }
        }
    }

    /// Unpack a byte. Returns the raw discrepancy field as the error when it
    /// is outside 0..=4.
    #[inline]
    pub fn from_byte(byte: u8) -> Result<Self, u8> {
        if byte == ESCAPE {
            return Ok(Self::Escape);
        }
        let code = byte & DISCREPANCY_MASK;
        let discrepancy = Discrepancy::from_code(code).ok_or(code)?;
        Ok(Self::Match {
            fails: byte >> FAIL_SHIFT,
            discrepancy,
        })
    }

    /// XOR with a mask. Applying the same mask twice is the identity.
    #[inline]
    pub fn masked(self, mask: u8) -> u8 {
        self.to_byte() ^ mask
    }

    /// Recover the codeword from a ciphertext byte and its mask.
    #[inline]
    pub fn unmask(ciphertext: u8, mask: u8) -> Result<Self, u8> {
        Self::from_byte(ciphertext ^ mask)
    }
}
