// Nibble assembly and mask drawing.
//
// Bit-order conventions are protocol constants, not implementation detail:
//   - a nibble built from generator bits a, b, c, d (in that order) is `dcba`,
//     so the first bit generated lands in bit 0;
//   - a mask is two nibbles, first nibble in the high half.
// Encoder and decoder must agree on both bit-for-bit.

use super::register::Register;

/// Generator bits per keystream nibble.
pub const NIBBLE_BITS: u32 = 4;

/// Keystream nibbles per mask.
pub const NIBBLES_PER_MASK: u32 = 2;

impl Register {
    /// Draw four generator bits and assemble them first-bit-lowest.
    #[inline]
    pub fn next_nibble(&mut self) -> u8 {
        (0..NIBBLE_BITS).fold(0u8, |nibble, i| nibble | (self.step() << i))
    }

    /// Draw an 8-bit mask: first nibble high, second nibble low.
    #[inline]
    pub fn next_mask(&mut self) -> u8 {
        (0..NIBBLES_PER_MASK).fold(0u8, |mask, _| (mask << NIBBLE_BITS) | self.next_nibble())
    }

    /// Draw and throw away `count` nibbles.
    pub fn discard_nibbles(&mut self, count: u32) {
        for _ in 0..count {
            self.next_nibble();
        }
    }

    /// Endless iterator over keystream nibbles.
    pub fn nibbles(&mut self) -> Nibbles<'_> {
        Nibbles { register: self }
    }
}

/// Iterator returned by [`Register::nibbles`].
pub struct Nibbles<'a> {
    register: &'a mut Register,
}

impl Iterator for Nibbles<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.register.next_nibble())
    }
}
