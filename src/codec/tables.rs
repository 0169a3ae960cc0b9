// Match tables.
//
// A keystream nibble "matches" a plaintext nibble when their XOR (the
// Hamming pattern) has weight 0 or 1. The five matching patterns map to a
// 3-bit discrepancy code:
//
//   pattern  0b0000 0b0001 0b0010 0b0100 0b1000
//   code        0      1      2      3      4
//
// Codes 5..=7 never appear in a well-formed codeword.

/// `MATCH_TABLE[pattern]` is true for the five patterns of weight <= 1.
pub const MATCH_TABLE: [bool; 16] = [
    true, true, true, false, true, false, false, false, // 0x0..0x7
    true, false, false, false, false, false, false, false, // 0x8..0xF
];

const INVERSE_TABLE: [u8; 5] = [0b0000, 0b0001, 0b0010, 0b0100, 0b1000];

/// Which of the five matching outcomes occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Discrepancy {
    /// Keystream nibble equals the plaintext nibble.
    Exact = 0,
    /// Plaintext differs in bit 0.
    Bit0 = 1,
    Bit1 = 2,
    Bit2 = 3,
    Bit3 = 4,
}

impl Discrepancy {
    pub const ALL: [Self; 5] = [Self::Exact, Self::Bit0, Self::Bit1, Self::Bit2, Self::Bit3];

    /// Classify a 4-bit Hamming pattern. `None` means "no match".
    #[inline]
    pub fn from_pattern(pattern: u8) -> Option<Self> {
        if !is_match(pattern) {
            return None;
        }
        match pattern {
            0 => Some(Self::Exact),
            // Single set bit at position k carries code k + 1.
            _ => Self::from_code(pattern.trailing_zeros() as u8 + 1),
        }
    }

    /// Decode a 3-bit discrepancy field. Codes 5..=7 are out of domain.
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The 3-bit code carried in a codeword.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The Hamming pattern to XOR back onto the matched keystream nibble.
    #[inline]
    pub const fn pattern(self) -> u8 {
        INVERSE_TABLE[self as usize]
    }
}

/// True when `pattern` has Hamming weight 0 or 1.
#[inline]
pub fn is_match(pattern: u8) -> bool {
    MATCH_TABLE
        .get(usize::from(pattern))
        .copied()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_table_is_weight_at_most_one() {
        for pattern in 0u8..16 {
            assert_eq!(is_match(pattern), pattern.count_ones() <= 1, "{pattern:#x}");
            assert_eq!(is_match(pattern), Discrepancy::from_pattern(pattern).is_some());
        }
    }

    #[test]
    fn classification_follows_match_table() {
        for (pattern, &matched) in MATCH_TABLE.iter().enumerate() {
            let d = Discrepancy::from_pattern(pattern as u8);
            assert_eq!(d.is_some(), matched, "{pattern:#x}");
            if let Some(d) = d {
                assert_eq!(usize::from(d.pattern()), pattern);
            }
        }
    }

    #[test]
    fn out_of_range_patterns_never_match() {
        assert!(!is_match(16));
        assert!(!is_match(0xFF));
        assert_eq!(Discrepancy::from_pattern(0x10), None);
    }

    #[test]
    fn codes_round_trip_through_patterns() {
        for d in Discrepancy::ALL {
            assert_eq!(Discrepancy::from_pattern(d.pattern()), Some(d));
            assert_eq!(Discrepancy::from_code(d.code()), Some(d));
        }
        assert_eq!(
            Discrepancy::ALL.map(Discrepancy::code),
            [0, 1, 2, 3, 4]
        );
        assert_eq!(
            Discrepancy::ALL.map(Discrepancy::pattern),
            [0, 1, 2, 4, 8]
        );
    }

    #[test]
    fn unused_codes_rejected() {
        for code in 5u8..=7 {
            assert_eq!(Discrepancy::from_code(code), None);
        }
    }

    #[test]
    fn inverse_recovers_plaintext_for_every_match() {
        for plain in 0u8..16 {
            for keystream in 0u8..16 {
                let Some(d) = Discrepancy::from_pattern(plain ^ keystream) else {
                    continue;
                };
                assert_eq!(keystream ^ d.pattern(), plain);
            }
        }
    }
}
