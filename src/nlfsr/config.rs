// NLFSR construction parameters.
//
// The register width and the two tap masks are coupled: the feedback bit is
// inserted at `width - 1` and every tap must sit inside the active window.
// `NlfsrConfig::new` rejects inconsistent combinations up front so a bad
// layout never silently produces a different keystream.

use thiserror::Error;

/// Hard-wired secret key of the reference tool: the `1010...10` pattern.
pub const DEFAULT_KEY: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Smallest register width that can hold a two-tap nonlinear term above bit 0.
pub const MIN_WIDTH: u32 = 3;

/// The register lives in a `u64`.
pub const MAX_WIDTH: u32 = 64;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Construction-time errors for register layouts and seeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("register width {0} is outside the supported range 3..=64")]
    InvalidWidth(u32),
    #[error("tap mask {taps:#x} reaches beyond a {width}-bit register")]
    TapOutOfRange { taps: u64, width: u32 },
    #[error("nonlinear tap mask {0:#x} needs at least two taps")]
    TooFewNonlinearTaps(u64),
    #[error(
        "bit 0 must be a linear tap and not a nonlinear one \
         (linear {linear_taps:#x}, nonlinear {nonlinear_taps:#x})"
    )]
    NotInvertible { linear_taps: u64, nonlinear_taps: u64 },
    #[error("key {key:#x} leaves a {width}-bit register all zero")]
    ZeroState { key: u64, width: u32 },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Register width plus linear/nonlinear tap masks.
///
/// The feedback function is
/// `parity(state & linear_taps) ^ all_set(state & nonlinear_taps)`.
/// Bit 0 must enter the feedback linearly only: then the dropped bit can be
/// recovered from the new state, the update is a bijection on the state
/// space, and every trajectory is purely periodic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NlfsrConfig {
    width: u32,
    linear_taps: u64,
    nonlinear_taps: u64,
}

impl NlfsrConfig {
    /// Maximum-period 24-bit NLFSR from Dubrova's list:
    /// `x0 + x1 + x8 + x9 + x15 + x17*x18`.
    pub const DUBROVA_24: Self = Self {
        width: 24,
        linear_taps: 0x00_8303,
        nonlinear_taps: 0x06_0000,
    };

    /// 24-bit layout with nonlinear mask `0x040080` (bits 7 and 18).
    ///
    /// This is what the pt 1.1 command-line tool executes; use it to produce
    /// or read ciphertext interoperable with that tool.
    pub const COMPAT_24: Self = Self {
        width: 24,
        linear_taps: 0x00_8303,
        nonlinear_taps: 0x04_0080,
    };

    /// Validate and build a custom layout.
    pub fn new(width: u32, linear_taps: u64, nonlinear_taps: u64) -> Result<Self, ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(ConfigError::InvalidWidth(width));
        }
        let window = width_mask(width);
        for taps in [linear_taps, nonlinear_taps] {
            if taps & !window != 0 {
                return Err(ConfigError::TapOutOfRange { taps, width });
            }
        }
        if linear_taps & 1 == 0 || nonlinear_taps & 1 != 0 {
            return Err(ConfigError::NotInvertible {
                linear_taps,
                nonlinear_taps,
            });
        }
        if nonlinear_taps.count_ones() < 2 {
            return Err(ConfigError::TooFewNonlinearTaps(nonlinear_taps));
        }
        Ok(Self {
            width,
            linear_taps,
            nonlinear_taps,
        })
    }

    /// Register width in bits.
    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn linear_taps(&self) -> u64 {
        self.linear_taps
    }

    pub const fn nonlinear_taps(&self) -> u64 {
        self.nonlinear_taps
    }

    /// Mask covering the low `width` bits.
    pub const fn state_mask(&self) -> u64 {
        width_mask(self.width)
    }

    /// Bit position the feedback bit is shifted into.
    #[inline]
    pub(crate) const fn feedback_shift(&self) -> u32 {
        self.width - 1
    }
}

impl Default for NlfsrConfig {
    fn default() -> Self {
        Self::DUBROVA_24
    }
}

const fn width_mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_pass_validation() {
        for cfg in [NlfsrConfig::DUBROVA_24, NlfsrConfig::COMPAT_24] {
            let rebuilt = NlfsrConfig::new(cfg.width(), cfg.linear_taps(), cfg.nonlinear_taps());
            assert_eq!(rebuilt, Ok(cfg));
        }
    }

    #[test]
    fn default_is_dubrova() {
        let cfg = NlfsrConfig::default();
        assert_eq!(cfg, NlfsrConfig::DUBROVA_24);
        assert_eq!(cfg.state_mask(), 0xFF_FFFF);
        assert_eq!(cfg.feedback_shift(), 23);
    }

    #[test]
    fn dubrova_taps_match_published_positions() {
        let lin = [0u32, 1, 8, 9, 15].iter().fold(0u64, |m, b| m | 1 << b);
        let nl = [17u32, 18].iter().fold(0u64, |m, b| m | 1 << b);
        assert_eq!(NlfsrConfig::DUBROVA_24.linear_taps(), lin);
        assert_eq!(NlfsrConfig::DUBROVA_24.nonlinear_taps(), nl);
    }

    #[test]
    fn rejects_bad_width() {
        assert_eq!(
            NlfsrConfig::new(2, 0x1, 0x2),
            Err(ConfigError::InvalidWidth(2))
        );
        assert_eq!(
            NlfsrConfig::new(65, 0x1, 0x6),
            Err(ConfigError::InvalidWidth(65))
        );
    }

    #[test]
    fn rejects_taps_outside_window() {
        // 24-bit taps in a 16-bit register: the feedback position no longer
        // lines up with the tap layout.
        assert_eq!(
            NlfsrConfig::new(16, 0x00_8303, 0x06_0000),
            Err(ConfigError::TapOutOfRange {
                taps: 0x06_0000,
                width: 16
            })
        );
    }

    #[test]
    fn rejects_missing_bit_zero() {
        assert_eq!(
            NlfsrConfig::new(24, 0x00_8302, 0x06_0000),
            Err(ConfigError::NotInvertible {
                linear_taps: 0x00_8302,
                nonlinear_taps: 0x06_0000
            })
        );
    }

    #[test]
    fn rejects_bit_zero_in_product() {
        assert_eq!(
            NlfsrConfig::new(3, 0b001, 0b011),
            Err(ConfigError::NotInvertible {
                linear_taps: 0b001,
                nonlinear_taps: 0b011
            })
        );
    }

    #[test]
    fn rejects_single_nonlinear_tap() {
        assert_eq!(
            NlfsrConfig::new(24, 0x00_8303, 0x04_0000),
            Err(ConfigError::TooFewNonlinearTaps(0x04_0000))
        );
    }

    #[test]
    fn full_width_register_is_allowed() {
        let cfg = NlfsrConfig::new(64, 0x1 | 1 << 63, 0x6).unwrap();
        assert_eq!(cfg.state_mask(), u64::MAX);
        assert_eq!(cfg.feedback_shift(), 63);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::InvalidWidth(70).to_string(),
            "register width 70 is outside the supported range 3..=64"
        );
        assert_eq!(
            ConfigError::ZeroState {
                key: 0x1000000,
                width: 24
            }
            .to_string(),
            "key 0x1000000 leaves a 24-bit register all zero"
        );
    }
}
