// Generator core: one NLFSR step per output bit.
//
// Each step computes
//   b1 = parity of the linear taps
//   b2 = AND of the nonlinear taps
// shifts the register right by one, inserts `b1 ^ b2` at bit `width - 1`,
// and outputs the new least-significant bit.

use super::config::{ConfigError, NlfsrConfig};

/// Keystream generator state.
///
/// Only the low `width` bits are ever set. A `Register` is one message's
/// trajectory: it is deliberately not `Clone`, and two messages must never be
/// processed from the same seeded state, since equal trajectories produce
/// equal masks and keystream nibbles.
#[derive(Debug, PartialEq, Eq)]
pub struct Register {
    state: u64,
    config: NlfsrConfig,
}

impl Register {
    /// Seed a register from `key`, truncated to the configured width.
    ///
    /// The all-zero register is a fixed point of the recurrence and is
    /// rejected.
    pub fn new(config: NlfsrConfig, key: u64) -> Result<Self, ConfigError> {
        let state = key & config.state_mask();
        if state == 0 {
            return Err(ConfigError::ZeroState {
                key,
                width: config.width(),
            });
        }
        Ok(Self { state, config })
    }

    /// Advance one step and return the output bit (0 or 1).
    #[inline]
    pub fn step(&mut self) -> u8 {
        let s = self.state;
        let linear = u64::from((s & self.config.linear_taps()).count_ones() & 1);
        let taps = self.config.nonlinear_taps();
        let product = u64::from(s & taps == taps);

        self.state = (s >> 1) | ((linear ^ product) << self.config.feedback_shift());
        debug_assert_eq!(self.state & !self.config.state_mask(), 0);
        (self.state & 1) as u8
    }

    /// Current register contents.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn config(&self) -> &NlfsrConfig {
        &self.config
    }
}
