// Nonlinear feedback shift register keystream generator.
//
// - `config`: register width and tap masks, validated at construction
// - `register`: one generator step per output bit
// - `keystream`: nibble assembly and mask drawing on top of `register`

pub mod config;
pub mod keystream;
pub mod register;

pub use config::{ConfigError, DEFAULT_KEY, NlfsrConfig};
pub use keystream::{NIBBLE_BITS, NIBBLES_PER_MASK, Nibbles};
pub use register::Register;
