#![no_main]
use libfuzzer_sys::fuzz_target;
use pudgyturtle::engine;
use pudgyturtle::nlfsr::{DEFAULT_KEY, NlfsrConfig};

fuzz_target!(|data: &[u8]| {
    // Arbitrary ciphertext must only ever produce errors, never panics.
    for config in [NlfsrConfig::DUBROVA_24, NlfsrConfig::COMPAT_24] {
        let mut reg = engine::initialize_state(DEFAULT_KEY, config).unwrap();
        let _ = engine::decrypt(&mut reg, data);
    }
});
