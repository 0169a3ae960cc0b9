#![no_main]
use libfuzzer_sys::fuzz_target;
use pudgyturtle::engine;
use pudgyturtle::nlfsr::NlfsrConfig;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let (seed, plaintext) = data.split_at(3);
    let key = u64::from(seed[0]) | u64::from(seed[1]) << 8 | u64::from(seed[2]) << 16;
    let Ok(mut enc_reg) = engine::initialize_state(key, NlfsrConfig::default()) else {
        return;
    };
    let mut dec_reg = engine::initialize_state(key, NlfsrConfig::default()).unwrap();

    let ct = engine::encrypt(&mut enc_reg, plaintext).unwrap();
    assert!(ct.len() >= 2 * plaintext.len());
    let pt = engine::decrypt(&mut dec_reg, &ct).unwrap();
    assert_eq!(pt, plaintext);
    assert_eq!(enc_reg, dec_reg);
});
