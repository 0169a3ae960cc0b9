#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut args: Vec<String> = text
        .split_whitespace()
        .take(32)
        .map(str::to_string)
        .collect();
    // Steer half the inputs into a subcommand so option parsing is reached.
    if data.first().is_some_and(|b| b & 1 == 1) {
        args.insert(0, "encrypt".to_string());
    }
    pudgyturtle::cli::fuzz_try_parse_args(&args);
});
