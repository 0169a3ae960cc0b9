fn main() {
    #[cfg(feature = "cli")]
    pudgyturtle::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("pudgyturtle: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
