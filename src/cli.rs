// Command-line front end for PudgyTurtle.
//
// Explicit subcommands and long-form options on top of the streaming
// encrypt/decrypt driver. Output goes to stdout unless a file is named.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::nlfsr::{DEFAULT_KEY, NlfsrConfig, Register};
use crate::stream::{StreamDecryptor, StreamEncryptor, StreamStats};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Key parsing (hex with 0x prefix, or decimal)
// ---------------------------------------------------------------------------

fn parse_key(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty key".into());
    }
    let digits: String = s.chars().filter(|&c| c != '_').collect();
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse(),
    };
    parsed.map_err(|e| format!("invalid key '{s}': {e}"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// PudgyTurtle stream cipher.
#[derive(Parser, Debug)]
#[command(
    name = "pudgyturtle",
    version,
    about = "PudgyTurtle NLFSR stream cipher",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encrypt an input stream.
    Encrypt(CodecArgs),
    /// Decrypt an input stream.
    Decrypt(CodecArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    /// Maximum-period 24-bit NLFSR (nonlinear taps 17, 18).
    Dubrova24,
    /// 24-bit layout interoperable with pt 1.1 (nonlinear taps 7, 18).
    Compat24,
}

impl ProfileArg {
    fn config(self) -> NlfsrConfig {
        match self {
            Self::Dubrova24 => NlfsrConfig::DUBROVA_24,
            Self::Compat24 => NlfsrConfig::COMPAT_24,
        }
    }
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// Secret key (hex with 0x prefix, or decimal), truncated to the register width.
    #[arg(long, short = 'k', value_parser = parse_key, default_value_t = DEFAULT_KEY)]
    key: u64,

    /// Generator tap layout.
    #[arg(long, value_enum, default_value_t = ProfileArg::Dubrova24)]
    profile: ProfileArg,

    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Run the codec but discard its output.
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encrypt,
    Decrypt,
    Config,
}

struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    no_output: bool,
    key: u64,
    config: NlfsrConfig,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let force = cli.force;
    let json_output = cli.json_output;

    let (command, args) = match cli.command {
        Cmd::Encrypt(args) => (Command::Encrypt, Some(args)),
        Cmd::Decrypt(args) => (Command::Decrypt, Some(args)),
        Cmd::Config => (Command::Config, None),
    };

    match args {
        Some(args) => Options {
            command,
            use_stdout: args.stdout,
            force,
            quiet,
            verbose,
            no_output: args.no_output,
            key: args.key,
            config: args.profile.config(),
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            json_output,
        },
        None => Options {
            command,
            use_stdout: false,
            force,
            quiet,
            verbose,
            no_output: false,
            key: DEFAULT_KEY,
            config: NlfsrConfig::default(),
            input_file: None,
            output_file: None,
            json_output,
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("pudgyturtle".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("pudgyturtle version {version} (Rust)");
    eprintln!("Licensed under the MIT License");

    let file_io = cfg!(feature = "file-io") as u8;
    eprintln!("FILE_IO={file_io}");
    for (name, cfg) in [
        ("DUBROVA_24", NlfsrConfig::DUBROVA_24),
        ("COMPAT_24", NlfsrConfig::COMPAT_24),
    ] {
        eprintln!(
            "{name}: width={} linear_taps={:#08x} nonlinear_taps={:#08x}",
            cfg.width(),
            cfg.linear_taps(),
            cfg.nonlinear_taps()
        );
    }
    eprintln!("DEFAULT_KEY={DEFAULT_KEY:#018x}");

    0
}

// ---------------------------------------------------------------------------
// Shared I/O setup
// ---------------------------------------------------------------------------

fn open_input(opts: &Options) -> Result<Box<dyn Read>, i32> {
    match &opts.input_file {
        Some(path) => match File::open(path) {
            Ok(f) => Ok(Box::new(BufReader::with_capacity(BUF_SIZE, f))),
            Err(e) => {
                eprintln!("pudgyturtle: input file: {}: {e}", path.display());
                Err(1)
            }
        },
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, i32> {
    if opts.no_output {
        return Ok(Box::new(io::sink()));
    }
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "pudgyturtle: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return Err(1);
            }
            match File::create(path) {
                Ok(f) => Ok(Box::new(BufWriter::with_capacity(BUF_SIZE, f))),
                Err(e) => {
                    eprintln!("pudgyturtle: output file: {}: {e}", path.display());
                    Err(1)
                }
            }
        }
    }
}

fn seed_register(opts: &Options) -> Result<Register, i32> {
    Register::new(opts.config, opts.key).map_err(|e| {
        eprintln!("pudgyturtle: key: {e}");
        1
    })
}

fn report(opts: &Options, command: &str, stats: &StreamStats) {
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "pudgyturtle: {command}: input size: {}, output size: {}, escapes: {}",
            stats.bytes_in, stats.bytes_out, stats.escapes
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": command,
            "input_size": stats.bytes_in,
            "output_size": stats.bytes_out,
            "escapes": stats.escapes,
            "width": opts.config.width(),
        });
        match serde_json::to_string_pretty(&json) {
            Ok(text) => eprintln!("{text}"),
            Err(e) => eprintln!("pudgyturtle: json: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Encrypt command
// ---------------------------------------------------------------------------

fn cmd_encrypt(opts: &Options) -> i32 {
    let register = match seed_register(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let mut encryptor = StreamEncryptor::new(writer, register);
    let mut buf = vec![0u8; BUF_SIZE];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = encryptor.write_plaintext(&buf[..n]) {
                    eprintln!("pudgyturtle: encrypt error: {e}");
                    return 1;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                eprintln!("pudgyturtle: read error: {e}");
                return 1;
            }
        }
    }

    let stats = match encryptor.finish() {
        Ok((_, stats)) => stats,
        Err(e) => {
            eprintln!("pudgyturtle: encrypt finish error: {e}");
            return 1;
        }
    };

    report(opts, "encrypt", &stats);
    0
}

// ---------------------------------------------------------------------------
// Decrypt command
// ---------------------------------------------------------------------------

fn cmd_decrypt(opts: &Options) -> i32 {
    let register = match seed_register(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let mut writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let mut decryptor = StreamDecryptor::new(reader, register);
    if let Err(e) = decryptor.decrypt_to(&mut writer) {
        // Flush what was recovered before the failure.
        let _ = writer.flush();
        eprintln!("pudgyturtle: decrypt error: {e}");
        return 1;
    }
    if let Err(e) = writer.flush() {
        eprintln!("pudgyturtle: write flush error: {e}");
        return 1;
    }

    report(opts, "decrypt", &decryptor.stats());
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    // Warn if -c overrides output filename.
    if opts.use_stdout && !opts.quiet {
        if let Some(path) = &opts.output_file {
            eprintln!(
                "pudgyturtle: warning: -c option overrides output filename: {}",
                path.display()
            );
        }
    }
    if opts.use_stdout {
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::Encrypt => cmd_encrypt(&opts),
        Command::Decrypt => cmd_decrypt(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
