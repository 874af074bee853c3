//! Minimal CLI for the two-stage gamma cipher.
//!
//! This binary generates key files and encrypts or decrypts text files over
//! the 7-bit alphabet, writing the intermediate bit strings next to the
//! output. The key file is advanced before any output is written.

use gamma_stream::config::ENV_LOG;
use gamma_stream::{generate_key_with, run_files, CipherRun, Direction, KeygenSettings};
use rand::rngs::OsRng;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

const TEXT_PREVIEW: usize = 512;
const BITS_PREVIEW: usize = 256;
const BLOCKS_PREVIEW: usize = 5;

fn fatal(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: gamma <genkey|encrypt|decrypt> ...");
    println!("  genkey <key.json> [--lcg-a <u64>] [--lcg-b <u64>]");
    println!("  encrypt --key <key.json> --in <file> --out <file> [--no-show]");
    println!("  decrypt --key <key.json> --in <file> --out <file> [--no-show]");
    println!("Environment: {ENV_LOG}, GAMMA_LCG_A, GAMMA_LCG_B, GAMMA_MR_ROUNDS, GAMMA_PRIME_ATTEMPTS");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let mut args = env::args().skip(1);
    let command = args.next();
    match command.as_deref() {
        Some("genkey") => cmd_genkey(args.collect()),
        Some("encrypt") => cmd_run(Direction::Encrypt, args.collect()),
        Some("decrypt") => cmd_run(Direction::Decrypt, args.collect()),
        Some("-h") | Some("--help") => print_help(),
        _ => {
            print_help();
            std::process::exit(1);
        }
    }
}

fn parse_u64(flag: &str, value: Option<String>) -> u64 {
    let value = value.unwrap_or_else(|| fatal(&format!("{flag} expects a value")));
    value
        .parse()
        .unwrap_or_else(|_| fatal(&format!("invalid {flag} value: {value}")))
}

fn cmd_genkey(args: Vec<String>) {
    let mut settings = KeygenSettings::from_env().unwrap_or_else(|err| fatal(&err.to_string()));
    let mut path: Option<PathBuf> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lcg-a" => settings.lcg_a = parse_u64("--lcg-a", iter.next()),
            "--lcg-b" => settings.lcg_b = parse_u64("--lcg-b", iter.next()),
            other if other.starts_with("--") => fatal(&format!("unknown argument: {other}")),
            other => {
                if path.replace(PathBuf::from(other)).is_some() {
                    fatal("genkey takes a single key path");
                }
            }
        }
    }
    let path = path.unwrap_or_else(|| fatal("Usage: gamma genkey <key.json>"));
    let key = generate_key_with(&mut OsRng, settings.lcg_a, settings.lcg_b, &settings.search)
        .unwrap_or_else(|err| fatal(&err.to_string()));
    key.save(&path)
        .unwrap_or_else(|err| fatal(&format!("failed to write {}: {err}", path.display())));
    println!("Key generated and saved to {}", path.display());
    println!(
        "LCG: a={}, b={}, m={}, seed={}",
        key.lcg.a, key.lcg.b, key.lcg.m, key.lcg.seed
    );
    println!("BBS primes: p={}  q={}", key.bbs.p, key.bbs.q);
}

struct RunArgs {
    key: PathBuf,
    input: PathBuf,
    output: PathBuf,
    show: bool,
}

fn parse_run_args(args: Vec<String>) -> RunArgs {
    let mut key = None;
    let mut input = None;
    let mut output = None;
    let mut show = true;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--key" => key = iter.next().map(PathBuf::from),
            "--in" => input = iter.next().map(PathBuf::from),
            "--out" => output = iter.next().map(PathBuf::from),
            "--no-show" => show = false,
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    match (key, input, output) {
        (Some(key), Some(input), Some(output)) => RunArgs {
            key,
            input,
            output,
            show,
        },
        _ => fatal("encrypt/decrypt require --key, --in and --out"),
    }
}

fn cmd_run(direction: Direction, args: Vec<String>) {
    let args = parse_run_args(args);
    let run = run_files(direction, &args.key, &args.input, &args.output)
        .unwrap_or_else(|err| fatal(&err.to_string()));
    if args.show {
        print_run(&run, &args.output, &args.key);
    }
}

fn text_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&bytes[..bytes.len().min(TEXT_PREVIEW)]).into_owned()
}

fn print_run(run: &CipherRun, output: &Path, key_path: &Path) {
    let audit = &run.audit;
    let blocks = audit
        .gamma_blocks_hex
        .iter()
        .take(BLOCKS_PREVIEW)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    match run.direction {
        Direction::Encrypt => {
            println!("=== ENCRYPTION ===");
            println!("Plaintext (first {TEXT_PREVIEW} chars):");
            println!("{}", text_preview(run.plaintext()));
            println!("\nPlaintext bits (first {BITS_PREVIEW} bits):");
            println!("{}", audit.plaintext_bits.preview(BITS_PREVIEW));
            println!("\nGamma blocks (hex, first {BLOCKS_PREVIEW}):");
            println!("{blocks}");
            println!("\nGamma bits (first {BITS_PREVIEW} bits):");
            println!("{}", audit.gamma_bits.preview(BITS_PREVIEW));
            println!("\nCiphertext (first {TEXT_PREVIEW} chars; may contain nonprintables):");
            println!("{}", text_preview(run.ciphertext()));
            println!("\nCiphertext bits (first {BITS_PREVIEW} bits):");
            println!("{}", audit.ciphertext_bits.preview(BITS_PREVIEW));
        }
        Direction::Decrypt => {
            println!("=== DECRYPTION ===");
            println!("Ciphertext (first {TEXT_PREVIEW} chars):");
            println!("{}", text_preview(run.ciphertext()));
            println!("\nCiphertext bits (first {BITS_PREVIEW} bits):");
            println!("{}", audit.ciphertext_bits.preview(BITS_PREVIEW));
            println!("\nGamma blocks (hex, first {BLOCKS_PREVIEW}):");
            println!("{blocks}");
            println!("\nGamma bits (first {BITS_PREVIEW} bits):");
            println!("{}", audit.gamma_bits.preview(BITS_PREVIEW));
            println!("\nRecovered plaintext (first {TEXT_PREVIEW} chars):");
            println!("{}", text_preview(run.plaintext()));
            println!("\nPlaintext bits (first {BITS_PREVIEW} bits):");
            println!("{}", audit.plaintext_bits.preview(BITS_PREVIEW));
        }
    }
    println!("\nOutput written to {} (artifacts use the same prefix)", output.display());
    println!(
        "Key updated (lcg.seed = {}) and rewritten to {}",
        run.key.lcg.seed,
        key_path.display()
    );
}
