use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use lincodes::ecc::channel::{simulate, BinarySymmetricChannel};
use lincodes::ecc::{hamming_decode, hamming_encode, rm_decode, rm_encode};
use lincodes::ecc::{BlockCode, HammingCode, ReedMullerCode};
use lincodes::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Hamming and Reed-Muller encoder/decoder for binary strings", long_about = None)]
struct Args {
    /// Print the details of processing.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hamming code with k = 2^r - r - 1 message bits and n = 2^r - 1 codeword bits.
    Hamming {
        #[arg(ignore_case = true, value_enum)]
        mode: Mode,

        /// The redundancy order r.
        r: usize,

        /// The binary string to encode or decode, e.g. 0001 or 1101001 for r = 3.
        bits: String,
    },
    /// Reed-Muller code; an m-bit message becomes a 2^(m-1)-bit codeword.
    Rm {
        #[arg(ignore_case = true, value_enum)]
        mode: Mode,

        /// The binary string to encode or decode, e.g. 1011 or 10011001.
        bits: String,
    },
    /// Send random messages through a binary symmetric channel and count decoding outcomes.
    Simulate {
        #[arg(ignore_case = true, value_enum)]
        code: CodeKind,

        /// The Hamming order r, or the Reed-Muller message length m.
        param: usize,

        /// Probability that the channel flips any single bit.
        #[arg(short = 'p', long, default_value_t = 0.01)]
        flip_probability: f64,

        /// Number of messages to send.
        #[arg(short, long, default_value_t = 1000)]
        trials: usize,

        /// Seed for the random number generator.
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Encode,
    Decode,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CodeKind {
    Hamming,
    Rm,
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Hamming { mode, r, bits } => match mode {
            Mode::Encode => hamming_encode(r, &bits),
            Mode::Decode => hamming_decode(r, &bits),
        },
        Command::Rm { mode, bits } => match mode {
            Mode::Encode => rm_encode(&bits),
            Mode::Decode => rm_decode(&bits),
        },
        Command::Simulate {
            code,
            param,
            flip_probability,
            trials,
            seed,
        } => {
            let code: Box<dyn BlockCode> = match code {
                CodeKind::Hamming => Box::new(HammingCode::new(param)?),
                CodeKind::Rm => Box::new(ReedMullerCode::new(param)?),
            };
            let channel = BinarySymmetricChannel::new(flip_probability)?;
            let mut rng = ChaCha20Rng::seed_from_u64(seed);

            let summary = simulate(code.as_ref(), &channel, trials, &mut rng)?;
            Ok(format!(
                "trials: {}\ndecoded: {}\nmiscorrected: {}\ndetected: {}\nflipped bits: {}",
                summary.trials,
                summary.decoded,
                summary.miscorrected,
                summary.detected,
                summary.flipped_bits
            ))
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
