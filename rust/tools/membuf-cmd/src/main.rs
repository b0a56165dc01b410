use anyhow::Result;
use clap::{Parser, Subcommand};
use membuf::Encoding;

mod commands;

use commands::read::{ByteOrder, ValueKind};

#[derive(Parser)]
#[command(name = "membuf-cmd")]
#[command(about = "Command-line utility for inspecting and converting membuf buffers")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a string into a buffer and display its bytes
    Inspect {
        /// Encoding used to turn the input into bytes
        #[arg(short, long, default_value = "utf8", value_parser = parse_encoding)]
        encoding: Encoding,

        /// Number of bytes shown before the output is truncated
        #[arg(long)]
        max_bytes: Option<usize>,

        /// Print the JSON form instead of the hex dump
        #[arg(long)]
        json: bool,

        /// Input string
        input: String,
    },

    /// Re-encode a string from one encoding to another
    Transcode {
        /// Encoding of the input string
        #[arg(long, default_value = "utf8", value_parser = parse_encoding)]
        from: Encoding,

        /// Encoding of the output string
        #[arg(long, value_parser = parse_encoding)]
        to: Encoding,

        /// Input string
        input: String,
    },

    /// Decode a numeric value from hex-encoded bytes
    Read {
        /// Value type to decode
        #[arg(short = 't', long = "type", value_enum)]
        kind: ValueKind,

        /// Byte order of multi-byte values
        #[arg(long, value_enum, default_value = "be")]
        endian: ByteOrder,

        /// Offset of the first byte of the value
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Width in bytes of `int` and `uint` values (1 to 6)
        #[arg(short, long, default_value_t = 4)]
        width: usize,

        /// Input bytes as hex digits
        hex: String,
    },
}

fn parse_encoding(s: &str) -> std::result::Result<Encoding, membuf::Error> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect {
            encoding,
            max_bytes,
            json,
            input,
        } => commands::inspect::run(&input, encoding, max_bytes, json),
        Commands::Transcode { from, to, input } => commands::transcode::run(&input, from, to),
        Commands::Read {
            kind,
            endian,
            offset,
            width,
            hex,
        } => commands::read::run(&hex, kind, endian, offset, width),
    }
}
