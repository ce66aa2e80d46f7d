use crate::error::CliError;
use byteindex::IndexWidth;
use clap::Parser;
use std::path::PathBuf;

const ABOUT: &str = "create_index - A tool for creating indices of files.";

const LONG_ABOUT: &str = "\
create_index - A tool for creating indices of files.

Creates a file of fixed size indices of the positions of target characters. It
may be useful for repeatedly splitting up a file by arbitrary boundaries.";

const AFTER_LONG_HELP: &str = r"Example usage:
  # Search for all newline characters in stdin and write them out on stdout as
    32-bit indices.
  create_index - -

  # Search for all tab characters in input.txt and write them out to output.txt
    as 64-bit indices.
  create_index --target=\t --size=64 input.txt output.txt

Index file format:
    The index file consists of a fixed size header, followed by a stream of
    index values. The header consists of a 4-byte magic number (0xba5eba11) in
    host byte order for endian checks, a 1-byte version number (currently 1), a
    1-byte entry size in bytes, a 1-byte char for what target was used and
    1-byte padding. What follows is a stream of index values listing the
    position just past every target in the input file.";

#[derive(Parser, Debug)]
#[command(
    name = "create_index",
    version,
    about = ABOUT,
    long_about = LONG_ABOUT,
    after_long_help = AFTER_LONG_HELP
)]
pub struct Args {
    /// Write a 0 at the beginning of the index.
    #[arg(long)]
    pub include_zero: bool,

    /// Index entry size in bits: 8, 16, 32 or 64. Overflow wraps around to zero.
    #[arg(long = "size", value_name = "SIZE", default_value = "32", value_parser = parse_width)]
    pub width: IndexWidth,

    /// The character to index on. Simple escape codes and \xHH are permitted.
    #[arg(long, value_name = "CHR", default_value = r"\n", value_parser = parse_target)]
    pub target: u8,

    /// JSON file overriding the input and output buffer sizes.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Input filename, or - for stdin.
    pub input: String,

    /// Output filename, or - for stdout (likely to contain arbitrary binary).
    pub output: String,
}

fn parse_width(s: &str) -> Result<IndexWidth, CliError> {
    Ok(s.parse::<IndexWidth>()?)
}

/// Resolves a target argument to the single byte it names.
pub fn parse_target(s: &str) -> Result<u8, CliError> {
    let bytes = s.as_bytes();
    match bytes {
        [b] => Ok(*b),
        [b'\\', esc] => match esc {
            b'\'' => Ok(0x27),
            b'"' => Ok(0x22),
            b'?' => Ok(0x3f),
            b'\\' => Ok(0x5c),
            b'a' => Ok(0x07),
            b'b' => Ok(0x08),
            b'f' => Ok(0x0c),
            b'n' => Ok(0x0a),
            b'r' => Ok(0x0d),
            b't' => Ok(0x09),
            _ => Err(CliError::Target(format!(
                "escape sequence {s} not recognized"
            ))),
        },
        [b'\\', b'x', hex @ ..] if hex.len() == 2 => {
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return Err(CliError::Target(format!("invalid hex escape {s}")));
            }
            u8::from_str_radix(&s[2..], 16)
                .map_err(|_| CliError::Target(format!("invalid hex escape {s}")))
        }
        _ => Err(CliError::Target(format!("target {s:?} not recognized"))),
    }
}
