use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors raised while building or decoding a byte index.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("error reading input: {0}")]
    Read(#[source] io::Error),

    #[error("error writing index: {0}")]
    Write(#[source] io::Error),

    #[error("unrecognised index width {0}, expected one of 8, 16, 32 or 64 bits")]
    InvalidWidth(u32),

    #[error("unrecognised index width {0:?}, expected one of 8, 16, 32 or 64 bits")]
    UnparsableWidth(String),

    #[error("invalid builder config: {0}")]
    InvalidConfig(String),

    #[error("invalid magic number {0:#010x}")]
    InvalidMagic(u32),

    #[error("unsupported index version {0}")]
    UnsupportedVersion(u8),

    #[error("index ends with a partial entry of {trailing} bytes")]
    TruncatedEntry { trailing: usize },
}
