use crate::error::{IndexError, Result};
use num_traits::{AsPrimitive, PrimInt, Unsigned};
use std::fmt;
use std::str::FromStr;
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Width of every entry in an index file. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexWidth {
    W8,
    W16,
    #[default]
    W32,
    W64,
}

impl IndexWidth {
    pub const ALL: [IndexWidth; 4] = [
        IndexWidth::W8,
        IndexWidth::W16,
        IndexWidth::W32,
        IndexWidth::W64,
    ];

    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(IndexWidth::W8),
            16 => Ok(IndexWidth::W16),
            32 => Ok(IndexWidth::W32),
            64 => Ok(IndexWidth::W64),
            other => Err(IndexError::InvalidWidth(other)),
        }
    }

    /// Decodes the width selector byte stored in the header.
    pub fn from_bytes(bytes: u8) -> Result<Self> {
        Self::from_bits(u32::from(bytes) * 8)
    }

    pub fn bits(self) -> u32 {
        match self {
            IndexWidth::W8 => 8,
            IndexWidth::W16 => 16,
            IndexWidth::W32 => 32,
            IndexWidth::W64 => 64,
        }
    }

    /// Size of a single entry in bytes, as written in the header.
    pub fn bytes(self) -> u8 {
        (self.bits() / 8) as u8
    }

    /// A mask of the lower `bits()` bits.
    #[inline(always)]
    pub fn mask(self) -> u64 {
        if self.bits() == 64 {
            u64::MAX
        } else {
            (1u64 << self.bits()) - 1
        }
    }

    /// Reduces a raw position modulo 2^bits.
    #[inline(always)]
    pub fn wrap(self, position: u64) -> u64 {
        position & self.mask()
    }
}

impl fmt::Display for IndexWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for IndexWidth {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .trim()
            .parse::<u32>()
            .map_err(|_| IndexError::UnparsableWidth(s.to_string()))?;
        Self::from_bits(bits)
    }
}

/// Unsigned integer types that can be stored as index entries.
pub trait IndexEntry:
    PrimInt + Unsigned + AsPrimitive<u64> + IntoBytes + FromBytes + Immutable + fmt::Debug + 'static
{
    const WIDTH: IndexWidth;

    /// Truncates a global position to this type, wrapping on overflow.
    fn wrap(position: u64) -> Self;
}

macro_rules! impl_index_entry {
    ($($t:ty => $width:expr),*) => {
        $(
            impl IndexEntry for $t {
                const WIDTH: IndexWidth = $width;

                #[inline(always)]
                fn wrap(position: u64) -> Self {
                    position.as_()
                }
            }
        )*
    };
}

impl_index_entry!(
    u8 => IndexWidth::W8,
    u16 => IndexWidth::W16,
    u32 => IndexWidth::W32,
    u64 => IndexWidth::W64
);
