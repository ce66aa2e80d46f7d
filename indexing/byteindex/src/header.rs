use crate::error::{IndexError, Result};
use crate::width::IndexWidth;
use std::io;
use zerocopy::IntoBytes;
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Written in host byte order so readers can detect the endianness of the entries.
pub const INDEX_MAGIC: u32 = 0xBA5E_BA11;
pub const INDEX_VERSION: u8 = 1;
pub const HEADER_SIZE: usize = core::mem::size_of::<IndexHeader>();

const _: () = assert!(HEADER_SIZE == 8);

/// Fixed 8 byte header at the start of every index file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Immutable, IntoBytes, FromBytes, KnownLayout)]
pub struct IndexHeader {
    pub magic: u32,  // 4
    pub version: u8, // 1
    pub width: u8,   // 1, entry size in bytes
    pub target: u8,  // 1
    pub padding: u8, // 1
}

/// Byte order of an index relative to the host reading it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrder {
    Native,
    Swapped,
}

impl IndexHeader {
    pub fn new(width: IndexWidth, target: u8) -> Self {
        Self {
            magic: INDEX_MAGIC,
            version: INDEX_VERSION,
            width: width.bytes(),
            target,
            padding: 0,
        }
    }

    pub fn write_to<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.as_bytes()).map_err(IndexError::Write)
    }

    /// Reads a header and works out whether the entries following it need byte swapping.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Read` if fewer than 8 bytes are available, and a
    /// decoding error if the magic, version or width byte are not recognised.
    pub fn read_from<R: io::Read>(reader: &mut R) -> Result<(Self, EntryOrder)> {
        let mut buff = [0u8; HEADER_SIZE];
        reader.read_exact(&mut buff).map_err(IndexError::Read)?;
        let header: IndexHeader = zerocopy::transmute!(buff);

        let order = if header.magic == INDEX_MAGIC {
            EntryOrder::Native
        } else if header.magic == INDEX_MAGIC.swap_bytes() {
            EntryOrder::Swapped
        } else {
            return Err(IndexError::InvalidMagic(header.magic));
        };

        if header.version != INDEX_VERSION {
            return Err(IndexError::UnsupportedVersion(header.version));
        }
        IndexWidth::from_bytes(header.width)?;
        Ok((header, order))
    }

    pub fn entry_width(&self) -> Result<IndexWidth> {
        IndexWidth::from_bytes(self.width)
    }
}
