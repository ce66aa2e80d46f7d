use crate::error::{IndexError, Result};
use crate::header::{EntryOrder, HEADER_SIZE, IndexHeader};
use crate::width::{IndexEntry, IndexWidth};
use std::io;

/// Sequential decoder for an index file: validates the header, then yields entries in order.
pub struct IndexReader<R: io::Read> {
    reader: R,
    header: IndexHeader,
    order: EntryOrder,
    width: IndexWidth,
}

impl<R: io::Read> IndexReader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let (header, order) = IndexHeader::read_from(&mut reader)?;
        let width = header.entry_width()?;
        Ok(Self {
            reader,
            header,
            order,
            width,
        })
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    pub fn width(&self) -> IndexWidth {
        self.width
    }

    pub fn target(&self) -> u8 {
        self.header.target
    }

    pub fn order(&self) -> EntryOrder {
        self.order
    }

    pub fn entries(self) -> Entries<R> {
        Entries {
            reader: self.reader,
            width: self.width,
            order: self.order,
            done: false,
        }
    }
}

/// Iterator over the entries of an index, widened to `u64`.
pub struct Entries<R: io::Read> {
    reader: R,
    width: IndexWidth,
    order: EntryOrder,
    done: bool,
}

impl<R: io::Read> Entries<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(IndexError::Read(e)),
            }
        }
        Ok(filled)
    }
}

impl<R: io::Read> Iterator for Entries<R> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = [0u8; 8];
        let size = self.width.bytes() as usize;
        let filled = match self.fill(&mut buf[..size]) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        if filled == 0 {
            self.done = true;
            return None;
        }
        if filled < size {
            self.done = true;
            return Some(Err(IndexError::TruncatedEntry { trailing: filled }));
        }

        let bytes = &buf[..size];
        Some(match self.width {
            IndexWidth::W8 => decode::<u8>(bytes, self.order),
            IndexWidth::W16 => decode::<u16>(bytes, self.order),
            IndexWidth::W32 => decode::<u32>(bytes, self.order),
            IndexWidth::W64 => decode::<u64>(bytes, self.order),
        })
    }
}

fn decode<T: IndexEntry>(bytes: &[u8], order: EntryOrder) -> Result<u64> {
    let value = T::read_from_bytes(bytes).map_err(|_| IndexError::TruncatedEntry {
        trailing: bytes.len(),
    })?;
    let value = match order {
        EntryOrder::Native => value,
        EntryOrder::Swapped => value.swap_bytes(),
    };
    Ok(value.as_())
}

/// Number of entries in an index file of `file_len` bytes.
///
/// # Errors
///
/// Returns an error if the length cannot hold a header or ends in a partial entry.
pub fn entry_count(file_len: u64, width: IndexWidth) -> Result<u64> {
    let body = file_len.checked_sub(HEADER_SIZE as u64).ok_or_else(|| {
        IndexError::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "index is shorter than its header",
        ))
    })?;
    let size = u64::from(width.bytes());
    let trailing = body % size;
    if trailing != 0 {
        return Err(IndexError::TruncatedEntry {
            trailing: trailing as usize,
        });
    }
    Ok(body / size)
}
