use crate::buffers::EntryBuffer;
use crate::config::BuilderConfig;
use crate::error::{IndexError, Result};
use crate::header::IndexHeader;
use crate::width::{IndexEntry, IndexWidth};
use memchr::memchr_iter;
use num_traits::Zero;
use std::io;
use tracing::{info, trace};

/// Totals reported at the end of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexSummary {
    /// Entries written, including the leading zero when requested.
    pub entries: u64,
    pub bytes_scanned: u64,
    pub flushes: u64,
}

/// Single-pass builder for one index file. Owns both working buffers and the
/// running offset of the current chunk; nothing outlives the run.
pub struct IndexBuilder<T: IndexEntry> {
    target: u8,
    include_zero: bool,
    input: Vec<u8>,
    output: EntryBuffer<T>,
    read_start: u64,
    entries: u64,
}

impl<T: IndexEntry> IndexBuilder<T> {
    pub fn new(target: u8, include_zero: bool, config: &BuilderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target,
            include_zero,
            input: vec![0u8; config.input_buffer_size],
            output: EntryBuffer::new(config.output_buffer_entries),
            read_start: 0,
            entries: 0,
        })
    }

    /// Streams `input` to the end, writing the header and every target position to `output`.
    ///
    /// # Errors
    ///
    /// Fails on the first read or write error. The output is left in an unspecified
    /// state and must be discarded.
    pub fn run<R, W>(mut self, input: &mut R, output: &mut W) -> Result<IndexSummary>
    where
        R: io::Read + ?Sized,
        W: io::Write + ?Sized,
    {
        IndexHeader::new(T::WIDTH, self.target).write_to(output)?;

        if self.include_zero {
            self.enqueue(<T as Zero>::zero(), output)?;
        }

        loop {
            let bytes_total = match input.read(&mut self.input) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(IndexError::Read(e)),
            };
            self.scan_chunk(bytes_total, output)?;
            self.read_start += bytes_total as u64;
        }

        self.output.flush_to(output)?;
        output.flush().map_err(IndexError::Write)?;

        let summary = IndexSummary {
            entries: self.entries,
            bytes_scanned: self.read_start,
            flushes: self.output.flushes(),
        };
        let width = T::WIDTH;
        info!(
            entries = summary.entries,
            bytes_scanned = summary.bytes_scanned,
            flushes = summary.flushes,
            width = %width,
            target_byte = self.target,
            "index complete"
        );
        Ok(summary)
    }

    fn scan_chunk<W: io::Write + ?Sized>(&mut self, len: usize, output: &mut W) -> Result<()> {
        let chunk = &self.input[..len];
        let before = self.entries;
        for pos in memchr_iter(self.target, chunk) {
            // one past the target, i.e. the start of the next segment
            let position = self.read_start + pos as u64 + 1;
            self.entries += 1;
            if self.output.push(T::wrap(position)) {
                self.output.flush_to(output)?;
            }
        }
        trace!(
            chunk_start = self.read_start,
            chunk_len = len,
            found = self.entries - before,
            "scanned chunk"
        );
        Ok(())
    }

    fn enqueue<W: io::Write + ?Sized>(&mut self, value: T, output: &mut W) -> Result<()> {
        self.entries += 1;
        if self.output.push(value) {
            self.output.flush_to(output)?;
        }
        Ok(())
    }
}

/// Builds an index of every `target` byte in `input` using the default buffer sizes.
pub fn build_index<R, W>(
    input: R,
    output: W,
    target: u8,
    width: IndexWidth,
    include_zero: bool,
) -> Result<()>
where
    R: io::Read,
    W: io::Write,
{
    build_index_with_config(
        input,
        output,
        target,
        width,
        include_zero,
        &BuilderConfig::default(),
    )
    .map(|_| ())
}

/// Same as [`build_index`] with explicit buffer sizes; returns the run totals.
pub fn build_index_with_config<R, W>(
    mut input: R,
    mut output: W,
    target: u8,
    width: IndexWidth,
    include_zero: bool,
    config: &BuilderConfig,
) -> Result<IndexSummary>
where
    R: io::Read,
    W: io::Write,
{
    match width {
        IndexWidth::W8 => {
            IndexBuilder::<u8>::new(target, include_zero, config)?.run(&mut input, &mut output)
        }
        IndexWidth::W16 => {
            IndexBuilder::<u16>::new(target, include_zero, config)?.run(&mut input, &mut output)
        }
        IndexWidth::W32 => {
            IndexBuilder::<u32>::new(target, include_zero, config)?.run(&mut input, &mut output)
        }
        IndexWidth::W64 => {
            IndexBuilder::<u64>::new(target, include_zero, config)?.run(&mut input, &mut output)
        }
    }
}
