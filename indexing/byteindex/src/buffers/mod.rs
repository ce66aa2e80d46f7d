pub mod entry_buffer;

pub use entry_buffer::EntryBuffer;

/// Default capacity of both working buffers: bytes for the input chunk, entries for the output.
pub const BUFFER_SIZE: usize = 512 * 1024;
