//! Streaming builder for indices of single-byte separators.
//!
//! An index file is an 8 byte [`IndexHeader`] followed by one fixed-width
//! unsigned entry per occurrence of the target byte. Each entry holds the
//! position one past the occurrence, so consecutive entries delimit the
//! segments of the original stream. Positions that do not fit the chosen
//! [`IndexWidth`] wrap around modulo 2^width.
//!
//! ```
//! use byteindex::{IndexWidth, build_index};
//!
//! let mut index = Vec::new();
//! build_index(&b"a\nb\nc"[..], &mut index, b'\n', IndexWidth::W32, false).unwrap();
//! assert_eq!(index.len(), 8 + 2 * 4);
//! ```

pub mod buffers;
pub mod builder;
pub mod config;
pub mod error;
pub mod header;
pub mod reader;
pub mod width;

pub use builder::{IndexBuilder, IndexSummary, build_index, build_index_with_config};
pub use config::BuilderConfig;
pub use error::{IndexError, Result};
pub use header::{EntryOrder, HEADER_SIZE, INDEX_MAGIC, INDEX_VERSION, IndexHeader};
pub use reader::{IndexReader, entry_count};
pub use width::{IndexEntry, IndexWidth};
