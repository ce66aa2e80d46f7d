use crate::buffers::BUFFER_SIZE;
use crate::error::{IndexError, Result};
use serde::Deserialize;

/// Sizes of the two working buffers. Memory use of a run is bounded by these,
/// never by the size of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Bytes read from the input per chunk.
    pub input_buffer_size: usize,
    /// Entries batched before a write to the output.
    pub output_buffer_entries: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            input_buffer_size: BUFFER_SIZE,
            output_buffer_entries: BUFFER_SIZE,
        }
    }
}

impl BuilderConfig {
    pub fn with_input_buffer_size(mut self, n: usize) -> Self {
        self.input_buffer_size = n;
        self
    }

    pub fn with_output_buffer_entries(mut self, n: usize) -> Self {
        self.output_buffer_entries = n;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_buffer_size == 0 {
            return Err(IndexError::InvalidConfig(
                "input_buffer_size must be greater than zero".to_string(),
            ));
        }
        if self.output_buffer_entries == 0 {
            return Err(IndexError::InvalidConfig(
                "output_buffer_entries must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
