//! Chunk Writer
//!
//! Splits a byte buffer into length-prefixed chunks.

use tracing::trace;

use crate::error::FrameError;
use crate::framing::{END_MARKER, LEN_SIZE};

// == Chunk Writer ==
/// Writes length-prefixed chunks into a buffer.
///
/// The writer uses the full length of the buffer it is given. A fixed
/// writer fails once that space runs out; an extendable one reallocates.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    buf: Vec<u8>,
    offs: usize,
    /// End of the written chunks once closed
    closed_at: Option<usize>,
    extendable: bool,
}

impl ChunkWriter {
    // == Constructor ==
    pub fn new(buf: Vec<u8>, extendable: bool) -> Self {
        Self {
            buf,
            offs: 0,
            closed_at: None,
            extendable,
        }
    }

    /// Starts over with `buf`, forgetting everything written so far.
    pub fn reset(&mut self, buf: Vec<u8>, extendable: bool) {
        *self = Self::new(buf, extendable);
    }

    // == Allocate ==
    /// Writes the length prefix for a `len`-byte chunk and returns the
    /// chunk's bytes for the caller to fill.
    pub fn allocate(&mut self, len: usize) -> Result<&mut [u8], FrameError> {
        self.reserve(len, true)
    }

    /// Like `allocate`, but never reallocates, even on an extendable
    /// writer. Fails with `InsufficientSpace` when the chunk does not fit
    /// in the current buffer.
    pub fn allocate_in_place(&mut self, len: usize) -> Result<&mut [u8], FrameError> {
        self.reserve(len, false)
    }

    fn reserve(&mut self, len: usize, grow: bool) -> Result<&mut [u8], FrameError> {
        if self.closed_at.is_some() {
            return Err(FrameError::WriterClosed);
        }

        let available = self.buf.len() - self.offs;
        let needed = len.saturating_add(LEN_SIZE);
        let prefix = u32::try_from(len)
            .ok()
            .filter(|&l| l != END_MARKER)
            .ok_or(FrameError::InsufficientSpace { available, needed })?;

        if available < needed && !(grow && self.extend(needed)) {
            return Err(FrameError::InsufficientSpace { available, needed });
        }

        let start = self.offs + LEN_SIZE;
        self.buf[self.offs..start].copy_from_slice(&prefix.to_be_bytes());
        self.offs = start + len;
        Ok(&mut self.buf[start..self.offs])
    }

    /// Allocates a chunk and copies `chunk` into it.
    pub fn write(&mut self, chunk: &[u8]) -> Result<(), FrameError> {
        self.allocate(chunk.len())?.copy_from_slice(chunk);
        Ok(())
    }

    /// Grows the buffer so at least `needed` more bytes fit.
    fn extend(&mut self, needed: usize) -> bool {
        if !self.extendable {
            return false;
        }
        let mut new_len = self.buf.len() * 3 / 2;
        if self.offs + needed > new_len {
            new_len = self.buf.len() + needed * 2;
        }
        trace!(from = self.buf.len(), to = new_len, "growing chunk buffer");
        self.buf.resize(new_len, 0);
        true
    }

    // == Close ==
    /// Finishes writing and returns the chunks written, without the marker.
    ///
    /// The end marker goes right after the last chunk when four bytes are
    /// left for it; otherwise the buffer is cut at the last chunk. Either
    /// way `buf()` can then be read with `ChunkReader`. Calling it again
    /// returns the same bytes.
    pub fn close(&mut self) -> &[u8] {
        if let Some(pos) = self.closed_at {
            return &self.buf[..pos];
        }

        let pos = self.offs;
        if self.buf.len() - pos < LEN_SIZE {
            self.buf.truncate(pos);
        } else {
            self.buf[pos..pos + LEN_SIZE].copy_from_slice(&END_MARKER.to_be_bytes());
        }
        self.closed_at = Some(pos);
        self.offs = self.buf.len();
        &self.buf[..pos]
    }

    /// The whole underlying buffer, including any unused tail.
    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
