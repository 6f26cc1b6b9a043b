//! Chunk Reader
//!
//! Validates and iterates a length-prefixed chunk buffer.

use std::iter::FusedIterator;

use crate::error::FrameError;
use crate::framing::{read_len, END_MARKER, LEN_SIZE};

/// Checks that `buf` is a well-formed sequence of chunks and returns how
/// many there are.
///
/// Fails when a length prefix is cut short or a chunk runs past the end
/// of the buffer. Nothing after an end marker is inspected.
pub fn validate(buf: &[u8]) -> Result<usize, FrameError> {
    let mut count = 0;
    let mut offs = 0;
    while offs < buf.len() {
        let len = read_len(buf, offs).ok_or(FrameError::BrokenStructure { offset: offs })?;
        if len == END_MARKER {
            break;
        }

        let end = (offs + LEN_SIZE)
            .checked_add(len as usize)
            .filter(|&end| end <= buf.len())
            .ok_or(FrameError::BrokenStructure { offset: offs })?;
        count += 1;
        offs = end;
    }
    Ok(count)
}

// == Chunk Reader ==
/// Iterator over the chunks of a validated buffer.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    buf: &'a [u8],
    offs: usize,
    total: usize,
    remaining: usize,
}

impl<'a> ChunkReader<'a> {
    /// Validates `buf` up front; iteration never fails afterwards.
    pub fn new(buf: &'a [u8]) -> Result<Self, FrameError> {
        let total = validate(buf)?;
        Ok(Self {
            buf,
            offs: 0,
            total,
            remaining: total,
        })
    }

    /// Number of chunks in the buffer.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let len = read_len(self.buf, self.offs)? as usize;
        let start = self.offs + LEN_SIZE;
        let chunk = self.buf.get(start..start + len)?;
        self.offs = start + len;
        self.remaining -= 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ChunkReader<'_> {}

impl FusedIterator for ChunkReader<'_> {}
