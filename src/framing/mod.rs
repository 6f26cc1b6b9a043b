//! Framing Module
//!
//! Length-prefixed chunk buffers. Each record is a 4-byte big-endian
//! length followed by that many payload bytes. A buffer ends either where
//! its bytes run out or at a `0xFFFFFFFF` length, whichever comes first.
//!
//! Independent of the cache; nothing in `cache` depends on it.

mod concat;
mod reader;
mod writer;

pub use concat::Concatenator;
pub use reader::{validate, ChunkReader};
pub use writer::ChunkWriter;

/// Length value that terminates a buffer.
pub const END_MARKER: u32 = 0xFFFF_FFFF;

/// Bytes taken by each length prefix.
pub const LEN_SIZE: usize = 4;

/// Reads the length prefix at `offs`, if four bytes are available.
fn read_len(buf: &[u8], offs: usize) -> Option<u32> {
    let end = offs.checked_add(LEN_SIZE)?;
    let bytes: [u8; LEN_SIZE] = buf.get(offs..end)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}
