//! Concatenator
//!
//! Growable byte buffer that appends slices back to back.

use std::io;

/// Capacity reserved on the first write into an empty concatenator.
const BOOTSTRAP_CAPACITY: usize = 128;

// == Concatenator ==
#[derive(Debug, Clone, Default)]
pub struct Concatenator {
    buf: Vec<u8>,
}

impl Concatenator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses `buf`'s allocation, dropping its contents.
    pub fn reset(&mut self, mut buf: Vec<u8>) {
        buf.clear();
        self.buf = buf;
    }

    /// Appends `data`.
    pub fn write(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.grow(data.len());
        self.buf.extend_from_slice(data);
    }

    /// Bytes written so far.
    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    /// Copy of the bytes written so far, sized exactly.
    pub fn copy_buf(&self) -> Vec<u8> {
        self.buf.clone()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Makes room for `needed` more bytes, growing by half again or to
    /// twice the request, whichever is larger.
    fn grow(&mut self, needed: usize) {
        let cap = self.buf.capacity();
        if cap == 0 && needed <= BOOTSTRAP_CAPACITY {
            self.buf.reserve_exact(BOOTSTRAP_CAPACITY);
            return;
        }
        if cap - self.buf.len() >= needed {
            return;
        }

        let mut new_cap = cap * 3 / 2;
        if self.buf.len() + needed > new_cap {
            new_cap = self.buf.len() + needed * 2;
        }
        self.buf.reserve_exact(new_cap - self.buf.len());
    }
}

impl io::Write for Concatenator {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        Concatenator::write(self, data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
