//! Request-body buffering.

use std::io::{self, BufRead, Cursor, Read};

use crate::error::Recovered;

/// Drain `reader` into memory.
///
/// Bytes read before a failure are kept; the error rides along in the
/// returned [`Recovered`].
pub fn read_all<R: Read>(mut reader: R) -> Recovered<Vec<u8>> {
    let mut buf = Vec::new();
    // read_to_end appends everything it got before the failing read.
    match reader.read_to_end(&mut buf) {
        Ok(_) => Recovered::ok(buf),
        Err(err) => Recovered::failed(buf, err.into()),
    }
}

/// An in-memory body that can be handed to anything expecting a reader.
///
/// It owns no external resource, so [`BufferedBody::close`] never fails.
#[derive(Debug, Clone, Default)]
pub struct BufferedBody {
    inner: Cursor<Vec<u8>>,
}

impl BufferedBody {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Cursor::new(bytes.into()),
        }
    }

    pub fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        let len = self.inner.get_ref().len() as u64;
        len.saturating_sub(self.inner.position()) as usize
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Read for BufferedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for BufferedBody {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}
