//! Sequential byte sources consumed by the header and row decoders.
//!
//! Both backends share one contract: fill as much of the request as the
//! stream allows, and record why a read came up short. Once a source has
//! left [`SourceState::Ready`] it stays there.

use std::io::{self, Read, Seek, SeekFrom};

/// Condition of a [`ByteSource`] after its most recent read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceState {
    /// Every read so far was satisfied in full.
    #[default]
    Ready,
    /// A read hit the end of the stream.
    EndOfStream,
    /// The underlying device reported an error.
    Fault(String),
}

impl SourceState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SourceState::Ready)
    }
}

/// A readable, strictly sequential byte stream.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes into `buf`, returning how many were
    /// written. A count below `buf.len()` means the state is no longer
    /// [`SourceState::Ready`].
    fn read_into(&mut self, buf: &mut [u8]) -> usize;

    /// Current stream condition.
    fn state(&self) -> &SourceState;

    /// Bytes consumed since the start of the stream.
    fn position(&self) -> u64;

    /// Total stream length, when it is cheap to know.
    fn len_hint(&self) -> Option<u64> {
        None
    }

    /// Read one byte. End of stream reads as 0.
    fn read_u8(&mut self) -> u8 {
        let mut b = [0u8; 1];
        self.read_into(&mut b);
        b[0]
    }

    /// Read a little-endian u16. Missing bytes read as 0.
    fn read_u16_le(&mut self) -> u16 {
        let mut b = [0u8; 2];
        self.read_into(&mut b);
        u16::from_le_bytes(b)
    }

    /// Read a little-endian u32. Missing bytes read as 0.
    fn read_u32_le(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.read_into(&mut b);
        u32::from_le_bytes(b)
    }

    /// Read and discard `n` bytes, returning how many were actually consumed.
    fn skip(&mut self, n: u64) -> u64 {
        let mut scratch = [0u8; 64];
        let mut left = n;
        let mut consumed = 0u64;
        while left > 0 {
            let want = left.min(scratch.len() as u64) as usize;
            let got = self.read_into(&mut scratch[..want]);
            consumed += got as u64;
            if got < want {
                break;
            }
            left -= got as u64;
        }
        consumed
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        (**self).read_into(buf)
    }

    fn state(&self) -> &SourceState {
        (**self).state()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn len_hint(&self) -> Option<u64> {
        (**self).len_hint()
    }
}

// ── In-memory backend ───────────────────────────────────────────────

/// Byte source over a fully loaded file.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
    state: SourceState,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            state: SourceState::Ready,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        if !self.state.is_ready() {
            return 0;
        }
        let available = self.data.len() - self.pos;
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        if n < buf.len() {
            self.state = SourceState::EndOfStream;
        }
        n
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn len_hint(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

// ── Streaming backend ───────────────────────────────────────────────

/// Byte source over any [`io::Read`], typically a buffered file handle.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    pos: u64,
    len: Option<u64>,
    state: SourceState,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pos: 0,
            len: None,
            state: SourceState::Ready,
        }
    }

    /// Attach a known stream length (reported, never enforced).
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ReaderSource<R> {
    /// Measure the stream by seeking to its end, then rewind to the start.
    pub fn from_seekable(mut inner: R) -> io::Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self::new(inner).with_len(len))
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        if !self.state.is_ready() {
            return 0;
        }
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.state = SourceState::EndOfStream;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("read fault at byte {}: {e}", self.pos + filled as u64);
                    self.state = SourceState::Fault(e.to_string());
                    break;
                }
            }
        }
        self.pos += filled as u64;
        filled
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn len_hint(&self) -> Option<u64> {
        self.len
    }
}
