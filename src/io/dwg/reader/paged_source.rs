//! Fixed-size page buffer over a seekable byte source.
//!
//! Each page buffer holds `page_size + 1` bytes so the byte right after the
//! page is always available to [`PagedSource::peek`] without further I/O.

use std::io::{self, Read, Seek, SeekFrom};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Bounds-checked random access to a `Read + Seek` source, one page at a time.
pub struct PagedSource<R> {
    inner: R,
    len: u64,
    page_size: usize,
    page_start: u64,
    page: Vec<u8>,
}

impl<R: Read + Seek> PagedSource<R> {
    /// Wrap `inner`, measuring its length once.
    pub fn new(mut inner: R, page_size: usize) -> io::Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self {
            inner,
            len,
            page_size: page_size.max(1),
            page_start: 0,
            page: Vec::new(),
        })
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Byte at an absolute offset, loading its page if needed.
    ///
    /// The look-ahead byte is never served from here: fetching it loads its
    /// own page, so the byte after it is buffered in turn.
    pub fn byte_at(&mut self, offset: u64) -> io::Result<u8> {
        if let Some(b) = self.page_byte(offset) {
            return Ok(b);
        }
        if offset >= self.len {
            return Err(eof(offset, self.len));
        }
        self.load_page(offset)?;
        self.page_byte(offset).ok_or_else(|| eof(offset, self.len))
    }

    /// Byte at an absolute offset if it is already buffered, look-ahead
    /// included.
    pub fn peek(&self, offset: u64) -> Option<u8> {
        let rel = offset.checked_sub(self.page_start)?;
        self.page.get(usize::try_from(rel).ok()?).copied()
    }

    /// Byte at an absolute offset if it lies in the loaded page proper.
    fn page_byte(&self, offset: u64) -> Option<u8> {
        let rel = usize::try_from(offset.checked_sub(self.page_start)?).ok()?;
        if rel < self.page_size {
            self.page.get(rel).copied()
        } else {
            None
        }
    }

    /// Copy `buf.len()` bytes starting at `offset`.
    pub fn read_into(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let end = offset
            .checked_add(buf.len() as u64)
            .ok_or_else(|| eof(offset, self.len))?;
        if end > self.len {
            return Err(eof(end, self.len));
        }

        let mut filled = 0;
        while filled < buf.len() {
            let at = offset + filled as u64;
            if self.page_byte(at).is_none() {
                self.load_page(at)?;
            }
            let rel = (at - self.page_start) as usize;
            let available = self.page.len().min(self.page_size) - rel;
            let n = available.min(buf.len() - filled);
            buf[filled..filled + n].copy_from_slice(&self.page[rel..rel + n]);
            filled += n;
        }
        Ok(())
    }

    fn load_page(&mut self, offset: u64) -> io::Result<()> {
        let page_size = self.page_size as u64;
        let start = offset - offset % page_size;
        let want = (page_size + 1).min(self.len - start) as usize;

        self.inner.seek(SeekFrom::Start(start))?;
        self.page.resize(want, 0);
        self.inner.read_exact(&mut self.page)?;
        self.page_start = start;
        Ok(())
    }
}

fn eof(offset: u64, len: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("offset {offset:#X} is past the end of data ({len:#X} bytes)"),
    )
}
