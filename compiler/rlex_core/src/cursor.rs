//! Cursor over a sentinel-terminated buffer with row/column tracking.
//!
//! The cursor never moves past the end of the source content: every advance
//! is clamped to the source length. Reads past the end return the `0x00`
//! sentinel, so callers can look ahead freely without checking bounds first.
//!
//! # Interior Null Bytes
//!
//! A null byte inside the source reads the same as the sentinel. Use
//! [`Cursor::is_eof`], which compares offsets, to tell them apart.

use std::fmt;

/// Row and column of a byte offset, both 0-indexed.
///
/// Columns count bytes, not characters. A `\n` ends its row: the byte after
/// it starts the next row at column 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(row: u32, column: u32) -> Self {
        Position { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], so snapshots for lookahead cost a few words.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and `pos <= source_len`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
    row: u32,
    column: u32,
}

// &[u8] = 16, four u32 = 16.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 32);

impl<'a> Cursor<'a> {
    /// Create a cursor at offset 0 over a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
            row: 0,
            column: 0,
        }
    }

    /// Returns the byte at the current offset, or `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte `offset` bytes ahead of the current one.
    ///
    /// `peek(0)` equals [`current()`](Self::current). Reads up to a cache
    /// line past the end land in the sentinel and zero padding; anything
    /// beyond the buffer also returns `0x00`.
    #[inline]
    pub fn peek(&self, offset: u32) -> u8 {
        let idx = (self.pos as usize).saturating_add(offset as usize);
        self.buf.get(idx).copied().unwrap_or(0)
    }

    /// Advance the cursor by `n` bytes, stopping at the end of the source.
    ///
    /// Row and column are updated from the skipped bytes: each `\n` starts a
    /// new row, and the column restarts after the last one.
    pub fn advance_n(&mut self, n: u32) {
        let end = self.pos.saturating_add(n).min(self.source_len);
        let skipped = &self.buf[self.pos as usize..end as usize];
        match memchr::memrchr(b'\n', skipped) {
            Some(last) => {
                self.row += count_u32(memchr::memchr_iter(b'\n', skipped).count());
                self.column = count_u32(skipped.len() - last - 1);
            }
            None => self.column += count_u32(skipped.len()),
        }
        self.pos = end;
    }

    /// Returns `true` once every source byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.pos
    }

    /// Row and column of the current offset.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.row, self.column)
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Bytes `start..end` of the source content.
    ///
    /// Both bounds are clamped to the source length.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        &self.buf[start..end]
    }

    /// Source bytes from the current offset to the end.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos as usize..self.source_len as usize]
    }

    /// Count the bytes, starting at `current() + offset`, for which `pred`
    /// holds. Never counts past the end of the source.
    pub fn count_while(&self, offset: u32, pred: impl Fn(u8) -> bool) -> u32 {
        let rest = self.rest();
        let from = (offset as usize).min(rest.len());
        count_u32(rest[from..].iter().take_while(|&&b| pred(b)).count())
    }

    /// Distance from the current offset to the first `byte` at or after
    /// `current() + from`, searching only the source content.
    pub fn find(&self, from: u32, byte: u8) -> Option<u32> {
        let rest = self.rest();
        let from = (from as usize).min(rest.len());
        memchr::memchr(byte, &rest[from..]).map(|d| count_u32(from + d))
    }

    /// Like [`find`](Self::find), but stops at the first of two bytes.
    pub fn find_either(&self, from: u32, a: u8, b: u8) -> Option<u32> {
        let rest = self.rest();
        let from = (from as usize).min(rest.len());
        memchr::memchr2(a, b, &rest[from..]).map(|d| count_u32(from + d))
    }
}

/// Lengths inside one source never exceed `source_len`, which is a `u32`.
#[inline]
fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
