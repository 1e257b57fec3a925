//! Sentinel-terminated source buffer.
//!
//! The buffer owns a copy of the source bytes followed by a `0x00` sentinel,
//! so the tokenizer can look ahead a few bytes past any position without
//! bounds checks on the hot path. The total size is rounded up to a 64-byte
//! boundary; the padding is zero as well.
//!
//! # Encoding Detection
//!
//! R source is expected to be UTF-8, but the tokenizer works on bytes and
//! never rejects input. Problems found while building the buffer are recorded
//! as [`EncodingIssue`] values for front ends to report:
//! - UTF-8 and UTF-16 byte order marks
//! - interior null bytes, one issue per run (each byte still lexes as a
//!   1-byte error token)
//! - the first invalid UTF-8 sequence (only for [`SourceBuffer::from_bytes`])
//! - content cut off because the source is longer than `u32::MAX` bytes

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Token offsets are `u32`; longer sources are truncated.
const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// Tokens borrow from this buffer, so it must outlive every token produced
/// by a [`Tokenizer`](crate::Tokenizer) built on one of its cursors.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during source buffer construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    /// Byte offset of the problematic sequence.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue detected in a source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`0xEF 0xBB 0xBF`) at the start of the source.
    Utf8Bom,
    /// UTF-16 little-endian BOM (`0xFF 0xFE`) at the start of the source.
    Utf16LeBom,
    /// UTF-16 big-endian BOM (`0xFE 0xFF`) at the start of the source.
    Utf16BeBom,
    /// Run of null bytes inside the source content.
    InteriorNull,
    /// Byte sequence that is not valid UTF-8.
    InvalidUtf8,
    /// Source content past this offset was dropped. `len` is the number of
    /// dropped bytes, saturated to `u32::MAX`.
    Truncated,
}

impl EncodingIssueKind {
    /// Short human-readable description, used by diagnostics front ends.
    pub fn message(self) -> &'static str {
        match self {
            EncodingIssueKind::Utf8Bom => "source starts with a UTF-8 byte order mark",
            EncodingIssueKind::Utf16LeBom => "source looks UTF-16 (little-endian) encoded",
            EncodingIssueKind::Utf16BeBom => "source looks UTF-16 (big-endian) encoded",
            EncodingIssueKind::InteriorNull => "null byte in source",
            EncodingIssueKind::InvalidUtf8 => "invalid UTF-8 sequence",
            EncodingIssueKind::Truncated => "source too large, the rest was not tokenized",
        }
    }
}

impl SourceBuffer {
    /// Create a buffer from UTF-8 source text.
    pub fn new(source: &str) -> Self {
        Self::build(source.as_bytes(), false, MAX_SOURCE_LEN)
    }

    /// Create a buffer from raw bytes, e.g. a memory-mapped file.
    ///
    /// The bytes are not required to be valid UTF-8; the first invalid
    /// sequence is recorded as an [`EncodingIssueKind::InvalidUtf8`] issue.
    pub fn from_bytes(source: &[u8]) -> Self {
        Self::build(source, true, MAX_SOURCE_LEN)
    }

    /// Sources longer than `max_len` bytes are truncated to their first
    /// `max_len` bytes and get a [`EncodingIssueKind::Truncated`] issue.
    fn build(source: &[u8], check_utf8: bool, max_len: usize) -> Self {
        let full_len = source.len();
        let source_len = full_len.min(max_len);
        let source = &source[..source_len];

        // Round up to the next 64-byte boundary (minimum: source + sentinel).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let mut encoding_issues = Vec::new();
        detect_bom(source, &mut encoding_issues);
        detect_interior_nulls(source, &mut encoding_issues);
        if check_utf8 {
            detect_invalid_utf8(source, &mut encoding_issues);
        }
        if full_len > source_len {
            encoding_issues.push(EncodingIssue {
                kind: EncodingIssueKind::Truncated,
                pos: u32::try_from(source_len).unwrap_or(u32::MAX),
                len: u32::try_from(full_len - source_len).unwrap_or(u32::MAX),
            });
        }

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0, row 0, column 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Encoding issues detected during construction, in source order per kind.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let issue = match source {
        [0xEF, 0xBB, 0xBF, ..] => Some((EncodingIssueKind::Utf8Bom, 3)),
        [0xFF, 0xFE, ..] => Some((EncodingIssueKind::Utf16LeBom, 2)),
        [0xFE, 0xFF, ..] => Some((EncodingIssueKind::Utf16BeBom, 2)),
        _ => None,
    };
    if let Some((kind, len)) = issue {
        issues.push(EncodingIssue { kind, pos: 0, len });
    }
}

/// One issue per run of adjacent null bytes.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let mut run: Option<EncodingIssue> = None;
    for absolute in memchr::memchr_iter(0, source) {
        let Ok(pos) = u32::try_from(absolute) else {
            break;
        };
        match &mut run {
            Some(issue) if issue.pos + issue.len == pos => issue.len += 1,
            _ => {
                issues.extend(run.take());
                run = Some(EncodingIssue {
                    kind: EncodingIssueKind::InteriorNull,
                    pos,
                    len: 1,
                });
            }
        }
    }
    issues.extend(run);
}

fn detect_invalid_utf8(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if let Err(err) = std::str::from_utf8(source) {
        let pos = err.valid_up_to();
        // `None` means the input ends in the middle of a sequence.
        let len = err.error_len().unwrap_or(source.len() - pos);
        if let (Ok(pos), Ok(len)) = (u32::try_from(pos), u32::try_from(len)) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InvalidUtf8,
                pos,
                len,
            });
        }
    }
}
