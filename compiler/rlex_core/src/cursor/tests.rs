use super::*;
use crate::SourceBuffer;
use pretty_assertions::assert_eq;

// === Basic navigation ===

#[test]
fn current_returns_first_byte() {
    let buf = SourceBuffer::new("abc");
    assert_eq!(buf.cursor().current(), b'a');
}

#[test]
fn peek_is_relative_to_current() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.peek(0), b'a');
    assert_eq!(cursor.peek(2), b'c');
    cursor.advance_n(1);
    assert_eq!(cursor.peek(1), b'c');
}

#[test]
fn peek_past_end_returns_sentinel() {
    let buf = SourceBuffer::new("ab");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(2), 0);
    assert_eq!(cursor.peek(1_000), 0);
    assert_eq!(cursor.peek(u32::MAX), 0);
}

#[test]
fn advance_is_clamped_to_source_len() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    cursor.advance_n(10);
    assert_eq!(cursor.offset(), 3);
    assert!(cursor.is_eof());
    cursor.advance_n(1);
    assert_eq!(cursor.offset(), 3);
    assert_eq!(cursor.current(), 0);
}

#[test]
fn empty_source_starts_at_eof() {
    let buf = SourceBuffer::new("");
    assert!(buf.cursor().is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance_n(1);
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

// === Position tracking ===

#[test]
fn position_starts_at_origin() {
    let buf = SourceBuffer::new("x");
    assert_eq!(buf.cursor().position(), Position::new(0, 0));
}

#[test]
fn newline_starts_next_row() {
    let buf = SourceBuffer::new("ab\ncd");
    let mut cursor = buf.cursor();
    cursor.advance_n(2);
    assert_eq!(cursor.position(), Position::new(0, 2));
    cursor.advance_n(1);
    assert_eq!(cursor.position(), Position::new(1, 0));
    cursor.advance_n(1);
    assert_eq!(cursor.position(), Position::new(1, 1));
}

#[test]
fn multi_byte_advance_counts_every_newline() {
    let buf = SourceBuffer::new("a\n\nbc\nde");
    let mut cursor = buf.cursor();
    cursor.advance_n(8);
    assert_eq!(cursor.position(), Position::new(3, 2));
}

#[test]
fn stepwise_and_bulk_advance_agree() {
    let source = "x <- 1\n  y\n\nz # c\n";
    let buf = SourceBuffer::new(source);
    for n in 0..=source.len() as u32 {
        let mut bulk = buf.cursor();
        bulk.advance_n(n);
        let mut step = buf.cursor();
        for _ in 0..n {
            step.advance_n(1);
        }
        assert_eq!(bulk.position(), step.position(), "after {n} bytes");
    }
}

#[test]
fn peek_past_end_reads_zero_padding() {
    let buf = SourceBuffer::new("ab");
    let mut cursor = buf.cursor();
    cursor.advance_n(1);
    assert_eq!(cursor.peek(1), 0);
    // Still inside the cache-line padding.
    assert_eq!(cursor.peek(40), 0);
    assert_eq!(cursor.peek(62), 0);
}

#[test]
fn peek_sees_interior_null_as_zero() {
    let buf = SourceBuffer::new("a\0b");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(1), 0);
    assert_eq!(cursor.peek(2), b'b');
}

#[test]
fn position_display() {
    assert_eq!(Position::new(3, 14).to_string(), "3:14");
}

// === Slicing ===

#[test]
fn slice_and_rest() {
    let buf = SourceBuffer::new("hello world");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.slice(0, 5), b"hello");
    assert_eq!(cursor.slice(6, 100), b"world");
    cursor.advance_n(6);
    assert_eq!(cursor.rest(), b"world");
}

// === Scanning helpers ===

#[test]
fn count_while_stops_at_end() {
    let buf = SourceBuffer::new("aaab");
    let cursor = buf.cursor();
    assert_eq!(cursor.count_while(0, |b| b == b'a'), 3);
    assert_eq!(cursor.count_while(1, |b| b == b'a'), 2);
    assert_eq!(cursor.count_while(0, |_| true), 4);
    assert_eq!(cursor.count_while(10, |_| true), 0);
}

#[test]
fn advance_over_counted_run_tracks_position() {
    let buf = SourceBuffer::new(" \n\t x");
    let mut cursor = buf.cursor();
    let n = cursor.count_while(0, |b| b.is_ascii_whitespace());
    cursor.advance_n(n);
    assert_eq!(cursor.offset(), 4);
    assert_eq!(cursor.current(), b'x');
    assert_eq!(cursor.position(), Position::new(1, 2));
}

#[test]
fn find_searches_from_offset() {
    let buf = SourceBuffer::new("%in% x %o%");
    let cursor = buf.cursor();
    assert_eq!(cursor.find(1, b'%'), Some(3));
    assert_eq!(cursor.find(0, b'%'), Some(0));
    assert_eq!(cursor.find(0, b'#'), None);
}

#[test]
fn find_either_returns_first_match() {
    let buf = SourceBuffer::new("\"a\\\"b\"");
    let cursor = buf.cursor();
    assert_eq!(cursor.find_either(1, b'"', b'\\'), Some(2));
    assert_eq!(cursor.find_either(4, b'"', b'\\'), Some(5));
}
