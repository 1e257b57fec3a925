use super::*;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
    path
}

fn open(path: &Path) -> SourceFile {
    SourceFile::open(path).unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()))
}

fn temp() -> TempDir {
    tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"))
}

#[test]
fn maps_file_contents() {
    let dir = temp();
    let path = write_file(&dir, "script.R", b"x <- c(1, 2)\n");
    let file = open(&path);
    assert_eq!(file.bytes(), b"x <- c(1, 2)\n");
    assert_eq!(file.path(), path.as_path());
}

#[test]
fn mapping_is_sequential_and_populated() {
    assert_eq!(
        map_flags(),
        MmapFlags::SEQUENTIAL | MmapFlags::POPULATE
    );
}

#[test]
fn maps_multi_page_file() {
    let dir = temp();
    let contents: Vec<u8> = b"value <- 42L # answer\n"
        .iter()
        .copied()
        .cycle()
        .take(5 * 4096 + 17)
        .collect();
    let path = write_file(&dir, "big.R", &contents);
    let file = open(&path);
    assert_eq!(file.bytes().len(), contents.len());
    assert!(file.bytes() == contents.as_slice());
    assert_eq!(file.buffer().len() as usize, contents.len());
}

#[test]
fn empty_file_is_not_mapped() {
    let dir = temp();
    let path = write_file(&dir, "empty.R", b"");
    let file = open(&path);
    assert!(file.bytes().is_empty());
    assert!(file.buffer().is_empty());
}

#[test]
fn buffer_keeps_invalid_utf8() {
    let dir = temp();
    let path = write_file(&dir, "latin1.R", b"caf\xE9");
    let buffer = open(&path).buffer();
    assert_eq!(buffer.as_bytes(), b"caf\xE9");
    assert_eq!(buffer.encoding_issues().len(), 1);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = temp();
    let path = dir.path().join("missing.R");
    let err = SourceFile::open(&path).err();
    match err {
        Some(SourceError::Open { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected open error, got {other:?}"),
    }
}

#[test]
fn error_message_names_the_file() {
    let dir = temp();
    let path = dir.path().join("nope.R");
    let Err(err) = SourceFile::open(&path) else {
        panic!("opening a missing file succeeded");
    };
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("nope.R"), "{err}");
    assert!(err.to_string().starts_with("cannot open"), "{err}");
}

#[test]
fn debug_shows_path_and_length() {
    let dir = temp();
    let path = write_file(&dir, "a.R", b"abc");
    let debug = format!("{:?}", open(&path));
    assert!(debug.contains("a.R"), "{debug}");
    assert!(debug.contains("len: 3"), "{debug}");
}
