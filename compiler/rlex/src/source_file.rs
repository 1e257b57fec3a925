//! Read-only memory-mapped source files.
//!
//! The mapping is requested with the sequential-access hint and populated
//! up front, since the tokenizer reads every file front to back exactly
//! once. Empty files are never mapped (a zero-length mapping is an error on
//! most platforms).

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use mmap_rs::{Mmap, MmapFlags, MmapOptions};
use rlex_core::SourceBuffer;
use tracing::debug;

/// Token offsets are `u32`, and the source buffer adds a sentinel byte.
const MAX_SOURCE_LEN: u64 = 0xFFFF_FFFE;

/// Sequential access, with every page faulted in when the file is mapped.
/// `POPULATE` is the closest mmap-rs flag to a will-need hint.
fn map_flags() -> MmapFlags {
    MmapFlags::SEQUENTIAL | MmapFlags::POPULATE
}

/// Failure to make a file's contents available for tokenizing.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read metadata of '{}': {source}", .path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{}' is too large to tokenize ({len} bytes)", .path.display())]
    TooLarge { path: PathBuf, len: u64 },

    #[error("cannot map '{}' into memory: {source}", .path.display())]
    Map {
        path: PathBuf,
        source: mmap_rs::Error,
    },
}

impl SourceError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            SourceError::Open { path, .. }
            | SourceError::Metadata { path, .. }
            | SourceError::TooLarge { path, .. }
            | SourceError::Map { path, .. } => path,
        }
    }
}

/// A file mapped read-only into memory.
///
/// The mapping lives as long as the `SourceFile`; [`bytes`](Self::bytes)
/// borrows it.
pub struct SourceFile {
    path: PathBuf,
    /// `None` for empty files.
    map: Option<Mmap>,
}

impl SourceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| SourceError::Open {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| SourceError::Metadata {
                path: path.clone(),
                source,
            })?
            .len();

        if len > MAX_SOURCE_LEN {
            return Err(SourceError::TooLarge { path, len });
        }
        if len == 0 {
            debug!(path = %path.display(), "empty source file");
            return Ok(SourceFile { path, map: None });
        }
        let Ok(size) = usize::try_from(len) else {
            return Err(SourceError::TooLarge { path, len });
        };

        #[allow(
            unsafe_code,
            reason = "file mappings are unsafe in mmap-rs; the mapping is read-only and private to this SourceFile"
        )]
        let mapped = MmapOptions::new(size).and_then(|options| {
            // SAFETY: the mapping is read-only. Truncating or rewriting the
            // file while it is mapped is outside what this tool guards
            // against, as with any mmap-based reader.
            unsafe { options.with_file(&file, 0) }
                .with_flags(map_flags())
                .map()
        });
        let map = mapped.map_err(|source| SourceError::Map {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = len, "mapped source file");
        Ok(SourceFile {
            path,
            map: Some(map),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file contents.
    pub fn bytes(&self) -> &[u8] {
        match &self.map {
            Some(map) => map.as_slice(),
            None => &[],
        }
    }

    /// Copy the contents into a [`SourceBuffer`] ready for tokenizing.
    pub fn buffer(&self) -> SourceBuffer {
        SourceBuffer::from_bytes(self.bytes())
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.bytes().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
