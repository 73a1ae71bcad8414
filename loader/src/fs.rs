//! In-memory filesystem related types. Provides [MemFs].

use crate::{common::asset_path::normalize, file::MemFile};
use std::{
    collections::BTreeMap,
    io::{self, Cursor},
};

/// Memory backed filesystem, a flat map from path to [MemFile].
///
/// Generated code creates it with [MemFs::new] and fills it with
/// [MemFs::write_file]. Your application reads it with [MemFs::read_file],
/// [MemFs::open] or [MemFs::get_file_by_path].
///
/// Paths are normalized before use: leading `/` is added when missing and
/// repeated separators are collapsed, so `a.txt`, `/a.txt` and `//a.txt`
/// denote the same file.
///
/// # Examples
///
/// ```
/// # use vfs_static_pack::{fs::MemFs, DEFAULT_MODE};
/// let mut fs = MemFs::new();
/// fs.write_file("/a.txt", b"hello", DEFAULT_MODE).unwrap();
///
/// assert_eq!(fs.read_file("/a.txt"), Some(b"hello".as_slice()));
/// assert_eq!(fs.read_file("a.txt"), Some(b"hello".as_slice()));
/// assert!(fs.read_file("/b.txt").is_none());
/// ```
#[derive(Default, Debug)]
pub struct MemFs {
    files_by_path: BTreeMap<String, MemFile>,
}
impl MemFs {
    /// Creates empty filesystem.
    pub fn new() -> Self {
        let files_by_path = BTreeMap::<String, MemFile>::new();

        Self { files_by_path }
    }

    /// Creates or overwrites file under `path`, storing a copy of `content`.
    ///
    /// Returns [io::ErrorKind::InvalidInput] for path without any name, eg.
    /// empty or `/`.
    pub fn write_file(
        &mut self,
        path: &str,
        content: &[u8],
        mode: u32,
    ) -> io::Result<()> {
        let path = normalize(path);
        if path == "/" {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file path must not be empty",
            ));
        }

        self.files_by_path
            .insert(path, MemFile::new(content.into(), mode));

        Ok(())
    }

    /// Given path, eg. `/dir1/file.html` returns file associated with this
    /// path. Returns [None] if file does not exist.
    pub fn get_file_by_path(
        &self,
        path: &str,
    ) -> Option<&MemFile> {
        self.files_by_path.get(normalize(path).as_str())
    }

    /// Returns content of file under `path`, [None] if file does not exist.
    pub fn read_file(
        &self,
        path: &str,
    ) -> Option<&[u8]> {
        let file = self.get_file_by_path(path)?;
        Some(file.content())
    }

    /// Opens file for reading with [io::Read] / [io::Seek].
    pub fn open(
        &self,
        path: &str,
    ) -> io::Result<Cursor<&[u8]>> {
        let content = self.read_file(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{path}: file not found"))
        })?;
        Ok(Cursor::new(content))
    }

    /// Whether file under `path` exists.
    pub fn contains(
        &self,
        path: &str,
    ) -> bool {
        self.get_file_by_path(path).is_some()
    }

    /// Iterates over all stored (normalized) paths, in lexicographical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files_by_path.keys().map(|path| path.as_str())
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files_by_path.len()
    }
    /// Whether filesystem holds no files.
    pub fn is_empty(&self) -> bool {
        self.files_by_path.is_empty()
    }
}
