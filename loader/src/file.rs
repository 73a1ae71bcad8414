//! Single file related types. Provides [MemFile].

/// File stored in [crate::fs::MemFs]: restored content plus permissions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MemFile {
    content: Box<[u8]>,
    mode: u32,
}
impl MemFile {
    /// Creates file from content and unix-like permission bits.
    pub fn new(
        content: Box<[u8]>,
        mode: u32,
    ) -> Self {
        Self { content, mode }
    }

    /// Accesses file content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }
    /// Permission bits file was written with, eg. `0o777`.
    pub fn mode(&self) -> u32 {
        self.mode
    }
    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }
    /// Whether file is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
