//! Asset path contains custom type for representing logical path of an asset.

use std::{borrow::Borrow, fmt, ops::Deref};

/// [AssetPath] represents the path under which an asset is restored in the
/// in-memory filesystem, eg. `/css/style.css`.
///
/// Custom type is used to keep logical paths apart from fs paths of the
/// source files. Logical paths always use `/` as separator. Use [normalize]
/// to get the canonical form, under which the file is stored.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AssetPath {
    inner: String,
}
impl AssetPath {
    /// Construct path from string representation. Refer to [self] for details.
    pub fn from_string(inner: String) -> Self {
        Self { inner }
    }

    /// Consumes [self] returning inner string.
    pub fn into_string(self) -> String {
        self.inner
    }
}

impl Deref for AssetPath {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl Borrow<str> for AssetPath {
    fn borrow(&self) -> &str {
        self.inner.as_str()
    }
}
impl From<&str> for AssetPath {
    fn from(value: &str) -> Self {
        Self::from_string(value.to_owned())
    }
}
impl fmt::Display for AssetPath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Returns canonical form of logical `path`: leading `/` is added when
/// missing, repeated and trailing separators are removed. `a.txt`, `/a.txt`
/// and `//a.txt` all become `/a.txt`.
///
/// Path without any name (eg. empty or `///`) becomes `/`, which does not
/// denote a file.
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for component in path.split('/').filter(|component| !component.is_empty()) {
        normalized.push('/');
        normalized.push_str(component);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}
