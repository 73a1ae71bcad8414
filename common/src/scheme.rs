//! Compression schemes supported by the packer and understood by generated
//! code.

use std::{fmt, str::FromStr};
use thiserror::Error;

/// Compression applied to every asset of a single build.
///
/// Scheme is chosen once per builder, so generated code never has to guess
/// which algorithm to use when restoring a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CompressionScheme {
    /// Raw bytes, no compression.
    None,
    /// Raw deflate stream.
    Deflate,
    /// Gzip container around deflate.
    Gzip,
    /// LZW, lsb-first bit order, 8 bit literals.
    Lzw,
    /// Zlib container (deflate + adler32 checksum).
    Zlib,
    /// Snappy block format.
    Snappy,
}
impl CompressionScheme {
    /// All schemes, in registry order.
    pub const ALL: [CompressionScheme; 6] = [
        CompressionScheme::None,
        CompressionScheme::Deflate,
        CompressionScheme::Gzip,
        CompressionScheme::Lzw,
        CompressionScheme::Zlib,
        CompressionScheme::Snappy,
    ];

    /// Lowercase scheme identifier, as accepted by [Self::resolve].
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionScheme::None => "none",
            CompressionScheme::Deflate => "deflate",
            CompressionScheme::Gzip => "gzip",
            CompressionScheme::Lzw => "lzw",
            CompressionScheme::Zlib => "zlib",
            CompressionScheme::Snappy => "snappy",
        }
    }

    /// Resolves scheme from its name. Matching is case insensitive, so
    /// `gzip`, `GZIP` and `GzIp` all resolve to [CompressionScheme::Gzip].
    ///
    /// # Examples
    ///
    /// ```
    /// # use vfs_static_pack_common::scheme::CompressionScheme;
    /// assert_eq!(
    ///     CompressionScheme::resolve("Snappy").unwrap(),
    ///     CompressionScheme::Snappy
    /// );
    /// assert!(CompressionScheme::resolve("bzip2").is_err());
    /// ```
    pub fn resolve(name: &str) -> Result<Self, UnknownSchemeError> {
        let name_lowercase = name.to_lowercase();

        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == name_lowercase)
            .ok_or_else(|| UnknownSchemeError {
                name: name.to_owned(),
            })
    }
}
impl fmt::Display for CompressionScheme {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for CompressionScheme {
    type Err = UnknownSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// Requested scheme name does not match any of [CompressionScheme::ALL].
///
/// This is a usage error, callers should report it and let user retry with
/// corrected name.
#[derive(Error, PartialEq, Eq, Debug)]
#[error("unknown compression scheme `{name}`, expected one of: none, deflate, gzip, lzw, zlib, snappy")]
pub struct UnknownSchemeError {
    /// Name as provided by the caller.
    pub name: String,
}
