//! Names of generated data declarations.
//!
//! Symbol is built as `FILE_<HEX>_<SCHEME>`, where `<HEX>` is uppercase hex of
//! path bytes and `<SCHEME>` uppercase scheme identifier. Hex is reversible,
//! so two different paths never share a symbol, and it only uses `[0-9A-F]`,
//! so the symbol is always a valid rust identifier.

use crate::common::scheme::CompressionScheme;

const PREFIX: &str = "FILE_";

/// Builds symbol name for asset stored under `path`.
///
/// # Examples
///
/// ```
/// # use vfs_static_pack_packer::{common::scheme::CompressionScheme, symbol::encode_path};
/// assert_eq!(
///     encode_path("/a.txt", CompressionScheme::None),
///     "FILE_2F612E747874_NONE"
/// );
/// ```
pub fn encode_path(
    path: &str,
    scheme: CompressionScheme,
) -> String {
    format!(
        "{PREFIX}{}_{}",
        hex::encode_upper(path),
        scheme.as_str().to_uppercase()
    )
}

/// Reverses [encode_path], returning path and scheme. Returns [None] if
/// `symbol` was not produced by [encode_path].
pub fn decode_path(symbol: &str) -> Option<(String, CompressionScheme)> {
    let rest = symbol.strip_prefix(PREFIX)?;
    let (path_hex, scheme) = rest.rsplit_once('_')?;

    // only uppercase is produced, reject anything else to keep mapping 1:1
    if path_hex.bytes().any(|byte| byte.is_ascii_lowercase()) {
        return None;
    }
    let scheme = CompressionScheme::ALL
        .into_iter()
        .find(|candidate| candidate.as_str().to_uppercase() == scheme)?;

    let path = String::from_utf8(hex::decode(path_hex).ok()?).ok()?;

    Some((path, scheme))
}
