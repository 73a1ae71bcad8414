//! Common crate, containing types shared between
//! [vfs-static-pack](https://crates.io/crates/vfs-static-pack) (the runtime)
//! and [vfs-static-pack-packer](https://crates.io/crates/vfs-static-pack-packer)
//! (the build time code generator).
//!
//! The packer reads files, compresses them with one of
//! [scheme::CompressionScheme] and emits a rust module holding compressed
//! bytes plus logic restoring them into an in-memory filesystem. Both sides
//! need to agree on scheme names, on how logical paths look
//! ([asset_path::AssetPath]) and on permissions given to restored files
//! ([DEFAULT_MODE]).

#![warn(missing_docs)]

pub mod asset_path;
pub mod scheme;

/// Permissions given to every file restored into the in-memory filesystem,
/// `rwxrwxrwx`.
pub const DEFAULT_MODE: u32 = 0o777;
