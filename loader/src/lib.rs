//! vfs-static-pack is the "runtime" (2nd stage) part of the project. It
//! provides [fs::MemFs], an in-memory filesystem, filled by code generated
//! with [vfs-static-pack-packer](https://crates.io/crates/vfs-static-pack-packer).
//!
//! # How it works
//! The packer (usually run from `build.rs`) reads your files, compresses them
//! with selected scheme and writes a rust module containing:
//! - one `static` byte slice per file, holding compressed content,
//! - a `pub static FS: LazyLock<MemFs>` handle,
//! - an `init` function decompressing every file and writing it into fresh
//!   [fs::MemFs].
//!
//! Your application includes the module and accesses `FS`. On first access
//! all files are restored, later accesses are free.
//!
//! Generated code refers to decompressors through this crate re-exports
//! ([flate2], [weezl], [snap]), so depending on this crate is enough.
//!
//! # Examples
//! ```ignore
//! // build.rs generated `assets.rs` in OUT_DIR with module name `assets`
//! include!(concat!(env!("OUT_DIR"), "/assets.rs"));
//!
//! fn main() {
//!     let index = assets::FS.read_file("/index.html").unwrap();
//!     println!("{}", String::from_utf8_lossy(index));
//! }
//! ```

#![warn(missing_docs)]

pub use vfs_static_pack_common as common;
pub use vfs_static_pack_common::DEFAULT_MODE;

pub use flate2;
pub use snap;
pub use weezl;

pub mod file;
pub mod fs;

pub use fs::MemFs;
