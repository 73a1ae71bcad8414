#![doc(hidden)]

pub mod site_builder;

use std::path::{Path, PathBuf};
use vfs_static_pack::MemFs;
use vfs_static_pack_common::scheme::CompressionScheme;

// modules generated by build.rs
include!(concat!(env!("OUT_DIR"), "/site_none.rs"));
include!(concat!(env!("OUT_DIR"), "/site_deflate.rs"));
include!(concat!(env!("OUT_DIR"), "/site_gzip.rs"));
include!(concat!(env!("OUT_DIR"), "/site_lzw.rs"));
include!(concat!(env!("OUT_DIR"), "/site_zlib.rs"));
include!(concat!(env!("OUT_DIR"), "/site_snappy.rs"));
include!(concat!(env!("OUT_DIR"), "/empty.rs"));
include!(concat!(env!("OUT_DIR"), "/hello.rs"));
include!(concat!(env!("OUT_DIR"), "/random_gzip.rs"));

/// Payload added as `/random.bin` to every site module and as `/b.bin` to
/// `random_gzip`.
pub static RANDOM: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/random.bin"));

pub fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}
pub fn site_directory() -> PathBuf {
    site_builder::site_directory(manifest_dir())
}

// filesystem restored from `data/site` module packed with `scheme`
pub fn site_fs(scheme: CompressionScheme) -> &'static MemFs {
    match scheme {
        CompressionScheme::None => &*site_none::FS,
        CompressionScheme::Deflate => &*site_deflate::FS,
        CompressionScheme::Gzip => &*site_gzip::FS,
        CompressionScheme::Lzw => &*site_lzw::FS,
        CompressionScheme::Zlib => &*site_zlib::FS,
        CompressionScheme::Snappy => &*site_snappy::FS,
    }
}

// source of module generated by build.rs, eg. `site_gzip.rs`
pub fn generated_source(file_name: &str) -> String {
    let path = PathBuf::from(env!("OUT_DIR")).join(file_name);
    std::fs::read_to_string(path).unwrap()
}
