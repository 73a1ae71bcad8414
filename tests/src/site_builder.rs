// Shared between build.rs (generating modules included by this crate) and
// tests (rendering the same modules again).

use anyhow::{Context, Error};
use std::path::{Path, PathBuf};
use vfs_static_pack_packer::{
    builder::Builder,
    common::scheme::CompressionScheme,
    directory::{SearchOptions, add_directory},
};

/// Length of pseudo random payload added to every site module.
pub const RANDOM_LENGTH: usize = 10_000;
/// Logical path of pseudo random payload.
pub const RANDOM_PATH: &str = "/random.bin";

/// `data/site`, relative to this crate.
pub fn site_directory(manifest_dir: &Path) -> PathBuf {
    manifest_dir.join("data").join("site")
}

/// Name of module holding `data/site` packed with `scheme`.
pub fn site_module_name(scheme: CompressionScheme) -> String {
    format!("site_{}", scheme.as_str())
}

/// Builds `data/site` + random payload with given scheme.
pub fn build_site(
    manifest_dir: &Path,
    scheme: CompressionScheme,
    random: &[u8],
) -> Result<Builder, Error> {
    let mut builder = Builder::new(scheme, site_module_name(scheme));
    builder.init();

    add_directory(
        &mut builder,
        &site_directory(manifest_dir),
        &SearchOptions::default(),
    )
    .context("add_directory")?;
    builder
        .add_content(RANDOM_PATH.into(), random)
        .context("random payload")?;

    builder.verify()?;

    Ok(builder)
}
