//! Packs data/site with selected compression scheme and prints resulting
//! module to stdout.
//!
//! `cargo run --example site_packer -- snappy`

use anyhow::Error;
use simple_logger::SimpleLogger;
use std::{env, io};
use vfs_static_pack_common::scheme::CompressionScheme;
use vfs_static_pack_tests::{RANDOM, manifest_dir, site_builder::build_site};

fn main() -> Result<(), Error> {
    SimpleLogger::new().init()?;

    let scheme = match env::args().nth(1) {
        Some(name) => CompressionScheme::resolve(&name)?,
        None => CompressionScheme::Gzip,
    };

    log::trace!("building site");
    let builder = build_site(manifest_dir(), scheme, RANDOM)?;

    log::trace!("rendering module");
    builder.render(io::stdout().lock())?;

    Ok(())
}
