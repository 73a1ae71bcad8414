//! vfs-static-pack-packer is the "builder" (1st stage) part of the
//! vfs-static-pack project.
//!
//! The goal of the packer part is to collect your directories / files / memory
//! slices, compress them with selected [common::scheme::CompressionScheme] and
//! emit a rust module containing compressed bytes and code restoring them
//! into an in-memory filesystem ([vfs-static-pack](https://crates.io/crates/vfs-static-pack)
//! `MemFs`) when your program first accesses it. Your target application
//! `include!`s the module and has no runtime file dependency.
//!
//! This crate is usually used in build script / CI / build.rs stage, not in
//! your target application.
//!
//! This crate can be used in two ways:
//! - As a standalone application, installed with `cargo install`, this is the
//!   preferred way if you are using build scripts, CI pipeline etc.
//! - As a library, imported to your project, this is a way to go if you want to
//!   use it in build.rs of your target application.
//!
//! # Using as a standalone application
//!
//! `vfs-static-pack-packer` provides up to date documentation with `$
//! vfs-static-pack-packer --help`. Pass any number of files and directories,
//! directories are searched recursively:
//! ```text
//! $ vfs-static-pack-packer \
//!     --compression gzip \
//!     --module assets \
//!     --output src/assets.rs \
//!     ./gui/build
//! ```
//! Files from `./gui/build` end up as `/index.html`, `/css/style.css`, etc.
//! A single file argument is added as `/<file name>`.
//!
//! # Using as a library
//! Create [builder::Builder], declare filesystem handle with
//! [builder::Builder::init], add files with [builder::Builder::add_file] or
//! whole directories with [directory::add_directory] and finally write the
//! module with [builder::Builder::render].
//!
//! ### Examples
//! ```no_run
//! # use anyhow::Error;
//! # use std::{fs::File, path::PathBuf};
//! # use vfs_static_pack_packer::{
//! #     builder::Builder,
//! #     common::scheme::CompressionScheme,
//! #     directory::{add_directory, SearchOptions},
//! # };
//!
//! # fn main() -> Result<(), Error> {
//! // start with empty builder
//! let mut builder = Builder::new(CompressionScheme::Snappy, "assets");
//! builder.init();
//!
//! // add files with directory search and default options
//! add_directory(&mut builder, &PathBuf::from("gui/build"), &SearchOptions::default())?;
//!
//! // write module to be included by the target app
//! let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
//! builder.render(File::create(out_dir.join("assets.rs"))?)?;
//! # Ok(())
//! # }
//! ```
//!
//! Then in the target application:
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/assets.rs"));
//!
//! let index = assets::FS.read_file("/index.html");
//! ```

#![warn(missing_docs)]

pub use vfs_static_pack_common as common;

pub mod asset_path;
pub mod builder;
pub mod codec;
pub mod directory;
pub mod emit;
pub mod error;
pub mod symbol;
