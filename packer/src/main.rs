//! Main packer executable, to be used as cli tool. For help run this command
//! with `-h`.

#![warn(missing_docs)]

use anyhow::{Context, Error, anyhow};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};
use vfs_static_pack_packer::{
    asset_path, builder::Builder, common::scheme::CompressionScheme, directory,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Compression applied to every file, one of: none, deflate, gzip, lzw,
    /// zlib, snappy. Case insensitive.
    #[arg(
        short,
        long,
        env = "VFS_STATIC_PACK_COMPRESSION",
        default_value = "none",
        value_parser = CompressionScheme::resolve,
    )]
    pub compression: CompressionScheme,

    /// Name of the generated module.
    #[arg(short, long, env = "VFS_STATIC_PACK_MODULE", default_value = "assets")]
    pub module: String,

    /// Output file path, `-` for stdout.
    #[arg(short, long, env = "VFS_STATIC_PACK_OUTPUT", default_value = "-")]
    pub output: PathBuf,

    /// Whether to follow links while traversing directories. If not set,
    /// uses sane defaults.
    #[arg(long)]
    pub follow_links: Option<bool>,

    /// Decode every file after compression and compare with original before
    /// writing output.
    #[arg(long)]
    pub verify: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Files and directories to be embedded. Directories are searched
    /// recursively and their files are added relative to the directory,
    /// single files are added as `/<file name>`.
    #[arg(required = true)]
    pub input_paths: Vec<PathBuf>,
}

fn main() -> Result<(), Error> {
    let arguments = Arguments::parse();

    SimpleLogger::new()
        .with_level(if arguments.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .env()
        .init()?;

    log::info!("using compression: {}", arguments.compression);

    let mut directory_search_options = directory::SearchOptions::default();
    if let Some(follow_links) = arguments.follow_links {
        directory_search_options.follow_links = follow_links;
    }

    let mut builder = Builder::new(arguments.compression, arguments.module);
    builder.init();

    for input_path in &arguments.input_paths {
        let input_path_error_context = || input_path.to_string_lossy().into_owned();

        let input_path = fs::canonicalize(input_path).with_context(input_path_error_context)?;
        if input_path.is_dir() {
            directory::add_directory(&mut builder, &input_path, &directory_search_options)
                .with_context(input_path_error_context)?;
        } else {
            add_single_file(&mut builder, &input_path).with_context(input_path_error_context)?;
        }
    }

    if arguments.verify {
        builder.verify()?;
    }

    if arguments.output == Path::new("-") {
        builder.render(io::stdout().lock())?;
    } else {
        let file = File::create(&arguments.output)
            .with_context(|| arguments.output.to_string_lossy().into_owned())?;
        let mut writer = BufWriter::new(file);
        builder.render(&mut writer)?;

        let file = writer.into_inner().map_err(|error| error.into_error())?;
        file.sync_all()?;
    }

    Ok(())
}

fn add_single_file(
    builder: &mut Builder,
    path: &Path,
) -> Result<(), Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("path has no file name"))?;
    let asset_path = asset_path::from_file_base_relative_path(Path::new(file_name))?;
    log::info!("processing file: {asset_path}");

    builder.add_file(asset_path, File::open(path)?)?;

    Ok(())
}
