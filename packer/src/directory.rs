//! Directory helpers. Contains [search] function, used to gather files from
//! directory recursively, and [add_directory] feeding them into [Builder].

use crate::{asset_path, builder::Builder, common::asset_path::AssetPath};
use anyhow::{Context, Error};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Settings for [search] function.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct SearchOptions {
    /// Whether to follow links while traversing directories.
    pub follow_links: bool,
}
impl Default for SearchOptions {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

/// Searches fs recursively and builds [AssetPath] for each file.
///
/// Traverses directory specified in `path` using [SearchOptions]. Paths are
/// created by stripping `path` from full file path. Entries are visited in
/// file name order, so results do not depend on platform or fs.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use vfs_static_pack_packer::directory::{search, SearchOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// // traverse directory from tests
/// let files = search(
///     &PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///         .parent()
///         .unwrap()
///         .join("tests")
///         .join("data")
///         .join("site"),
///     &SearchOptions::default(),
/// )?;
///
/// let asset_paths = files
///     .iter()
///     .map(|(asset_path, _)| &**asset_path)
///     .collect::<Vec<_>>();
/// assert!(asset_paths.contains(&"/index.html"));
/// assert!(asset_paths.contains(&"/css/style.css"));
/// #
/// # Ok(())
/// # }
/// ```
pub fn search(
    path: &Path,
    options: &SearchOptions,
) -> Result<Box<[(AssetPath, PathBuf)]>, Error> {
    let files = WalkDir::new(path)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .map(|file_entry| {
            // detect search errors
            let file_entry = file_entry?;

            // we are interested in files only
            // if follow_links is true, this will be resolved as link target
            if !file_entry.file_type().is_file() {
                return Ok(None);
            }

            // strip prefix, so entry path is relative to search root
            let file_base_relative_path = file_entry
                .path()
                .strip_prefix(path)
                .context("resolve file_base_relative_path")?;
            let asset_path = asset_path::from_file_base_relative_path(file_base_relative_path)
                .with_context(|| file_entry.path().to_string_lossy().into_owned())?;

            // yield for processing
            Ok(Some((asset_path, file_entry.into_path())))
        })
        .filter_map(|entry_result| entry_result.transpose()) // strips Ok(None)
        .collect::<Result<Box<[_]>, Error>>()?;

    Ok(files)
}

/// Adds all files found by [search] in `path` to `builder`. Returns number of
/// files added.
pub fn add_directory(
    builder: &mut Builder,
    path: &Path,
    options: &SearchOptions,
) -> Result<usize, Error> {
    log::info!("processing directory: {}", path.to_string_lossy());

    let files = search(path, options)?;
    for (asset_path, fs_path) in files.iter() {
        log::info!("adding file: {asset_path}");

        let file_error_context = || fs_path.to_string_lossy().into_owned();
        let file = File::open(fs_path).with_context(file_error_context)?;
        builder
            .add_file(asset_path.clone(), file)
            .with_context(file_error_context)?;
    }

    Ok(files.len())
}
