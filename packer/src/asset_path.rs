//! Conversion of files found on disk into logical [AssetPath]s.

use crate::common::asset_path::AssetPath;
use anyhow::{Error, anyhow, ensure};
use std::path::{Component, Path};

/// Maps `relative`, a path of a file below the searched directory, to the
/// logical path the file is restored under. Every component becomes a
/// `/`-prefixed segment, regardless of the platform separator.
///
/// Fails for absolute paths, `.` / `..` components, names that are not valid
/// UTF-8 and for an empty path.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::Path;
/// # use vfs_static_pack_packer::asset_path::from_file_base_relative_path;
/// #
/// # fn main() -> Result<(), Error> {
/// let asset_path = from_file_base_relative_path(Path::new("css/style.css"))?;
/// assert_eq!(&*asset_path, "/css/style.css");
/// #
/// # Ok(())
/// # }
/// ```
pub fn from_file_base_relative_path(relative: &Path) -> Result<AssetPath, Error> {
    ensure!(
        relative.is_relative(),
        "expected path relative to searched directory, got {:?}",
        relative
    );

    let mut asset_path = String::new();
    for component in relative.components() {
        let Component::Normal(name) = component else {
            return Err(anyhow!(
                "unsupported component {:?} in {:?}",
                component,
                relative
            ));
        };
        let name = name
            .to_str()
            .ok_or_else(|| anyhow!("file name {:?} is not valid utf-8", name))?;

        asset_path.push('/');
        asset_path.push_str(name);
    }
    ensure!(!asset_path.is_empty(), "path has no file name");

    Ok(AssetPath::from_string(asset_path))
}
