//! Error type returned by the packer library.

use crate::common::scheme::{CompressionScheme, UnknownSchemeError};
use std::io;
use thiserror::Error;

/// All failures of the packing pipeline.
///
/// Every variant carries enough context (scheme, logical path, module) to let
/// the caller decide whether to retry, skip an asset or abort the build.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested compression scheme does not exist. Reported before any I/O.
    #[error(transparent)]
    UnknownScheme(#[from] UnknownSchemeError),

    /// Logical path of an asset is not acceptable (eg. empty).
    #[error("invalid asset path {path:?}")]
    InvalidPath {
        /// Offending path.
        path: String,
    },

    /// Reading source stream or compressing it failed. Only this asset is
    /// affected, assets added before stay untouched.
    #[error("failed to encode asset `{path}` with {scheme}")]
    Encode {
        /// Logical path of the asset.
        path: String,
        /// Scheme of the builder.
        scheme: CompressionScheme,
        /// Underlying read or compression error.
        #[source]
        source: io::Error,
    },

    /// Decoding stored asset did not reproduce original content.
    #[error("asset `{path}` does not survive {scheme} round trip")]
    Verify {
        /// Logical path of the asset.
        path: String,
        /// Scheme of the builder.
        scheme: CompressionScheme,
    },

    /// Generated module failed internal validation, nothing was written.
    #[error("failed to render module `{module_name}`: {reason}")]
    Render {
        /// Name of the generated module.
        module_name: String,
        /// What was rejected.
        reason: String,
    },

    /// Output sink did not accept writes. Output may be partially written.
    #[error("failed to write generated module")]
    Io(#[from] io::Error),
}
