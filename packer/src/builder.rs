//! Builder helpers. Contains [Builder], which collects assets and renders
//! them into a rust module.

use crate::{
    codec::{self, BUF_OUT_BINDING, Codec, FS_BINDING, RUNTIME_CRATE},
    common::{
        asset_path::{self, AssetPath},
        scheme::CompressionScheme,
    },
    emit::{Expr, Item, SourceFile, Statement, Visibility},
    error::Error,
    symbol,
};
use indexmap::IndexMap;
use sha3::{Digest, Sha3_256};
use std::io;

/// Comment placed at the top of every generated file.
pub const HEADER: &str = "This file is generated - do not edit.";
/// Name of the process-wide filesystem handle in generated module.
pub const FS_HANDLE: &str = "FS";

const INIT_FN: &str = "init";

/// Single encoded file, as stored in [Builder].
#[derive(Debug)]
pub struct Asset {
    path: AssetPath,
    symbol: String,
    content_length: usize,
    content_digest: String,
    encoded: Box<[u8]>,
}
impl Asset {
    /// Logical path the asset will be restored under.
    pub fn path(&self) -> &AssetPath {
        &self.path
    }
    /// Name of the generated static holding [Self::encoded].
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
    /// Length of original (not encoded) content.
    pub fn content_length(&self) -> usize {
        self.content_length
    }
    /// Hex sha3-256 of original content.
    pub fn content_digest(&self) -> &str {
        &self.content_digest
    }
    /// Content after applying builder codec.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }
}

/// Main builder for generated module. Inside it keeps list of [Asset] under
/// respective [AssetPath], in insertion order.
///
/// Intended use is:
/// 1. [Builder::new] with selected scheme and module name.
/// 2. [Builder::init] once, declaring filesystem handle.
/// 3. [Builder::add_file] for each file.
/// 4. [Builder::render] once, writing the module.
///
/// Adding the same path twice replaces previous asset: the latest content
/// wins and the asset moves to the end of the list, as if the first call never
/// happened.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use vfs_static_pack_packer::{builder::Builder, common::scheme::CompressionScheme};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut builder = Builder::new(CompressionScheme::None, "assets");
/// builder.init();
/// builder.add_file("/a.txt".into(), b"hello".as_slice())?;
///
/// let mut output = Vec::new();
/// builder.render(&mut output)?;
///
/// let output = String::from_utf8(output)?;
/// assert!(output.contains("pub mod assets {"));
/// assert!(output.contains("0x68, 0x65, 0x6c, 0x6c, 0x6f,"));
/// #
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Builder {
    codec: &'static dyn Codec,
    module_name: String,
    header: Vec<Item<'static>>,
    assets: IndexMap<AssetPath, Asset>,
}
impl Builder {
    /// Creates empty [self] to be filled with files.
    pub fn new(
        scheme: CompressionScheme,
        module_name: impl Into<String>,
    ) -> Self {
        let codec = codec::for_scheme(scheme);
        let module_name = module_name.into();
        let header = Vec::<Item<'static>>::new();
        let assets = IndexMap::<AssetPath, Asset>::new();

        Self {
            codec,
            module_name,
            header,
            assets,
        }
    }

    /// Same as [Self::new], with scheme looked up by its name, case
    /// insensitive. Unknown name is reported as [Error::UnknownScheme].
    pub fn from_scheme_name(
        scheme_name: &str,
        module_name: impl Into<String>,
    ) -> Result<Self, Error> {
        let scheme = CompressionScheme::resolve(scheme_name)?;
        Ok(Self::new(scheme, module_name))
    }

    /// Declares runtime import and process-wide filesystem handle.
    ///
    /// Should be called exactly once. Calling it again declares everything
    /// again, producing module that won't compile.
    pub fn init(&mut self) {
        self.header.push(Item::Use(vec![
            RUNTIME_CRATE.to_owned(),
            "MemFs".to_owned(),
        ]));
        self.header.push(Item::Static {
            visibility: Visibility::Public,
            name: FS_HANDLE.to_owned(),
            ty: "::std::sync::LazyLock<MemFs>".to_owned(),
            value: Expr::path(["std", "sync", "LazyLock", "new"]).call([Expr::ident(INIT_FN)
                .call([])
                .method(
                    "expect",
                    [Expr::Str(format!(
                        "failed to restore embedded assets of module `{}`",
                        self.module_name
                    ))],
                )
                .closure()]),
        });
    }

    /// Reads `reader` to the end and adds its content as asset under `path`.
    ///
    /// `path` is normalized with [asset_path::normalize], so `a.txt` and
    /// `/a.txt` denote the same asset. Path without any name (eg. empty or
    /// `/`) is rejected with [Error::InvalidPath].
    ///
    /// Read or compression failure aborts only this asset and is reported as
    /// [Error::Encode], previously added assets stay untouched.
    pub fn add_file(
        &mut self,
        path: AssetPath,
        mut reader: impl io::Read,
    ) -> Result<(), Error> {
        let path = Self::normalize_path(path)?;

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|source| self.encode_error(&path, source))?;

        self.add_content(path, &content)
    }

    /// Adds `content` as asset under `path`. Same as [Self::add_file], for
    /// content already in memory.
    pub fn add_content(
        &mut self,
        path: AssetPath,
        content: &[u8],
    ) -> Result<(), Error> {
        let path = Self::normalize_path(path)?;

        let encoded = self
            .codec
            .encode(content)
            .map_err(|source| self.encode_error(&path, source))?
            .into_boxed_slice();
        log::debug!(
            "copied {} bytes into {} compressor",
            content.len(),
            self.codec.scheme()
        );

        let symbol = symbol::encode_path(&path, self.codec.scheme());
        log::debug!("wrote {} bytes to static {}", encoded.len(), symbol);

        let asset = Asset {
            path: path.clone(),
            symbol,
            content_length: content.len(),
            content_digest: content_digest(content),
            encoded,
        };

        // keep position of the latest write
        if self.assets.shift_remove(&path).is_some() {
            log::warn!("asset {path} added again, replacing previous content");
        }
        self.assets.insert(path, asset);

        Ok(())
    }

    /// Decodes every asset at build time and checks whether it matches
    /// original content.
    pub fn verify(&self) -> Result<(), Error> {
        for asset in self.assets.values() {
            let verify_error = || Error::Verify {
                path: asset.path.to_string(),
                scheme: self.codec.scheme(),
            };

            let decoded = self
                .codec
                .decode(&asset.encoded)
                .map_err(|_| verify_error())?;
            if decoded.len() != asset.content_length
                || content_digest(&decoded) != asset.content_digest
            {
                return Err(verify_error());
            }
        }

        log::debug!("verified {} assets", self.assets.len());
        Ok(())
    }

    /// Renders module into `sink`.
    ///
    /// Module contains declarations from [Self::init], one static per asset
    /// and `init` function restoring all assets in insertion order.
    ///
    /// Nothing is written if generated code fails validation
    /// ([Error::Render]). If `sink` fails ([Error::Io]) it may end up with
    /// partial output.
    pub fn render(
        &self,
        mut sink: impl io::Write,
    ) -> Result<(), Error> {
        let mut items: Vec<Item<'_>> = self.header.clone();
        items.extend(self.assets.values().map(|asset| Item::Bytes {
            name: asset.symbol.clone(),
            content: &asset.encoded,
        }));
        items.push(self.init_fn());

        let source_file = SourceFile {
            header: HEADER.to_owned(),
            module_name: self.module_name.clone(),
            items,
        };
        let source = source_file.render().map_err(|reason| Error::Render {
            module_name: self.module_name.clone(),
            reason,
        })?;

        sink.write_all(source.as_bytes())?;
        sink.flush()?;

        log::info!(
            "rendered module {} with {} assets ({}), {} bytes",
            self.module_name,
            self.assets.len(),
            self.codec.scheme(),
            source.len()
        );

        Ok(())
    }

    /// Scheme used by this builder.
    pub fn scheme(&self) -> CompressionScheme {
        self.codec.scheme()
    }
    /// Name of generated module.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }
    /// Iterates over assets, in render order.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }
    /// Number of assets added.
    pub fn len(&self) -> usize {
        self.assets.len()
    }
    /// Whether no asset was added.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn normalize_path(path: AssetPath) -> Result<AssetPath, Error> {
        let normalized = asset_path::normalize(&path);
        if normalized == "/" {
            return Err(Error::InvalidPath {
                path: path.into_string(),
            });
        }
        Ok(AssetPath::from_string(normalized))
    }
    fn encode_error(
        &self,
        path: &AssetPath,
        source: io::Error,
    ) -> Error {
        Error::Encode {
            path: path.to_string(),
            scheme: self.codec.scheme(),
            source,
        }
    }

    // fn init() -> ::std::io::Result<::vfs_static_pack::MemFs>
    fn init_fn(&self) -> Item<'static> {
        let mut body = Vec::<Statement>::new();

        body.push(Statement::let_mut(
            FS_BINDING,
            Expr::path([RUNTIME_CRATE, "MemFs", "new"]).call([]),
        ));
        let shared_declarations = self.codec.shared_declarations();
        let shared_buffer = if shared_declarations.is_empty() {
            "none"
        } else {
            BUF_OUT_BINDING
        };
        body.extend(shared_declarations);
        body.extend(self.assets.values().map(|asset| {
            Statement::Block(self.codec.decode_statements(&asset.symbol, &asset.path))
        }));
        body.extend(self.codec.shared_cleanup());
        body.push(Statement::Tail(
            Expr::path(["std", "result", "Result", "Ok"]).call([Expr::ident(FS_BINDING)]),
        ));

        log::debug!(
            "init restores {} assets, shared buffer: {}",
            self.assets.len(),
            shared_buffer
        );

        Item::Fn {
            visibility: Visibility::Private,
            name: INIT_FN.to_owned(),
            ret: Some(format!("::std::io::Result<::{RUNTIME_CRATE}::MemFs>")),
            body,
        }
    }
}

/// Calculates hex sha3-256 of content.
fn content_digest(content: &[u8]) -> String {
    let mut digest = Sha3_256::new();
    digest.update(content);
    let digest = digest.finalize();
    format!("{:x}", &digest)
}
