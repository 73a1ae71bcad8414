//! Codecs. Contains [Codec] trait, one implementation per
//! [CompressionScheme] and the [registry] of them.
//!
//! Each codec has two sides which must always match:
//! - build time [Codec::encode] (and its mirror [Codec::decode], used for
//!   verification),
//! - runtime logic, emitted as [Statement]s by [Codec::decode_statements],
//!   executed by generated code when the in-memory filesystem is created.

use crate::{
    common::scheme::CompressionScheme,
    emit::{Expr, Statement},
};
use flate2::{
    Compression,
    read::{DeflateDecoder, GzDecoder, ZlibDecoder},
    write::{DeflateEncoder, GzEncoder, ZlibEncoder},
};
use std::{
    fmt,
    io::{self, Read, Write},
};

/// Name of the runtime crate, as visible from generated code.
pub const RUNTIME_CRATE: &str = "vfs_static_pack";
/// Name of the local [MemFs] binding inside generated `init` function.
///
/// [MemFs]: https://docs.rs/vfs-static-pack/latest/vfs_static_pack/fs/struct.MemFs.html
pub const FS_BINDING: &str = "fs";
/// Name of the output buffer shared by stream codecs.
pub const BUF_OUT_BINDING: &str = "buf_out";

const DECODER_BINDING: &str = "decoder";
const DECODED_BINDING: &str = "decoded";

/// Compression capability for a single scheme.
pub trait Codec: fmt::Debug + Sync {
    /// Scheme implemented by this codec.
    fn scheme(&self) -> CompressionScheme;

    /// Compresses `content`. Output decoded with [Self::decode] (or by
    /// statements from [Self::decode_statements]) is exactly `content`.
    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>>;
    /// Reverses [Self::encode]. Does the same as emitted statements, but at
    /// build time.
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>>;

    /// Statements executed once, before any asset is restored.
    fn shared_declarations(&self) -> Vec<Statement> {
        Vec::new()
    }
    /// Statements restoring single asset from static `symbol` and writing it
    /// to the filesystem under `path`. Statements will be placed in their own
    /// block.
    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement>;
    /// Statements executed once, after all assets are restored.
    fn shared_cleanup(&self) -> Vec<Statement> {
        Vec::new()
    }
}

/// Returns all codecs, one per each of [CompressionScheme::ALL].
pub fn registry() -> &'static [&'static dyn Codec] {
    static REGISTRY: [&dyn Codec; 6] = [
        &NoneCodec,
        &DeflateCodec,
        &GzipCodec,
        &LzwCodec,
        &ZlibCodec,
        &SnappyCodec,
    ];
    &REGISTRY
}

/// Looks up codec for `scheme` in [registry].
pub fn for_scheme(scheme: CompressionScheme) -> &'static dyn Codec {
    // registry follows order of [CompressionScheme::ALL]
    let index = match scheme {
        CompressionScheme::None => 0,
        CompressionScheme::Deflate => 1,
        CompressionScheme::Gzip => 2,
        CompressionScheme::Lzw => 3,
        CompressionScheme::Zlib => 4,
        CompressionScheme::Snappy => 5,
    };
    registry()[index]
}

// `::vfs_static_pack::<segments>`
fn runtime_path<'s>(segments: impl IntoIterator<Item = &'s str>) -> Expr {
    Expr::path([RUNTIME_CRATE].into_iter().chain(segments))
}

// `fs.write_file("path", content, ::vfs_static_pack::DEFAULT_MODE)?;`
fn write_file_statement(
    path: &str,
    content: Expr,
) -> Statement {
    Statement::Expr(
        Expr::ident(FS_BINDING)
            .method(
                "write_file",
                [Expr::str(path), content, runtime_path(["DEFAULT_MODE"])],
            )
            .try_(),
    )
}

// `.map_err(::std::io::Error::other)?`
fn into_io_result(expr: Expr) -> Expr {
    expr.method(
        "map_err",
        [Expr::path(["std", "io", "Error", "other"])],
    )
    .try_()
}

/// No compression, data is written directly.
#[derive(Debug)]
pub struct NoneCodec;
impl Codec for NoneCodec {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::None
    }

    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>> {
        Ok(content.to_vec())
    }
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>> {
        Ok(encoded.to_vec())
    }

    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement> {
        vec![write_file_statement(path, Expr::ident(symbol))]
    }
}

// Shared parts of flate2 based codecs. All of them decode by streaming into
// `buf_out`, declared once per module.

fn stream_shared_declarations() -> Vec<Statement> {
    vec![Statement::Let {
        name: BUF_OUT_BINDING.to_owned(),
        mutable: true,
        ty: Some("::std::vec::Vec<u8>".to_owned()),
        value: Expr::path(["std", "vec", "Vec", "new"]).call([]),
    }]
}
fn stream_decode_statements(
    decoder: &str,
    symbol: &str,
    path: &str,
) -> Vec<Statement> {
    vec![
        Statement::Expr(Expr::ident(BUF_OUT_BINDING).method("clear", [])),
        Statement::let_mut(
            DECODER_BINDING,
            runtime_path(["flate2", "read", decoder, "new"]).call([Expr::ident(symbol)]),
        ),
        Statement::Expr(
            Expr::path(["std", "io", "Read", "read_to_end"])
                .call([
                    Expr::ident(DECODER_BINDING).reference_mut(),
                    Expr::ident(BUF_OUT_BINDING).reference_mut(),
                ])
                .try_(),
        ),
        write_file_statement(path, Expr::ident(BUF_OUT_BINDING).reference()),
        Statement::Expr(Expr::path(["std", "mem", "drop"]).call([Expr::ident(DECODER_BINDING)])),
    ]
}
fn stream_shared_cleanup() -> Vec<Statement> {
    vec![Statement::Expr(
        Expr::path(["std", "mem", "drop"]).call([Expr::ident(BUF_OUT_BINDING)]),
    )]
}
fn stream_encode<W: Write>(
    mut encoder: W,
    content: &[u8],
) -> io::Result<W> {
    encoder.write_all(content)?;
    Ok(encoder)
}
fn stream_decode(mut decoder: impl Read) -> io::Result<Vec<u8>> {
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(decoded)
}

/// Raw deflate stream, default compression level.
#[derive(Debug)]
pub struct DeflateCodec;
impl Codec for DeflateCodec {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::Deflate
    }

    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>> {
        stream_encode(DeflateEncoder::new(Vec::new(), Compression::default()), content)?.finish()
    }
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>> {
        stream_decode(DeflateDecoder::new(encoded))
    }

    fn shared_declarations(&self) -> Vec<Statement> {
        stream_shared_declarations()
    }
    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement> {
        stream_decode_statements("DeflateDecoder", symbol, path)
    }
    fn shared_cleanup(&self) -> Vec<Statement> {
        stream_shared_cleanup()
    }
}

/// Gzip container, default compression level.
#[derive(Debug)]
pub struct GzipCodec;
impl Codec for GzipCodec {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::Gzip
    }

    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>> {
        stream_encode(GzEncoder::new(Vec::new(), Compression::default()), content)?.finish()
    }
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>> {
        stream_decode(GzDecoder::new(encoded))
    }

    fn shared_declarations(&self) -> Vec<Statement> {
        stream_shared_declarations()
    }
    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement> {
        stream_decode_statements("GzDecoder", symbol, path)
    }
    fn shared_cleanup(&self) -> Vec<Statement> {
        stream_shared_cleanup()
    }
}

/// Zlib container, checksum is validated while decoding.
#[derive(Debug)]
pub struct ZlibCodec;
impl Codec for ZlibCodec {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::Zlib
    }

    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>> {
        stream_encode(ZlibEncoder::new(Vec::new(), Compression::default()), content)?.finish()
    }
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>> {
        stream_decode(ZlibDecoder::new(encoded))
    }

    fn shared_declarations(&self) -> Vec<Statement> {
        stream_shared_declarations()
    }
    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement> {
        stream_decode_statements("ZlibDecoder", symbol, path)
    }
    fn shared_cleanup(&self) -> Vec<Statement> {
        stream_shared_cleanup()
    }
}

const LZW_BIT_ORDER: weezl::BitOrder = weezl::BitOrder::Lsb;
const LZW_LITERAL_WIDTH: u8 = 8;

/// LZW, lsb-first bit order, 8 bit literal width.
#[derive(Debug)]
pub struct LzwCodec;
impl Codec for LzwCodec {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::Lzw
    }

    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>> {
        weezl::encode::Encoder::new(LZW_BIT_ORDER, LZW_LITERAL_WIDTH)
            .encode(content)
            .map_err(io::Error::other)
    }
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>> {
        weezl::decode::Decoder::new(LZW_BIT_ORDER, LZW_LITERAL_WIDTH)
            .decode(encoded)
            .map_err(io::Error::other)
    }

    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement> {
        vec![
            Statement::let_mut(
                DECODER_BINDING,
                runtime_path(["weezl", "decode", "Decoder", "new"]).call([
                    runtime_path(["weezl", "BitOrder", "Lsb"]),
                    Expr::Int(LZW_LITERAL_WIDTH.into()),
                ]),
            ),
            Statement::let_(
                DECODED_BINDING,
                into_io_result(
                    Expr::ident(DECODER_BINDING).method("decode", [Expr::ident(symbol)]),
                ),
            ),
            write_file_statement(path, Expr::ident(DECODED_BINDING).reference()),
        ]
    }
}

/// Snappy, block format.
#[derive(Debug)]
pub struct SnappyCodec;
impl Codec for SnappyCodec {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::Snappy
    }

    fn encode(
        &self,
        content: &[u8],
    ) -> io::Result<Vec<u8>> {
        snap::raw::Encoder::new()
            .compress_vec(content)
            .map_err(io::Error::other)
    }
    fn decode(
        &self,
        encoded: &[u8],
    ) -> io::Result<Vec<u8>> {
        snap::raw::Decoder::new()
            .decompress_vec(encoded)
            .map_err(io::Error::other)
    }

    fn decode_statements(
        &self,
        symbol: &str,
        path: &str,
    ) -> Vec<Statement> {
        vec![
            Statement::let_mut(
                DECODER_BINDING,
                runtime_path(["snap", "raw", "Decoder", "new"]).call([]),
            ),
            Statement::let_(
                DECODED_BINDING,
                into_io_result(
                    Expr::ident(DECODER_BINDING)
                        .method("decompress_vec", [Expr::ident(symbol)]),
                ),
            ),
            write_file_statement(path, Expr::ident(DECODED_BINDING).reference()),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::{for_scheme, registry};
    use crate::{common::scheme::CompressionScheme, emit::Statement};
    use itertools::Itertools;
    use rand::{RngCore, SeedableRng, rngs::StdRng};
    use test_case::test_case;

    fn all_bytes() -> Vec<u8> {
        (0..=255u8).collect()
    }
    fn pseudo_random_bytes(length: usize) -> Vec<u8> {
        let mut content = vec![0u8; length];
        StdRng::seed_from_u64(0x5eed).fill_bytes(&mut content);
        content
    }
    fn render(statements: &[Statement]) -> String {
        // wrap in block to reuse statement rendering
        let source_file = crate::emit::SourceFile {
            header: String::new(),
            module_name: "m".to_owned(),
            items: vec![crate::emit::Item::Fn {
                visibility: crate::emit::Visibility::Private,
                name: "f".to_owned(),
                ret: None,
                body: statements.to_vec(),
            }],
        };
        source_file.render().unwrap()
    }

    #[test]
    fn registry_covers_all_schemes_once() {
        let schemes = registry().iter().map(|codec| codec.scheme()).collect::<Vec<_>>();
        assert_eq!(schemes, CompressionScheme::ALL);
    }

    #[test]
    fn for_scheme_returns_matching_codec() {
        for scheme in CompressionScheme::ALL {
            assert_eq!(for_scheme(scheme).scheme(), scheme);
        }
    }

    #[test_case(CompressionScheme::None)]
    #[test_case(CompressionScheme::Deflate)]
    #[test_case(CompressionScheme::Gzip)]
    #[test_case(CompressionScheme::Lzw)]
    #[test_case(CompressionScheme::Zlib)]
    #[test_case(CompressionScheme::Snappy)]
    fn round_trip_preserves_content(scheme: CompressionScheme) {
        let codec = for_scheme(scheme);

        let contents: [Vec<u8>; 5] = [
            Vec::new(),
            vec![0],
            all_bytes(),
            b"lorem ipsum ".repeat(1000),
            pseudo_random_bytes(10_000),
        ];
        for content in contents {
            let encoded = codec.encode(&content).unwrap();
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded, content, "{scheme} round trip failed");
        }
    }

    #[test_case(CompressionScheme::Deflate)]
    #[test_case(CompressionScheme::Gzip)]
    #[test_case(CompressionScheme::Lzw)]
    #[test_case(CompressionScheme::Zlib)]
    #[test_case(CompressionScheme::Snappy)]
    fn compressing_codecs_shrink_repetitive_content(scheme: CompressionScheme) {
        let content = b"lorem ipsum ".repeat(1000);
        let encoded = for_scheme(scheme).encode(&content).unwrap();
        assert!(encoded.len() < content.len() / 4);
    }

    #[test]
    fn none_codec_is_identity() {
        let codec = for_scheme(CompressionScheme::None);
        assert_eq!(codec.encode(b"hello").unwrap(), b"hello");
        assert!(codec.encode(b"").unwrap().is_empty());
    }

    #[test_case(CompressionScheme::Deflate)]
    #[test_case(CompressionScheme::Gzip)]
    #[test_case(CompressionScheme::Zlib)]
    #[test_case(CompressionScheme::Snappy)]
    fn decode_rejects_garbage(scheme: CompressionScheme) {
        let codec = for_scheme(scheme);
        assert!(codec.decode(&[0xff; 64]).is_err());
    }

    #[test]
    fn zlib_decode_validates_checksum() {
        let codec = for_scheme(CompressionScheme::Zlib);
        let mut encoded = codec.encode(b"lorem ipsum").unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xff;
        assert!(codec.decode(&encoded).is_err());
    }

    #[test]
    fn encode_is_deterministic() {
        let content = pseudo_random_bytes(4096);
        for codec in registry() {
            assert_eq!(codec.encode(&content).unwrap(), codec.encode(&content).unwrap());
        }
    }

    #[test]
    fn none_statements_write_symbol_directly() {
        let codec = for_scheme(CompressionScheme::None);
        assert!(codec.shared_declarations().is_empty());
        assert!(codec.shared_cleanup().is_empty());
        assert_eq!(
            render(&codec.decode_statements("FILE_X_NONE", "/a.txt")),
            "\n#[allow(dead_code, unused_mut, clippy::all)]\npub mod m {\n    fn f() {\n        fs.write_file(\"/a.txt\", FILE_X_NONE, ::vfs_static_pack::DEFAULT_MODE)?;\n    }\n}\n"
        );
    }

    #[test_case(CompressionScheme::Deflate, "DeflateDecoder")]
    #[test_case(CompressionScheme::Gzip, "GzDecoder")]
    #[test_case(CompressionScheme::Zlib, "ZlibDecoder")]
    fn stream_statements_use_shared_buffer(
        scheme: CompressionScheme,
        decoder: &str,
    ) {
        let codec = for_scheme(scheme);

        let rendered = render(
            &codec
                .shared_declarations()
                .into_iter()
                .chain(codec.decode_statements("FILE_X", "/b.bin"))
                .chain(codec.shared_cleanup())
                .collect_vec(),
        );
        let decoder_line =
            format!("let mut decoder = ::vfs_static_pack::flate2::read::{decoder}::new(FILE_X);");

        // skip module and function header, closing braces
        let lines = rendered.lines().map(str::trim).collect_vec();
        assert_eq!(
            &lines[4..lines.len() - 2],
            &[
                "let mut buf_out: ::std::vec::Vec<u8> = ::std::vec::Vec::new();",
                "buf_out.clear();",
                decoder_line.as_str(),
                "::std::io::Read::read_to_end(&mut decoder, &mut buf_out)?;",
                "fs.write_file(\"/b.bin\", &buf_out, ::vfs_static_pack::DEFAULT_MODE)?;",
                "::std::mem::drop(decoder);",
                "::std::mem::drop(buf_out);",
            ]
        );
    }

    #[test]
    fn lzw_statements_use_matching_parameters() {
        let rendered = render(&for_scheme(CompressionScheme::Lzw).decode_statements("FILE_X", "/c"));
        assert!(rendered.contains(
            "let mut decoder = ::vfs_static_pack::weezl::decode::Decoder::new(::vfs_static_pack::weezl::BitOrder::Lsb, 8);"
        ));
        assert!(rendered.contains(
            "let decoded = decoder.decode(FILE_X).map_err(::std::io::Error::other)?;"
        ));
        assert!(rendered.contains(
            "fs.write_file(\"/c\", &decoded, ::vfs_static_pack::DEFAULT_MODE)?;"
        ));
    }

    #[test]
    fn snappy_statements_use_block_format() {
        let rendered =
            render(&for_scheme(CompressionScheme::Snappy).decode_statements("FILE_X", "/d"));
        assert!(rendered.contains("let mut decoder = ::vfs_static_pack::snap::raw::Decoder::new();"));
        assert!(rendered.contains(
            "let decoded = decoder.decompress_vec(FILE_X).map_err(::std::io::Error::other)?;"
        ));
    }
}
