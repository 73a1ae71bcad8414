use test_case::test_case;
use vfs_static_pack_common::scheme::CompressionScheme;
use vfs_static_pack_packer::builder::Builder;
use vfs_static_pack_tests::{
    RANDOM, generated_source, manifest_dir,
    site_builder::{build_site, site_module_name},
};

fn render_to_string(builder: &Builder) -> String {
    let mut output = Vec::<u8>::new();
    builder.render(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test_case(CompressionScheme::None)]
#[test_case(CompressionScheme::Deflate)]
#[test_case(CompressionScheme::Gzip)]
#[test_case(CompressionScheme::Lzw)]
#[test_case(CompressionScheme::Zlib)]
#[test_case(CompressionScheme::Snappy)]
fn rendering_is_deterministic(scheme: CompressionScheme) {
    let builder = build_site(manifest_dir(), scheme, RANDOM).unwrap();

    let source = render_to_string(&builder);
    assert_eq!(
        source,
        generated_source(&format!("{}.rs", site_module_name(scheme)))
    );
}

#[test]
fn compressing_schemes_shrink_repetitive_assets() {
    let plain = build_site(manifest_dir(), CompressionScheme::None, RANDOM).unwrap();

    for scheme in CompressionScheme::ALL
        .into_iter()
        .filter(|scheme| *scheme != CompressionScheme::None)
    {
        let compressed = build_site(manifest_dir(), scheme, RANDOM).unwrap();

        let encoded_length = |builder: &Builder, path: &str| {
            builder
                .assets()
                .find(|asset| &**asset.path() == path)
                .unwrap()
                .encoded()
                .len()
        };
        assert!(
            encoded_length(&compressed, "/binary/all_bytes.bin")
                < encoded_length(&plain, "/binary/all_bytes.bin"),
            "{scheme}"
        );
    }
}

#[test]
fn generated_source_names_symbols_by_path_and_scheme() {
    let source = generated_source("hello.rs");

    assert!(source.starts_with("// This file is generated - do not edit."));
    assert!(source.contains("pub mod hello {"));
    assert!(source.contains("static FILE_2F612E747874_NONE: &[u8] = &["));
}
