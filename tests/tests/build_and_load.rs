use std::fs;
use test_case::test_case;
use vfs_static_pack::DEFAULT_MODE;
use vfs_static_pack_common::scheme::CompressionScheme;
use vfs_static_pack_packer::directory::{SearchOptions, search};
use vfs_static_pack_tests::{RANDOM, site_builder::RANDOM_PATH, site_directory, site_fs};

#[test_case(CompressionScheme::None)]
#[test_case(CompressionScheme::Deflate)]
#[test_case(CompressionScheme::Gzip)]
#[test_case(CompressionScheme::Lzw)]
#[test_case(CompressionScheme::Zlib)]
#[test_case(CompressionScheme::Snappy)]
fn restored_site_matches_source_files(scheme: CompressionScheme) {
    let fs = site_fs(scheme);

    let files = search(&site_directory(), &SearchOptions::default()).unwrap();
    assert_eq!(fs.len(), files.len() + 1);

    for (asset_path, fs_path) in files.iter() {
        let file = fs
            .get_file_by_path(asset_path)
            .unwrap_or_else(|| panic!("{asset_path} missing with {scheme}"));

        assert_eq!(file.content(), &*fs::read(fs_path).unwrap(), "{asset_path}");
        assert_eq!(file.mode(), DEFAULT_MODE);
    }

    assert_eq!(fs.read_file(RANDOM_PATH), Some(RANDOM));
}

#[test_case(CompressionScheme::None)]
#[test_case(CompressionScheme::Deflate)]
#[test_case(CompressionScheme::Gzip)]
#[test_case(CompressionScheme::Lzw)]
#[test_case(CompressionScheme::Zlib)]
#[test_case(CompressionScheme::Snappy)]
fn restored_site_contains_expected_paths(scheme: CompressionScheme) {
    assert_eq!(
        site_fs(scheme).paths().collect::<Vec<_>>(),
        vec![
            "/binary/all_bytes.bin",
            "/css/style.css",
            "/empty.txt",
            "/index.html",
            "/js/script.js",
            "/random.bin",
        ]
    );
}

#[test]
fn restored_site_keeps_utf8_and_empty_files() {
    let fs = site_fs(CompressionScheme::Gzip);

    let index = std::str::from_utf8(fs.read_file("/index.html").unwrap()).unwrap();
    assert!(index.contains("Zażółć gęślą jaźń"));

    let empty = fs.get_file_by_path("/empty.txt").unwrap();
    assert!(empty.is_empty());

    let all_bytes = fs.read_file("/binary/all_bytes.bin").unwrap();
    assert_eq!(all_bytes.len(), 1024);
    assert!(all_bytes.iter().copied().eq((0..=255u8).cycle().take(1024)));
}

#[test]
fn hello_module_restores_single_file() {
    let fs = &*vfs_static_pack_tests::hello::FS;

    assert_eq!(fs.len(), 1);
    assert_eq!(fs.read_file("/a.txt"), Some(b"hello".as_slice()));
    assert_eq!(fs.get_file_by_path("/a.txt").unwrap().mode(), DEFAULT_MODE);
}

#[test]
fn empty_module_restores_empty_fs() {
    assert!(vfs_static_pack_tests::empty::FS.is_empty());
}

#[test]
fn random_payload_survives_gzip() {
    let fs = &*vfs_static_pack_tests::random_gzip::FS;

    assert_eq!(RANDOM.len(), 10_000);
    assert_eq!(fs.read_file("/b.bin"), Some(RANDOM));
}
