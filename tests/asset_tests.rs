// tests/asset_tests.rs

use std::path::PathBuf;
use tmx_viewer::TileMap;

#[test]
fn shipped_demo_map_loads() {
    let mut map_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    map_path.push("assets/Tilemaps/test-map.tmx");

    let map = TileMap::load_from_file(&map_path).expect("demo assets should load");

    assert_eq!((map.width, map.height), (30, 20));
    assert_eq!(map.pixel_size(), (480, 320));
    assert_eq!(map.tilesets.len(), 2);
    assert_eq!(map.layers.len(), 2);

    // Every tileset image lands under assets/Images, never Tilemaps/../.
    for ts in &map.tilesets {
        assert!(ts.image.source.to_string_lossy().contains("assets/Images"));
        assert!(!ts.image.source.components().any(|c| c.as_os_str() == ".."));
    }

    // Every placed tile resolves to some tileset.
    for layer in &map.layers {
        for &gid in &layer.data {
            assert!(map.resolve(gid).is_ok(), "gid {gid} should resolve");
        }
    }
}
