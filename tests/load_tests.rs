// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tmx_viewer::{MapError, TileMap};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tmx_viewer_load_{nanos}"));
    fs::create_dir_all(dir.join("Tilemaps")).expect("failed to create temp dir");
    dir
}

const TERRAIN_TSX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.2" name="terrain" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="../Images/terrain.png" width="32" height="32"/>
</tileset>
"#;

const PROPS_TSX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.2" name="props" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="../Images/props.png" width="32" height="32"/>
</tileset>
"#;

const TWO_TILESET_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="2" height="2" tilewidth="16" tileheight="16" infinite="0" nextlayerid="3" nextobjectid="1">
 <tileset firstgid="1" source="terrain.tsx"/>
 <tileset firstgid="5" source="props.tsx"/>
 <layer id="1" name="Ground" width="2" height="2">
  <data encoding="csv">
1,2,
3,4
</data>
 </layer>
 <layer id="2" name="Props" width="2" height="2">
  <data encoding="csv">
0,5,
8,0
</data>
 </layer>
</map>
"#;

/// Write a scene (map + both tilesets) into a fresh temp dir and return
/// the map path.
fn write_scene(map_xml: &str) -> PathBuf {
    let dir = temp_dir();
    fs::write(dir.join("Tilemaps/map.tmx"), map_xml).expect("failed to write map");
    fs::write(dir.join("Tilemaps/terrain.tsx"), TERRAIN_TSX).expect("failed to write tileset");
    fs::write(dir.join("Tilemaps/props.tsx"), PROPS_TSX).expect("failed to write tileset");
    dir.join("Tilemaps/map.tmx")
}

#[test]
fn loads_map_with_two_external_tilesets() {
    let map_path = write_scene(TWO_TILESET_MAP);
    let map = TileMap::load_from_file(&map_path).expect("load should succeed");

    assert_eq!((map.width, map.height), (2, 2));
    assert_eq!((map.tile_width, map.tile_height), (16, 16));
    assert_eq!(map.pixel_size(), (32, 32));

    // Merged from the .tsx files, firstgid kept from the map document.
    assert_eq!(map.tilesets.len(), 2);
    assert_eq!(map.tilesets[0].name, "terrain");
    assert_eq!(map.tilesets[0].first_gid, 1);
    assert_eq!(map.tilesets[0].tile_count, 4);
    assert_eq!(map.tilesets[0].columns, 2);
    assert_eq!(map.tilesets[1].name, "props");
    assert_eq!(map.tilesets[1].first_gid, 5);

    assert_eq!(map.layers.len(), 2);
    assert_eq!(map.layers[0].name, "Ground");
    assert_eq!(map.layers[0].data, vec![1, 2, 3, 4]);
    assert_eq!(map.layers[1].data, vec![0, 5, 8, 0]);
}

#[test]
fn image_paths_resolve_under_the_assets_root() {
    let map_path = write_scene(TWO_TILESET_MAP);
    let map = TileMap::load_from_file(&map_path).expect("load should succeed");

    let img = &map.tilesets[0].image;
    assert!(img.source.ends_with("Images/terrain.png"));
    assert!(
        !img.source.components().any(|c| c.as_os_str() == ".."),
        "normalized path still contains '..': {}",
        img.source.display()
    );
    assert_eq!((img.width, img.height), (32, 32));
}

#[test]
fn loading_twice_yields_equal_maps() {
    let map_path = write_scene(TWO_TILESET_MAP);
    let a = TileMap::load_from_file(&map_path).expect("first load");
    let b = TileMap::load_from_file(&map_path).expect("second load");
    assert_eq!(a, b);
}

#[test]
fn embedded_newlines_parse_like_flat_data() {
    let flat = TWO_TILESET_MAP.replace("\n1,2,\n3,4\n", "1,2,3,4");
    let a = TileMap::load_from_file(write_scene(TWO_TILESET_MAP)).expect("wrapped");
    let b = TileMap::load_from_file(write_scene(&flat)).expect("flat");
    // Two scenes, two temp dirs: image paths differ, the cell data must not.
    assert_eq!(a.layers, b.layers);
}

#[test]
fn missing_map_file_is_an_io_error() {
    let err = TileMap::load_from_file("no_such_dir/map.tmx").unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
}

#[test]
fn missing_tileset_file_is_an_io_error_naming_the_file() {
    let missing = TWO_TILESET_MAP.replace("props.tsx", "missing.tsx");
    let err = TileMap::load_from_file(write_scene(&missing)).unwrap_err();
    match err {
        MapError::Io { path, .. } => assert!(path.ends_with("Tilemaps/missing.tsx")),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn malformed_map_xml_is_a_parse_error() {
    let dir = temp_dir();
    let map_path = dir.join("Tilemaps/map.tmx");
    fs::write(&map_path, "<map width=").expect("failed to write map");
    let err = TileMap::load_from_file(&map_path).unwrap_err();
    assert!(matches!(err, MapError::Xml { .. }));
}

#[test]
fn malformed_tileset_xml_is_a_parse_error_naming_the_file() {
    let map_path = write_scene(TWO_TILESET_MAP);
    fs::write(map_path.with_file_name("props.tsx"), "<tileset").expect("failed to write tileset");
    let err = TileMap::load_from_file(&map_path).unwrap_err();
    match err {
        MapError::Xml { path, .. } => assert!(path.ends_with("Tilemaps/props.tsx")),
        other => panic!("expected Xml, got {other:?}"),
    }
}

#[test]
fn gid_owned_by_no_tileset_fails_the_load() {
    let dangling = TWO_TILESET_MAP.replace("0,5,\n8,0", "0,5,\n99,0");
    let err = TileMap::load_from_file(write_scene(&dangling)).unwrap_err();
    assert!(matches!(err, MapError::InvalidTileGid { layer, gid: 99 }
        if layer == "Props"));
}

#[test]
fn layer_size_mismatch_fails_the_load() {
    let short = TWO_TILESET_MAP.replace("\n1,2,\n3,4\n", "1,2,3");
    let err = TileMap::load_from_file(write_scene(&short)).unwrap_err();
    assert!(matches!(err, MapError::LayerSizeMismatch { layer, expected: 4, actual: 3 }
        if layer == "Ground"));
}

#[test]
fn infinite_maps_are_rejected() {
    let infinite = TWO_TILESET_MAP.replace("infinite=\"0\"", "infinite=\"1\"");
    let err = TileMap::load_from_file(write_scene(&infinite)).unwrap_err();
    assert!(matches!(err, MapError::Unsupported(_)));
}

#[test]
fn embedded_tilesets_are_rejected() {
    let embedded = TWO_TILESET_MAP.replace(
        r#"<tileset firstgid="5" source="props.tsx"/>"#,
        r#"<tileset firstgid="5" name="inline" tilewidth="16" tileheight="16" tilecount="4" columns="2"/>"#,
    );
    let err = TileMap::load_from_file(write_scene(&embedded)).unwrap_err();
    assert!(matches!(err, MapError::Unsupported(_)));
}
