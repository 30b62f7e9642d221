// tests/load_tests.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use macroquad_tile_maker::ir_map::IrLayerKind;
use macroquad_tile_maker::{decode_map_file_to_ir, decode_map_str_to_ir, MapError};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tile_maker_load_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const SIMPLE_MAP: &str = r#"
{
    "tilewidth": 4,
    "tileheight": 4,
    "layers": [ { "name": "L", "width": 1, "height": 1, "data": [0] } ]
}
"#;

#[test]
fn integration_decode_from_str_and_file() {
    // Inline JSON
    let ir = decode_map_str_to_ir(SIMPLE_MAP, Path::new("."), None).expect("inline decode");
    assert_eq!(ir.tile_w, 4);
    assert_eq!(ir.layers.len(), 1);
    assert_eq!(ir.layers[0].name, "L");

    // File-based
    let dir = temp_dir();
    let path = dir.join("test_map_integration.json");
    fs::write(&path, SIMPLE_MAP).unwrap();
    let (ir2, base) = decode_map_file_to_ir(path.to_str().unwrap()).unwrap();
    assert_eq!(ir2.tile_h, 4);
    assert_eq!(base, dir);
    fs::remove_file(&path).unwrap();
}

#[test]
fn integration_unsupported_format() {
    let err = decode_map_file_to_ir("foo.tmx").unwrap_err();
    match err {
        MapError::UnsupportedFormat(path) => assert_eq!(path, "foo.tmx"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn decode_ignores_extra_fields() {
    let json = r#"
    {
        "tilewidth": 8,
        "tileheight": 8,
        "dummyField": "ignored",
        "layers": [
            { "name": "L", "width": 1, "height": 1, "data": [0], "opacity": 0.5 }
        ]
    }
    "#;
    let ir = decode_map_str_to_ir(json, Path::new("."), None).expect("should ignore unknown fields");
    assert_eq!(ir.layers[0].opacity, 0.5);
    match &ir.layers[0].kind {
        IrLayerKind::Tiles { data, .. } => assert_eq!(data, &vec![0]),
        _ => panic!("expected tile layer"),
    }
}

#[test]
fn decode_allows_empty_layer_name() {
    let json = r#"
    {
        "tilewidth": 8,
        "tileheight": 8,
        "layers": [ { "name": "", "width": 1, "height": 1, "data": [0] } ]
    }
    "#;
    let ir = decode_map_str_to_ir(json, Path::new("."), None).unwrap();
    assert_eq!(ir.layers[0].name, "");
}

#[test]
fn error_on_layer_size_mismatch() {
    let json = r#"
    {
        "tilewidth": 8,
        "tileheight": 8,
        "layers": [ { "name": "oops", "width": 2, "height": 2, "data": [1, 2, 3] } ]
    }
    "#;
    let err = decode_map_str_to_ir(json, Path::new("."), None).unwrap_err();
    assert!(matches!(err, MapError::InvalidLayerSize(name) if name == "oops"));
}

#[test]
fn hidden_and_unsupported_layers_survive_decoding() {
    let json = r#"
    {
        "tilewidth": 8,
        "tileheight": 8,
        "layers": [
            { "name": "hidden", "width": 1, "height": 1, "data": [0], "visible": false },
            { "name": "imagelayer", "type": "imagelayer" }
        ]
    }
    "#;
    let ir = decode_map_str_to_ir(json, Path::new("."), None).unwrap();
    assert!(!ir.layers[0].visible);
    assert!(matches!(ir.layers[1].kind, IrLayerKind::Unsupported));
}
