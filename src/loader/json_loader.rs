//! Tiled JSON export → [`IrMap`] decoding.
//!
//! Only Tiled's JSON map format is supported; anything else (including
//! `.tmx` XML) is rejected with [`MapError::UnsupportedFormat`]. External
//! tilesets must also be JSON. Decoding validates layer sizes and gid
//! ranges up front so the draw path never meets a dangling gid.

use std::path::{Path, PathBuf};

use macroquad::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::MapError;
use crate::ir_map::*;
use crate::spatial::GID_MASK;

#[derive(Deserialize)]
struct JsonMap {
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" or "objectgroup"
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default)]
    offsetx: f32,
    #[serde(default)]
    offsety: f32,
    #[serde(default)]
    objects: Vec<JsonObject>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    source: String,
}

#[derive(Deserialize)]
struct ExternalTileset {
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    image: String,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    rotation: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    polygon: Vec<JsonPoint>,
    #[serde(default)]
    polyline: Vec<JsonPoint>,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonPoint {
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

fn property_to_ir(prop: JsonProperty) -> Result<Option<(String, PropertyValue)>, MapError> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => value.as_bool().map(PropertyValue::Bool),
        Some("int") | Some("object") => value.as_i64().map(PropertyValue::I64),
        Some("float") => value.as_f64().map(|n| PropertyValue::F32(n as f32)),
        Some("string") | Some("file") | Some("color") | Some("class") => {
            value.as_str().map(|s| PropertyValue::String(s.to_owned()))
        }
        Some(other) => {
            return Err(MapError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        // Untyped: infer from the JSON value.
        None => {
            if let Some(v) = value.as_bool() {
                Some(PropertyValue::Bool(v))
            } else if let Some(v) = value.as_i64() {
                Some(PropertyValue::I64(v))
            } else if let Some(v) = value.as_f64() {
                Some(PropertyValue::F32(v as f32))
            } else {
                value.as_str().map(|s| PropertyValue::String(s.to_owned()))
            }
        }
    };

    Ok(parsed.map(|value| (name, value)))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties, MapError> {
    let mut out = Properties::new();
    for p in props {
        if let Some((name, value)) = property_to_ir(p)? {
            out.insert(name, value);
        }
    }
    Ok(out)
}

fn object_to_ir(obj: JsonObject) -> Result<IrObject, MapError> {
    let shape = if let Some(gid) = obj.gid {
        IrObjectShape::Tile { gid }
    } else if obj.point {
        IrObjectShape::Point
    } else if obj.ellipse {
        IrObjectShape::Ellipse
    } else if !obj.polygon.is_empty() {
        IrObjectShape::Polygon(obj.polygon.into_iter().map(|p| vec2(p.x, p.y)).collect())
    } else if !obj.polyline.is_empty() {
        IrObjectShape::Polyline(obj.polyline.into_iter().map(|p| vec2(p.x, p.y)).collect())
    } else {
        IrObjectShape::Rectangle
    };

    // Tiled 1.9 renamed `type` to `class`; accept either.
    let class_name = if !obj.class.is_empty() {
        obj.class
    } else {
        obj.kind
    };

    Ok(IrObject {
        id: obj.id,
        name: obj.name,
        class_name,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        rotation: obj.rotation,
        visible: obj.visible,
        shape,
        properties: properties_from_json(obj.properties)?,
    })
}

/// Decode a Tiled JSON map file. Returns the IR plus the map's directory
/// (image paths in the IR are relative to it).
pub fn decode_map_file_to_ir(path: &str) -> Result<(IrMap, PathBuf), MapError> {
    let p = Path::new(path);
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::UnsupportedFormat(path.to_owned()));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    let ir = decode_map_str_to_ir(&txt, &map_dir, Some(p))?;
    Ok((ir, map_dir))
}

/// Decode a Tiled JSON map from a string; external tileset sources are
/// resolved relative to `map_dir`.
pub fn decode_map_str_to_ir(
    txt: &str,
    map_dir: &Path,
    origin: Option<&Path>,
) -> Result<IrMap, MapError> {
    let origin_path = origin.unwrap_or_else(|| Path::new("<inline>"));
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: origin_path.to_path_buf(),
        source,
    })?;

    let mut ir_tilesets = Vec::with_capacity(j.tilesets.len());
    for ts in &j.tilesets {
        if !ts.source.ends_with(".json") {
            return Err(MapError::InvalidMap(format!(
                "External tileset must be JSON: {}",
                ts.source
            )));
        }
        let ts_path = map_dir.join(&ts.source);
        let ext_txt = std::fs::read_to_string(&ts_path).map_err(|source| MapError::Io {
            path: ts_path.clone(),
            source,
        })?;
        let ext: ExternalTileset =
            serde_json::from_str(&ext_txt).map_err(|source| MapError::Json {
                path: ts_path,
                source,
            })?;

        // Gids start at 1 and every tileset must cover at least one tile;
        // a zero here would wrap the max-gid arithmetic below.
        if ts.firstgid == 0 || ext.tilecount == 0 {
            return Err(MapError::InvalidMap(format!(
                "Tileset {} must have a nonzero firstgid and tilecount",
                ts.source
            )));
        }

        // Image path stays relative; Map::from_ir joins it with map_dir.
        ir_tilesets.push(IrTileset::Atlas {
            first_gid: ts.firstgid,
            image: ext.image,
            tile_w: ext.tilewidth,
            tile_h: ext.tileheight,
            tilecount: ext.tilecount,
            columns: ext.columns,
            spacing: ext.spacing,
            margin: ext.margin,
        });
    }

    // Sorted by first_gid so gid → tileset lookup is trivial later.
    ir_tilesets.sort_by_key(|t| match t {
        IrTileset::Atlas { first_gid, .. } => *first_gid,
    });

    let max_gid = ir_tilesets
        .iter()
        .map(|t| match t {
            IrTileset::Atlas {
                first_gid,
                tilecount,
                ..
            } => first_gid + tilecount - 1,
        })
        .max()
        .unwrap_or(0);

    let mut ir_layers = Vec::with_capacity(j.layers.len());
    for l in j.layers {
        let layer_name = l.name.clone();
        let properties = properties_from_json(l.properties)?;
        let kind = match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => {
                if l.data.len() != l.width * l.height {
                    return Err(MapError::InvalidLayerSize(layer_name));
                }
                for &raw_gid in &l.data {
                    let gid = raw_gid & GID_MASK;
                    if gid != 0 && gid > max_gid {
                        return Err(MapError::InvalidGid {
                            layer: layer_name.clone(),
                            gid,
                            max_gid,
                        });
                    }
                }
                IrLayerKind::Tiles {
                    width: l.width,
                    height: l.height,
                    data: l.data,
                }
            }
            "objectgroup" => IrLayerKind::Objects {
                objects: l
                    .objects
                    .into_iter()
                    .map(|obj| {
                        if let Some(raw_gid) = obj.gid {
                            let gid = raw_gid & GID_MASK;
                            if gid == 0 || gid > max_gid {
                                return Err(MapError::InvalidGid {
                                    layer: layer_name.clone(),
                                    gid,
                                    max_gid,
                                });
                            }
                        }
                        object_to_ir(obj)
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            },
            _ => IrLayerKind::Unsupported,
        };
        ir_layers.push(IrLayer {
            name: l.name,
            visible: l.visible,
            opacity: l.opacity,
            offset: vec2(l.offsetx, l.offsety),
            properties,
            kind,
        });
    }

    Ok(IrMap {
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        properties: properties_from_json(j.properties)?,
        tilesets: ir_tilesets,
        layers: ir_layers,
    })
}
