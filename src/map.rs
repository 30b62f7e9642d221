//! The viewer's loaded map: tileset atlases plus a chunk index of every
//! visible tile, with per-frame culled drawing.

use std::path::Path;

use anyhow::Context;
use macroquad::prelude::*;

use crate::ir_map::{IrLayerKind, IrMap, IrObject, IrObjectShape, IrTileset, Properties};
use crate::loader::json_loader::decode_map_file_to_ir;
use crate::render::{visible_chunks, ChunkView};
use crate::spatial::{ChunkIndex, Gid, LayerIdx, CHUNK_SIZE};

const MARKER: Color = RED;
const RECT_OUTLINE: Color = YELLOW;
const ELLIPSE_OUTLINE: Color = BLUE;
const POLY_OUTLINE: Color = GREEN;

/// One loaded tileset atlas.
pub struct TilesetInfo {
    pub first_gid: u32,
    pub tilecount: u32,
    pub cols: u32,
    pub tex: Texture2D,
    pub tile_w: u32,
    pub tile_h: u32,
    pub spacing: u32,
    pub margin: u32,
}

/// An object layer kept alongside the tile index.
pub struct ObjectLayer {
    pub name: String,
    pub visible: bool, // hidden layers are skipped by the object draw passes
    pub objects: Vec<IrObject>,
}

/// A loaded, drawable map.
pub struct Map {
    index: ChunkIndex,
    tilesets: Vec<TilesetInfo>,
    gid_lut: Vec<u16>,
    pub tile_w: u32,
    pub tile_h: u32,
    pub properties: Properties,
    object_layers: Vec<ObjectLayer>,
}

impl Map {
    /// Load a Tiled JSON map and its tileset textures.
    pub async fn load(path: &str) -> anyhow::Result<Self> {
        let (ir, base) = decode_map_file_to_ir(path)?;
        Self::from_ir(ir, &base).await
    }

    /// Build a map from decoded IR; `base_dir` resolves tileset image
    /// paths.
    pub async fn from_ir(ir: IrMap, base_dir: &Path) -> anyhow::Result<Self> {
        let max_gid = ir
            .tilesets
            .iter()
            .map(|t| match t {
                IrTileset::Atlas {
                    first_gid,
                    tilecount,
                    ..
                } => (first_gid + tilecount).saturating_sub(1),
            })
            .max()
            .unwrap_or(0);

        let mut gid_lut = vec![u16::MAX; (max_gid + 1) as usize];
        let mut tilesets = Vec::with_capacity(ir.tilesets.len());

        for (i, t) in ir.tilesets.iter().enumerate() {
            let IrTileset::Atlas {
                first_gid,
                image,
                tile_w,
                tile_h,
                tilecount,
                columns,
                spacing,
                margin,
            } = t;

            let img_path = base_dir.join(image);
            let img_str = img_path
                .to_str()
                .with_context(|| format!("Non-UTF-8 tileset image path {}", img_path.display()))?;
            let tex = load_texture(img_str)
                .await
                .with_context(|| format!("Loading texture {}", image))?;
            tex.set_filter(FilterMode::Nearest);

            tilesets.push(TilesetInfo {
                first_gid: *first_gid,
                tilecount: *tilecount,
                cols: *columns,
                tex,
                tile_w: *tile_w,
                tile_h: *tile_h,
                spacing: *spacing,
                margin: *margin,
            });

            for gid in *first_gid..(*first_gid + *tilecount) {
                gid_lut[gid as usize] = i as u16;
            }
        }

        let mut index = ChunkIndex::new();
        let mut object_layers = Vec::new();

        for (lz, layer) in ir.layers.iter().enumerate() {
            match &layer.kind {
                IrLayerKind::Tiles { width, data, .. } => {
                    if !layer.visible {
                        continue;
                    }
                    let tw = ir.tile_w as f32;
                    let th = ir.tile_h as f32;
                    for (idx, gid) in data.iter().enumerate() {
                        if *gid == 0 {
                            continue;
                        }
                        let col = idx % *width;
                        let row = idx / *width;
                        let world = vec2(col as f32 * tw, row as f32 * th) + layer.offset;
                        index.add_tile(Gid(*gid), lz as LayerIdx, world);
                    }
                }
                IrLayerKind::Objects { objects } => {
                    object_layers.push(ObjectLayer {
                        name: layer.name.clone(),
                        visible: layer.visible,
                        objects: objects.clone(),
                    });
                }
                IrLayerKind::Unsupported => {
                    warn!("skipping unsupported layer '{}'", layer.name);
                }
            }
        }

        Ok(Self {
            index,
            tilesets,
            gid_lut,
            tile_w: ir.tile_w,
            tile_h: ir.tile_h,
            properties: ir.properties,
            object_layers,
        })
    }

    /// The map's object layers.
    pub fn object_layers(&self) -> &[ObjectLayer] {
        &self.object_layers
    }

    /// Every object across all object layers.
    pub fn objects(&self) -> impl Iterator<Item = &IrObject> {
        self.object_layers.iter().flat_map(|l| l.objects.iter())
    }

    /// Tileset owning a gid, plus the tile's local index in its atlas.
    #[inline]
    pub fn ts_for_gid(&self, gid: Gid) -> Option<(&TilesetInfo, u32)> {
        let clean = gid.clean() as usize;
        if clean >= self.gid_lut.len() {
            return None;
        }
        let idx = self.gid_lut[clean];
        if idx == u16::MAX {
            return None;
        }
        let ts = &self.tilesets[idx as usize];
        Some((ts, gid.clean() - ts.first_gid))
    }

    /// Draw every tile chunk intersecting the world-space view rect.
    pub fn draw_visible_rect(&self, view_min: Vec2, view_max: Vec2) {
        let view = visible_chunks(&self.index, view_min, view_max);
        for ChunkView { coord: cc, layers } in view.chunks {
            let mut layer_keys: Vec<_> = layers.keys().copied().collect();
            layer_keys.sort_unstable();

            for lid in layer_keys {
                let Some(bucket) = layers.get(&lid) else {
                    continue;
                };
                for tile in bucket {
                    if let Some((ts, local)) = self.ts_for_gid(tile.gid) {
                        let x = (cc.x * CHUNK_SIZE) as f32 + tile.rel_pos.x;
                        let y = (cc.y * CHUNK_SIZE) as f32 + tile.rel_pos.y;
                        draw_texture_ex(
                            &ts.tex,
                            x,
                            y,
                            WHITE,
                            DrawTextureParams {
                                source: Some(atlas_source(ts, local)),
                                flip_x: tile.gid.flip_h(),
                                flip_y: tile.gid.flip_v(),
                                ..Default::default()
                            },
                        );
                    }
                }
            }
        }
    }

    /// Draw objects that stamp a tile (`gid` objects). Tiled anchors tile
    /// objects at their bottom-left corner.
    pub fn draw_objects_tiles(&self) {
        for layer in self.object_layers.iter().filter(|l| l.visible) {
            for obj in layer.objects.iter().filter(|o| o.visible) {
                let IrObjectShape::Tile { gid } = &obj.shape else {
                    continue;
                };
                if let Some((ts, local)) = self.ts_for_gid(Gid(*gid)) {
                    let dest = if obj.width > 0.0 && obj.height > 0.0 {
                        vec2(obj.width, obj.height)
                    } else {
                        vec2(ts.tile_w as f32, ts.tile_h as f32)
                    };
                    draw_texture_ex(
                        &ts.tex,
                        obj.x,
                        obj.y - dest.y,
                        WHITE,
                        DrawTextureParams {
                            source: Some(atlas_source(ts, local)),
                            dest_size: Some(dest),
                            ..Default::default()
                        },
                    );
                }
            }
        }
    }

    /// Draw shape objects as debug primitives: points as circles, rects
    /// and ellipses as outlines, polygons as closed line loops.
    pub fn draw_objects_debug(&self) {
        for layer in self.object_layers.iter().filter(|l| l.visible) {
            for obj in layer.objects.iter().filter(|o| o.visible) {
                match &obj.shape {
                    IrObjectShape::Point => draw_circle(obj.x, obj.y, 5.0, MARKER),
                    IrObjectShape::Rectangle => draw_rectangle_lines(
                        obj.x,
                        obj.y,
                        obj.width,
                        obj.height,
                        2.0,
                        RECT_OUTLINE,
                    ),
                    IrObjectShape::Ellipse => draw_ellipse_lines(
                        obj.x + obj.width / 2.0,
                        obj.y + obj.height / 2.0,
                        obj.width / 2.0,
                        obj.height / 2.0,
                        obj.rotation,
                        2.0,
                        ELLIPSE_OUTLINE,
                    ),
                    IrObjectShape::Polygon(points) => {
                        draw_point_loop(obj.x, obj.y, points, true);
                    }
                    IrObjectShape::Polyline(points) => {
                        draw_point_loop(obj.x, obj.y, points, false);
                    }
                    IrObjectShape::Tile { .. } => {}
                }
            }
        }
    }
}

fn atlas_source(ts: &TilesetInfo, local: u32) -> Rect {
    let col = local % ts.cols;
    let row = local / ts.cols;
    let sx = ts.margin + col * (ts.tile_w + ts.spacing);
    let sy = ts.margin + row * (ts.tile_h + ts.spacing);
    Rect::new(sx as f32, sy as f32, ts.tile_w as f32, ts.tile_h as f32)
}

fn draw_point_loop(ox: f32, oy: f32, points: &[Vec2], close: bool) {
    for pair in points.windows(2) {
        draw_line(
            ox + pair[0].x,
            oy + pair[0].y,
            ox + pair[1].x,
            oy + pair[1].y,
            2.0,
            POLY_OUTLINE,
        );
    }
    if close && points.len() > 2 {
        let (first, last) = (points[0], points[points.len() - 1]);
        draw_line(
            ox + last.x,
            oy + last.y,
            ox + first.x,
            oy + first.y,
            2.0,
            POLY_OUTLINE,
        );
    }
}
