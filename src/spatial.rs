//! Chunked spatial index the viewer buckets map tiles into.
//!
//! Tiles are grouped into `CHUNK_SIZE`-pixel square chunks keyed by
//! integer chunk coordinate, with per-layer buckets inside each chunk so
//! draw order stays by layer. The index is built once per map load and
//! never edited afterwards.

use std::collections::HashMap;

use macroquad::prelude::*;

/// Chunk edge length in pixels.
pub const CHUNK_SIZE: i32 = 256;

// Tiled packs flip flags into the top three gid bits.
pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A raw Tiled gid, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid(pub u32);

impl Gid {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The tile id with flip flags masked off.
    #[inline]
    pub fn clean(self) -> u32 {
        self.0 & GID_MASK
    }

    #[inline]
    pub fn flip_h(self) -> bool {
        (self.0 & FLIP_H) != 0
    }

    #[inline]
    pub fn flip_v(self) -> bool {
        (self.0 & FLIP_V) != 0
    }

    #[inline]
    pub fn flip_d(self) -> bool {
        (self.0 & FLIP_D) != 0
    }
}

/// Index of a layer inside the loaded map.
pub type LayerIdx = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

/// Chunk containing a world-space point. Floor division, so negative
/// world coordinates land in negative chunks instead of snapping to 0.
#[inline]
pub fn world_to_chunk(p: Vec2) -> ChunkCoord {
    ChunkCoord {
        x: (p.x as i32).div_euclid(CHUNK_SIZE),
        y: (p.y as i32).div_euclid(CHUNK_SIZE),
    }
}

/// Position of a world-space point inside its chunk.
#[inline]
pub fn chunk_rel(p: Vec2) -> Vec2 {
    vec2(
        (p.x as i32).rem_euclid(CHUNK_SIZE) as f32,
        (p.y as i32).rem_euclid(CHUNK_SIZE) as f32,
    )
}

#[derive(Debug, Clone)]
pub struct PlacedTile {
    pub gid: Gid,
    pub rel_pos: Vec2,
}

/// Per-layer tile buckets of one chunk.
#[derive(Default)]
pub struct Chunk {
    pub layers: HashMap<LayerIdx, Vec<PlacedTile>>,
}

/// The whole map's chunk index.
#[derive(Default)]
pub struct ChunkIndex {
    pub buckets: HashMap<ChunkCoord, Chunk>,
}

impl ChunkIndex {
    pub fn new() -> Self {
        ChunkIndex::default()
    }

    /// Place a tile at a world position on a layer.
    pub fn add_tile(&mut self, gid: Gid, layer: LayerIdx, world: Vec2) {
        let chunk = self.buckets.entry(world_to_chunk(world)).or_default();
        chunk.layers.entry(layer).or_default().push(PlacedTile {
            gid,
            rel_pos: chunk_rel(world),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_world_positions_land_in_negative_chunks() {
        assert_eq!(world_to_chunk(vec2(0.0, 0.0)), ChunkCoord { x: 0, y: 0 });
        assert_eq!(world_to_chunk(vec2(-1.0, 0.0)), ChunkCoord { x: -1, y: 0 });
        assert_eq!(
            world_to_chunk(vec2(-257.0, 300.0)),
            ChunkCoord { x: -2, y: 1 }
        );
    }

    #[test]
    fn rel_pos_plus_chunk_origin_recovers_the_world_position() {
        let p = vec2(-100.0, 600.0);
        let cc = world_to_chunk(p);
        let rel = chunk_rel(p);
        assert_eq!(
            vec2(
                (cc.x * CHUNK_SIZE) as f32 + rel.x,
                (cc.y * CHUNK_SIZE) as f32 + rel.y
            ),
            p
        );
    }

    #[test]
    fn gid_flip_flags_mask_cleanly() {
        let gid = Gid(FLIP_H | FLIP_D | 7);
        assert!(gid.flip_h() && gid.flip_d() && !gid.flip_v());
        assert_eq!(gid.clean(), 7);
    }

    #[test]
    fn tiles_bucket_by_chunk_and_layer() {
        let mut index = ChunkIndex::new();
        index.add_tile(Gid(1), 0, vec2(10.0, 10.0));
        index.add_tile(Gid(2), 1, vec2(20.0, 20.0));
        index.add_tile(Gid(3), 0, vec2(300.0, 10.0));

        assert_eq!(index.buckets.len(), 2);
        let origin = &index.buckets[&ChunkCoord { x: 0, y: 0 }];
        assert_eq!(origin.layers[&0].len(), 1);
        assert_eq!(origin.layers[&1].len(), 1);
    }
}
