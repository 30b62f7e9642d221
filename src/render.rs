//! Visible-rect culling over the chunk index.

use std::collections::HashMap;

use macroquad::prelude::*;

use crate::spatial::{ChunkCoord, ChunkIndex, LayerIdx, PlacedTile, CHUNK_SIZE};

/// Extra chunks kept on every side of the view so tiles straddling a
/// chunk border never pop.
const CULL_MARGIN_CHUNKS: i32 = 1;

/// Borrowed view of one visible chunk.
pub struct ChunkView<'g> {
    /// The chunk's coordinate.
    pub coord: ChunkCoord,
    /// The chunk's per-layer tile buckets.
    pub layers: &'g HashMap<LayerIdx, Vec<PlacedTile>>,
}

/// All chunks intersecting a view rectangle, sorted by (y, x) so the
/// draw order is stable across frames.
pub struct VisibleSet<'g> {
    /// Visible chunks in (y, x) order.
    pub chunks: Vec<ChunkView<'g>>,
}

/// Cull `index` against the world-space rectangle spanned by `view_min`
/// and `view_max` (either corner order), padded by one chunk of margin.
pub fn visible_chunks<'g>(index: &'g ChunkIndex, view_min: Vec2, view_max: Vec2) -> VisibleSet<'g> {
    let mut cx_min = (view_min.x as i32).div_euclid(CHUNK_SIZE);
    let mut cy_min = (view_min.y as i32).div_euclid(CHUNK_SIZE);
    let mut cx_max = (view_max.x as i32).div_euclid(CHUNK_SIZE);
    let mut cy_max = (view_max.y as i32).div_euclid(CHUNK_SIZE);

    if cx_min > cx_max {
        std::mem::swap(&mut cx_min, &mut cx_max);
    }
    if cy_min > cy_max {
        std::mem::swap(&mut cy_min, &mut cy_max);
    }

    cx_min -= CULL_MARGIN_CHUNKS;
    cy_min -= CULL_MARGIN_CHUNKS;
    cx_max += CULL_MARGIN_CHUNKS;
    cy_max += CULL_MARGIN_CHUNKS;

    let mut chunks: Vec<ChunkView<'g>> = index
        .buckets
        .iter()
        .filter(|(coord, _)| {
            coord.x >= cx_min && coord.x <= cx_max && coord.y >= cy_min && coord.y <= cy_max
        })
        .map(|(&coord, chunk)| ChunkView {
            coord,
            layers: &chunk.layers,
        })
        .collect();
    chunks.sort_by_key(|c| (c.coord.y, c.coord.x));

    VisibleSet { chunks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Gid;

    #[test]
    fn visible_chunks_come_back_in_stable_row_major_order() {
        let mut index = ChunkIndex::new();
        index.add_tile(Gid(1), 0, vec2(520.0, 520.0)); // (2, 2)
        index.add_tile(Gid(1), 0, vec2(0.0, 0.0)); // (0, 0)
        index.add_tile(Gid(1), 0, vec2(260.0, 0.0)); // (1, 0)
        index.add_tile(Gid(1), 0, vec2(0.0, 260.0)); // (0, 1)

        let view = visible_chunks(&index, vec2(0.0, 0.0), vec2(800.0, 800.0));
        let coords: Vec<ChunkCoord> = view.chunks.iter().map(|c| c.coord).collect();

        assert_eq!(coords.len(), 4);
        assert!(coords
            .windows(2)
            .all(|w| (w[0].y, w[0].x) <= (w[1].y, w[1].x)));
    }

    #[test]
    fn chunks_outside_the_margin_are_culled() {
        let mut index = ChunkIndex::new();
        index.add_tile(Gid(1), 0, vec2(0.0, 0.0)); // (0, 0)
        index.add_tile(Gid(1), 0, vec2(2600.0, 0.0)); // (10, 0), far right

        let view = visible_chunks(&index, vec2(0.0, 0.0), vec2(100.0, 100.0));
        assert_eq!(view.chunks.len(), 1);
        assert_eq!(view.chunks[0].coord, ChunkCoord { x: 0, y: 0 });
    }

    #[test]
    fn swapped_view_corners_are_handled() {
        let mut index = ChunkIndex::new();
        index.add_tile(Gid(1), 0, vec2(100.0, 100.0));

        let view = visible_chunks(&index, vec2(400.0, 400.0), vec2(0.0, 0.0));
        assert_eq!(view.chunks.len(), 1);
    }
}
