//! Pan origin and screen ↔ grid coordinate mapping.

use macroquad::prelude::*;

use crate::canvas::CellCoord;

/// Edge length of one grid cell in pixels.
pub const TILE_SIZE: i32 = 64;

/// Pixels moved per mouse-wheel tick.
pub const SCROLL_STEP: f32 = 50.0;

/// The world-space point currently rendered at the screen's top-left,
/// plus middle-mouse drag state.
///
/// Aside from the origin value itself the coordinate mapping is a pure,
/// stateless transform.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    /// Current pan offset: world (0, 0) draws at this screen position.
    pub origin: Vec2,
    pan_active: bool,
    pan_offset: Vec2,
}

impl Viewport {
    /// Viewport with the origin at the screen's top-left.
    pub fn new() -> Self {
        Viewport::default()
    }

    /// Grid cell under a screen point.
    ///
    /// Uses true floor division, not truncation: a point 60 px left of
    /// the origin is in cell -1, not cell 0.
    pub fn world_to_grid(&self, screen: Vec2) -> CellCoord {
        let delta = screen - self.origin;
        let ts = TILE_SIZE as f32;
        CellCoord::new((delta.x / ts).floor() as i32, (delta.y / ts).floor() as i32)
    }

    /// Screen position of a cell's top-left corner.
    pub fn grid_to_world(&self, cell: CellCoord) -> Vec2 {
        self.origin + vec2((cell.x * TILE_SIZE) as f32, (cell.y * TILE_SIZE) as f32)
    }

    /// Start a middle-mouse drag; the origin keeps its current offset
    /// from the mouse for the whole drag.
    pub fn begin_pan(&mut self, mouse: Vec2) {
        self.pan_active = true;
        self.pan_offset = mouse - self.origin;
    }

    /// Stop dragging.
    pub fn end_pan(&mut self) {
        self.pan_active = false;
    }

    /// Whether a drag is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan_active
    }

    /// Follow the mouse while dragging; no-op otherwise.
    pub fn update_pan(&mut self, mouse: Vec2) {
        if self.pan_active {
            self.origin = mouse - self.pan_offset;
        }
    }

    /// Discrete wheel scroll. Scrolling moves the world the opposite way,
    /// so the origin decrements. `vertical` selects the y axis (LeftCtrl
    /// held); otherwise the wheel scrolls horizontally.
    pub fn scroll(&mut self, ticks: f32, vertical: bool) {
        if vertical {
            self.origin.y -= ticks * SCROLL_STEP;
        } else {
            self.origin.x -= ticks * SCROLL_STEP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_delta_maps_to_the_cell_left_and_above() {
        let mut vp = Viewport::new();
        vp.origin = vec2(100.0, 100.0);

        // delta = (-60, -60), tile 64: floor division gives (-1, -1);
        // truncating division would wrongly give (0, 0).
        assert_eq!(vp.world_to_grid(vec2(40.0, 40.0)), CellCoord::new(-1, -1));
        assert_eq!(vp.world_to_grid(vec2(100.0, 100.0)), CellCoord::new(0, 0));
        assert_eq!(vp.world_to_grid(vec2(99.5, 100.0)), CellCoord::new(-1, 0));
    }

    #[test]
    fn world_to_grid_is_stable_for_a_fixed_origin() {
        let mut vp = Viewport::new();
        vp.origin = vec2(-37.0, 12.0);

        let p = vec2(311.0, 245.0);
        assert_eq!(vp.world_to_grid(p), vp.world_to_grid(p));
    }

    #[test]
    fn grid_to_world_inverts_cell_corners() {
        let mut vp = Viewport::new();
        vp.origin = vec2(13.0, -8.0);

        for cell in [
            CellCoord::new(0, 0),
            CellCoord::new(3, -2),
            CellCoord::new(-5, 7),
        ] {
            let corner = vp.grid_to_world(cell);
            assert_eq!(vp.world_to_grid(corner), cell);
        }
    }

    #[test]
    fn drag_pan_tracks_the_mouse() {
        let mut vp = Viewport::new();
        vp.origin = vec2(10.0, 20.0);

        vp.begin_pan(vec2(100.0, 100.0));
        vp.update_pan(vec2(130.0, 90.0));
        assert_eq!(vp.origin, vec2(40.0, 10.0));

        vp.end_pan();
        vp.update_pan(vec2(500.0, 500.0));
        assert_eq!(vp.origin, vec2(40.0, 10.0));
    }

    #[test]
    fn wheel_scroll_moves_one_axis_per_tick() {
        let mut vp = Viewport::new();
        vp.scroll(1.0, false);
        assert_eq!(vp.origin, vec2(-SCROLL_STEP, 0.0));
        vp.scroll(-2.0, true);
        assert_eq!(vp.origin, vec2(-SCROLL_STEP, 2.0 * SCROLL_STEP));
    }
}
