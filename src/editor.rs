//! The editor session: all mutable editor state plus the per-frame
//! input and draw passes.
//!
//! Input is polled into a plain [`FrameInput`] first and applied with
//! [`EditorSession::update`], so every state transition runs without a
//! live window in tests.

use macroquad::prelude::*;

use crate::assets::EditorAssets;
use crate::canvas::Canvas;
use crate::catalog::{Catalog, KindCategory};
use crate::error::EditorError;
use crate::menu::Menu;
use crate::selection::Selection;
use crate::viewport::{Viewport, TILE_SIZE};

const SKY: Color = Color::new(0.36, 0.67, 0.91, 1.0);
const LINE: Color = Color::new(0.0, 0.0, 0.0, 0.12);
const ORIGIN_MARKER: Color = Color::new(0.86, 0.2, 0.2, 1.0);

/// One frame's worth of polled input, detached from the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub mouse: Vec2, // screen space
    pub left_pressed: bool,
    pub left_down: bool,
    pub right_pressed: bool,
    pub middle_pressed: bool,
    pub middle_down: bool,
    pub wheel: f32, // positive away from the user
    pub ctrl_down: bool,
    pub select_next: bool, // right arrow
    pub select_prev: bool, // left arrow
}

impl FrameInput {
    /// Poll macroquad's input state for this frame.
    pub fn poll() -> Self {
        let (_, wheel_y) = mouse_wheel();
        FrameInput {
            mouse: Vec2::from(mouse_position()),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_down: is_mouse_button_down(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            middle_pressed: is_mouse_button_pressed(MouseButton::Middle),
            middle_down: is_mouse_button_down(MouseButton::Middle),
            wheel: wheel_y,
            ctrl_down: is_key_down(KeyCode::LeftControl),
            select_next: is_key_pressed(KeyCode::Right),
            select_prev: is_key_pressed(KeyCode::Left),
        }
    }
}

/// All editor state for one open canvas.
pub struct EditorSession {
    pub canvas: Canvas,
    pub viewport: Viewport,
    pub selection: Selection,
    pub menu: Menu,
    catalog: Catalog,
    assets: EditorAssets,
}

impl EditorSession {
    /// Fresh session for a `screen_w` × `screen_h` window.
    pub fn new(catalog: Catalog, assets: EditorAssets, screen_w: f32, screen_h: f32) -> Self {
        EditorSession {
            canvas: Canvas::new(catalog.clone()),
            viewport: Viewport::new(),
            selection: Selection::new(),
            menu: Menu::new(catalog.clone(), screen_w, screen_h),
            catalog,
            assets,
        }
    }

    /// Apply one frame of input: pan, selection hotkeys, menu clicks, and
    /// canvas painting, in that order.
    pub fn update(&mut self, input: &FrameInput) -> Result<(), EditorError> {
        // Pan: middle-mouse drag plus discrete wheel steps.
        if input.middle_pressed {
            self.viewport.begin_pan(input.mouse);
        }
        if !input.middle_down {
            self.viewport.end_pan();
        }
        if input.wheel != 0.0 {
            self.viewport.scroll(input.wheel.signum(), input.ctrl_down);
        }
        self.viewport.update_pan(input.mouse);

        if input.select_next {
            self.selection.step(1, &self.catalog);
        }
        if input.select_prev {
            self.selection.step(-1, &self.catalog);
        }

        if self.menu.contains(input.mouse) {
            if input.left_pressed || input.right_pressed {
                if let Some(kind) = self.menu.click(input.mouse, input.right_pressed) {
                    self.selection.set(kind, &self.catalog);
                }
            }
            return Ok(());
        }

        // Holding the left button drag-paints; painting is suppressed
        // while a pan drag is active.
        if input.left_down && !self.viewport.is_panning() {
            let cell = self.viewport.world_to_grid(input.mouse);
            self.canvas.paint(cell, self.selection.kind())?;
        }
        Ok(())
    }

    /// Render one frame: background, support lines, tiles, menu, origin
    /// marker and cursor.
    pub fn draw(&self, mouse: Vec2) {
        clear_background(SKY);
        self.draw_support_lines();
        self.draw_tiles();
        self.menu.draw(&self.assets.previews, self.selection.kind());

        let o = self.viewport.origin;
        draw_circle(o.x, o.y, 8.0, ORIGIN_MARKER);

        if let Some(cursor) = &self.assets.cursor {
            draw_texture(cursor, mouse.x, mouse.y, WHITE);
        }
    }

    /// Faint grid lines aligned to the origin, covering the whole screen
    /// at any pan offset.
    fn draw_support_lines(&self) {
        let ts = TILE_SIZE as f32;
        let w = screen_width();
        let h = screen_height();
        // First line left of / above the screen edge, whatever the pan.
        let off_x = self.viewport.origin.x.rem_euclid(ts);
        let off_y = self.viewport.origin.y.rem_euclid(ts);

        let cols = (w / ts) as i32 + 1;
        for col in 0..=cols {
            let x = off_x + (col - 1) as f32 * ts;
            draw_line(x, 0.0, x, h, 1.0, LINE);
        }
        let rows = (h / ts) as i32 + 1;
        for row in 0..=rows {
            let y = off_y + (row - 1) as f32 * ts;
            draw_line(0.0, y, w, y, 1.0, LINE);
        }
    }

    fn draw_tiles(&self) {
        let ts = TILE_SIZE as f32;
        let dest = DrawTextureParams {
            dest_size: Some(vec2(ts, ts)),
            ..Default::default()
        };

        for (&cell, tile) in self.canvas.iter() {
            let pos = self.viewport.grid_to_world(cell);

            if tile.has_water {
                if let Some(tex) = self.assets.sprites.get("water") {
                    draw_texture_ex(tex, pos.x, pos.y, WHITE, dest.clone());
                }
            }

            if tile.has_terrain {
                let key = tile.terrain_key();
                // Unmatched neighbour combinations fall back to the
                // isolated block sprite.
                let tex = self
                    .assets
                    .terrain
                    .get(&key)
                    .or_else(|| self.assets.terrain.get(crate::canvas::ISOLATED_KEY));
                if let Some(tex) = tex {
                    draw_texture_ex(tex, pos.x, pos.y, WHITE, dest.clone());
                }
            }

            if let Some(variant) = tile.coin {
                self.draw_labeled(KindCategory::Coin(variant), pos, &dest);
            }
            if let Some(variant) = tile.enemy {
                self.draw_labeled(KindCategory::Enemy(variant), pos, &dest);
            }
        }
    }

    fn draw_labeled(&self, category: KindCategory, pos: Vec2, dest: &DrawTextureParams) {
        if let Some(tex) = self
            .catalog
            .label_for(category)
            .and_then(|label| self.assets.sprites.get(label))
        {
            draw_texture_ex(tex, pos.x, pos.y, WHITE, dest.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellCoord;
    use crate::catalog::KindId;

    fn session() -> EditorSession {
        EditorSession::new(
            Catalog::editor_default(),
            EditorAssets::empty(),
            1280.0,
            720.0,
        )
    }

    fn click_at(mouse: Vec2) -> FrameInput {
        FrameInput {
            mouse,
            left_pressed: true,
            left_down: true,
            ..Default::default()
        }
    }

    #[test]
    fn canvas_click_paints_the_cell_under_the_pointer() {
        let mut session = session();
        session.update(&click_at(vec2(70.0, 10.0))).unwrap();

        assert_eq!(session.canvas.len(), 1);
        assert!(session.canvas.get(CellCoord::new(1, 0)).is_some());
    }

    #[test]
    fn painting_and_requerying_the_same_point_hits_the_same_cell() {
        let mut session = session();
        let p = vec2(40.0, 40.0);
        session.viewport.origin = vec2(100.0, 100.0);

        session.update(&click_at(p)).unwrap();
        let cell = session.viewport.world_to_grid(p);
        assert_eq!(cell, CellCoord::new(-1, -1));
        assert!(session.canvas.get(cell).is_some());
    }

    #[test]
    fn menu_clicks_select_instead_of_painting() {
        let mut session = session();
        let inside_menu = session.menu.rect.center();

        session.update(&click_at(inside_menu)).unwrap();
        assert!(session.canvas.is_empty());
    }

    #[test]
    fn middle_drag_pans_and_suppresses_painting() {
        let mut session = session();

        session
            .update(&FrameInput {
                mouse: vec2(100.0, 100.0),
                middle_pressed: true,
                middle_down: true,
                left_down: true,
                ..Default::default()
            })
            .unwrap();
        session
            .update(&FrameInput {
                mouse: vec2(150.0, 120.0),
                middle_down: true,
                left_down: true,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(session.viewport.origin, vec2(50.0, 20.0));
        assert!(session.canvas.is_empty());
    }

    #[test]
    fn wheel_scrolls_x_and_ctrl_wheel_scrolls_y() {
        let mut session = session();

        session
            .update(&FrameInput {
                wheel: 1.0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.viewport.origin.y, 0.0);
        assert!(session.viewport.origin.x < 0.0);

        let x = session.viewport.origin.x;
        session
            .update(&FrameInput {
                wheel: -1.0,
                ctrl_down: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.viewport.origin.x, x);
        assert!(session.viewport.origin.y > 0.0);
    }

    #[test]
    fn selection_hotkeys_step_and_clamp() {
        let mut session = session();
        let prev = FrameInput {
            select_prev: true,
            ..Default::default()
        };
        let next = FrameInput {
            select_next: true,
            ..Default::default()
        };

        session.update(&prev).unwrap();
        assert_eq!(session.selection.kind(), KindId(0));

        let len = Catalog::editor_default().len();
        for _ in 0..len + 5 {
            session.update(&next).unwrap();
        }
        assert_eq!(session.selection.kind(), KindId(len - 1));
    }
}
