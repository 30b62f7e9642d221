//! Editor menu: a 2×2 button panel in the bottom-right corner.
//!
//! Each button owns one kind group (terrain, water, coins, enemies).
//! Left-clicking a button selects its current kind; right-clicking cycles
//! through the group's variants first. The button whose group holds the
//! selected kind draws a highlight outline.

use std::collections::HashMap;

use macroquad::prelude::*;

use crate::catalog::{Catalog, KindCategory, KindId};

const MENU_SIZE: f32 = 180.0;
const MENU_MARGIN: f32 = 6.0;
const BUTTON_MARGIN: f32 = 5.0;

const BUTTON_BG: Color = Color::new(0.20, 0.196, 0.24, 1.0);
const BUTTON_LINE: Color = Color::new(0.96, 0.945, 0.87, 1.0);

/// One menu button holding a cyclable group of kinds.
#[derive(Debug, Clone)]
pub struct MenuButton {
    /// Screen-space hit area.
    pub rect: Rect,
    kinds: Vec<KindId>,
    index: usize,
}

impl MenuButton {
    /// The kind this button currently offers.
    pub fn current(&self) -> KindId {
        self.kinds[self.index]
    }

    /// Advance to the next variant, wrapping at the end of the group.
    fn cycle(&mut self) {
        self.index = (self.index + 1) % self.kinds.len();
    }
}

/// The menu panel.
#[derive(Debug, Clone)]
pub struct Menu {
    /// Panel hit area; clicks inside it never reach the canvas.
    pub rect: Rect,
    buttons: Vec<MenuButton>,
    catalog: Catalog,
}

impl Menu {
    /// Lay out the panel for a `screen_w` × `screen_h` window.
    ///
    /// Groups with no catalog entries get no button, so the layout
    /// follows the catalog rather than assuming four populated groups.
    pub fn new(catalog: Catalog, screen_w: f32, screen_h: f32) -> Self {
        let rect = Rect::new(
            screen_w - MENU_SIZE - MENU_MARGIN,
            screen_h - MENU_SIZE - MENU_MARGIN,
            MENU_SIZE,
            MENU_SIZE,
        );

        let half = MENU_SIZE / 2.0;
        let slots = [
            Rect::new(rect.x, rect.y, half, half),
            Rect::new(rect.x + half, rect.y, half, half),
            Rect::new(rect.x, rect.y + half, half, half),
            Rect::new(rect.x + half, rect.y + half, half, half),
        ];
        let groups = [
            KindCategory::Terrain,
            KindCategory::Water,
            KindCategory::Coin(0),
            KindCategory::Enemy(0),
        ];

        let mut buttons = Vec::new();
        for (slot, group) in slots.iter().zip(groups) {
            let kinds = catalog.ids_in_group(group);
            if kinds.is_empty() {
                continue;
            }
            buttons.push(MenuButton {
                rect: inset(*slot, BUTTON_MARGIN),
                kinds,
                index: 0,
            });
        }

        Menu {
            rect,
            buttons,
            catalog,
        }
    }

    /// Whether a screen point lands on the panel.
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    /// Handle a click at `point`. Right-click cycles the hit button's
    /// variant before selecting. Returns the kind to select, or `None`
    /// when no button was hit.
    pub fn click(&mut self, point: Vec2, right_click: bool) -> Option<KindId> {
        let button = self.buttons.iter_mut().find(|b| b.rect.contains(point))?;
        if right_click {
            button.cycle();
        }
        Some(button.current())
    }

    /// Draw buttons and previews; outline the button whose group holds
    /// `selected`. Missing preview sprites leave the button blank rather
    /// than failing.
    pub fn draw(&self, previews: &HashMap<String, Texture2D>, selected: KindId) {
        let selected_category = self.catalog.category_of(selected).ok();

        for button in &self.buttons {
            let r = button.rect;
            draw_rectangle(r.x, r.y, r.w, r.h, BUTTON_BG);

            if let Ok(def) = self.catalog.get(button.current()) {
                if let Some(tex) = previews.get(def.label) {
                    let dest = icon_dest(r, tex);
                    draw_texture_ex(
                        tex,
                        dest.x,
                        dest.y,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(dest.w, dest.h)),
                            ..Default::default()
                        },
                    );
                }

                if let Some(sel) = selected_category {
                    if def.category.same_group(&sel) {
                        let o = inset(r, -2.0);
                        draw_rectangle_lines(o.x, o.y, o.w, o.h, 5.0, BUTTON_LINE);
                    }
                }
            }
        }
    }
}

fn inset(r: Rect, by: f32) -> Rect {
    Rect::new(r.x + by, r.y + by, r.w - 2.0 * by, r.h - 2.0 * by)
}

/// Center the preview in the button, shrunk to fit while keeping aspect.
fn icon_dest(button: Rect, tex: &Texture2D) -> Rect {
    let max = (button.w.min(button.h)) * 0.7;
    let scale = (max / tex.width()).min(max / tex.height()).min(1.0);
    let w = tex.width() * scale;
    let h = tex.height() * scale;
    Rect::new(
        button.x + (button.w - w) / 2.0,
        button.y + (button.h - h) / 2.0,
        w,
        h,
    )
}
