use std::path::Path;

use macroquad::prelude::*;
use macroquad_tile_maker::assets::EditorAssets;
use macroquad_tile_maker::editor::FrameInput;
use macroquad_tile_maker::{Catalog, EditorSession};

fn window_conf() -> Conf {
    Conf {
        window_title: "Tile Maker".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let assets = EditorAssets::load(Path::new("graphics"))
        .await
        .expect("Failed to load editor assets");

    if assets.cursor.is_some() {
        show_mouse(false);
    }

    let mut session = EditorSession::new(
        Catalog::editor_default(),
        assets,
        screen_width(),
        screen_height(),
    );

    loop {
        let input = FrameInput::poll();
        // The selection is clamped to the catalog, so a paint can only
        // fail if the catalog itself is broken.
        session
            .update(&input)
            .expect("tile catalog rejected a selected kind");

        session.draw(input.mouse);
        next_frame().await;
    }
}
