use macroquad::prelude::*;
use macroquad_tile_maker::Map;

fn window_conf() -> Conf {
    Conf {
        window_title: "Map Viewer".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let map = Map::load("assets/map.json")
        .await
        .expect("Failed to load map");

    info!(
        "loaded map: {} object layers, {} objects",
        map.object_layers().len(),
        map.objects().count()
    );

    loop {
        clear_background(BLACK);

        let screen = vec2(screen_width(), screen_height());
        map.draw_visible_rect(Vec2::ZERO, screen);
        map.draw_objects_tiles();
        map.draw_objects_debug();

        draw_text(&format!("FPS: {}", get_fps()), 20.0, 30.0, 30.0, WHITE);
        next_frame().await;
    }
}
