use macroquad::prelude::*;
use tmx_viewer::{fit_camera, Scene};

const MAP_PATH: &str = "assets/Tilemaps/test-map.tmx";

fn window_conf() -> Conf {
    Conf {
        window_title: "tmx_viewer".into(),
        // Match the demo map's world size (30x20 cells of 16px).
        window_width: 480,
        window_height: 320,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut scene = Scene::load(MAP_PATH).await.expect("failed to load scene");
    let world = scene.world_size();

    info!(
        "loaded {}: {}x{} cells, {} tilesets, {} layers",
        MAP_PATH,
        scene.map.width,
        scene.map.height,
        scene.map.tilesets.len(),
        scene.map.layers.len()
    );

    loop {
        scene.update();

        clear_background(BLACK);
        set_camera(&fit_camera(world));
        scene.draw();
        set_default_camera();

        next_frame().await;
    }
}
