use crate::map::TileMap;
use anyhow::Context;
use macroquad::prelude::*;

/// A loaded map plus the GPU textures backing its tilesets.
///
/// Textures are uploaded once in [`Scene::load`], indexed parallel to
/// `map.tilesets`, and dropped together when the scene goes away.
pub struct Scene {
    /// The immutable map model.
    pub map: TileMap,
    textures: Vec<Texture2D>,
}

impl Scene {
    /// Load a map and upload every tileset image as a texture.
    pub async fn load(path: &str) -> anyhow::Result<Self> {
        let map = TileMap::load_from_file(path)
            .with_context(|| format!("loading map {path}"))?;

        let mut textures = Vec::with_capacity(map.tilesets.len());
        for ts in &map.tilesets {
            let img = ts.image.source.to_str().with_context(|| {
                format!("tileset '{}' image path is not valid UTF-8", ts.name)
            })?;
            let tex = load_texture(img)
                .await
                .with_context(|| format!("loading texture {img}"))?;
            tex.set_filter(FilterMode::Nearest);
            textures.push(tex);
        }

        Ok(Self { map, textures })
    }

    /// Per-frame state hook; runs before [`Scene::draw`]. Nothing moves in
    /// this scene yet.
    pub fn update(&mut self) {}

    /// Draw every layer back to front, one textured quad per occupied cell.
    ///
    /// Cells are walked row-major; gid 0 draws nothing. No culling or
    /// batching, the whole grid is issued every frame.
    pub fn draw(&self) {
        let tw = self.map.tile_width as f32;
        let th = self.map.tile_height as f32;

        for layer in &self.map.layers {
            for (i, &gid) in layer.data.iter().enumerate() {
                // Load-time validation guarantees every nonzero gid resolves.
                let Ok(Some((ts_idx, local))) = self.map.resolve(gid) else {
                    continue;
                };
                let ts = &self.map.tilesets[ts_idx];
                let x = (i as u32 % self.map.width) as f32 * tw;
                let y = (i as u32 / self.map.width) as f32 * th;

                draw_texture_ex(
                    &self.textures[ts_idx],
                    x,
                    y,
                    WHITE,
                    DrawTextureParams {
                        source: Some(ts.source_rect(local)),
                        ..Default::default()
                    },
                );
            }
        }
    }

    /// World size in pixels, the fixed logical size the camera fits to.
    pub fn world_size(&self) -> Vec2 {
        let (w, h) = self.map.pixel_size();
        vec2(w as f32, h as f32)
    }
}

/// Uniform scale and centering offset that fit `world` into `window`
/// without cropping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Scale applied to both axes.
    pub scale: f32,
    /// Window-pixel offset of the scaled world's top-left corner.
    pub offset: Vec2,
}

/// Fit math for letterboxing: scale by the tighter axis, center the rest.
pub fn letterbox(world: Vec2, window: Vec2) -> Letterbox {
    let scale = (window.x / world.x).min(window.y / world.y);
    Letterbox {
        scale,
        offset: (window - world * scale) * 0.5,
    }
}

/// Camera that shows exactly the world rect, letterboxed into the current
/// window. Aspect ratio is preserved; nothing is cropped.
pub fn fit_camera(world: Vec2) -> Camera2D {
    let window = vec2(screen_width(), screen_height());
    let fit = letterbox(world, window);
    Camera2D {
        // Negative y zoom keeps world space y-down like macroquad's
        // default screen space.
        zoom: vec2(2.0 / world.x, -2.0 / world.y),
        target: world * 0.5,
        viewport: Some((
            fit.offset.x as i32,
            fit.offset.y as i32,
            (world.x * fit.scale) as i32,
            (world.y * fit.scale) as i32,
        )),
        ..Default::default()
    }
}
