#![warn(missing_docs)]

//! Minimal Tiled TMX loader/renderer for Macroquad.
//!
//! Loads a `.tmx` map and its external `.tsx` tilesets into an immutable
//! [`TileMap`], resolves global tile ids to tileset atlas rectangles, and
//! draws the layers letterboxed into whatever window size is available.

mod error;
mod map;
mod render;
#[allow(dead_code)]
mod tmx;

pub use error::MapError;
pub use map::{Image, Layer, TileMap, TileSet};
pub use render::{fit_camera, letterbox, Letterbox, Scene};
