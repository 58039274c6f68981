use crate::error::MapError;
use crate::tmx::{RawLayer, RawMap, RawTileset, RawTilesetRef};
use macroquad::math::Rect;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A fully resolved tile map: grid dimensions, tilesets and tile layers.
///
/// Built once at startup from a `.tmx` file plus its external `.tsx`
/// tilesets, then read-only. Loading the same files twice yields
/// structurally equal maps.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Width of one cell in pixels.
    pub tile_width: u32,
    /// Height of one cell in pixels.
    pub tile_height: u32,
    /// Tilesets in declaration order; each owns a contiguous gid range.
    pub tilesets: Vec<TileSet>,
    /// Layers in declaration order, drawn back to front.
    pub layers: Vec<Layer>,
}

/// One tileset: a gid range backed by a single atlas image.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    /// Name declared in the `.tsx` file.
    pub name: String,
    /// First global tile id owned by this tileset (inclusive).
    pub first_gid: u32,
    /// Number of tiles; the owned range is `first_gid..first_gid + tile_count`.
    pub tile_count: u32,
    /// Tiles per row in the atlas image.
    pub columns: u32,
    /// Width of one tile in pixels.
    pub tile_width: u32,
    /// Height of one tile in pixels.
    pub tile_height: u32,
    /// The backing atlas image.
    pub image: Image,
}

/// A tileset's backing image, path already resolved against the assets root.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Normalized path, ready to load.
    pub source: PathBuf,
    /// Declared pixel width.
    pub width: u32,
    /// Declared pixel height.
    pub height: u32,
}

/// One grid-shaped plane of tile placements.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name from the map document.
    pub name: String,
    /// Grid width in cells; matches the map's.
    pub width: u32,
    /// Grid height in cells; matches the map's.
    pub height: u32,
    /// Global tile ids, row-major, one per cell; `0` is an empty cell.
    pub data: Vec<u32>,
}

impl TileMap {
    /// Load and fully resolve a map document plus its external tilesets.
    ///
    /// Tileset `source` paths are resolved relative to the map file's
    /// directory. Any I/O, parse or referential-integrity problem fails the
    /// whole load; there is no partial-success mode.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::load_from_str(&text, map_dir, path)
    }

    /// Resolve a map document already in memory. `map_dir` anchors the
    /// tileset `source` paths; `doc_path` only labels parse errors.
    pub fn load_from_str(text: &str, map_dir: &Path, doc_path: &Path) -> Result<Self, MapError> {
        let raw: RawMap = serde_xml_rs::from_str(text).map_err(|source| MapError::Xml {
            path: doc_path.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw, map_dir)
    }

    fn from_raw(raw: RawMap, map_dir: &Path) -> Result<Self, MapError> {
        if raw.infinite != 0 {
            return Err(MapError::Unsupported("infinite maps".to_owned()));
        }

        let mut tilesets = Vec::with_capacity(raw.tilesets.len());
        for stub in &raw.tilesets {
            tilesets.push(TileSet::resolve(stub, map_dir)?);
        }

        let mut layers = Vec::with_capacity(raw.layers.len());
        for l in &raw.layers {
            layers.push(Layer::decode(l, raw.width, raw.height)?);
        }

        let map = TileMap {
            width: raw.width,
            height: raw.height,
            tile_width: raw.tilewidth,
            tile_height: raw.tileheight,
            tilesets,
            layers,
        };
        map.check_tile_refs()?;
        Ok(map)
    }

    /// Map a global tile id to `(tileset index, local tile index)`.
    ///
    /// `0` is the empty cell and resolves to `Ok(None)`. Tilesets are
    /// scanned in declaration order and the first owning range wins; no
    /// gid ordering is assumed. A nonzero id outside every range is a
    /// data-integrity error, never treated as empty.
    pub fn resolve(&self, gid: u32) -> Result<Option<(usize, u32)>, MapError> {
        if gid == 0 {
            return Ok(None);
        }
        for (idx, ts) in self.tilesets.iter().enumerate() {
            if ts.contains(gid) {
                return Ok(Some((idx, gid - ts.first_gid)));
            }
        }
        Err(MapError::UnresolvedTileId { gid })
    }

    /// World size in pixels: grid dimensions times cell size.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width * self.tile_width, self.height * self.tile_height)
    }

    /// Every nonzero gid in every layer must land in some tileset's range.
    /// Runs at load so the draw loop never meets a dangling reference.
    fn check_tile_refs(&self) -> Result<(), MapError> {
        for layer in &self.layers {
            for &gid in &layer.data {
                if gid != 0 && self.resolve(gid).is_err() {
                    return Err(MapError::InvalidTileGid {
                        layer: layer.name.clone(),
                        gid,
                    });
                }
            }
        }
        Ok(())
    }
}

impl TileSet {
    /// Resolve a tileset stub from the map document into a full tileset by
    /// reading its external `.tsx` file.
    ///
    /// `firstgid` is only ever defined at the map level, so the stub's
    /// value is kept; everything else comes from the `.tsx`.
    fn resolve(stub: &RawTilesetRef, map_dir: &Path) -> Result<Self, MapError> {
        let source = stub.source.as_deref().ok_or_else(|| {
            MapError::Unsupported("embedded tilesets (no source attribute)".to_owned())
        })?;
        let tsx_path = map_dir.join(source);
        let text = fs::read_to_string(&tsx_path).map_err(|source| MapError::Io {
            path: tsx_path.clone(),
            source,
        })?;
        let def: RawTileset = serde_xml_rs::from_str(&text).map_err(|source| MapError::Xml {
            path: tsx_path.clone(),
            source,
        })?;

        if def.columns == 0 || def.tilecount == 0 {
            return Err(MapError::InvalidTileset {
                name: def.name,
                reason: "tilecount and columns must be nonzero".to_owned(),
            });
        }

        // The image path is relative to the .tsx file's own directory and
        // routinely climbs out of it ("../Images/..."); normalize so the
        // final path is rooted at the assets root, not left with "..".
        let tsx_dir = tsx_path.parent().unwrap_or(map_dir);
        let image_path = normalize(&tsx_dir.join(&def.image.source));

        Ok(TileSet {
            name: def.name,
            first_gid: stub.firstgid,
            tile_count: def.tilecount,
            columns: def.columns,
            tile_width: def.tilewidth,
            tile_height: def.tileheight,
            image: Image {
                source: image_path,
                width: def.image.width,
                height: def.image.height,
            },
        })
    }

    /// True if this tileset owns global id `gid`.
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid < self.first_gid + self.tile_count
    }

    /// Pixel rectangle of local tile `index` inside the atlas image.
    pub fn source_rect(&self, index: u32) -> Rect {
        let col = index % self.columns;
        let row = index / self.columns;
        Rect::new(
            (col * self.tile_width) as f32,
            (row * self.tile_height) as f32,
            self.tile_width as f32,
            self.tile_height as f32,
        )
    }
}

impl Layer {
    /// Decode a layer's CSV cell text into gids and check the cell count
    /// against the map dimensions.
    fn decode(raw: &RawLayer, map_width: u32, map_height: u32) -> Result<Self, MapError> {
        match raw.data.encoding.as_deref() {
            Some("csv") => {}
            other => {
                return Err(MapError::Unsupported(format!(
                    "layer data encoding {:?} (only csv)",
                    other.unwrap_or("none")
                )));
            }
        }

        // Tiled wraps the CSV in newlines for readability; whitespace is
        // layout, not data, so each token is trimmed before parsing.
        let text = raw.data.text.trim();
        let mut data = Vec::with_capacity((map_width * map_height) as usize);
        if !text.is_empty() {
            for token in text.split(',') {
                let token = token.trim();
                let gid = token.parse::<u32>().map_err(|_| MapError::InvalidTileToken {
                    layer: raw.name.clone(),
                    token: token.to_owned(),
                })?;
                data.push(gid);
            }
        }

        let expected = (map_width * map_height) as usize;
        if data.len() != expected {
            return Err(MapError::LayerSizeMismatch {
                layer: raw.name.clone(),
                expected,
                actual: data.len(),
            });
        }

        Ok(Layer {
            name: raw.name.clone(),
            width: raw.width,
            height: raw.height,
            data,
        })
    }

    /// Gid at cell `(x, y)`, row-major.
    pub fn gid_at(&self, x: u32, y: u32) -> u32 {
        self.data[(y * self.width + x) as usize]
    }
}

/// Lexically resolve `.` and `..` segments. `Tilemaps/../Images/a.png`
/// becomes `Images/a.png`; a `..` that climbs past the start is kept.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(comp.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
