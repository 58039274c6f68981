use serde::Deserialize;

/// Root `<map>` document exactly as Tiled writes it.
#[derive(Debug, Deserialize)]
pub struct RawMap {
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    /// Tiled writes `0`/`1` here, so this is not decoded as a bool.
    #[serde(default)]
    pub infinite: u8,
    #[serde(default)]
    pub nextlayerid: u32,
    #[serde(rename = "tileset", default)]
    pub tilesets: Vec<RawTilesetRef>,
    #[serde(rename = "layer", default)]
    pub layers: Vec<RawLayer>,
}

/// Tileset stub inside the map document: the gid offset plus a pointer to
/// the external `.tsx` file holding everything else.
#[derive(Debug, Deserialize)]
pub struct RawTilesetRef {
    pub firstgid: u32,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLayer {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: RawData,
}

/// `<data>` block of a tile layer; the cell text is kept raw here and
/// decoded in `map`.
#[derive(Debug, Deserialize)]
pub struct RawData {
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(rename = "$value", default)]
    pub text: String,
}

/// External `<tileset>` document (`.tsx`).
#[derive(Debug, Deserialize)]
pub struct RawTileset {
    #[serde(default)]
    pub name: String,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub tilecount: u32,
    pub columns: u32,
    pub image: RawImage,
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    /// Relative to the `.tsx` file's own directory, `../` segments allowed.
    pub source: String,
    pub width: u32,
    pub height: u32,
}
