use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for the map loader and tile resolver.
///
/// Every variant names the file, layer or token involved so a failed load
/// can be diagnosed from the message alone.
#[derive(Debug)]
pub enum MapError {
    /// A map or tileset file could not be read.
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A map or tileset document is not valid XML of the expected shape.
    Xml {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_xml_rs::Error,
    },
    /// The map uses a feature outside this loader's scope
    /// (infinite maps, embedded tilesets, non-CSV layer data).
    Unsupported(String),
    /// A tileset declares dimensions the tile math cannot work with.
    InvalidTileset {
        /// Tileset name as declared in the `.tsx` file.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A cell in a layer's CSV data is not an unsigned integer.
    InvalidTileToken {
        /// Layer the token was found in.
        layer: String,
        /// The offending token, whitespace-trimmed.
        token: String,
    },
    /// A layer's cell count does not match map width × height.
    LayerSizeMismatch {
        /// Layer whose data was the wrong length.
        layer: String,
        /// Expected cell count (map width × height).
        expected: usize,
        /// Cell count actually present.
        actual: usize,
    },
    /// A nonzero global tile id is outside every tileset's range.
    UnresolvedTileId {
        /// The id that no tileset owns.
        gid: u32,
    },
    /// Load-time form of [`MapError::UnresolvedTileId`] naming the layer
    /// that referenced the id.
    InvalidTileGid {
        /// Layer containing the dangling reference.
        layer: String,
        /// The id that no tileset owns.
        gid: u32,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            MapError::Xml { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            MapError::Unsupported(what) => write!(f, "unsupported map feature: {}", what),
            MapError::InvalidTileset { name, reason } => {
                write!(f, "invalid tileset '{}': {}", name, reason)
            }
            MapError::InvalidTileToken { layer, token } => {
                write!(f, "layer '{}': tile id '{}' is not an integer", layer, token)
            }
            MapError::LayerSizeMismatch {
                layer,
                expected,
                actual,
            } => write!(
                f,
                "layer '{}': {} cells in data, map dimensions require {}",
                layer, actual, expected
            ),
            MapError::UnresolvedTileId { gid } => {
                write!(f, "tile id {} is outside every tileset range", gid)
            }
            MapError::InvalidTileGid { layer, gid } => write!(
                f,
                "layer '{}' references tile id {} which no tileset owns",
                layer, gid
            ),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Xml { source, .. } => Some(source),
            _ => None,
        }
    }
}
