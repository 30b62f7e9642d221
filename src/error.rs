use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for the Tiled JSON map loader.
#[derive(Debug)]
pub enum MapError {
    /// File I/O failure, with the path that was being read.
    Io {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// JSON parse failure, with the path of the offending file.
    Json {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Underlying serde_json error.
        source: serde_json::Error,
    },
    /// Structurally invalid map (bad extension, non-JSON tileset source, ...).
    InvalidMap(String),
    /// A tile layer's `data` length does not match `width * height`.
    InvalidLayerSize(String),
    /// A gid falls outside the range covered by the loaded tilesets.
    InvalidGid {
        /// Name of the layer holding the bad gid.
        layer: String,
        /// The offending gid (flip flags masked off).
        gid: u32,
        /// Highest gid any loaded tileset covers.
        max_gid: u32,
    },
    /// A custom property carried a `type` this loader does not understand.
    UnsupportedPropertyType {
        /// Property name.
        name: String,
        /// The unrecognized `type` string.
        kind: String,
    },
    /// Unsupported map file format (anything but Tiled's JSON export).
    UnsupportedFormat(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "JSON parse error in {}: {}", path.display(), source)
            }
            MapError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
            MapError::InvalidLayerSize(name) => write!(
                f,
                "Invalid layer size for layer '{}': data length does not match map dimensions",
                name
            ),
            MapError::InvalidGid {
                layer,
                gid,
                max_gid,
            } => write!(
                f,
                "Layer '{}' references gid {} outside tileset range (max {})",
                layer, gid, max_gid
            ),
            MapError::UnsupportedPropertyType { name, kind } => {
                write!(f, "Property '{}' has unsupported type '{}'", name, kind)
            }
            MapError::UnsupportedFormat(path) => {
                write!(f, "Unsupported map file format: {}", path)
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error type for the editor core.
#[derive(Debug)]
pub enum EditorError {
    /// A paint was requested with a kind id outside the catalog. The
    /// catalog is closed and the selection index is clamped to it, so this
    /// is a programming error, not a runtime condition.
    UnknownKind(usize),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::UnknownKind(id) => {
                write!(f, "Kind id {} is not in the tile catalog", id)
            }
        }
    }
}

impl std::error::Error for EditorError {}
