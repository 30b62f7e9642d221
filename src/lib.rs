#![warn(missing_docs)]

//! Mario-Maker-style tile level editor and Tiled JSON map viewer for
//! Macroquad.
//!
//! The editor half (`canvas`, `viewport`, `selection`, `menu`, `editor`)
//! is an infinite paintable grid with terrain auto-tiling; the viewer half
//! (`ir_map`, `loader`, `map`, `spatial`, `render`) loads a Tiled JSON
//! export and draws it with chunked culling.

pub mod assets;
pub mod canvas;
pub mod catalog;
pub mod editor;
mod error;
pub mod ir_map;
mod loader {
    pub mod json_loader;
}
pub mod map;
pub mod menu;
mod render;
pub mod selection;
mod spatial;
pub mod viewport;

pub use canvas::{Canvas, CanvasTile, CellCoord, Direction};
pub use catalog::{Catalog, KindCategory, KindDef, KindId};
pub use editor::EditorSession;
pub use error::{EditorError, MapError};
pub use loader::json_loader::{decode_map_file_to_ir, decode_map_str_to_ir};
pub use ir_map::{IrObject, IrObjectShape, Properties, PropertyValue};
pub use map::{Map, ObjectLayer};
pub use selection::Selection;
pub use spatial::Gid;
pub use viewport::{Viewport, TILE_SIZE};
