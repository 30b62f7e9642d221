//! Canonical, format-agnostic map representation.
//!
//! The loader decodes Tiled's JSON export into these types; the viewer
//! [`crate::Map`] consumes them without knowing anything about the file
//! format.

use std::collections::HashMap;

use macroquad::prelude::*;

/// A whole decoded map.
#[derive(Debug)]
pub struct IrMap {
    pub tile_w: u32,
    pub tile_h: u32,
    pub properties: Properties,
    pub tilesets: Vec<IrTileset>, // must be sorted by first_gid
    pub layers: Vec<IrLayer>,     // draw order: array order
}

#[derive(Debug)]
pub enum IrTileset {
    /// One image atlas with a regular grid.
    Atlas {
        first_gid: u32,
        image: String, // relative to the map file
        tile_w: u32,
        tile_h: u32,
        tilecount: u32,
        columns: u32,
        spacing: u32, // 0 if not used
        margin: u32,  // 0 if not used
    },
}

#[derive(Debug)]
pub enum IrLayerKind {
    Tiles {
        width: usize,
        height: usize,
        data: Vec<u32>, // raw gids, row-major, flip flags included; 0 is empty
    },
    Objects {
        objects: Vec<IrObject>,
    },
    /// A layer type this loader does not decode (image layers, groups).
    Unsupported,
}

#[derive(Debug)]
pub struct IrLayer {
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    pub offset: Vec2, // world offset for this layer
    pub properties: Properties,
    pub kind: IrLayerKind,
}

/// Geometry of one object.
#[derive(Debug, Clone, PartialEq)]
pub enum IrObjectShape {
    /// A tile stamped at the object position (anchored bottom-left, per
    /// Tiled).
    Tile { gid: u32 },
    Point,
    Rectangle,
    /// Ellipse inscribed in the object's rectangle.
    Ellipse,
    Polygon(Vec<Vec2>),  // closed; points relative to the object position
    Polyline(Vec<Vec2>), // open line strip
}

/// One object from an object layer.
#[derive(Debug, Clone)]
pub struct IrObject {
    pub id: u32,
    pub name: String,
    pub class_name: String, // Tiled's `class`, falling back to the legacy `type`
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32, // degrees
    pub visible: bool,
    pub shape: IrObjectShape,
    pub properties: Properties,
}

/// A typed custom property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    I64(i64), // Tiled `int` and `object` ids
    F32(f32),
    String(String), // `string`, `file`, `color`, `class`
}

/// Name → value bag of custom properties with typed accessors.
#[derive(Debug, Clone, Default)]
pub struct Properties(HashMap<String, PropertyValue>);

impl Properties {
    pub fn new() -> Self {
        Properties::default()
    }

    pub fn insert(&mut self, name: String, value: PropertyValue) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(PropertyValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Integer property narrowed to i32; `None` when it does not fit.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        match self.0.get(name) {
            Some(PropertyValue::I64(v)) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(PropertyValue::I64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.0.get(name) {
            Some(PropertyValue::F32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(PropertyValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
