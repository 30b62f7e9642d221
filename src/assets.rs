//! One-time sprite loading at startup.
//!
//! Assets live for the whole process once loaded; a missing folder or an
//! undecodable image is a fatal startup error carrying the offending
//! path, with no partial-catalog recovery.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use macroquad::prelude::*;

/// Load every image in `dir` (non-recursive) keyed by file stem
/// (extension stripped), so `terrain/N_E.png` resolves from the
/// neighbour key `"N_E"`.
pub async fn import_folder_dict(dir: &Path) -> anyhow::Result<HashMap<String, Texture2D>> {
    let mut textures = HashMap::new();
    for path in image_paths(dir)? {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Non-UTF-8 asset file name in {}", dir.display()))?
            .to_string();
        textures.insert(stem, load_image_texture(&path).await?);
    }
    Ok(textures)
}

fn image_paths(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Reading asset folder {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Reading asset folder {}", dir.display()))?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("png") | Some("jpg") | Some("jpeg")
            )
        })
        .collect();
    paths.sort();
    Ok(paths)
}

async fn load_image_texture(path: &Path) -> anyhow::Result<Texture2D> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Non-UTF-8 asset path {}", path.display()))?;
    let tex = load_texture(path_str)
        .await
        .with_context(|| format!("Loading texture {}", path.display()))?;
    tex.set_filter(FilterMode::Nearest);
    Ok(tex)
}

/// Every sprite table the editor needs, loaded once at startup.
pub struct EditorAssets {
    /// Terrain sprites keyed by neighbour key (`"X"`, `"N"`, `"N_E"`, ...).
    pub terrain: HashMap<String, Texture2D>,
    /// Tile sprites keyed by catalog label (`"water"`, `"gold"`, ...).
    pub sprites: HashMap<String, Texture2D>,
    /// Menu preview icons keyed by catalog label.
    pub previews: HashMap<String, Texture2D>,
    /// Custom mouse cursor, drawn at the pointer each frame.
    pub cursor: Option<Texture2D>,
}

impl EditorAssets {
    /// No textures at all. The draw pass skips anything it has no sprite
    /// for, so a session built on this still runs its full input logic.
    pub fn empty() -> Self {
        EditorAssets {
            terrain: HashMap::new(),
            sprites: HashMap::new(),
            previews: HashMap::new(),
            cursor: None,
        }
    }

    /// Load the editor's asset tree:
    /// `root/terrain`, `root/tiles`, `root/menu`, `root/cursors/mouse.png`.
    pub async fn load(root: &Path) -> anyhow::Result<Self> {
        let terrain = import_folder_dict(&root.join("terrain")).await?;
        let sprites = import_folder_dict(&root.join("tiles")).await?;
        let previews = import_folder_dict(&root.join("menu")).await?;
        let cursor = load_image_texture(&root.join("cursors").join("mouse.png")).await?;

        info!(
            "loaded {} terrain, {} tile and {} menu sprites from {}",
            terrain.len(),
            sprites.len(),
            previews.len(),
            root.display()
        );

        Ok(EditorAssets {
            terrain,
            sprites,
            previews,
            cursor: Some(cursor),
        })
    }
}
