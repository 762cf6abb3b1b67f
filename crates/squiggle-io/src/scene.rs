use anyhow::{Context, Result};
use squiggle_scene::Scene;
use std::path::Path;
use tracing::debug;

/// Reads a JSON scene file and checks every mesh is well formed.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read scene file {}", path.display()))?;
    let scene: Scene = serde_json::from_str(&text)
        .with_context(|| format!("parse scene file {}", path.display()))?;
    scene
        .validate()
        .with_context(|| format!("validate scene file {}", path.display()))?;
    debug!(path = %path.display(), objects = scene.objects().len(), "scene loaded");
    Ok(scene)
}

pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }

    let text = serde_json::to_string_pretty(scene).context("serialize scene")?;
    std::fs::write(path, text).with_context(|| format!("write scene file {}", path.display()))?;
    Ok(())
}
