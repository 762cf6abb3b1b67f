use anyhow::Result;
use squiggle_io::{ExportOptions, export_mesh};
use squiggle_scene::{MeshBuilder, Scene, SceneObject};

fn main() -> Result<()> {
    let scene = Scene::new().with_object(SceneObject::new("Mesh", MeshBuilder::triangle()))?;
    export_mesh(&scene, &ExportOptions::in_directory("out"))?;
    Ok(())
}
