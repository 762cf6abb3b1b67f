use anyhow::Result;
use squiggle_io::{ExportMode, ExportOptions, export_mesh, save_scene};
use squiggle_scene::{MeshBuilder, Modifier, Scene, SceneObject};

fn main() -> Result<()> {
    let object = SceneObject::new("Mesh", MeshBuilder::squiggle(256, 3.0, 1.0, 0.05)?)
        .with_modifier(Modifier::Triangulate)
        .with_modifier(Modifier::Rotate {
            axis: [1.0, 0.0, 0.0],
            degrees: 90.0,
        });
    let scene = Scene::new().with_object(object)?;
    save_scene(&scene, "out/squiggle.json")?;
    export_mesh(
        &scene,
        &ExportOptions::in_directory("out").with_mode(ExportMode::VertexIndexed),
    )?;
    Ok(())
}
