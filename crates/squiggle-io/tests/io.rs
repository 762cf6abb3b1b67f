use anyhow::Result;
use squiggle_io::{ExportMode, ExportOptions, export_mesh, load_scene, save_scene};
use squiggle_scene::{
    Attribute, Error, Mesh, MeshBuilder, Modifier, PATH_COLOR_ATTRIBUTE, POSITION_ATTRIBUTE,
    Scene, SceneObject,
};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_nanos(),
        Err(_) => 0,
    };
    path.push(format!("squiggle_{stamp}_{name}"));
    path
}

fn scene_with(mesh: Mesh) -> Result<Scene> {
    Ok(Scene::new().with_object(SceneObject::new("Mesh", mesh))?)
}

fn read_lines(path: &PathBuf) -> Result<Vec<String>> {
    Ok(fs::read_to_string(path)?.lines().map(str::to_string).collect())
}

#[test]
fn triangle_vertex_indexed() -> Result<()> {
    let dir = temp_dir("triangle");
    let options = ExportOptions::in_directory(&dir);
    let summary = export_mesh(&scene_with(MeshBuilder::triangle())?, &options)?;

    assert_eq!(summary.vertex_lines, 3);
    assert_eq!(summary.index_lines, Some(1));
    assert_eq!(
        fs::read_to_string(&options.vertices_path)?,
        "0.000000, 0.000000, 0.000000, 1, 0.500000, 1,\n\
         1.000000, 0.000000, 0.000000, 1, 0.500000, 1,\n\
         0.000000, 1.000000, 0.000000, 1, 0.500000, 1,\n"
    );
    assert_eq!(fs::read_to_string(&options.indices_path)?, "0, 1, 2, \n");

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn polygon_indexed_writes_one_line_per_corner() -> Result<()> {
    let dir = temp_dir("polygon_mode");
    let mesh = MeshBuilder::grid(3, 2, 2.0)?;
    let corners = mesh.loop_count();
    let options = ExportOptions::in_directory(&dir).with_mode(ExportMode::PolygonIndexed);

    let summary = export_mesh(&scene_with(mesh)?, &options)?;

    assert_eq!(summary.vertex_lines, corners);
    assert_eq!(summary.index_lines, None);
    assert_eq!(read_lines(&options.vertices_path)?.len(), corners);
    assert!(!options.indices_path.exists());

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn vertices_without_polygons() -> Result<()> {
    let dir = temp_dir("no_polygons");
    let mesh = Mesh::new(2)
        .with_attribute(
            POSITION_ATTRIBUTE,
            Attribute::Float3(vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
        )
        .with_attribute(PATH_COLOR_ATTRIBUTE, Attribute::Float(vec![0.0, 1.0]));
    let options = ExportOptions::in_directory(&dir);

    export_mesh(&scene_with(mesh)?, &options)?;

    assert_eq!(read_lines(&options.vertices_path)?.len(), 2);
    assert_eq!(fs::metadata(&options.indices_path)?.len(), 0);

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn missing_object_leaves_outputs_untouched() -> Result<()> {
    let dir = temp_dir("missing_object");
    fs::create_dir_all(&dir)?;
    let options = ExportOptions::in_directory(&dir);
    fs::write(&options.vertices_path, "previous run\n")?;

    let scene = Scene::new().with_object(SceneObject::new("Cube", MeshBuilder::triangle()))?;
    let err = match export_mesh(&scene, &options) {
        Ok(summary) => panic!("export should fail, got {summary:?}"),
        Err(err) => err,
    };

    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ObjectNotFound(name)) if name == "Mesh"
    ));
    assert_eq!(fs::read_to_string(&options.vertices_path)?, "previous run\n");
    assert!(!options.indices_path.exists());

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn attribute_errors_are_reported() -> Result<()> {
    let dir = temp_dir("attribute_errors");
    let options = ExportOptions::in_directory(&dir);

    let mut missing = MeshBuilder::triangle();
    missing.attributes.remove(PATH_COLOR_ATTRIBUTE);
    let err = export_mesh(&scene_with(missing)?, &options)
        .err()
        .ok_or_else(|| anyhow::anyhow!("missing attribute accepted"))?;
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::MissingAttribute(name)) if name == PATH_COLOR_ATTRIBUTE
    ));

    let short = MeshBuilder::triangle()
        .with_attribute(PATH_COLOR_ATTRIBUTE, Attribute::Color(vec![[1.0; 4]; 2]));
    let err = export_mesh(&scene_with(short)?, &options)
        .err()
        .ok_or_else(|| anyhow::anyhow!("short attribute accepted"))?;
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::AttributeLength {
            expected: 3,
            actual: 2,
            ..
        })
    ));

    assert!(!dir.exists());
    Ok(())
}

#[test]
fn unwritable_vertex_path_fails() -> Result<()> {
    let dir = temp_dir("unwritable");
    let options = ExportOptions::in_directory(&dir);
    fs::create_dir_all(&options.vertices_path)?;

    let err = export_mesh(&scene_with(MeshBuilder::triangle())?, &options)
        .err()
        .ok_or_else(|| anyhow::anyhow!("export into a directory succeeded"))?;

    let vertices = options.vertices_path.display().to_string();
    assert!(err.chain().any(|cause| cause.to_string().contains(&vertices)));
    assert!(err.chain().any(|cause| cause.is::<std::io::Error>()));
    assert!(!options.indices_path.exists());

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn exported_values_round_trip() -> Result<()> {
    let dir = temp_dir("round_trip");
    let mesh = MeshBuilder::squiggle(24, 1.5, 2.0, 0.2)?;
    let positions = mesh.vectors(POSITION_ATTRIBUTE)?.to_vec();
    let vertex_count = mesh.vertex_count;
    let options = ExportOptions::in_directory(&dir);

    export_mesh(&scene_with(mesh)?, &options)?;

    let lines = read_lines(&options.vertices_path)?;
    assert_eq!(lines.len(), vertex_count);
    for (line, expected) in lines.iter().zip(&positions) {
        let fields: Vec<&str> = line.split(", ").collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[3], "1");
        assert_eq!(fields[5], "1,");
        for (field, value) in fields[..3].iter().zip(expected) {
            let parsed: f64 = field.parse()?;
            assert!((parsed - f64::from(*value)).abs() <= 1.0e-6);
        }
    }

    for line in read_lines(&options.indices_path)? {
        let trimmed = line.strip_suffix(", ").unwrap_or(&line);
        for field in trimmed.split(", ") {
            let index: usize = field.parse()?;
            assert!(index < vertex_count);
        }
    }

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn export_uses_evaluated_mesh() -> Result<()> {
    let dir = temp_dir("evaluated");
    let object = SceneObject::new("Mesh", MeshBuilder::triangle()).with_modifier(
        Modifier::Translate {
            offset: [0.0, 0.0, 2.5],
        },
    );
    let options = ExportOptions::in_directory(&dir);

    export_mesh(&Scene::new().with_object(object)?, &options)?;

    let lines = read_lines(&options.vertices_path)?;
    assert_eq!(lines[0], "0.000000, 0.000000, 2.500000, 1, 0.500000, 1,");

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn scene_file_round_trip() -> Result<()> {
    let dir = temp_dir("scene_file");
    let path = dir.join("scene.json");
    let scene = Scene::new().with_object(
        SceneObject::new("Mesh", MeshBuilder::grid(2, 2, 1.0)?)
            .with_modifier(Modifier::Triangulate),
    )?;

    save_scene(&scene, &path)?;
    let loaded = load_scene(&path)?;
    assert_eq!(loaded, scene);

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn load_scene_rejects_bad_indices() -> Result<()> {
    let dir = temp_dir("bad_scene");
    fs::create_dir_all(&dir)?;
    let path = dir.join("scene.json");
    fs::write(
        &path,
        r#"{"objects":[{"name":"Mesh","mesh":{"vertex_count":2,"polygons":[[0,1,2]]}}]}"#,
    )?;

    let err = load_scene(&path)
        .err()
        .ok_or_else(|| anyhow::anyhow!("invalid scene accepted"))?;
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidMesh(_))
    ));

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}
