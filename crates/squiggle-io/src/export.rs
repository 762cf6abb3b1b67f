use anyhow::{Context, Result};
use squiggle_scene::{
    DEFAULT_OBJECT_NAME, Error, Mesh, PATH_COLOR_ATTRIBUTE, POSITION_ATTRIBUTE, Polygon, Scene,
};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_VERTICES_FILE: &str = "squiggle.txt";
pub const DEFAULT_INDICES_FILE: &str = "squiggle_idx.txt";

/// Order in which vertex records are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportMode {
    /// One record per vertex in storage order, plus an index file with one
    /// line per polygon.
    #[default]
    VertexIndexed,
    /// One record per polygon corner; shared vertices repeat. No index file.
    PolygonIndexed,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::VertexIndexed => f.write_str("vertex-indexed"),
            ExportMode::PolygonIndexed => f.write_str("polygon-indexed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    pub object: String,
    pub position_attribute: String,
    pub color_attribute: String,
    pub color_channel: usize,
    pub mode: ExportMode,
    pub vertices_path: PathBuf,
    pub indices_path: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            object: DEFAULT_OBJECT_NAME.to_string(),
            position_attribute: POSITION_ATTRIBUTE.to_string(),
            color_attribute: PATH_COLOR_ATTRIBUTE.to_string(),
            color_channel: 0,
            mode: ExportMode::default(),
            vertices_path: PathBuf::from(DEFAULT_VERTICES_FILE),
            indices_path: PathBuf::from(DEFAULT_INDICES_FILE),
        }
    }
}

impl ExportOptions {
    /// Default file names placed under `dir`.
    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vertices_path: dir.join(DEFAULT_VERTICES_FILE),
            indices_path: dir.join(DEFAULT_INDICES_FILE),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub mode: ExportMode,
    pub vertex_lines: usize,
    /// `None` when the mode writes no index file.
    pub index_lines: Option<usize>,
}

/// One line of the vertex file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexRecord {
    pub position: [f32; 3],
    pub color: f32,
}

/// Evaluates the configured object and writes its vertex (and, in
/// vertex-indexed mode, polygon index) file.
///
/// Scene lookups and attribute checks complete before any file is opened,
/// so those failures leave earlier outputs untouched.
pub fn export_mesh(scene: &Scene, options: &ExportOptions) -> Result<ExportSummary> {
    let mesh = scene
        .evaluated_mesh(&options.object)
        .with_context(|| format!("evaluate object {}", options.object))?;
    mesh.validate()
        .with_context(|| format!("evaluated mesh of {}", options.object))?;
    let records = vertex_records(&mesh, options)
        .with_context(|| format!("read attributes of {}", options.object))?;

    write_file(&options.vertices_path, |writer| {
        write_vertex_records(writer, &records)
    })
    .with_context(|| format!("write vertex file {}", options.vertices_path.display()))?;

    let index_lines = match options.mode {
        ExportMode::VertexIndexed => {
            write_file(&options.indices_path, |writer| {
                write_index_records(writer, &mesh.polygons)
            })
            .with_context(|| format!("write index file {}", options.indices_path.display()))?;
            Some(mesh.polygons.len())
        }
        ExportMode::PolygonIndexed => None,
    };

    let summary = ExportSummary {
        mode: options.mode,
        vertex_lines: records.len(),
        index_lines,
    };
    info!(
        object = %options.object,
        mode = %summary.mode,
        vertex_lines = summary.vertex_lines,
        index_lines = ?summary.index_lines,
        "mesh export complete"
    );
    Ok(summary)
}

/// Collects the records `export_mesh` would write for `mesh`.
pub fn vertex_records(
    mesh: &Mesh,
    options: &ExportOptions,
) -> squiggle_scene::Result<Vec<VertexRecord>> {
    let positions = mesh.vectors(&options.position_attribute)?;
    let colors = channel_values(mesh, &options.color_attribute, options.color_channel)?;
    let record = |index: usize| VertexRecord {
        position: positions[index],
        color: colors[index],
    };

    let records = match options.mode {
        ExportMode::VertexIndexed => (0..mesh.vertex_count).map(record).collect(),
        ExportMode::PolygonIndexed => mesh
            .polygons
            .iter()
            .flat_map(|polygon| polygon.vertices.iter())
            .map(|&index| record(index as usize))
            .collect(),
    };
    Ok(records)
}

fn channel_values(mesh: &Mesh, name: &str, channel: usize) -> squiggle_scene::Result<Vec<f32>> {
    let attribute = mesh.point_attribute(name)?;
    let channels = attribute.kind().channels();
    if channel >= channels {
        return Err(Error::ChannelOutOfRange {
            name: name.to_string(),
            channel,
            channels,
        });
    }
    (0..mesh.vertex_count)
        .map(|index| attribute.component(index, channel))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::AttributeLength {
            name: name.to_string(),
            expected: mesh.vertex_count,
            actual: attribute.len(),
        })
}

/// `x, y, z, 1, c, 1,` per record, six decimals per float.
pub fn write_vertex_records<W: Write>(writer: &mut W, records: &[VertexRecord]) -> io::Result<()> {
    for record in records {
        let [x, y, z] = record.position.map(Fixed6);
        writeln!(
            writer,
            "{x}, {y}, {z}, 1, {}, 1,",
            Fixed6(record.color)
        )?;
    }
    Ok(())
}

/// Six-decimal fixed notation; NaN is spelled `nan` regardless of sign.
struct Fixed6(f32);

impl fmt::Display for Fixed6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.6}", self.0)
        }
    }
}

/// `v0, v1, ..., vk, ` per polygon.
pub fn write_index_records<W: Write>(writer: &mut W, polygons: &[Polygon]) -> io::Result<()> {
    for polygon in polygons {
        for index in &polygon.vertices {
            write!(writer, "{index}, ")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
