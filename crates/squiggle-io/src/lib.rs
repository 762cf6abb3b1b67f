pub mod export;
pub mod scene;

pub use export::{
    DEFAULT_INDICES_FILE, DEFAULT_VERTICES_FILE, ExportMode, ExportOptions, ExportSummary,
    VertexRecord, export_mesh, vertex_records, write_index_records, write_vertex_records,
};
pub use scene::{load_scene, save_scene};
