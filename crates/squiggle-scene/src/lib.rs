//! In-memory scene model: named objects holding meshes, per-vertex
//! attributes and a non-destructive modifier stack.

use thiserror::Error;

pub mod builder;
pub mod mesh;
pub mod modifier;
pub mod scene;

pub use builder::MeshBuilder;
pub use mesh::{Attribute, AttributeKind, Mesh, Polygon};
pub use modifier::Modifier;
pub use scene::{Scene, SceneObject};

/// Name of the attribute holding vertex positions.
pub const POSITION_ATTRIBUTE: &str = "position";
/// Name of the attribute holding the color sampled along the path.
pub const PATH_COLOR_ATTRIBUTE: &str = "path_color";
/// Object looked up when no name is given.
pub const DEFAULT_OBJECT_NAME: &str = "Mesh";

#[derive(Error, Debug)]
pub enum Error {
    #[error("object not found in scene: {0}")]
    ObjectNotFound(String),
    #[error("duplicate object name: {0}")]
    DuplicateObject(String),
    #[error("attribute not found: {0}")]
    MissingAttribute(String),
    #[error("attribute {name} has {actual} values, expected {expected}")]
    AttributeLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("attribute {name} is {actual}, expected {expected}")]
    AttributeType {
        name: String,
        expected: AttributeKind,
        actual: AttributeKind,
    },
    #[error("attribute {name} has no channel {channel} ({channels} available)")]
    ChannelOutOfRange {
        name: String,
        channel: usize,
        channels: usize,
    },
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
