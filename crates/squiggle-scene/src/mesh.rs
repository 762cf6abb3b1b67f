use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered vertex indices of one face.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<u32>,
}

impl Polygon {
    pub fn new(vertices: impl Into<Vec<u32>>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Float,
    Float3,
    Color,
}

impl AttributeKind {
    pub const fn channels(self) -> usize {
        match self {
            AttributeKind::Float => 1,
            AttributeKind::Float3 => 3,
            AttributeKind::Color => 4,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Float => "float",
            AttributeKind::Float3 => "float3",
            AttributeKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// Per-vertex data channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Attribute {
    Float(Vec<f32>),
    Float3(Vec<[f32; 3]>),
    Color(Vec<[f32; 4]>),
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Float(_) => AttributeKind::Float,
            Attribute::Float3(_) => AttributeKind::Float3,
            Attribute::Color(_) => AttributeKind::Color,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Attribute::Float(values) => values.len(),
            Attribute::Float3(values) => values.len(),
            Attribute::Color(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar at `index`, channel `channel`. `None` when either is out of range.
    pub fn component(&self, index: usize, channel: usize) -> Option<f32> {
        match self {
            Attribute::Float(values) if channel == 0 => values.get(index).copied(),
            Attribute::Float(_) => None,
            Attribute::Float3(values) => values.get(index).and_then(|v| v.get(channel)).copied(),
            Attribute::Color(values) => values.get(index).and_then(|v| v.get(channel)).copied(),
        }
    }
}

/// Vertex count, faces and named point-domain attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertex_count: usize,
    #[serde(default)]
    pub polygons: Vec<Polygon>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
}

impl Mesh {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            ..Default::default()
        }
    }

    pub fn with_polygon(mut self, vertices: impl Into<Vec<u32>>) -> Self {
        self.push_polygon(vertices);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.set_attribute(name, attribute);
        self
    }

    pub fn push_polygon(&mut self, vertices: impl Into<Vec<u32>>) {
        self.polygons.push(Polygon::new(vertices));
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
    }

    pub fn attribute(&self, name: &str) -> Result<&Attribute> {
        self.attributes
            .get(name)
            .ok_or_else(|| Error::MissingAttribute(name.to_string()))
    }

    pub fn attribute_mut(&mut self, name: &str) -> Result<&mut Attribute> {
        self.attributes
            .get_mut(name)
            .ok_or_else(|| Error::MissingAttribute(name.to_string()))
    }

    /// Looks up an attribute and checks it carries one value per vertex.
    pub fn point_attribute(&self, name: &str) -> Result<&Attribute> {
        let attribute = self.attribute(name)?;
        if attribute.len() != self.vertex_count {
            return Err(Error::AttributeLength {
                name: name.to_string(),
                expected: self.vertex_count,
                actual: attribute.len(),
            });
        }
        Ok(attribute)
    }

    /// Vector data of a `float3` point attribute.
    pub fn vectors(&self, name: &str) -> Result<&[[f32; 3]]> {
        match self.point_attribute(name)? {
            Attribute::Float3(values) => Ok(values),
            other => Err(Error::AttributeType {
                name: name.to_string(),
                expected: AttributeKind::Float3,
                actual: other.kind(),
            }),
        }
    }

    /// Number of face corners, i.e. the sum of all polygon lengths.
    pub fn loop_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }

    /// Checks that every polygon references existing vertices.
    pub fn validate(&self) -> Result<()> {
        for (face, polygon) in self.polygons.iter().enumerate() {
            if let Some(&index) = polygon
                .vertices
                .iter()
                .find(|&&index| index as usize >= self.vertex_count)
            {
                return Err(Error::InvalidMesh(format!(
                    "polygon {face} references vertex {index} but mesh has {} vertices",
                    self.vertex_count
                )));
            }
        }
        Ok(())
    }
}
