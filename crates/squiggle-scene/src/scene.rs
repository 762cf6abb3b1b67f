use crate::mesh::Mesh;
use crate::modifier::Modifier;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Named object carrying a base mesh and its modifier stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub mesh: Mesh,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Applies the modifier stack to a copy of the base mesh.
    pub fn evaluated(&self) -> Result<Mesh> {
        let mut mesh = self.mesh.clone();
        for modifier in &self.modifiers {
            modifier.apply(&mut mesh)?;
        }
        debug!(
            object = %self.name,
            modifiers = self.modifiers.len(),
            vertices = mesh.vertex_count,
            polygons = mesh.polygons.len(),
            "evaluated mesh"
        );
        Ok(mesh)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) -> Result<()> {
        if self.objects.iter().any(|existing| existing.name == object.name) {
            return Err(Error::DuplicateObject(object.name));
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn with_object(mut self, object: SceneObject) -> Result<Self> {
        self.add_object(object)?;
        Ok(self)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, name: &str) -> Result<&SceneObject> {
        self.objects
            .iter()
            .find(|object| object.name == name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    pub fn evaluated_mesh(&self, name: &str) -> Result<Mesh> {
        self.object(name)?.evaluated()
    }

    /// Checks name uniqueness and that every base mesh is well formed.
    pub fn validate(&self) -> Result<()> {
        for (position, object) in self.objects.iter().enumerate() {
            if self.objects[..position]
                .iter()
                .any(|earlier| earlier.name == object.name)
            {
                return Err(Error::DuplicateObject(object.name.clone()));
            }
            object.mesh.validate().map_err(|err| match err {
                Error::InvalidMesh(reason) => {
                    Error::InvalidMesh(format!("object {}: {reason}", object.name))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
