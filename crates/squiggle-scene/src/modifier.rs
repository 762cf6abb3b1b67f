use crate::mesh::{Attribute, AttributeKind, Mesh, Polygon};
use crate::{Error, POSITION_ATTRIBUTE, Result};
use cgmath::{Deg, InnerSpace, Matrix4, Point3, Transform, Vector3};
use serde::{Deserialize, Serialize};

/// Non-destructive mesh operation, applied in stack order on evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modifier {
    Translate { offset: [f32; 3] },
    Scale { factor: [f32; 3] },
    Rotate { axis: [f32; 3], degrees: f32 },
    Triangulate,
}

impl Modifier {
    pub fn apply(&self, mesh: &mut Mesh) -> Result<()> {
        match self {
            Modifier::Translate { offset } => {
                transform_positions(mesh, Matrix4::from_translation(Vector3::from(*offset)))
            }
            Modifier::Scale { factor } => transform_positions(
                mesh,
                Matrix4::from_nonuniform_scale(factor[0], factor[1], factor[2]),
            ),
            Modifier::Rotate { axis, degrees } => {
                let axis = Vector3::from(*axis);
                if axis.magnitude2() == 0.0 {
                    return Err(Error::InvalidParameter(
                        "rotation axis must be non-zero".to_string(),
                    ));
                }
                let axis = axis.normalize();
                if !(axis.x.is_finite() && axis.y.is_finite() && axis.z.is_finite()) {
                    return Err(Error::InvalidParameter(
                        "rotation axis must be finite".to_string(),
                    ));
                }
                transform_positions(mesh, Matrix4::from_axis_angle(axis, Deg(*degrees)))
            }
            Modifier::Triangulate => {
                triangulate(mesh);
                Ok(())
            }
        }
    }
}

fn transform_positions(mesh: &mut Mesh, matrix: Matrix4<f32>) -> Result<()> {
    match mesh.attribute_mut(POSITION_ATTRIBUTE)? {
        Attribute::Float3(positions) => {
            for position in positions.iter_mut() {
                let p = matrix.transform_point(Point3::from(*position));
                *position = [p.x, p.y, p.z];
            }
            Ok(())
        }
        other => Err(Error::AttributeType {
            name: POSITION_ATTRIBUTE.to_string(),
            expected: AttributeKind::Float3,
            actual: other.kind(),
        }),
    }
}

// Fan split; triangles and degenerate faces pass through unchanged.
fn triangulate(mesh: &mut Mesh) {
    let mut polygons = Vec::with_capacity(mesh.polygons.len());
    for polygon in mesh.polygons.drain(..) {
        if polygon.len() <= 3 {
            polygons.push(polygon);
            continue;
        }
        let first = polygon.vertices[0];
        for pair in polygon.vertices[1..].windows(2) {
            polygons.push(Polygon::new([first, pair[0], pair[1]]));
        }
    }
    mesh.polygons = polygons;
}
