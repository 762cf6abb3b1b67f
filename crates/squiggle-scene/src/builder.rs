use crate::mesh::{Attribute, Mesh};
use crate::{Error, PATH_COLOR_ATTRIBUTE, POSITION_ATTRIBUTE, Result};
use std::f32::consts::TAU;

pub struct MeshBuilder;

impl MeshBuilder {
    /// Single triangle in the XY plane with a uniform mid-grey path color.
    pub fn triangle() -> Mesh {
        Mesh::new(3)
            .with_polygon([0, 1, 2])
            .with_attribute(
                POSITION_ATTRIBUTE,
                Attribute::Float3(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            )
            .with_attribute(
                PATH_COLOR_ATTRIBUTE,
                Attribute::Color(vec![[0.5, 0.5, 0.5, 1.0]; 3]),
            )
    }

    /// `columns` x `rows` quads spanning `size` on each side, path color
    /// running from 0 to 1 along X.
    pub fn grid(columns: u32, rows: u32, size: f32) -> Result<Mesh> {
        ensure_nonzero("columns", columns)?;
        ensure_nonzero("rows", rows)?;
        ensure_positive("size", size)?;
        let vertex_count = ensure_indexable(
            "grid",
            (u64::from(columns) + 1) * (u64::from(rows) + 1),
        )?;

        let stride = columns + 1;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut colors = Vec::with_capacity(positions.capacity());
        for row in 0..=rows {
            for column in 0..=columns {
                let u = column as f32 / columns as f32;
                let v = row as f32 / rows as f32;
                positions.push([u * size, v * size, 0.0]);
                colors.push([u, u, u, 1.0]);
            }
        }

        let mut mesh = Mesh::new(positions.len());
        for row in 0..rows {
            for column in 0..columns {
                let corner = row * stride + column;
                mesh.push_polygon([corner, corner + 1, corner + stride + 1, corner + stride]);
            }
        }
        mesh.set_attribute(POSITION_ATTRIBUTE, Attribute::Float3(positions));
        mesh.set_attribute(PATH_COLOR_ATTRIBUTE, Attribute::Color(colors));
        Ok(mesh)
    }

    /// Helical ribbon of `segments` quads winding `turns` times around Z.
    /// The path color ramps from 0 at the start to 1 at the end.
    pub fn squiggle(segments: u32, turns: f32, radius: f32, width: f32) -> Result<Mesh> {
        ensure_nonzero("segments", segments)?;
        ensure_positive("turns", turns)?;
        ensure_positive("radius", radius)?;
        ensure_positive("width", width)?;
        let vertex_count = ensure_indexable("squiggle", 2 * (u64::from(segments) + 1))?;

        let half_width = width * 0.5;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut colors = Vec::with_capacity(positions.capacity());
        for station in 0..=segments {
            let t = station as f32 / segments as f32;
            let angle = t * turns * TAU;
            let (sin, cos) = angle.sin_cos();
            let x = radius * cos;
            let y = radius * sin;
            let z = (t - 0.5) * radius;
            positions.push([x, y, z - half_width]);
            positions.push([x, y, z + half_width]);
            colors.push([t, t, t, 1.0]);
            colors.push([t, t, t, 1.0]);
        }

        let mut mesh = Mesh::new(positions.len());
        for segment in 0..segments {
            let base = segment * 2;
            mesh.push_polygon([base, base + 2, base + 3, base + 1]);
        }
        mesh.set_attribute(POSITION_ATTRIBUTE, Attribute::Float3(positions));
        mesh.set_attribute(PATH_COLOR_ATTRIBUTE, Attribute::Color(colors));
        Ok(mesh)
    }
}

fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}

// Polygon indices are u32, so the largest index must fit.
fn ensure_indexable(name: &str, vertex_count: u64) -> Result<usize> {
    if vertex_count > u64::from(u32::MAX) {
        return Err(Error::InvalidParameter(format!(
            "{name} needs {vertex_count} vertices, more than u32 indices can address"
        )));
    }
    usize::try_from(vertex_count)
        .map_err(|_| Error::InvalidParameter(format!("{name} is too large for this platform")))
}

fn ensure_nonzero(name: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}
