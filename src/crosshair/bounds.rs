use bevy::mesh::{Mesh, VertexAttributeValues};
use bevy::prelude::*;
use thiserror::Error;

use crate::crosshair::CROSSHAIR_PADDING;

/// Axis selector for bounding-extent measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a vertex position triple.
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Measurement failures. These are precondition violations of the tracked
/// model's shape, not recoverable runtime states.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    /// The tracked model finished loading without any mesh descendant.
    #[error("tracked model has no mesh descendant to measure")]
    NoMeshDescendant,
    /// The measured mesh carries no float vertex position data.
    #[error("mesh has no vertex position data, bounds cannot be computed")]
    MissingPositions,
}

/// Cached bounding measurements of one tracked model.
///
/// Computed once when the model is first highlighted and kept on the target
/// entity afterwards; the source meshes are static, so the values never go
/// stale.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TargetBounds {
    /// Vertical mesh extent, already multiplied by the model scale.
    pub height: f32,
    /// Bounding-sphere radius, already multiplied by the model scale.
    pub radius: f32,
}

impl TargetBounds {
    /// Measure `mesh` along the vertical axis with the model's uniform scale.
    ///
    /// `None` means the model has no measurable mesh, which is a precondition
    /// violation rather than a loading state.
    pub fn measure(mesh: Option<&Mesh>, scale: f32) -> Result<Self, BoundsError> {
        let mesh = mesh.ok_or(BoundsError::NoMeshDescendant)?;
        Ok(Self {
            height: extent_along_axis(mesh, Axis::Y, scale)?,
            radius: bounding_radius(mesh, scale)?,
        })
    }

    /// Side length of the crosshair frame hole for these measurements.
    pub fn crosshair_size(&self) -> f32 {
        self.radius.max(self.height) + CROSSHAIR_PADDING
    }
}

/// Extract the float vertex positions backing a mesh.
fn vertex_positions(mesh: &Mesh) -> Result<&[[f32; 3]], BoundsError> {
    match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) if !positions.is_empty() => Ok(positions),
        _ => Err(BoundsError::MissingPositions),
    }
}

/// Bounding-box extent `(max - min) * scale` along one axis.
pub fn extent_along_axis(mesh: &Mesh, axis: Axis, scale: f32) -> Result<f32, BoundsError> {
    let positions = vertex_positions(mesh)?;
    let component = axis.index();
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for position in positions {
        min = min.min(position[component]);
        max = max.max(position[component]);
    }
    Ok((max - min) * scale)
}

/// Bounding-sphere radius scaled by the model's uniform scale.
///
/// The sphere is centered on the bounding-box center; the radius is the
/// largest vertex distance from it.
pub fn bounding_radius(mesh: &Mesh, scale: f32) -> Result<f32, BoundsError> {
    let positions = vertex_positions(mesh)?;
    let mut min = Vec3::INFINITY;
    let mut max = Vec3::NEG_INFINITY;
    for position in positions {
        let vertex = Vec3::from_array(*position);
        min = min.min(vertex);
        max = max.max(vertex);
    }
    let center = (min + max) * 0.5;
    let mut radius_squared = 0.0f32;
    for position in positions {
        radius_squared = radius_squared.max(center.distance_squared(Vec3::from_array(*position)));
    }
    Ok(radius_squared.sqrt() * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mesh holding the eight corners of the cube spanning -1..1 on all axes.
    fn cube_corner_mesh() -> Mesh {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        for &x in &[-1.0f32, 1.0] {
            for &y in &[-1.0f32, 1.0] {
                for &z in &[-1.0f32, 1.0] {
                    positions.push([x, y, z]);
                }
            }
        }
        let mut mesh = Mesh::new(
            bevy::render::render_resource::PrimitiveTopology::TriangleList,
            bevy::asset::RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh
    }

    /// Verify axis extents multiply `(max - min)` by the uniform scale.
    #[test]
    fn extent_scales_box_size() {
        let mesh = cube_corner_mesh();
        assert_eq!(extent_along_axis(&mesh, Axis::Y, 1.0), Ok(2.0));
        assert_eq!(extent_along_axis(&mesh, Axis::X, 0.5), Ok(1.0));
    }

    /// Verify the bounding radius is the scaled corner distance of the cube.
    #[test]
    fn bounding_radius_reaches_corners() {
        let mesh = cube_corner_mesh();
        let radius = bounding_radius(&mesh, 2.0).unwrap();
        assert!((radius - 2.0 * 3.0f32.sqrt()).abs() < 1e-5);
    }

    /// Verify a mesh without position data is a precondition error.
    #[test]
    fn missing_positions_is_an_error() {
        let mesh = Mesh::new(
            bevy::render::render_resource::PrimitiveTopology::TriangleList,
            bevy::asset::RenderAssetUsages::default(),
        );
        assert_eq!(
            extent_along_axis(&mesh, Axis::Y, 1.0),
            Err(BoundsError::MissingPositions)
        );
        assert_eq!(bounding_radius(&mesh, 1.0), Err(BoundsError::MissingPositions));
    }

    /// Verify a missing mesh fails fast instead of producing geometry.
    #[test]
    fn absent_mesh_is_an_error() {
        assert_eq!(
            TargetBounds::measure(None, 1.0),
            Err(BoundsError::NoMeshDescendant)
        );
    }

    /// Verify the crosshair size takes the larger measurement plus padding.
    #[test]
    fn crosshair_size_prefers_larger_measurement() {
        let tall = TargetBounds {
            height: 3.0,
            radius: 1.0,
        };
        assert_eq!(tall.crosshair_size(), 3.0 + CROSSHAIR_PADDING);
        let wide = TargetBounds {
            height: 1.0,
            radius: 2.5,
        };
        assert_eq!(wide.crosshair_size(), 2.5 + CROSSHAIR_PADDING);
    }
}
