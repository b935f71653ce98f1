use bevy::prelude::*;

use crate::crosshair::CROSSHAIR_PERIPHERY_LINE_LENGTH;

/// Raw frame buffers assembled before uploading to a Bevy `Mesh`.
#[derive(Debug, PartialEq)]
pub(crate) struct FrameData {
    /// Vertex positions in overlay-local space.
    pub(crate) positions: Vec<Vec3>,
    /// Per-vertex normals, all facing the camera side of the plate.
    pub(crate) normals: Vec<Vec3>,
    /// Per-vertex UV coordinates.
    pub(crate) uvs: Vec<Vec2>,
    /// Triangle index buffer.
    pub(crate) indices: Vec<u32>,
}

/// Build the picture-frame crosshair plate for a frame hole of side `size`.
///
/// The outer rectangle spans `size + width` horizontally and downward, but its
/// top edge sits at `(size - padding) / 2`: the frame is notched at the top so
/// the upper guide line can attach without overlapping it. Deterministic pure
/// function of its inputs; with fixed width and padding it is memoizable on
/// `size` alone.
pub(crate) fn build_frame_data(size: f32, width: f32, padding: f32) -> FrameData {
    let outer = (size + width) / 2.0;
    let outer_top = (size - padding) / 2.0;
    let hole = size / 2.0;
    let hole_top = (size - padding - width) / 2.0;

    let mut data = FrameData {
        positions: Vec::new(),
        normals: Vec::new(),
        uvs: Vec::new(),
        indices: Vec::new(),
    };
    // Left, right, bottom, and top border strips around the hole.
    add_strip(&mut data, -outer, -hole, -outer, outer_top);
    add_strip(&mut data, hole, outer, -outer, outer_top);
    add_strip(&mut data, -hole, hole, -outer, -hole);
    add_strip(&mut data, -hole, hole, hole_top, outer_top);
    data
}

/// Append one axis-aligned quad strip as two indexed triangles.
fn add_strip(data: &mut FrameData, x0: f32, x1: f32, y0: f32, y1: f32) {
    let start = data.positions.len() as u32;
    data.positions.extend_from_slice(&[
        Vec3::new(x0, y0, 0.0),
        Vec3::new(x1, y0, 0.0),
        Vec3::new(x1, y1, 0.0),
        Vec3::new(x0, y1, 0.0),
    ]);
    data.normals.extend_from_slice(&[Vec3::Z; 4]);
    data.uvs
        .extend_from_slice(&[Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
    data.indices
        .extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
}

/// Convert frame buffers into a Bevy `Mesh`.
pub(crate) fn frame_mesh(data: FrameData) -> Mesh {
    let mut mesh = Mesh::new(
        bevy::render::render_resource::PrimitiveTopology::TriangleList,
        bevy::asset::RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs);
    mesh.insert_indices(bevy::mesh::Indices::U32(data.indices));
    mesh
}

/// Shared guide-line geometry running from the origin up the Y axis.
///
/// Built once at startup and reused by every overlay; only the anchoring
/// child transforms differ per crosshair size.
pub(crate) fn vertical_line_mesh() -> Mesh {
    line_mesh(Vec3::Y * CROSSHAIR_PERIPHERY_LINE_LENGTH)
}

/// Shared guide-line geometry running from the origin along the X axis.
pub(crate) fn horizontal_line_mesh() -> Mesh {
    line_mesh(Vec3::X * CROSSHAIR_PERIPHERY_LINE_LENGTH)
}

/// Two-point line-list mesh from the origin to `end`.
fn line_mesh(end: Vec3) -> Mesh {
    let mut mesh = Mesh::new(
        bevy::render::render_resource::PrimitiveTopology::LineList,
        bevy::asset::RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vec![Vec3::ZERO, end]);
    mesh.insert_indices(bevy::mesh::Indices::U32(vec![0, 1]));
    mesh
}

/// Anchor transforms placing the four shared guide lines around a frame.
///
/// Order: top, bottom, left, right. Each line is anchored at the frame edge
/// and extends outward; the bottom and left instances reuse the same geometry
/// through a half-turn around Z.
pub(crate) fn periphery_anchors(size: f32, top_offset: f32) -> [Transform; 4] {
    let half = size / 2.0;
    let flip = Quat::from_rotation_z(std::f32::consts::PI);
    [
        Transform::from_xyz(0.0, half - top_offset, 0.0),
        Transform::from_xyz(0.0, -half, 0.0).with_rotation(flip),
        Transform::from_xyz(-half, 0.0, 0.0).with_rotation(flip),
        Transform::from_xyz(half, 0.0, 0.0),
    ]
}
