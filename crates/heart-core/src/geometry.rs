//! Heart template geometry.
//!
//! One parametric heart outline is swept into a shallow prism and shared
//! (read-only) by every rendered heart: the tracked hearts, every trail and
//! burst particle, and the ambient drifters. Frontends upload the mesh once
//! and instance it; nothing ever mutates it after generation.

use glam::{Vec2, Vec3};
use thiserror::Error;

/// Outline resolution of the parametric curve.
pub const OUTLINE_SEGMENTS: usize = 260;
/// Extrusion depth of the heart prism.
pub const HEART_DEPTH: f32 = 0.28;

const OUTLINE_SCALE: f32 = 0.045;
const NOTCH_Y_MIN: f32 = 0.35;
const NOTCH_X_HALF_WIDTH: f32 = 0.12;
const NOTCH_PUSH: f32 = 0.03;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("heart outline is degenerate ({segments} segments)")]
    DegenerateOutline { segments: usize },
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Immutable shared heart mesh. Wrap in `Arc` and hand references out;
/// the engine aborts construction if generation fails.
#[derive(Debug)]
pub struct HeartTemplate {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl HeartTemplate {
    pub fn generate() -> Result<Self, GeometryError> {
        Self::with_resolution(OUTLINE_SEGMENTS, HEART_DEPTH)
    }

    pub fn with_resolution(segments: usize, depth: f32) -> Result<Self, GeometryError> {
        if segments < 3 || depth <= 0.0 {
            return Err(GeometryError::DegenerateOutline { segments });
        }
        let outline = heart_outline(segments);
        Ok(extrude_outline(&outline, depth))
    }
}

/// Closed heart outline, notch up and point down, centered near the origin.
///
/// x = 16 sin^3 t, y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t, with y
/// negated and the top notch pressed slightly deeper.
pub fn heart_outline(segments: usize) -> Vec<Vec2> {
    let mut pts = Vec::with_capacity(segments);
    for i in 0..segments {
        let t = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let mut p = Vec2::new(x * OUTLINE_SCALE, -y * OUTLINE_SCALE);
        if p.y > NOTCH_Y_MIN && p.x.abs() < NOTCH_X_HALF_WIDTH {
            p.y -= NOTCH_PUSH;
        }
        pts.push(p);
    }
    pts
}

/// Sweep a closed 2D outline into a z-centered prism.
///
/// The heart curve is star-shaped about its centroid, so front and back caps
/// are fan-triangulated from the centroid; side walls are quads split into
/// two triangles with outward normals.
fn extrude_outline(outline: &[Vec2], depth: f32) -> HeartTemplate {
    let n = outline.len();
    let half = depth * 0.5;
    let centroid = outline.iter().copied().sum::<Vec2>() / n as f32;

    let mut vertices = Vec::with_capacity(n * 6 + 2);
    let mut indices = Vec::with_capacity(n * 12);

    // Front cap (+z), then back cap (-z): centroid followed by the rim.
    for (z, nz) in [(half, 1.0f32), (-half, -1.0f32)] {
        let base = vertices.len() as u32;
        vertices.push(Vertex {
            position: [centroid.x, centroid.y, z],
            normal: [0.0, 0.0, nz],
        });
        for p in outline {
            vertices.push(Vertex {
                position: [p.x, p.y, z],
                normal: [0.0, 0.0, nz],
            });
        }
        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            if nz > 0.0 {
                indices.extend_from_slice(&[base, base + 1 + i, base + 1 + j]);
            } else {
                indices.extend_from_slice(&[base, base + 1 + j, base + 1 + i]);
            }
        }
    }

    // Side walls with per-edge outward normals.
    for i in 0..n {
        let j = (i + 1) % n;
        let a = outline[i];
        let b = outline[j];
        let edge = b - a;
        let normal = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();
        let nrm = [normal.x, normal.y, normal.z];
        let base = vertices.len() as u32;
        vertices.push(Vertex { position: [a.x, a.y, half], normal: nrm });
        vertices.push(Vertex { position: [b.x, b.y, half], normal: nrm });
        vertices.push(Vertex { position: [b.x, b.y, -half], normal: nrm });
        vertices.push(Vertex { position: [a.x, a.y, -half], normal: nrm });
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    HeartTemplate { vertices, indices }
}
