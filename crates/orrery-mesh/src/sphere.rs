//! UV-sphere mesh generation via latitude/longitude band tessellation.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Errors that can occur during mesh generation.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// Tessellation resolution must be at least one band in each direction.
    #[error("sphere resolution must be >= 1 band per axis, got {lat_bands}x{lon_bands}")]
    InvalidResolution { lat_bands: u32, lon_bands: u32 },
}

/// A non-indexed triangle mesh of a unit sphere centered at the origin.
///
/// Vertices are emitted in groups of three; the vertex count is always a
/// multiple of 3. Normals equal positions because the sphere has radius 1.
pub struct SphereMesh {
    /// Flat vertex positions, 3 floats per vertex.
    pub positions: Vec<f32>,
    /// Flat outward normals, 3 floats per vertex.
    pub normals: Vec<f32>,
    /// Flat equirectangular texture coordinates, 2 floats per vertex.
    pub uvs: Vec<f32>,
    /// Number of vertices (6 per lat/lon cell).
    pub vertex_count: u32,
}

impl SphereMesh {
    /// Interleave the mesh into `[position, normal, uv]` vertices with a
    /// stride of 8 floats, matching the renderer's vertex layout.
    pub fn interleaved(&self) -> Vec<f32> {
        let n = self.vertex_count as usize;
        let mut out = Vec::with_capacity(n * 8);
        for i in 0..n {
            out.extend_from_slice(&self.positions[i * 3..i * 3 + 3]);
            out.extend_from_slice(&self.normals[i * 3..i * 3 + 3]);
            out.extend_from_slice(&self.uvs[i * 2..i * 2 + 2]);
        }
        out
    }

    /// Position of vertex `i` as a vector.
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }
}

/// Corner of a lat/lon cell: position and equirectangular UV.
struct Corner {
    position: Vec3,
    uv: [f32; 2],
}

/// Evaluate the sphere surface at integer band coordinates.
fn corner(lat: u32, lon: u32, lat_bands: u32, lon_bands: u32) -> Corner {
    let theta = lat as f32 / lat_bands as f32 * PI;
    let phi = lon as f32 / lon_bands as f32 * TAU;
    Corner {
        position: Vec3::new(
            theta.sin() * phi.cos(),
            theta.cos(),
            theta.sin() * phi.sin(),
        ),
        uv: [
            lon as f32 / lon_bands as f32,
            lat as f32 / lat_bands as f32,
        ],
    }
}

/// Generate a unit UV sphere with the given latitude/longitude band counts.
///
/// Each cell of the lat/lon grid emits two triangles (a quad split along one
/// diagonal) with counter-clockwise winding viewed from outside, so the mesh
/// renders correctly with back-face culling. Returns exactly
/// `6 * lat_bands * lon_bands` vertices.
pub fn generate_uv_sphere(lat_bands: u32, lon_bands: u32) -> Result<SphereMesh, MeshError> {
    if lat_bands < 1 || lon_bands < 1 {
        return Err(MeshError::InvalidResolution {
            lat_bands,
            lon_bands,
        });
    }

    let vertex_count = 6 * lat_bands * lon_bands;
    let mut mesh = SphereMesh {
        positions: Vec::with_capacity(vertex_count as usize * 3),
        normals: Vec::with_capacity(vertex_count as usize * 3),
        uvs: Vec::with_capacity(vertex_count as usize * 2),
        vertex_count,
    };

    for lat in 0..lat_bands {
        for lon in 0..lon_bands {
            let c00 = corner(lat, lon, lat_bands, lon_bands);
            let c01 = corner(lat, lon + 1, lat_bands, lon_bands);
            let c10 = corner(lat + 1, lon, lat_bands, lon_bands);
            let c11 = corner(lat + 1, lon + 1, lat_bands, lon_bands);

            // Quad split along the c01-c10 diagonal. With theta increasing
            // away from +Y and phi increasing toward +Z, this ordering is
            // counter-clockwise from outside.
            push_vertex(&mut mesh, &c00);
            push_vertex(&mut mesh, &c01);
            push_vertex(&mut mesh, &c10);

            push_vertex(&mut mesh, &c01);
            push_vertex(&mut mesh, &c11);
            push_vertex(&mut mesh, &c10);
        }
    }

    Ok(mesh)
}

fn push_vertex(mesh: &mut SphereMesh, c: &Corner) {
    mesh.positions
        .extend_from_slice(&[c.position.x, c.position.y, c.position.z]);
    // Unit sphere at the origin: the outward normal is the position itself.
    mesh.normals
        .extend_from_slice(&[c.position.x, c.position.y, c.position.z]);
    mesh.uvs.extend_from_slice(&c.uv);
}
