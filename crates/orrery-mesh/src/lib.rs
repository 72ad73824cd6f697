//! Procedural sphere mesh generation for celestial body rendering.

mod sphere;

pub use sphere::{MeshError, SphereMesh, generate_uv_sphere};
