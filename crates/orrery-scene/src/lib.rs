//! Scene composition for the Sun-Earth-Moon orbital system.
//!
//! All motion is a pure function of elapsed time: [`Scene::compose`] maps an
//! instant plus the current [`OrbitCamera`] state to a flat list of per-body
//! draw descriptors and a camera pose. Nothing here touches the GPU.

mod bodies;
mod camera;

pub use bodies::{
    Body, BodyInstance, FrameCommands, MOON_ORBIT_RADIUS, PLANET_ORBIT_RADIUS, PLANET_ORBIT_RATE,
    Scene, body_position, body_transform,
};
pub use camera::{CameraPose, OrbitCamera, PITCH_LIMIT_MARGIN, RADIUS_RANGE};
