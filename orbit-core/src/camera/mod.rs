mod arcball;
mod handedness;

pub use arcball::{
  ArcballCamera, DEFAULT_ASPECT, DEFAULT_FAR, DEFAULT_FOV_Y, DEFAULT_NEAR, DEFAULT_PHI,
  DEFAULT_RADIUS, DEFAULT_THETA,
};
pub use handedness::Handedness;
