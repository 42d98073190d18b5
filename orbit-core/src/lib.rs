//! Arcball camera model and the scene state it orbits.
//!
//! The camera pivots around the world origin. Rotation and zoom deltas
//! go in, cached view and projection matrices come out. No GPU or window
//! types live here, so everything is testable headless.

pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod scene;

pub use camera::{ArcballCamera, Handedness};
pub use config::{AppConfig, CameraConfig, WindowConfig};
pub use controls::ControlSettings;
pub use error::ConfigError;
pub use scene::{Character, MoveIntent, SceneContext};
