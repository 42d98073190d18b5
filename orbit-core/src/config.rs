use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{ArcballCamera, Handedness};
use crate::controls::ControlSettings;
use crate::error::ConfigError;

//
// ──────────────────────────────────────────────────────────────
//   Application config (JSON, every field optional)
// ──────────────────────────────────────────────────────────────
//

pub const DEFAULT_CONFIG_FILE: &str = "orbit.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig
{
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub controls: ControlSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig
{
  pub title: String,
  pub width: u32,
  pub height: u32,
}

/// Starting camera. Angles and field of view in degrees; `far = 0` means
/// no far plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig
{
  pub theta: f32,
  pub phi: f32,
  pub radius: f32,
  pub fov_y: f32,
  pub near: f32,
  pub far: f32,
  pub handedness: Handedness,
}

impl Default for WindowConfig
{
  fn default() -> Self
  {
    Self { title: "Orbit Demo".to_string(), width: 1024, height: 768 }
  }
}

impl Default for CameraConfig
{
  fn default() -> Self
  {
    Self {
      theta: -45.0,
      phi: 45.0,
      radius: 50.0,
      fov_y: 40.0,
      near: 0.1,
      far: 10_000.0,
      handedness: Handedness::Right,
    }
  }
}

impl WindowConfig
{
  pub fn aspect(&self) -> f32
  {
    self.width.max(1) as f32 / self.height.max(1) as f32
  }
}

impl CameraConfig
{
  pub fn build(&self, aspect: f32) -> ArcballCamera
  {
    ArcballCamera::new(self.theta, self.phi, self.radius, self.fov_y, aspect, self.near, self.far)
      .with_handedness(self.handedness)
  }
}

impl AppConfig
{
  pub fn load(path: &Path) -> Result<Self, ConfigError>
  {
    let text = fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

    Self::from_json(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
  }

  pub fn from_json(text: &str) -> Result<Self, serde_json::Error>
  {
    serde_json::from_str(text)
  }

  /// Missing file → defaults. A file that exists but is broken is still an error.
  pub fn load_or_default(path: &Path) -> Result<Self, ConfigError>
  {
    match Self::load(path)
    {
      Ok(config) =>
      {
        log::info!("loaded config from {}", path.display());
        Ok(config)
      }

      Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound =>
      {
        log::warn!("no config at {}, using defaults", path.display());
        Ok(Self::default())
      }

      Err(err) => Err(err),
    }
  }
}

#[cfg(test)]
mod tests
{
  use std::path::PathBuf;

  use super::*;

  fn temp_path(name: &str) -> PathBuf
  {
    std::env::temp_dir().join(format!("orbit-core-{}-{name}", std::process::id()))
  }

  #[test]
  fn empty_object_gives_defaults()
  {
    let config = AppConfig::from_json("{}").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.window.width, 1024);
    assert_eq!(config.camera.radius, 50.0);
  }

  #[test]
  fn partial_camera_section_fills_defaults()
  {
    let json = r#"{ "camera": { "radius": 12.5, "far": 0.0, "handedness": "left" } }"#;
    let config = AppConfig::from_json(json).unwrap();

    assert_eq!(config.camera.radius, 12.5);
    assert_eq!(config.camera.far, 0.0);
    assert_eq!(config.camera.handedness, Handedness::Left);
    assert_eq!(config.camera.fov_y, 40.0);
    assert_eq!(config.controls, ControlSettings::default());
  }

  #[test]
  fn camera_config_builds_matching_camera()
  {
    let camera = CameraConfig::default().build(1.5);

    assert_eq!(camera.theta(), -45.0);
    assert_eq!(camera.phi(), 45.0);
    assert_eq!(camera.radius(), 50.0);
    assert_eq!(camera.fov_y(), 40.0);
    assert_eq!(camera.aspect(), 1.5);
    assert_eq!(camera.far_plane_distance(), 10_000.0);
    assert!(!camera.is_infinite());
  }

  #[test]
  fn window_aspect_survives_zero_height()
  {
    let window = WindowConfig { height: 0, ..Default::default() };
    assert!(window.aspect().is_finite());
    assert!((WindowConfig::default().aspect() - 4.0 / 3.0).abs() < 1e-6);
  }

  #[test]
  fn missing_file_falls_back_to_defaults()
  {
    let path = temp_path("missing.json");
    let config = AppConfig::load_or_default(&path).unwrap();
    assert_eq!(config, AppConfig::default());
  }

  #[test]
  fn broken_file_is_reported()
  {
    let path = temp_path("broken.json");
    fs::write(&path, "{ camera: ").unwrap();

    let err = AppConfig::load_or_default(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));

    fs::remove_file(&path).unwrap();
  }

  #[test]
  fn file_round_trip()
  {
    let path = temp_path("round-trip.json");
    let mut config = AppConfig::default();
    config.camera.fov_y = 70.0;
    config.controls.orbit_degrees_per_pixel = 0.25;

    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    fs::remove_file(&path).unwrap();
  }
}
