use glam::{Mat4, Vec3};

use crate::camera::ArcballCamera;

//
// ──────────────────────────────────────────────────────────────
//   Scene context
//
//   Everything the update and render steps share: the orbit
//   camera, whether it is locked to its home framing, and the
//   character the view is centred on.
// ──────────────────────────────────────────────────────────────
//

const CHARACTER_START: Vec3 = Vec3::new(2.0, 0.0, 0.0);
const MOVE_SPEED: f32 = 3.0; // world units per second
const TURN_SPEED: f32 = 90.0; // degrees per second

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character
{
  pub position: Vec3,
  pub rotation_deg: f32,
}

impl Default for Character
{
  fn default() -> Self
  {
    Self { position: CHARACTER_START, rotation_deg: 0.0 }
  }
}

impl Character
{
  /// Local +Z after yawing by `rotation_deg`.
  pub fn heading(&self) -> Vec3
  {
    Mat4::from_rotation_y(self.rotation_deg.to_radians()).z_axis.truncate()
  }

  pub fn model_matrix(&self) -> Mat4
  {
    Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.rotation_deg.to_radians())
  }
}

/// Held movement keys for one update step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent
{
  pub forward: bool,
  pub back: bool,
  pub turn_left: bool,
  pub turn_right: bool,
}

pub struct SceneContext
{
  pub camera: ArcballCamera,
  pub camera_locked: bool,
  pub character: Character,

  pub move_speed: f32,
  pub turn_speed: f32,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl SceneContext
{
  /// Starts with the camera locked, as the demo does.
  pub fn new(camera: ArcballCamera) -> Self
  {
    Self {
      camera,
      camera_locked: true,
      character: Character::default(),
      move_speed: MOVE_SPEED,
      turn_speed: TURN_SPEED,
    }
  }

  /// Flip between locked and free orbit. Either way the camera snaps
  /// back to its home framing with the given aspect.
  pub fn toggle_camera_lock(&mut self, aspect: f32)
  {
    self.camera_locked = !self.camera_locked;
    self.camera.reset_camera(aspect);

    log::info!("camera {}", if self.camera_locked { "locked" } else { "free" });
  }

  /// Orbit by degrees. Ignored while locked; returns whether the camera moved.
  pub fn orbit(&mut self, d_theta: f32, d_phi: f32) -> bool
  {
    if self.camera_locked
    {
      return false;
    }

    self.camera.rotate_camera(d_theta, d_phi);
    true
  }

  /// Scale the orbit radius. Ignored while locked.
  pub fn zoom(&mut self, factor: f32) -> bool
  {
    if self.camera_locked
    {
      return false;
    }

    self.camera.scale_radius(factor);
    true
  }

  /// Advance the character by `dt` seconds.
  pub fn update(&mut self, dt: f32, intent: MoveIntent)
  {
    let step = if intent.forward
    {
      self.move_speed * dt
    }
    else if intent.back
    {
      -self.move_speed * dt
    }
    else
    {
      0.0
    };

    if step != 0.0
    {
      self.character.position += self.character.heading() * step;
    }

    if intent.turn_left
    {
      self.character.rotation_deg += self.turn_speed * dt;
    }
    else if intent.turn_right
    {
      self.character.rotation_deg -= self.turn_speed * dt;
    }
  }

  /// Camera view re-centred on the character.
  pub fn tracked_view(&self) -> Mat4
  {
    self.camera.view_transform() * Mat4::from_translation(-self.character.position)
  }

  /// Full world-to-clip transform for this frame.
  pub fn view_projection(&self) -> Mat4
  {
    self.camera.projection_transform() * self.tracked_view()
  }

  pub fn character_model(&self) -> Mat4
  {
    self.character.model_matrix()
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::camera::{DEFAULT_PHI, DEFAULT_RADIUS, DEFAULT_THETA};

  const EPS: f32 = 1e-4;

  fn scene() -> SceneContext
  {
    SceneContext::new(ArcballCamera::new(-45.0, 45.0, 50.0, 40.0, 4.0 / 3.0, 0.1, 10_000.0))
  }

  #[test]
  fn locked_camera_ignores_orbit_and_zoom()
  {
    let mut scene = scene();
    let before = scene.camera.clone();

    assert!(!scene.orbit(10.0, 10.0));
    assert!(!scene.zoom(0.5));
    assert_eq!(scene.camera, before);
  }

  #[test]
  fn toggling_lock_resets_camera_and_applies_aspect()
  {
    let mut scene = scene();

    scene.toggle_camera_lock(2.0);
    assert!(!scene.camera_locked);
    assert_eq!(scene.camera.theta(), DEFAULT_THETA);
    assert_eq!(scene.camera.phi(), DEFAULT_PHI);
    assert_eq!(scene.camera.radius(), DEFAULT_RADIUS);
    assert_eq!(scene.camera.aspect(), 2.0);

    assert!(scene.orbit(10.0, -5.0));
    assert!(scene.zoom(0.9));
    assert_eq!(scene.camera.theta(), 10.0);

    scene.toggle_camera_lock(1.5);
    assert!(scene.camera_locked);
    assert_eq!(scene.camera.theta(), DEFAULT_THETA);
    assert_eq!(scene.camera.radius(), DEFAULT_RADIUS);
  }

  #[test]
  fn forward_moves_along_heading()
  {
    let mut scene = scene();
    let start = scene.character.position;

    scene.update(1.0, MoveIntent { forward: true, ..Default::default() });
    assert!(scene.character.position.abs_diff_eq(start + Vec3::Z * MOVE_SPEED, EPS));

    scene.update(0.5, MoveIntent { back: true, ..Default::default() });
    assert!(scene.character.position.abs_diff_eq(start + Vec3::Z * MOVE_SPEED * 0.5, EPS));
  }

  #[test]
  fn forward_wins_over_back_and_left_over_right()
  {
    let mut scene = scene();
    let start = scene.character.position;

    scene.update(1.0, MoveIntent { forward: true, back: true, turn_left: true, turn_right: true });

    assert!(scene.character.position.z > start.z);
    assert!((scene.character.rotation_deg - TURN_SPEED).abs() < EPS);
  }

  #[test]
  fn turning_changes_heading()
  {
    let mut scene = scene();

    scene.update(1.0, MoveIntent { turn_left: true, ..Default::default() });
    assert!(scene.character.heading().abs_diff_eq(Vec3::X, EPS));

    scene.update(2.0, MoveIntent { turn_right: true, ..Default::default() });
    assert!(scene.character.heading().abs_diff_eq(Vec3::NEG_X, EPS));
  }

  #[test]
  fn tracked_view_centres_on_character()
  {
    let scene = scene();
    let character_in_eye = scene.tracked_view().transform_point3(scene.character.position);
    let origin_in_eye = scene.camera.view_transform().transform_point3(Vec3::ZERO);

    assert!(character_in_eye.abs_diff_eq(origin_in_eye, 1e-3));
    assert!((character_in_eye.length() - scene.camera.radius()).abs() < 1e-3);
  }

  #[test]
  fn character_model_places_origin_at_position()
  {
    let mut scene = scene();
    scene.character.position = Vec3::new(-1.0, 0.5, 3.0);
    scene.character.rotation_deg = 37.0;

    let placed = scene.character_model().transform_point3(Vec3::ZERO);
    assert!(placed.abs_diff_eq(scene.character.position, EPS));
  }
}
