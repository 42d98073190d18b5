use orbit_core::{ControlSettings, SceneContext};

use crate::input::InputState;

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Feed one frame of input into the scene's camera.
/// `aspect` is the current window aspect, used when the lock toggles.
pub fn apply_input_to_scene(
  input: &InputState,
  controls: &ControlSettings,
  scene: &mut SceneContext,
  aspect: f32,
)
{
  apply_lock_toggle(input, scene, aspect);
  apply_orbit(input, controls, scene);
  apply_zoom(input, controls, scene);
}

//
// ──────────────────────────────────────────────────────────────
//   Input handlers
// ──────────────────────────────────────────────────────────────
//

fn apply_lock_toggle(input: &InputState, scene: &mut SceneContext, aspect: f32)
{
  if input.toggle_lock
  {
    scene.toggle_camera_lock(aspect);
  }
}

fn apply_orbit(input: &InputState, controls: &ControlSettings, scene: &mut SceneContext)
{
  if !input.left_held
  {
    return;
  }

  if input.mouse_dx == 0.0 && input.mouse_dy == 0.0
  {
    return;
  }

  let (d_theta, d_phi) = controls.orbit_delta(input.mouse_dx, input.mouse_dy);

  scene.orbit(d_theta, d_phi);
}

fn apply_zoom(input: &InputState, controls: &ControlSettings, scene: &mut SceneContext)
{
  if let Some(factor) = controls.zoom_factor(input.scroll_notches)
  {
    scene.zoom(factor);
  }
}

#[cfg(test)]
mod tests
{
  use orbit_core::camera::DEFAULT_RADIUS;
  use orbit_core::CameraConfig;

  use super::*;

  fn free_scene() -> SceneContext
  {
    let mut scene = SceneContext::new(CameraConfig::default().build(1.0));
    scene.toggle_camera_lock(1.0);
    scene
  }

  #[test]
  fn drag_orbits_only_with_left_button()
  {
    let controls = ControlSettings::default();
    let mut scene = free_scene();
    let mut input = InputState::new();
    input.mouse_dx = 4.0;
    input.mouse_dy = -6.0;

    apply_input_to_scene(&input, &controls, &mut scene, 1.0);
    assert_eq!(scene.camera.theta(), 0.0);

    input.left_held = true;
    apply_input_to_scene(&input, &controls, &mut scene, 1.0);
    assert_eq!(scene.camera.theta(), 6.0);
    assert_eq!(scene.camera.phi(), -4.0);
  }

  #[test]
  fn wheel_up_zooms_in()
  {
    let controls = ControlSettings::default();
    let mut scene = free_scene();
    let mut input = InputState::new();
    input.scroll_notches = 1;

    apply_input_to_scene(&input, &controls, &mut scene, 1.0);
    assert!((scene.camera.radius() - DEFAULT_RADIUS * 0.9).abs() < 1e-4);

    input.scroll_notches = -1;
    apply_input_to_scene(&input, &controls, &mut scene, 1.0);
    assert!((scene.camera.radius() - DEFAULT_RADIUS * 0.99).abs() < 1e-3);
  }

  #[test]
  fn locked_scene_ignores_drag_and_wheel()
  {
    let controls = ControlSettings::default();
    let mut scene = SceneContext::new(CameraConfig::default().build(1.0));
    let before = scene.camera.clone();

    let mut input = InputState::new();
    input.left_held = true;
    input.mouse_dx = 10.0;
    input.scroll_notches = 3;

    apply_input_to_scene(&input, &controls, &mut scene, 1.0);
    assert_eq!(scene.camera, before);
  }

  #[test]
  fn toggle_resets_with_current_aspect()
  {
    let controls = ControlSettings::default();
    let mut scene = SceneContext::new(CameraConfig::default().build(1.0));
    let mut input = InputState::new();
    input.toggle_lock = true;

    apply_input_to_scene(&input, &controls, &mut scene, 1.6);

    assert!(!scene.camera_locked);
    assert_eq!(scene.camera.aspect(), 1.6);
    assert_eq!(scene.camera.radius(), DEFAULT_RADIUS);
  }
}
