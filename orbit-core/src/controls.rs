use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────────
//   Control tuning
//
//   Drag deltas arrive in pixels and are turned into degrees of
//   orbit. The sign flip makes dragging down/right orbit the way
//   the scene appears to move under the cursor.
// ──────────────────────────────────────────────────────────────
//

const ORBIT_DEGREES_PER_PIXEL: f32 = 1.0;
const ZOOM_IN_FACTOR: f32 = 0.9; // one scroll notch toward the pivot
const ZOOM_OUT_FACTOR: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings
{
  pub orbit_degrees_per_pixel: f32,
  pub zoom_in_factor: f32,
  pub zoom_out_factor: f32,
}

impl Default for ControlSettings
{
  fn default() -> Self
  {
    Self {
      orbit_degrees_per_pixel: ORBIT_DEGREES_PER_PIXEL,
      zoom_in_factor: ZOOM_IN_FACTOR,
      zoom_out_factor: ZOOM_OUT_FACTOR,
    }
  }
}

impl ControlSettings
{
  /// `(d_theta, d_phi)` for a cursor drag of `(dx, dy)` pixels.
  /// Vertical motion pitches, horizontal motion yaws.
  pub fn orbit_delta(&self, dx: f32, dy: f32) -> (f32, f32)
  {
    (-dy * self.orbit_degrees_per_pixel, -dx * self.orbit_degrees_per_pixel)
  }

  /// Radius scale for `notches` wheel steps. Positive notches (wheel up)
  /// zoom in. Returns `None` when there is nothing to apply.
  pub fn zoom_factor(&self, notches: i32) -> Option<f32>
  {
    match notches
    {
      0 => None,
      n if n > 0 => Some(self.zoom_in_factor.powi(n)),
      n => Some(self.zoom_out_factor.powi(-n)),
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn drag_deltas_are_negated_and_swapped()
  {
    let controls = ControlSettings::default();

    assert_eq!(controls.orbit_delta(3.0, -2.0), (2.0, -3.0));
  }

  #[test]
  fn sensitivity_scales_orbit()
  {
    let controls = ControlSettings { orbit_degrees_per_pixel: 0.5, ..Default::default() };
    assert_eq!(controls.orbit_delta(4.0, 8.0), (-4.0, -2.0));
  }

  #[test]
  fn wheel_notches_map_to_zoom_factors()
  {
    let controls = ControlSettings::default();

    assert_eq!(controls.zoom_factor(0), None);
    assert_eq!(controls.zoom_factor(1), Some(0.9));
    assert_eq!(controls.zoom_factor(-1), Some(1.1));

    let two_in = controls.zoom_factor(2).unwrap();
    assert!((two_in - 0.81).abs() < 1e-6);
  }
}
