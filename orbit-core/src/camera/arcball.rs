use glam::{Mat4, Quat, Vec3};

use super::handedness::Handedness;

//
// ──────────────────────────────────────────────────────────────
//   Arcball Camera (pivot fixed at the world origin)
//
//   Spherical state, angles in degrees:
//     theta  = rotation about +X (pitch)
//     phi    = rotation about +Y (yaw)
//     radius = distance from the origin to the eye, in [0, +inf)
//
//   theta = phi = 0 puts the eye on the axis opposite the eye-space
//   forward direction (+Z right-handed, -Z left-handed).
//
//   View and projection are cached. Every mutator rebuilds both
//   before returning, so the getters never see stale matrices.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct ArcballCamera
{
  theta: f32,
  phi: f32,
  radius: f32,

  fov_y: f32,
  aspect: f32,
  near: f32,
  far: f32,

  handedness: Handedness,

  view: Mat4,
  projection: Mat4,
}

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

pub const DEFAULT_THETA: f32 = 0.0;
pub const DEFAULT_PHI: f32 = 0.0;
pub const DEFAULT_RADIUS: f32 = 15.0;
pub const DEFAULT_FOV_Y: f32 = 55.0;
pub const DEFAULT_ASPECT: f32 = 1.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 0.0; // infinite

const FAR_PLANE_EPSILON: f32 = 1e-6; // |far| below this selects the infinite projection
const FOV_Y_MIN: f32 = 0.01;
const FOV_Y_MAX: f32 = 179.0;
const ASPECT_MIN: f32 = 1e-4;
const NEAR_MIN: f32 = 1e-4;
const NEAR_MAX: f32 = 1e30; // keeps near * depth scale inside f32
const DEPTH_RANGE_MIN: f32 = 1e-3; // smallest finite far - near gap, absolute and relative

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Default for ArcballCamera
{
  fn default() -> Self
  {
    Self::new(
      DEFAULT_THETA,
      DEFAULT_PHI,
      DEFAULT_RADIUS,
      DEFAULT_FOV_Y,
      DEFAULT_ASPECT,
      DEFAULT_NEAR,
      DEFAULT_FAR,
    )
  }
}

impl ArcballCamera
{
  /// Right-handed camera at `<theta, phi>` (degrees), `radius` from the origin.
  ///
  /// `fov_y` is the full vertical field of view in degrees. A `far` of 0.0
  /// (within a small tolerance) builds an infinite perspective projection.
  pub fn new(theta: f32, phi: f32, radius: f32, fov_y: f32, aspect: f32, near: f32, far: f32)
    -> Self
  {
    let mut camera = Self {
      theta: finite_or(theta, DEFAULT_THETA),
      phi: finite_or(phi, DEFAULT_PHI),
      radius: sanitize_radius(radius),

      fov_y: sanitize_fov_y(fov_y),
      aspect: floor_positive(aspect, ASPECT_MIN),
      near: sanitize_near(near),
      far: sanitize_far(far),

      handedness: Handedness::Right,

      view: Mat4::IDENTITY,
      projection: Mat4::IDENTITY,
    };

    camera.update_derived();
    camera
  }

  /// Switch coordinate convention. Rebuilds both matrices.
  pub fn with_handedness(mut self, handedness: Handedness) -> Self
  {
    self.handedness = handedness;
    self.update_derived();
    self
  }

  // Stored properties

  pub fn theta(&self) -> f32
  {
    self.theta
  }

  pub fn phi(&self) -> f32
  {
    self.phi
  }

  pub fn radius(&self) -> f32
  {
    self.radius
  }

  pub fn fov_y(&self) -> f32
  {
    self.fov_y
  }

  pub fn aspect(&self) -> f32
  {
    self.aspect
  }

  pub fn near_plane_distance(&self) -> f32
  {
    self.near
  }

  pub fn far_plane_distance(&self) -> f32
  {
    self.far
  }

  pub fn handedness(&self) -> Handedness
  {
    self.handedness
  }

  /// True when the cached projection has no far clipping plane.
  pub fn is_infinite(&self) -> bool
  {
    is_infinite_far(self.far)
  }

  // Mutators

  /// Add `d_theta` / `d_phi` (degrees). Angles accumulate without wrapping.
  pub fn rotate_camera(&mut self, d_theta: f32, d_phi: f32)
  {
    if !d_theta.is_finite() || !d_phi.is_finite()
    {
      log::debug!("ignoring non-finite rotation ({d_theta}, {d_phi})");
      return;
    }

    self.theta += d_theta;
    self.phi += d_phi;
    self.update_derived();
  }

  /// Multiplicative zoom. `s` < 1 moves toward the origin, `s` > 1 away.
  /// A non-positive or NaN factor collapses the radius to 0.
  pub fn scale_radius(&mut self, s: f32)
  {
    self.radius = sanitize_radius(self.radius * s);
    self.update_derived();
  }

  /// Additive zoom, floored at 0.
  pub fn increment_radius(&mut self, i: f32)
  {
    self.radius = sanitize_radius(self.radius + i);
    self.update_derived();
  }

  pub fn set_fov_y(&mut self, fov_y: f32)
  {
    self.fov_y = sanitize_fov_y(fov_y);
    self.update_derived();
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = floor_positive(aspect, ASPECT_MIN);
    self.update_derived();
  }

  pub fn set_near_plane_distance(&mut self, near: f32)
  {
    self.near = sanitize_near(near);
    self.update_derived();
  }

  /// 0.0 switches to the infinite projection; anything else back to finite.
  pub fn set_far_plane_distance(&mut self, far: f32)
  {
    self.far = sanitize_far(far);
    self.update_derived();
  }

  /// Snap back to the default orientation and radius with a new aspect.
  /// Field of view and clip planes are kept.
  pub fn reset_camera(&mut self, aspect: f32)
  {
    self.theta = DEFAULT_THETA;
    self.phi = DEFAULT_PHI;
    self.radius = DEFAULT_RADIUS;
    self.aspect = floor_positive(aspect, ASPECT_MIN);
    self.update_derived();
  }

  // Derived values

  /// World-to-eye transform.
  pub fn view_transform(&self) -> Mat4
  {
    self.view
  }

  /// Eye-to-clip transform, depth mapped to [0, 1].
  pub fn projection_transform(&self) -> Mat4
  {
    self.projection
  }

  pub fn view_projection(&self) -> Mat4
  {
    self.projection * self.view
  }

  /// World-space eye position. Its length is the radius.
  pub fn position(&self) -> Vec3
  {
    eye_position(self)
  }

  fn update_derived(&mut self)
  {
    self.view = build_view_matrix(self);
    self.projection = build_projection_matrix(self);
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Input guards
// ──────────────────────────────────────────────────────────────
//

fn finite_or(value: f32, fallback: f32) -> f32
{
  if value.is_finite() { value } else { fallback }
}

fn sanitize_radius(radius: f32) -> f32
{
  if radius.is_nan() || radius < 0.0
  {
    log::debug!("radius {radius} clamped to 0");
    return 0.0;
  }

  radius.min(f32::MAX)
}

fn sanitize_fov_y(fov_y: f32) -> f32
{
  if fov_y.is_nan()
  {
    return DEFAULT_FOV_Y;
  }

  let clamped = fov_y.clamp(FOV_Y_MIN, FOV_Y_MAX);
  if clamped != fov_y
  {
    log::debug!("fov_y {fov_y} clamped to {clamped}");
  }
  clamped
}

fn floor_positive(value: f32, floor: f32) -> f32
{
  if value.is_nan() || value < floor
  {
    log::debug!("value {value} raised to {floor}");
    return floor;
  }

  value.min(f32::MAX)
}

fn sanitize_near(near: f32) -> f32
{
  floor_positive(near, NEAR_MIN).min(NEAR_MAX)
}

// Negative, NaN and +inf all mean "no far plane" and are stored as the sentinel.
fn sanitize_far(far: f32) -> f32
{
  if far.is_finite() && far > 0.0 { far } else { 0.0 }
}

fn is_infinite_far(far: f32) -> bool
{
  far.abs() <= FAR_PLANE_EPSILON
}

//
// ──────────────────────────────────────────────────────────────
//   Spherical → cartesian
// ──────────────────────────────────────────────────────────────
//

fn orientation(cam: &ArcballCamera) -> Quat
{
  Quat::from_rotation_y(cam.phi.to_radians()) * Quat::from_rotation_x(cam.theta.to_radians())
}

fn eye_position(cam: &ArcballCamera) -> Vec3
{
  orientation(cam) * (-cam.handedness.forward() * cam.radius)
}

//
// ──────────────────────────────────────────────────────────────
//   Matrix builders
// ──────────────────────────────────────────────────────────────
//

// Inverse of the eye's world transform: undo yaw, undo pitch, then dolly
// `radius` along the eye-space forward axis. Equal to a look-at from the
// eye toward the origin with +Y up, but stays well defined at |theta| = 90
// and at radius 0.
fn build_view_matrix(cam: &ArcballCamera) -> Mat4
{
  let dolly = cam.handedness.forward() * cam.radius;

  Mat4::from_translation(dolly)
    * Mat4::from_rotation_x(-cam.theta.to_radians())
    * Mat4::from_rotation_y(-cam.phi.to_radians())
}

fn build_projection_matrix(cam: &ArcballCamera) -> Mat4
{
  let fov = cam.fov_y.to_radians();

  if is_infinite_far(cam.far)
  {
    return match cam.handedness
    {
      Handedness::Right => Mat4::perspective_infinite_rh(fov, cam.aspect, cam.near),
      Handedness::Left => Mat4::perspective_infinite_lh(fov, cam.aspect, cam.near),
    };
  }

  // Keep the frustum non-degenerate if near was pushed past far. The relative
  // gap survives f32 rounding at large near distances.
  let far = cam
    .far
    .max(cam.near * (1.0 + DEPTH_RANGE_MIN))
    .max(cam.near + DEPTH_RANGE_MIN);

  match cam.handedness
  {
    Handedness::Right => Mat4::perspective_rh(fov, cam.aspect, cam.near, far),
    Handedness::Left => Mat4::perspective_lh(fov, cam.aspect, cam.near, far),
  }
}
