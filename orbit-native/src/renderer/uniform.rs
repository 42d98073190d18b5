use glam::{Mat4, Vec4};
use orbit_core::SceneContext;

//
// ──────────────────────────────────────────────────────────────
//   Camera Uniform (GPU side)
//
//   WGSL layout (axes.wgsl, marker.wgsl), group 0:
//     view_proj : mat4x4<f32>   → 64 bytes
//   Total: 64 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform
{
  pub view_proj: [[f32; 4]; 4], // 64 bytes
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<CameraUniform>() == 64);

impl CameraUniform
{
  /// Projection × camera view re-centred on the tracked character.
  pub fn from_scene(scene: &SceneContext) -> Self
  {
    let mat: Mat4 = scene.view_projection();
    Self { view_proj: mat.to_cols_array_2d() }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Model Uniform (GPU side)
//
//   WGSL layout (marker.wgsl), group 1:
//     model  : mat4x4<f32>   → 64 bytes
//     colour : vec4<f32>     → 16 bytes
//   Total: 80 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform
{
  pub model: [[f32; 4]; 4], // 64 bytes
  pub colour: [f32; 4],     // 16 bytes
}

const _: () = assert!(std::mem::size_of::<ModelUniform>() == 80);

impl ModelUniform
{
  pub fn new(model: Mat4, colour: Vec4) -> Self
  {
    Self { model: model.to_cols_array_2d(), colour: colour.to_array() }
  }
}

#[cfg(test)]
mod tests
{
  use orbit_core::CameraConfig;

  use super::*;

  #[test]
  fn camera_uniform_matches_scene_matrices()
  {
    let scene = SceneContext::new(CameraConfig::default().build(1.5));
    let uniform = CameraUniform::from_scene(&scene);

    let expected = scene.camera.projection_transform() * scene.tracked_view();
    assert_eq!(Mat4::from_cols_array_2d(&uniform.view_proj), expected);
  }

  #[test]
  fn model_uniform_is_column_major()
  {
    let model = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
    let uniform = ModelUniform::new(model, Vec4::ONE);

    assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(uniform.colour, [1.0; 4]);
  }
}
