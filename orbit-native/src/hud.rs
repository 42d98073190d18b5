use orbit_core::{ArcballCamera, SceneContext};

//
// ──────────────────────────────────────────────────────────────
//   Camera panel
//
//   Read-out of the orbit state plus frustum sliders. Slider
//   values live here between frames and are pushed through the
//   camera setters only when they differ from the camera.
// ──────────────────────────────────────────────────────────────
//

const FALLBACK_FAR: f32 = 1000.0; // slider value shown while the far plane is infinite

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumEdits
{
  pub fov_y: f32,
  pub near: f32,
  pub far: f32,
  pub infinite_far: bool,
}

impl FrustumEdits
{
  pub fn from_camera(camera: &ArcballCamera) -> Self
  {
    let infinite_far = camera.is_infinite();

    Self {
      fov_y: camera.fov_y(),
      near: camera.near_plane_distance(),
      far: if infinite_far { FALLBACK_FAR } else { camera.far_plane_distance() },
      infinite_far,
    }
  }

  pub fn apply_to(&self, camera: &mut ArcballCamera)
  {
    if self.fov_y != camera.fov_y()
    {
      camera.set_fov_y(self.fov_y);
    }

    if self.near != camera.near_plane_distance()
    {
      camera.set_near_plane_distance(self.near);
    }

    let far = if self.infinite_far { 0.0 } else { self.far };
    if far != camera.far_plane_distance()
    {
      camera.set_far_plane_distance(far);
    }
  }
}

pub fn draw_camera_panel(ctx: &egui::Context, scene: &SceneContext, edits: &mut FrustumEdits)
{
  let camera = &scene.camera;

  egui::Window::new("Camera").resizable(false).default_pos([12.0, 12.0]).show(ctx, |ui| {
    ui.label(format!("theta  {:8.2}°", camera.theta()));
    ui.label(format!("phi    {:8.2}°", camera.phi()));
    ui.label(format!("radius {:8.2}", camera.radius()));
    ui.label(if scene.camera_locked { "mode: locked (F to free)" } else { "mode: free orbit (F to lock)" });

    ui.separator();

    ui.add(egui::Slider::new(&mut edits.fov_y, 10.0..=120.0).text("fov y (°)"));
    ui.add(egui::Slider::new(&mut edits.near, 0.01..=10.0).logarithmic(true).text("near"));
    ui.checkbox(&mut edits.infinite_far, "infinite far plane");
    ui.add_enabled(
      !edits.infinite_far,
      egui::Slider::new(&mut edits.far, 10.0..=20_000.0).logarithmic(true).text("far"),
    );

    ui.label(if camera.is_infinite() { "projection: infinite" } else { "projection: finite" });
  });
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn unchanged_edits_leave_camera_alone()
  {
    let mut camera = ArcballCamera::new(-45.0, 45.0, 50.0, 40.0, 1.0, 0.1, 10_000.0);
    let before = camera.clone();

    FrustumEdits::from_camera(&camera).apply_to(&mut camera);
    assert_eq!(camera, before);
  }

  #[test]
  fn infinite_checkbox_switches_projection()
  {
    let mut camera = ArcballCamera::new(0.0, 0.0, 10.0, 40.0, 1.0, 0.1, 500.0);
    let mut edits = FrustumEdits::from_camera(&camera);

    edits.infinite_far = true;
    edits.apply_to(&mut camera);
    assert!(camera.is_infinite());

    edits.infinite_far = false;
    edits.apply_to(&mut camera);
    assert!(!camera.is_infinite());
    assert_eq!(camera.far_plane_distance(), 500.0);
  }

  #[test]
  fn infinite_camera_shows_fallback_far()
  {
    let camera = ArcballCamera::default();
    let edits = FrustumEdits::from_camera(&camera);

    assert!(edits.infinite_far);
    assert_eq!(edits.far, FALLBACK_FAR);
  }

  #[test]
  fn slider_changes_reach_the_camera()
  {
    let mut camera = ArcballCamera::default();
    let mut edits = FrustumEdits::from_camera(&camera);

    edits.fov_y = 75.0;
    edits.near = 0.5;
    edits.apply_to(&mut camera);

    assert_eq!(camera.fov_y(), 75.0);
    assert_eq!(camera.near_plane_distance(), 0.5);
  }
}
