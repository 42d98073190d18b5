use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use orbit_core::{AppConfig, SceneContext};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::hud::{self, FrustumEdits};
use crate::input::{apply_input_to_scene, InputState};
use crate::renderer::Renderer;

pub fn run(config: AppConfig) -> anyhow::Result<()>
{
  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = OrbitApp::new(config);

  event_loop.run_app(&mut app).context("event loop terminated abnormally")?;

  match app.error.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

struct OrbitApp
{
  config: AppConfig,
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,
  scene: SceneContext,
  input: InputState,
  frustum: FrustumEdits,
  last_frame: Instant,
  error: Option<anyhow::Error>,
}

impl OrbitApp
{
  fn new(config: AppConfig) -> Self
  {
    let camera = config.camera.build(config.window.aspect());
    let frustum = FrustumEdits::from_camera(&camera);

    Self {
      config,
      window: None,
      renderer: None,
      scene: SceneContext::new(camera),
      input: InputState::new(),
      frustum,
      last_frame: Instant::now(),
      error: None,
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes()
      .with_title(self.config.window.title.clone())
      .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));
    let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

    self.scene.camera.set_aspect(window_aspect(&window));

    let renderer = pollster::block_on(Renderer::new(window.clone(), &self.scene))?;

    self.window = Some(window);
    self.renderer = Some(renderer);
    self.last_frame = Instant::now();

    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    let consumed = match &mut self.renderer
    {
      Some(renderer) => renderer.gui.handle_event(&window, &event),
      None => false,
    };

    if !consumed
    {
      self.input.handle_event(&event);
    }

    if self.input.exit_requested
    {
      elwt.exit();
      return;
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        self.scene.camera.set_aspect(size.width as f32 / size.height as f32);
        log::info!("resized to {}x{}", size.width, size.height);

        window.request_redraw();
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self)
  {
    let now = Instant::now();
    let dt = (now - self.last_frame).as_secs_f32();
    self.last_frame = now;

    if let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer)
    {
      let aspect = window_aspect(window);

      apply_input_to_scene(&self.input, &self.config.controls, &mut self.scene, aspect);
      self.scene.update(dt, self.input.movement);

      let scene = &self.scene;
      let frustum = &mut self.frustum;
      let gui_output = renderer.gui.run(window, |ctx| hud::draw_camera_panel(ctx, scene, frustum));
      self.frustum.apply_to(&mut self.scene.camera);

      renderer.update_scene(&self.scene);
      renderer.render(gui_output);

      window.request_redraw();
      self.input.end_frame();
    }
  }
}

impl ApplicationHandler for OrbitApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      log::error!("startup failed: {err:#}");
      self.error = Some(err);
      event_loop.exit();
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop)
  {
    self.frame();
  }
}

fn window_aspect(window: &Window) -> f32
{
  let size = window.inner_size();
  size.width.max(1) as f32 / size.height.max(1) as f32
}
