use std::sync::Arc;

use anyhow::Context;
use orbit_core::SceneContext;
use winit::window::Window;

use super::axes::AxesGizmo;
use super::cube::MarkerCube;
use super::depth::DepthResources;
use super::gui::GuiRenderer;
use super::uniform::CameraUniform;

const CLEAR_COLOUR: wgpu::Color = wgpu::Color { r: 0.02, g: 0.02, b: 0.03, a: 1.0 };

pub struct Renderer
{
  window: Arc<Window>,
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthResources,
  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,

  axes: AxesGizmo,
  marker: MarkerCube,

  pub gui: GuiRenderer,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, scene: &SceneContext) -> anyhow::Result<Self>
  {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone()).context("failed to create surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;

    let config = configure_surface(&window, &surface, &adapter, &device)?;
    let depth = DepthResources::create(&device, &config);

    let (camera_buffer, camera_bind_group, camera_bgl) = create_camera_resources(&device);

    // Upload initial camera uniform
    let uniform = CameraUniform::from_scene(scene);
    queue.write_buffer(&camera_buffer, 0, bytemuck::bytes_of(&uniform));

    let axes = AxesGizmo::create(&device, config.format, &camera_bgl);
    let marker = MarkerCube::create(&device, config.format, &camera_bgl);
    let gui = GuiRenderer::new(&device, config.format, &window);

    log::info!("renderer ready ({:?}, {}x{})", config.format, config.width, config.height);

    Ok(Self {
      window,
      surface,
      device,
      queue,
      config,
      depth,
      camera_buffer,
      camera_bind_group,
      axes,
      marker,
      gui,
    })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth = DepthResources::create(&self.device, &self.config);
  }

  /// Upload this frame's camera and character transforms.
  pub fn update_scene(&mut self, scene: &SceneContext)
  {
    let uniform = CameraUniform::from_scene(scene);
    self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));

    self.marker.update(&self.queue, scene.character_model());
  }

  pub fn render(&mut self, gui_output: egui::FullOutput)
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(err) =>
      {
        // Lost/outdated surfaces recover on the next frame.
        log::warn!("surface unavailable ({err}), reconfiguring");
        self.surface.configure(&self.device, &self.config);
        return;
      }
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    record_scene_pass(
      &mut encoder,
      &view,
      &self.depth.view,
      &self.camera_bind_group,
      &self.axes,
      &self.marker,
    );

    let uploads =
      self.gui.render(&self.device, &self.queue, &mut encoder, &self.window, &view, gui_output);

    self.queue.submit(uploads.into_iter().chain(std::iter::once(encoder.finish())));
    self.window.pre_present_notify();
    frame.present();
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(
  instance: &wgpu::Instance,
  surface: &wgpu::Surface<'_>,
) -> anyhow::Result<wgpu::Adapter>
{
  instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter found")
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor { label: Some("Orbit Device"), ..Default::default() })
    .await
    .context("failed to create device")
}

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> anyhow::Result<wgpu::SurfaceConfiguration>
{
  let size = window.inner_size();
  let caps = surface.get_capabilities(adapter);
  let format = caps
    .formats
    .iter()
    .copied()
    .find(|f| f.is_srgb())
    .or_else(|| caps.formats.first().copied())
    .context("surface reports no supported formats")?;

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode: wgpu::CompositeAlphaMode::Auto,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

fn create_camera_resources(
  device: &wgpu::Device,
) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Camera Buffer"),
    size: std::mem::size_of::<CameraUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Camera BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Camera BG"),
    layout: &camera_bgl,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
  });

  (camera_buffer, camera_bind_group, camera_bgl)
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

fn record_scene_pass(
  encoder: &mut wgpu::CommandEncoder,
  color_view: &wgpu::TextureView,
  depth_view: &wgpu::TextureView,
  camera_bg: &wgpu::BindGroup,
  axes: &AxesGizmo,
  marker: &MarkerCube,
)
{
  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Scene Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: color_view,
      depth_slice: None,
      resolve_target: None,
      ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOUR), store: wgpu::StoreOp::Store },
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: depth_view,
      depth_ops: Some(wgpu::Operations {
        load: wgpu::LoadOp::Clear(1.0),
        store: wgpu::StoreOp::Store,
      }),
      stencil_ops: None,
    }),
    ..Default::default()
  });

  axes.draw(&mut pass, camera_bg);
  marker.draw(&mut pass, camera_bg);
}
