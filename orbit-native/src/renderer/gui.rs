use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use egui_winit::State;
use winit::event::WindowEvent;
use winit::window::Window;

//
// ──────────────────────────────────────────────────────────────
//   egui overlay
//
//   Owns the egui context, its winit glue and its wgpu renderer.
//   Drawn last, on top of the scene, without depth.
// ──────────────────────────────────────────────────────────────
//

pub struct GuiRenderer
{
  pub context: egui::Context,
  state: State,
  renderer: Renderer,
}

impl GuiRenderer
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let state = State::new(
      context.clone(),
      egui::viewport::ViewportId::ROOT,
      window,
      Some(window.scale_factor() as f32),
      None,
      None,
    );

    let renderer = Renderer::new(
      device,
      output_format,
      RendererOptions {
        depth_stencil_format: None,
        msaa_samples: 1,
        predictable_texture_filtering: false,
        dithering: true,
      },
    );

    Self { context, state, renderer }
  }

  /// Returns true when egui wants the event for itself (e.g. a slider drag).
  pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool
  {
    self.state.on_window_event(window, event).consumed
  }

  /// Run one UI pass and forward cursor/clipboard requests to the window.
  pub fn run(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> egui::FullOutput
  {
    let raw_input = self.state.take_egui_input(window);
    let mut full_output = self.context.run(raw_input, ui);

    let platform_output = std::mem::take(&mut full_output.platform_output);
    self.state.handle_platform_output(window, platform_output);

    full_output
  }

  /// Record the overlay pass. Returns egui's own upload command buffers,
  /// which must be submitted before `encoder`.
  pub fn render(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    view: &wgpu::TextureView,
    full_output: egui::FullOutput,
  ) -> Vec<wgpu::CommandBuffer>
  {
    let size = window.inner_size();
    let ppp = window.scale_factor() as f32;
    let screen_descriptor =
      ScreenDescriptor { size_in_pixels: [size.width, size.height], pixels_per_point: ppp };

    for (id, delta) in full_output.textures_delta.set
    {
      self.renderer.update_texture(device, queue, id, &delta);
    }

    let tris = self.context.tessellate(full_output.shapes, ppp);
    let uploads = self.renderer.update_buffers(device, queue, encoder, &tris, &screen_descriptor);

    {
      let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Egui Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        ..Default::default()
      });

      // egui-wgpu wants a 'static pass; it is dropped before `encoder` is touched again.
      let mut pass = pass.forget_lifetime();

      self.renderer.render(&mut pass, &tris, &screen_descriptor);
    }

    for id in full_output.textures_delta.free
    {
      self.renderer.free_texture(&id);
    }

    uploads
  }
}
