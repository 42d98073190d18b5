use glam::{Mat4, Vec4};
use wgpu::util::DeviceExt;

use super::depth::depth_state;
use super::uniform::ModelUniform;

//
// ──────────────────────────────────────────────────────────────
//   Marker cube
//
//   Unit cube standing on its base (y in [0, 1]) that marks the
//   tracked character. Placed each frame by the scene's model
//   matrix; colour comes from the model uniform.
// ──────────────────────────────────────────────────────────────
//

const HALF: f32 = 0.5;

pub const CHARACTER_COLOUR: Vec4 = Vec4::new(0.95, 0.45, 0.1, 1.0);

pub struct MarkerCube
{
  pipeline: wgpu::RenderPipeline,
  vertex_buffer: wgpu::Buffer,
  index_buffer: wgpu::Buffer,
  index_count: u32,

  model_buffer: wgpu::Buffer,
  model_bind_group: wgpu::BindGroup,
}

impl MarkerCube
{
  pub fn create(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    camera_bgl: &wgpu::BindGroupLayout,
  ) -> Self
  {
    let vertices = build_vertices();

    #[rustfmt::skip]
    let indices: [u16; 36] = [
      0, 2, 1,  0, 3, 2,  // bottom  (Y-)
      4, 5, 6,  4, 6, 7,  // top     (Y+)
      0, 1, 5,  0, 5, 4,  // front   (Z-)
      2, 3, 7,  2, 7, 6,  // back    (Z+)
      1, 2, 6,  1, 6, 5,  // right   (X+)
      3, 0, 4,  3, 4, 7,  // left    (X-)
    ];

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Marker Vertex Buffer"),
      contents: bytemuck::cast_slice(&vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Marker Index Buffer"),
      contents: bytemuck::cast_slice(&indices),
      usage: wgpu::BufferUsages::INDEX,
    });

    let initial = ModelUniform::new(Mat4::IDENTITY, CHARACTER_COLOUR);
    let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Marker Model Buffer"),
      contents: bytemuck::bytes_of(&initial),
      usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let model_bgl = create_model_layout(device);

    let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
      label: Some("Marker Model BG"),
      layout: &model_bgl,
      entries: &[wgpu::BindGroupEntry { binding: 0, resource: model_buffer.as_entire_binding() }],
    });

    let pipeline = create_pipeline(device, format, camera_bgl, &model_bgl);

    Self {
      pipeline,
      vertex_buffer,
      index_buffer,
      index_count: indices.len() as u32,
      model_buffer,
      model_bind_group,
    }
  }

  pub fn update(&self, queue: &wgpu::Queue, model: Mat4)
  {
    let uniform = ModelUniform::new(model, CHARACTER_COLOUR);
    queue.write_buffer(&self.model_buffer, 0, bytemuck::bytes_of(&uniform));
  }

  pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera_bg: &wgpu::BindGroup)
  {
    pass.set_pipeline(&self.pipeline);
    pass.set_bind_group(0, camera_bg, &[]);
    pass.set_bind_group(1, &self.model_bind_group, &[]);
    pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
    pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    pass.draw_indexed(0..self.index_count, 0, 0..1);
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry
// ──────────────────────────────────────────────────────────────
//

fn build_vertices() -> [[f32; 3]; 8]
{
  [
    [-HALF, 0.0, -HALF], // 0 bottom
    [HALF, 0.0, -HALF],  // 1
    [HALF, 0.0, HALF],   // 2
    [-HALF, 0.0, HALF],  // 3
    [-HALF, 1.0, -HALF], // 4 top
    [HALF, 1.0, -HALF],  // 5
    [HALF, 1.0, HALF],   // 6
    [-HALF, 1.0, HALF],  // 7
  ]
}

//
// ──────────────────────────────────────────────────────────────
//   Pipeline
// ──────────────────────────────────────────────────────────────
//

fn create_model_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout
{
  device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Marker Model BGL"),
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
  })
}

fn create_pipeline(
  device: &wgpu::Device,
  format: wgpu::TextureFormat,
  camera_bgl: &wgpu::BindGroupLayout,
  model_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Marker Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/marker.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Marker Pipeline Layout"),
    bind_group_layouts: &[camera_bgl, model_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Marker Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
      }],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState { cull_mode: None, ..Default::default() },
    depth_stencil: Some(depth_state()),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}
