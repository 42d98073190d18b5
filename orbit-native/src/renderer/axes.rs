use wgpu::util::DeviceExt;

use super::depth::depth_state;

//
// ──────────────────────────────────────────────────────────────
//   Constants
//
//   Y-up world. The gizmo sits on the camera's pivot (world
//   origin) so the orbit centre is always visible.
// ──────────────────────────────────────────────────────────────
//

const AXIS_LENGTH: f32 = 5.0;

const COL_X: [f32; 3] = [1.0, 0.2, 0.2];
const COL_Y: [f32; 3] = [0.2, 1.0, 0.2];
const COL_Z: [f32; 3] = [0.2, 0.4, 1.0];

const NEGATIVE_DIM: f32 = 0.3;

//
// ──────────────────────────────────────────────────────────────
//   Vertex layout: [x, y, z,  r, g, b]
// ──────────────────────────────────────────────────────────────
//

type Vertex = [f32; 6];

//
// ──────────────────────────────────────────────────────────────
//   AxesGizmo
// ──────────────────────────────────────────────────────────────
//

pub struct AxesGizmo
{
  pipeline: wgpu::RenderPipeline,
  vertex_buffer: wgpu::Buffer,
  vertex_count: u32,
}

impl AxesGizmo
{
  pub fn create(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    camera_bgl: &wgpu::BindGroupLayout,
  ) -> Self
  {
    let vertices = build_vertices();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Axes Vertex Buffer"),
      contents: bytemuck::cast_slice(&vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let pipeline = create_pipeline(device, format, camera_bgl);

    Self { pipeline, vertex_buffer, vertex_count: vertices.len() as u32 }
  }

  pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera_bg: &wgpu::BindGroup)
  {
    pass.set_pipeline(&self.pipeline);
    pass.set_bind_group(0, camera_bg, &[]);
    pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
    pass.draw(0..self.vertex_count, 0..1);
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry builder
// ──────────────────────────────────────────────────────────────
//

fn dimmed(col: [f32; 3]) -> [f32; 3]
{
  col.map(|c| c * NEGATIVE_DIM)
}

fn push_axis(verts: &mut Vec<Vertex>, dir: [f32; 3], col: [f32; 3])
{
  let tip = dir.map(|d| d * AXIS_LENGTH);
  let tail = dir.map(|d| -d * AXIS_LENGTH);
  let neg = dimmed(col);

  verts.push([0.0, 0.0, 0.0, col[0], col[1], col[2]]);
  verts.push([tip[0], tip[1], tip[2], col[0], col[1], col[2]]);
  verts.push([0.0, 0.0, 0.0, neg[0], neg[1], neg[2]]);
  verts.push([tail[0], tail[1], tail[2], neg[0], neg[1], neg[2]]);
}

fn build_vertices() -> Vec<Vertex>
{
  let mut verts = Vec::with_capacity(12);

  push_axis(&mut verts, [1.0, 0.0, 0.0], COL_X);
  push_axis(&mut verts, [0.0, 1.0, 0.0], COL_Y);
  push_axis(&mut verts, [0.0, 0.0, 1.0], COL_Z);

  verts
}

//
// ──────────────────────────────────────────────────────────────
//   Pipeline
// ──────────────────────────────────────────────────────────────
//

fn create_pipeline(
  device: &wgpu::Device,
  format: wgpu::TextureFormat,
  camera_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Axes Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/axes.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Axes Pipeline Layout"),
    bind_group_layouts: &[camera_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Axes Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
          0 => Float32x3,  // position
          1 => Float32x3,  // colour
        ],
      }],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::LineList,
      ..Default::default()
    },
    depth_stencil: Some(depth_state()),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn three_axes_as_line_pairs()
  {
    let verts = build_vertices();
    assert_eq!(verts.len(), 12);

    // +Y arm tip
    assert_eq!(&verts[5][..3], &[0.0, AXIS_LENGTH, 0.0]);
    // -Z arm tail, dimmed
    assert_eq!(&verts[11][..3], &[0.0, 0.0, -AXIS_LENGTH]);
    assert!(verts[11][5] < COL_Z[2]);
  }
}
