use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Range;

use anyhow::{Result, bail};
use wgpu::util::DeviceExt;

use crate::paint::Color;

use super::backend::{BufferId, GraphicsBackend, ProgramId, Topology, UniformLocation};
use super::program::ProgramDesc;

/// Size of one `vec4<f32>` uniform.
const UNIFORM_SIZE: u64 = 16;

/// [`GraphicsBackend`] on top of wgpu.
///
/// Binding calls only update CPU-side state. `draw_arrays` snapshots that
/// state into a recorded draw, and [`encode`](Self::encode) replays the
/// frame's draws into a single render pass.
///
/// Uniform writes go straight to the queue, so every draw of a program in a
/// frame sees the last value written to its uniforms that frame.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,

    programs: Vec<ProgramSlot>,
    buffers: Vec<Option<BufferSlot>>,
    fan_indices: HashMap<(u32, u32), wgpu::Buffer>,

    bound_program: Option<ProgramId>,
    enabled: HashSet<u32>,
    pointers: HashMap<u32, AttribPointer>,

    clear_color: Color,
    frame: RecordedFrame,
}

struct ProgramSlot {
    desc: ProgramDesc,
    pipeline: wgpu::RenderPipeline,
    /// Attribute locations in vertex-buffer slot order.
    slots: Vec<(u32, u32)>,
    uniforms: Vec<(u32, wgpu::Buffer)>,
    bind_group: Option<wgpu::BindGroup>,
}

struct BufferSlot {
    buffer: wgpu::Buffer,
    floats: usize,
}

#[derive(Debug, Copy, Clone)]
struct AttribPointer {
    buffer: BufferId,
    components: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct RecordedDraw {
    program: ProgramId,
    vertex_buffers: Vec<BufferId>,
    kind: DrawKind,
}

#[derive(Debug, Clone, PartialEq)]
enum DrawKind {
    Direct(Range<u32>),
    Fan { key: (u32, u32), index_count: u32 },
}

/// Draws recorded since the last `encode`, plus whether the frame starts with a clear.
#[derive(Debug, Default)]
struct RecordedFrame {
    clear: bool,
    draws: Vec<RecordedDraw>,
}

impl RecordedFrame {
    /// A clear discards whatever was drawn earlier in the frame.
    fn clear(&mut self) {
        self.draws.clear();
        self.clear = true;
    }

    fn push(&mut self, draw: RecordedDraw) {
        self.draws.push(draw);
    }

    /// Hands the frame over for encoding and starts an empty one.
    fn take(&mut self) -> (bool, Vec<RecordedDraw>) {
        (std::mem::take(&mut self.clear), std::mem::take(&mut self.draws))
    }
}

/// Why a draw call was dropped instead of recorded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum DrawRejection {
    NotEnabled { location: u32 },
    ComponentMismatch { location: u32, expected: u32, bound: u32 },
    ReleasedBuffer { location: u32 },
    OutOfRange { first: u32, count: u32, available: usize },
}

impl fmt::Display for DrawRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawRejection::NotEnabled { location } => {
                write!(f, "attribute {location} not enabled")
            }
            DrawRejection::ComponentMismatch { location, expected, bound } => write!(
                f,
                "attribute {location} expects {expected} components, bound {bound}"
            ),
            DrawRejection::ReleasedBuffer { location } => {
                write!(f, "attribute {location} sources a released buffer")
            }
            DrawRejection::OutOfRange { first, count, available } => write!(
                f,
                "draw of {first}+{count} vertices exceeds buffer of {available}"
            ),
        }
    }
}

impl WgpuBackend {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            programs: Vec::new(),
            buffers: Vec::new(),
            fan_indices: HashMap::new(),
            bound_program: None,
            enabled: HashSet::new(),
            pointers: HashMap::new(),
            clear_color: Color::BLACK,
            frame: RecordedFrame::default(),
        }
    }

    /// Encodes the frame's clear and draws into one render pass targeting `view`.
    ///
    /// Recorded draws are consumed; binding state carries over to the next frame.
    pub fn encode(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let (clear, draws) = self.frame.take();
        let load = if clear {
            wgpu::LoadOp::Clear(self.clear_color.to_wgpu())
        } else {
            wgpu::LoadOp::Load
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tricolor frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for draw in &draws {
            let Some(program) = self.programs.get(draw.program.0 as usize) else { continue };

            // Buffers may have been released after the draw was recorded.
            let Some(vbos) = live_slots(&draw.vertex_buffers, &self.buffers) else {
                log::warn!(
                    "{}: vertex buffer released before submit; draw skipped",
                    program.desc.label
                );
                continue;
            };

            rpass.set_pipeline(&program.pipeline);
            if let Some(bind_group) = program.bind_group.as_ref() {
                rpass.set_bind_group(0, bind_group, &[]);
            }
            for (slot, vbo) in vbos.into_iter().enumerate() {
                rpass.set_vertex_buffer(slot as u32, vbo.buffer.slice(..));
            }

            match &draw.kind {
                DrawKind::Direct(range) => rpass.draw(range.clone(), 0..1),
                DrawKind::Fan { key, index_count } => {
                    let Some(ibo) = self.fan_indices.get(key) else { continue };
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..*index_count, 0, 0..1);
                }
            }
        }
        drop(rpass);

        prune_fan_cache(&mut self.fan_indices, &draws);
    }

    fn buffer(&self, id: BufferId) -> Option<&BufferSlot> {
        self.buffers.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Checks the bound state against the program and snapshots the vertex buffers.
    ///
    /// Returns `None` (after logging) when the draw cannot be issued.
    fn snapshot_bindings(&self, first: u32, count: u32) -> Option<(ProgramId, Vec<BufferId>)> {
        let Some(id) = self.bound_program else {
            log::warn!("draw_arrays with no program bound; skipped");
            return None;
        };
        let program = self.programs.get(id.0 as usize)?;

        let floats = |b: BufferId| self.buffer(b).map(|slot| slot.floats);
        let resolved = resolve_vertex_buffers(
            &program.slots,
            &self.enabled,
            &self.pointers,
            floats,
            first,
            count,
        );
        match resolved {
            Ok(vertex_buffers) => Some((id, vertex_buffers)),
            Err(e) => {
                log::warn!("{}: {e}; draw skipped", program.desc.label);
                None
            }
        }
    }

    fn ensure_fan_indices(&mut self, first: u32, count: u32) -> u32 {
        let indices = fan_indices(first, count);
        let index_count = indices.len() as u32;
        if index_count == 0 {
            return 0;
        }
        self.fan_indices.entry((first, count)).or_insert_with(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tricolor fan ibo"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        index_count
    }
}

impl GraphicsBackend for WgpuBackend {
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId> {
        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });

        let mut attributes = desc.attributes.to_vec();
        attributes.sort_by_key(|a| a.location);

        let mut vertex_attrs = Vec::with_capacity(attributes.len());
        for a in &attributes {
            vertex_attrs.push([wgpu::VertexAttribute {
                format: float_format(a.components)?,
                offset: 0,
                shader_location: a.location,
            }]);
        }
        let buffer_layouts: Vec<wgpu::VertexBufferLayout<'_>> = attributes
            .iter()
            .zip(&vertex_attrs)
            .map(|(a, attrs)| wgpu::VertexBufferLayout {
                array_stride: a.components as u64 * std::mem::size_of::<f32>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: attrs,
            })
            .collect();

        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = desc
            .uniforms
            .iter()
            .map(|u| wgpu::BindGroupLayoutEntry {
                binding: u.binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
                },
                count: None,
            })
            .collect();

        let bind_group_layout = (!layout_entries.is_empty()).then(|| {
            self.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some(desc.label),
                    entries: &layout_entries,
                })
        });

        let uniforms: Vec<(u32, wgpu::Buffer)> = desc
            .uniforms
            .iter()
            .map(|u| {
                let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(u.name),
                    size: UNIFORM_SIZE,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                (u.binding, buffer)
            })
            .collect();

        let bind_group = bind_group_layout.as_ref().map(|layout| {
            let entries: Vec<wgpu::BindGroupEntry> = uniforms
                .iter()
                .map(|(binding, buffer)| wgpu::BindGroupEntry {
                    binding: *binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect();
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(desc.label),
                layout,
                entries: &entries,
            })
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(desc.label),
                bind_group_layouts: &bind_group_layouts,
                immediate_size: 0,
            });

        // Fans are expanded to indexed lists at draw time, so one pipeline covers both topologies.
        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(desc.vertex_entry),
                compilation_options: Default::default(),
                buffers: &buffer_layouts,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(desc.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let id = ProgramId(self.programs.len() as u32);
        self.programs.push(ProgramSlot {
            desc: desc.clone(),
            pipeline,
            slots: attributes.iter().map(|a| (a.location, a.components)).collect(),
            uniforms,
            bind_group,
        });
        log::debug!("program {:?} linked as {id:?}", desc.label);
        Ok(id)
    }

    fn create_buffer(&mut self, label: &str, data: &[f32]) -> BufferId {
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let slot = BufferSlot { buffer, floats: data.len() };
        let id = match self.buffers.iter().position(Option::is_none) {
            Some(free) => {
                self.buffers[free] = Some(slot);
                BufferId(free as u32)
            }
            None => {
                self.buffers.push(Some(slot));
                BufferId(self.buffers.len() as u32 - 1)
            }
        };
        log::trace!("buffer {label:?} uploaded as {id:?} ({} floats)", data.len());
        id
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        if let Some(released) = self.buffers.get_mut(buffer.0 as usize).and_then(Option::take) {
            released.buffer.destroy();
        }
        self.pointers.retain(|_, p| p.buffer != buffer);
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.bound_program = program;
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        let slot = self.programs.get(program.0 as usize)?;
        slot.desc.attribute(name).map(|a| a.location)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let slot = self.programs.get(program.0 as usize)?;
        slot.desc
            .uniform(name)
            .map(|u| UniformLocation { program, binding: u.binding })
    }

    fn enable_attrib(&mut self, location: u32) {
        self.enabled.insert(location);
    }

    fn disable_attrib(&mut self, location: u32) {
        self.enabled.remove(&location);
    }

    fn attrib_pointer(&mut self, location: u32, buffer: BufferId, components: u32) {
        self.pointers.insert(location, AttribPointer { buffer, components });
    }

    fn uniform4f(&mut self, location: UniformLocation, value: Color) {
        let Some(program) = self.programs.get(location.program.0 as usize) else { return };
        let Some((_, buffer)) = program.uniforms.iter().find(|(b, _)| *b == location.binding) else {
            return;
        };
        self.queue
            .write_buffer(buffer, 0, bytemuck::cast_slice(&value.to_array()));
    }

    fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32) {
        let Some((program, vertex_buffers)) = self.snapshot_bindings(first, count) else {
            return;
        };

        let kind = match topology {
            Topology::TriangleList => {
                if count == 0 {
                    return;
                }
                DrawKind::Direct(first..first + count)
            }
            Topology::TriangleFan => {
                let index_count = self.ensure_fan_indices(first, count);
                if index_count == 0 {
                    log::debug!("triangle fan of {count} vertices draws nothing");
                    return;
                }
                DrawKind::Fan { key: (first, count), index_count }
            }
        };

        self.frame.push(RecordedDraw { program, vertex_buffers, kind });
    }
}

/// Matches a program's attribute slots against the enabled attributes and
/// their pointers, returning the buffer feeding each slot in slot order.
///
/// `floats` reports the length of a live buffer, `None` once released.
fn resolve_vertex_buffers(
    slots: &[(u32, u32)],
    enabled: &HashSet<u32>,
    pointers: &HashMap<u32, AttribPointer>,
    floats: impl Fn(BufferId) -> Option<usize>,
    first: u32,
    count: u32,
) -> Result<Vec<BufferId>, DrawRejection> {
    let mut vertex_buffers = Vec::with_capacity(slots.len());
    for &(location, components) in slots {
        let pointer = enabled
            .contains(&location)
            .then(|| pointers.get(&location))
            .flatten()
            .ok_or(DrawRejection::NotEnabled { location })?;

        if pointer.components != components {
            return Err(DrawRejection::ComponentMismatch {
                location,
                expected: components,
                bound: pointer.components,
            });
        }

        let len = floats(pointer.buffer).ok_or(DrawRejection::ReleasedBuffer { location })?;
        let available = len / components as usize;
        if first as usize + count as usize > available {
            return Err(DrawRejection::OutOfRange { first, count, available });
        }
        vertex_buffers.push(pointer.buffer);
    }
    Ok(vertex_buffers)
}

/// Looks up every id in `slots`; `None` if any of them has been released.
fn live_slots<'a, T>(ids: &[BufferId], slots: &'a [Option<T>]) -> Option<Vec<&'a T>> {
    ids.iter()
        .map(|id| slots.get(id.0 as usize).and_then(Option::as_ref))
        .collect()
}

/// Drops cached fan index buffers that the last frame did not draw with.
fn prune_fan_cache<T>(cache: &mut HashMap<(u32, u32), T>, draws: &[RecordedDraw]) {
    let live: HashSet<(u32, u32)> = draws
        .iter()
        .filter_map(|d| match d.kind {
            DrawKind::Fan { key, .. } => Some(key),
            DrawKind::Direct(_) => None,
        })
        .collect();
    cache.retain(|key, _| live.contains(key));
}

fn float_format(components: u32) -> Result<wgpu::VertexFormat> {
    Ok(match components {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        4 => wgpu::VertexFormat::Float32x4,
        n => bail!("unsupported attribute width: {n} components"),
    })
}

/// Triangle-list indices equivalent to a fan over `count` vertices starting at `first`.
///
/// Fewer than three vertices produce no triangles.
pub(crate) fn fan_indices(first: u32, count: u32) -> Vec<u32> {
    if count < 3 {
        return Vec::new();
    }
    (1..count - 1)
        .flat_map(|i| [first, first + i, first + i + 1])
        .collect()
}
