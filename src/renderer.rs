use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::core::GpuContext;
use crate::geometry::Vertex;
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::scenes::ScenePreset;
use crate::tunables::Tunables;
use crate::types::{CameraUniform, LightUniform, ObjectUniform};
use crate::ui::{self, FrameStats};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const LIGHT_HELPER_SIZE: f32 = 0.5;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
const HELPER_VERTEX_CAPACITY: u64 = 16;

/// Buffers for one object's mesh, tagged with the mesh revision they hold
struct GpuMesh {
    revision: u64,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_buffer: Option<(wgpu::Buffer, u32)>,
}

struct ObjectSlot {
    mesh: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct HelperLines {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
}

pub struct SceneRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    fill_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    helper_pipeline: wgpu::RenderPipeline,
    slots: HashMap<ObjectId, ObjectSlot>,
    helper: HelperLines,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    show_ui: bool,
    requested_preset: Option<ScenePreset>,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, show_ui: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;
        let device = gpu.device();

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size)?;
        surface.configure(device, &surface_config);
        let depth_view = Self::create_depth_view(device, &surface_config);

        let camera_buffer = Self::create_uniform_buffer::<CameraUniform>(device, "Camera Buffer");
        let light_buffer = Self::create_uniform_buffer::<LightUniform>(device, "Light Buffer");

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_layout_entry(0), uniform_layout_entry(1)],
            label: Some("frame_bind_group_layout"),
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_layout_entry(0)],
            label: Some("object_bind_group_layout"),
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let format = surface_config.format;
        let fill_pipeline = Self::create_render_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveTopology::TriangleList,
            "fs_lit",
            "Fill",
        );
        let wire_pipeline = Self::create_render_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveTopology::LineList,
            "fs_lit",
            "Wireframe",
        );
        let helper_pipeline = Self::create_render_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveTopology::LineList,
            "fs_unlit",
            "Helper",
        );

        let helper = Self::create_helper_lines(device, &object_layout);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());

        log::info!(
            "Renderer initialized: {}x{} {:?}, ui {}",
            surface_config.width,
            surface_config.height,
            format,
            if show_ui { "on" } else { "off" }
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            size,
            depth_view,
            camera_buffer,
            light_buffer,
            frame_bind_group,
            object_layout,
            fill_pipeline,
            wire_pipeline,
            helper_pipeline,
            slots: HashMap::new(),
            helper,
            egui_renderer,
            egui_state,
            egui_ctx,
            show_ui,
            requested_preset: None,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes.first().copied().unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_uniform_buffer<T>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_render_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        topology: wgpu::PrimitiveTopology,
        fragment_entry: &str,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", label)),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_object_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("object_bind_group"),
        })
    }

    fn create_helper_lines(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> HelperLines {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Light Helper Vertices"),
            size: HELPER_VERTEX_CAPACITY * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform = ObjectUniform::new(Mat4::IDENTITY, [1.0, 1.0, 1.0], None);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Helper Uniform"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = Self::create_object_bind_group(device, layout, &uniform_buffer);

        HelperLines {
            vertex_buffer,
            vertex_count: 0,
            bind_group,
        }
    }

    fn upload_mesh(device: &wgpu::Device, object: &SceneObject) -> GpuMesh {
        let mesh = object.mesh();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", object.name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", object.name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let edge_buffer = object.material.wireframe.then(|| {
            let edges = mesh.edge_indices();
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Edges", object.name)),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::INDEX,
            });
            (buffer, edges.len() as u32)
        });

        log::debug!(
            "Uploaded {} '{}' revision {}: {} vertices, {} triangles",
            object.shape().kind(),
            object.name,
            object.mesh_revision(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );

        GpuMesh {
            revision: object.mesh_revision(),
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            edge_buffer,
        }
    }

    /// Bring GPU meshes in line with the scene: upload new or changed meshes,
    /// drop those of despawned objects, refresh every object uniform
    fn sync_objects(&mut self, scene: &Scene) {
        let device = self.gpu.device();
        let queue = self.gpu.queue();

        self.slots.retain(|id, _| scene.get(*id).is_some());

        for object in scene.objects() {
            let stale = match self.slots.get(&object.id()) {
                None => true,
                Some(slot) => {
                    slot.mesh.revision != object.mesh_revision()
                        || (object.material.wireframe && slot.mesh.edge_buffer.is_none())
                }
            };

            if stale {
                let mesh = Self::upload_mesh(device, object);
                match self.slots.entry(object.id()) {
                    Entry::Occupied(mut occupied) => occupied.get_mut().mesh = mesh,
                    Entry::Vacant(vacant) => {
                        let uniform_buffer =
                            Self::create_uniform_buffer::<ObjectUniform>(device, &format!("{} Uniform", object.name));
                        let bind_group = Self::create_object_bind_group(device, &self.object_layout, &uniform_buffer);
                        vacant.insert(ObjectSlot {
                            mesh,
                            uniform_buffer,
                            bind_group,
                        });
                    }
                }
            }

            if let Some(slot) = self.slots.get(&object.id()) {
                let material = &object.material;
                let uniform = ObjectUniform::new(
                    object.world_matrix(),
                    material.color.to_linear(),
                    material.wobble.map(|w| (w.factor, w.speed)),
                );
                queue.write_buffer(&slot.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
            }
        }
    }

    fn sync_helper(&mut self, scene: &Scene) {
        let vertices: Vec<Vertex> = scene
            .lighting
            .directional
            .helper_lines(LIGHT_HELPER_SIZE)
            .into_iter()
            .flatten()
            .take(HELPER_VERTEX_CAPACITY as usize)
            .map(|p| Vertex::new(p, Vec3::Y))
            .collect();

        self.gpu
            .queue()
            .write_buffer(&self.helper.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.helper.vertex_count = vertices.len() as u32;
    }

    pub fn render(
        &mut self,
        window: &Window,
        scene: &Scene,
        camera: &OrbitCamera,
        tunables: &mut Tunables,
        stats: &FrameStats,
        preset: ScenePreset,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let queue = self.gpu.queue();
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera.to_uniform(stats.time)]));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[scene.lighting.to_uniform()]));

        self.sync_objects(scene);
        self.sync_helper(scene);

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for object in scene.objects() {
                let Some(slot) = self.slots.get(&object.id()) else {
                    continue;
                };
                let mesh = &slot.mesh;
                render_pass.set_bind_group(1, &slot.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));

                match (&mesh.edge_buffer, object.material.wireframe) {
                    (Some((edges, edge_count)), true) => {
                        render_pass.set_pipeline(&self.wire_pipeline);
                        render_pass.set_index_buffer(edges.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..*edge_count, 0, 0..1);
                    }
                    _ => {
                        render_pass.set_pipeline(&self.fill_pipeline);
                        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                }
            }

            if self.helper.vertex_count > 0 {
                render_pass.set_pipeline(&self.helper_pipeline);
                render_pass.set_bind_group(1, &self.helper.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.helper.vertex_buffer.slice(..));
                render_pass.draw(0..self.helper.vertex_count, 0..1);
            }
        }

        if self.show_ui {
            self.render_overlay(window, &mut encoder, &view, tunables, stats, preset);
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn render_overlay(
        &mut self,
        window: &Window,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        tunables: &mut Tunables,
        stats: &FrameStats,
        preset: ScenePreset,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let screen_width = self.size.width as f32 / window.scale_factor() as f32;
        let mut requested = None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui::stats_window(ctx, stats, preset);
            ui::tweak_panel(ctx, tunables, screen_width);
            if let Some(next) = ui::scene_selector(ctx, preset) {
                requested = Some(next);
            }
        });
        if requested.is_some() {
            self.requested_preset = requested;
        }

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let device = self.gpu.device();
        let queue = self.gpu.queue();

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.reconfigure();
    }

    /// Reconfigure the surface at the current size, e.g. after it was lost
    pub fn reconfigure(&mut self) {
        let device = self.gpu.device();
        self.surface.configure(device, &self.surface_config);
        self.depth_view = Self::create_depth_view(device, &self.surface_config);
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    /// Forward an event to egui. Returns true when egui consumed it.
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        if !self.show_ui {
            return false;
        }
        self.egui_state.on_window_event(window, event).consumed
    }

    /// Preset picked in the scene selector since the last call
    pub fn take_requested_preset(&mut self) -> Option<ScenePreset> {
        self.requested_preset.take()
    }
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
