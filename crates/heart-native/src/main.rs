use std::sync::{Arc, Mutex};
use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use heart_core::{
    gesture::LANDMARK_COUNT, EngineConfig, FrameTimer, GestureFrame, HandDetection, HandSide,
    HeartEngine, HEART_PITCH_RAD, MAX_DRIFTERS, MAX_PARTICLES, PINCH_BAND_HIGH, PINCH_BAND_LOW,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

// Two tracked hearts plus every particle and drifter.
const MAX_INSTANCES: usize = 2 + MAX_PARTICLES + MAX_DRIFTERS;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    heart_vb: wgpu::Buffer,
    heart_ib: wgpu::Buffer,
    index_count: u32,
    instance_vb: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    instances: Vec<InstanceData>,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, engine: &HeartEngine) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(heart_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // The shared heart template is uploaded once and instanced for
        // every heart on screen.
        let template = engine.template();
        let heart_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("heart_vb"),
            contents: bytemuck::cast_slice(&template.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let heart_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("heart_ib"),
            contents: bytemuck::cast_slice(&template.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceData>() * MAX_INSTANCES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: heart mesh (position + normal)
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<heart_core::Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 1,
                    },
                ],
            },
            // slot 1: instance data (model matrix columns + color)
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 0,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 5,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 64,
                        shader_location: 6,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
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
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            heart_vb,
            heart_ib,
            index_count: template.indices.len() as u32,
            instance_vb,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
            instances: Vec::with_capacity(MAX_INSTANCES),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, engine: &HeartEngine) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj =
            (engine.projector.projection_matrix() * engine.projector.view_matrix()).to_cols_array_2d();
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms { view_proj }),
        );

        build_instances(engine, &mut self.instances);
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.heart_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.set_index_buffer(self.heart_ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.index_count, 0, 0..self.instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Flatten the engine's renderable state into instance records: tracked
/// hearts (when visible), ambient drifters, then particles.
fn build_instances(engine: &HeartEngine, out: &mut Vec<InstanceData>) {
    out.clear();
    let pitch = Quat::from_rotation_x(HEART_PITCH_RAD);
    for obj in engine.objects() {
        if !obj.visible() {
            continue;
        }
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(obj.smoothed_scale),
            pitch,
            obj.smoothed_position,
        );
        out.push(InstanceData {
            model: model.to_cols_array_2d(),
            color: [obj.color[0], obj.color[1], obj.color[2], 1.0],
        });
    }
    for d in engine.ambient().iter() {
        let rot = pitch * Quat::from_rotation_y(d.spin);
        let model = Mat4::from_scale_rotation_translation(Vec3::splat(d.scale), rot, d.position);
        out.push(InstanceData {
            model: model.to_cols_array_2d(),
            color: [d.color[0], d.color[1], d.color[2], 1.0],
        });
    }
    let falloff = engine.particles().falloff;
    for p in engine.particles().iter() {
        let rot = Quat::from_euler(EulerRot::XYZ, p.rotation.x, p.rotation.y, p.rotation.z);
        let model = Mat4::from_scale_rotation_translation(Vec3::splat(p.scale()), rot, p.position);
        out.push(InstanceData {
            model: model.to_cols_array_2d(),
            color: [p.color[0], p.color[1], p.color[2], p.opacity(falloff)],
        });
    }
}

// ---------------- Synthetic gesture source (mouse stand-in) ----------------

/// A real deployment feeds MediaPipe-style hand landmarks in; this demo
/// synthesizes them from the cursor. Scroll adjusts the pinch distance,
/// holding the left button adds a mirrored second hand.
struct GestureSim {
    cursor: Vec2,
    pinch: f32,
    second_hand: bool,
    have_cursor: bool,
}

impl GestureSim {
    fn new() -> Self {
        Self {
            cursor: Vec2::new(0.5, 0.5),
            pinch: 0.5 * (PINCH_BAND_LOW + PINCH_BAND_HIGH),
            second_hand: false,
            have_cursor: false,
        }
    }

    fn set_cursor(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.cursor = Vec2::new((x / width).clamp(0.0, 1.0), (y / height).clamp(0.0, 1.0));
            self.have_cursor = true;
        }
    }

    fn scroll(&mut self, delta: f32) {
        self.pinch = (self.pinch + delta * 0.01).clamp(PINCH_BAND_LOW, PINCH_BAND_HIGH);
    }

    fn frame(&self) -> Option<GestureFrame> {
        if !self.have_cursor {
            return None;
        }
        // The engine mirrors x for the selfie camera; pre-mirror the cursor
        // so the heart tracks it directly.
        let anchor = Vec2::new(1.0 - self.cursor.x, self.cursor.y);
        let mut frame = GestureFrame::default();
        frame.hands.push(synth_hand(HandSide::Right, anchor, self.pinch));
        if self.second_hand {
            let mirrored = Vec2::new(1.0 - anchor.x, anchor.y);
            frame
                .hands
                .push(synth_hand(HandSide::Left, mirrored, self.pinch));
        }
        Some(frame)
    }
}

/// Minimal landmark set: every point sits on the palm anchor except the
/// thumb and index tips, which straddle it by the pinch distance.
fn synth_hand(side: HandSide, anchor: Vec2, pinch: f32) -> HandDetection {
    let mut landmarks = [anchor; LANDMARK_COUNT];
    landmarks[heart_core::gesture::THUMB_TIP] = anchor - Vec2::new(pinch * 0.5, 0.0);
    landmarks[heart_core::gesture::INDEX_TIP] = anchor + Vec2::new(pinch * 0.5, 0.0);
    HandDetection { side, landmarks }
}

// ---------------- Microphone level monitor (cpal) ----------------

/// Open the default input device and keep a rolling RMS loudness estimate
/// in `shared`. Returns `None` when no microphone is available; the engine
/// simply never sees a blow in that case.
fn start_level_monitor(shared: Arc<Mutex<f32>>) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let device = host.default_input_device()?;
    let config = device.default_input_config().ok()?;
    log::info!(
        "microphone: {} ({} Hz)",
        device.name().unwrap_or_else(|_| "unknown".into()),
        config.sample_rate().0
    );

    let err_fn = |err| log::error!("input stream error: {err}");
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_level_stream::<f32>(&device, &config.into(), shared, err_fn).ok()?
        }
        cpal::SampleFormat::I16 => {
            build_level_stream::<i16>(&device, &config.into(), shared, err_fn).ok()?
        }
        cpal::SampleFormat::U16 => {
            build_level_stream::<u16>(&device, &config.into(), shared, err_fn).ok()?
        }
        _ => return None,
    };
    stream.play().ok()?;
    Some(stream)
}

fn build_level_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: Arc<Mutex<f32>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    use cpal::Sample;
    device.build_input_stream(
        config,
        move |data: &[T], _| {
            if data.is_empty() {
                return;
            }
            let mut sum = 0.0f32;
            for &s in data {
                let v = f32::from_sample(s);
                sum += v * v;
            }
            let rms = (sum / data.len() as f32).sqrt();
            if let Ok(mut level) = shared.lock() {
                *level = rms;
            }
        },
        err_fn,
        None,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut engine = HeartEngine::new(EngineConfig::dual(), 42)?;

    let audio_level = Arc::new(Mutex::new(0.0f32));
    let _mic_stream = start_level_monitor(Arc::clone(&audio_level));
    if _mic_stream.is_none() {
        log::warn!("no microphone input; blow bursts disabled");
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("heartfall")
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window, &engine))?;
    engine
        .projector
        .set_aspect(gpu.width as f32 / gpu.height as f32);

    let mut sim = GestureSim::new();
    let mut timer = FrameTimer::new();
    let mut last_score = 0u32;
    let mut last_title_update = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                engine
                    .projector
                    .set_aspect(gpu.width as f32 / gpu.height as f32);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                sim.set_cursor(
                    position.x as f32,
                    position.y as f32,
                    gpu.width as f32,
                    gpu.height as f32,
                );
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    sim.second_hand = state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 20.0,
                };
                sim.scroll(amount);
            }
            _ => {}
        },
        Event::AboutToWait => {
            if let Some(frame) = sim.frame() {
                engine.publish_gesture(frame);
            }
            let level = audio_level.lock().map(|l| *l).unwrap_or(0.0);
            engine.set_audio_level(level);
            engine.frame(timer.tick());

            let score = engine.score();
            if score != last_score && last_title_update.elapsed().as_millis() > 100 {
                gpu.window.set_title(&format!("heartfall | score {score}"));
                last_score = score;
                last_title_update = Instant::now();
            }

            match gpu.render(&engine) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
