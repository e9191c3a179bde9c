use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use shape_scene::camera::OrbitCamera;
use shape_scene::cli::Cli;
use shape_scene::core::WinitController;
use shape_scene::frame::{FpsCounter, FrameIterator};
use shape_scene::renderer::SceneRenderer;
use shape_scene::scene::Scene;
use shape_scene::scenes::ScenePreset;
use shape_scene::tunables::Tunables;
use shape_scene::ui::FrameStats;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    camera: OrbitCamera,
    input: WinitController,
    frames: FrameIterator,
    fps: FpsCounter,
    tunables: Tunables,
    scene: Scene,
    preset: ScenePreset,
}

impl App {
    fn new(cli: Cli) -> Result<Self> {
        let mut tunables = Tunables::new();
        let preset = cli.scene;
        let scene = preset.build(&mut tunables).context("Failed to build scene")?;

        if let Some(path) = &cli.tunables {
            tunables
                .load_overrides(path)
                .with_context(|| format!("Failed to apply tunables from {}", path.display()))?;
        }

        Ok(Self {
            camera: OrbitCamera::new(cli.width as f32 / cli.height.max(1) as f32),
            cli,
            window: None,
            renderer: None,
            input: WinitController::new(),
            frames: FrameIterator::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
            tunables,
            scene,
            preset,
        })
    }

    fn switch_preset(&mut self, preset: ScenePreset) {
        match preset.build(&mut self.tunables) {
            Ok(scene) => {
                self.scene = scene;
                self.preset = preset;
            }
            Err(e) => log::error!("Failed to switch to scene '{}': {}", preset, e),
        }
    }

    fn viewport(&self) -> (f32, f32) {
        match &self.renderer {
            Some(renderer) => {
                let size = renderer.size();
                (size.width as f32, size.height as f32)
            }
            None => (self.cli.width as f32, self.cli.height as f32),
        }
    }

    fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        let (width, height) = self.viewport();
        let ray = self.camera.screen_ray(position.x as f32, position.y as f32, width, height);
        self.scene.pointer_move(&ray);
    }

    fn pointer_released(&mut self) {
        if let Some((x, y)) = self.input.take_click() {
            let (width, height) = self.viewport();
            let ray = self.camera.screen_ray(x, y, width, height);
            self.scene.pointer_click(&ray);
        }
    }

    fn frame_stats(&self, time: f32) -> FrameStats {
        let (width, height) = self.viewport();
        FrameStats {
            fps: self.fps.fps(),
            time,
            resolution: (width as u32, height as u32),
            objects: self.scene.len(),
            triangles: self.scene.objects().iter().map(|o| o.mesh().triangle_count()).sum(),
            camera_eye: self.camera.eye().to_array(),
            camera_yaw: self.camera.yaw,
            camera_pitch: self.camera.pitch,
            hovered: self
                .scene
                .hovered()
                .iter()
                .filter_map(|id| self.scene.get(*id))
                .map(|o| o.name.clone())
                .collect(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.frames.next() else {
            return;
        };

        if let Some(fps) = self.fps.tick(frame.delta) {
            if !self.cli.no_ui {
                log::info!("{:.0} FPS", fps);
            }
        }

        let (_, height) = self.viewport();
        self.camera.update(&self.input, height);
        self.input.reset_deltas();

        self.scene.tick(&frame, &self.tunables);

        let stats = self.frame_stats(frame.time);
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        match renderer.render(window, &self.scene, &self.camera, &mut self.tunables, &stats, self.preset) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {}", e),
        }

        if let Some(next) = renderer.take_requested_preset() {
            self.switch_preset(next);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(format!("Shape Scene - {}", self.preset))
                    .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(SceneRenderer::new(window.clone(), !self.cli.no_ui)) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Failed to initialize renderer: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            let size = renderer.size();
            self.camera.resize(size.width, size.height);
            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                self.input.process_consumed_event(&event);
                return;
            }
        }

        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
                self.camera.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => self.pointer_moved(position),
            WindowEvent::CursorLeft { .. } => self.scene.pointer_leave(),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => self.pointer_released(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Loading scene: {}", cli.scene);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli)?;

    log::info!("Controls: left drag orbits, right drag pans, click the sphere, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
