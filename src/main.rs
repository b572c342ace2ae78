//! Spikesphere - an audio-reactive spiky sphere
//!
//! A rotating sphere whose surface bristles with noise-driven spikes
//! that swell with the low end and sharpen with the highs.

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use spikesphere::audio::{AudioSystem, DecodedTrack, SpectrumSource};
use spikesphere::cli::Args;
use spikesphere::controls::{self, ControlAction};
use spikesphere::noise::SimplexNoise;
use spikesphere::params::*;
use spikesphere::rendering::{RenderSystem, Uniforms};
use spikesphere::scene::SceneContext;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    scene: SceneContext,
    audio: Option<AudioSystem>,

    // Configuration
    params: VisualParameters,
    render_config: RenderConfig,
    autoplay: bool,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let params = args.visual_parameters()?;
        let analyser_config = args.analyser_config()?;
        let render_config = RenderConfig::default();

        let noise = SimplexNoise::new(args.noise_config().seed);
        let scene = SceneContext::new(SphereGeometry::default(), noise, &render_config);

        // Audio is optional: without an output device the sphere stays at rest
        let audio = match AudioSystem::new(analyser_config) {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("Audio unavailable: {}", e);
                None
            }
        };

        let mut app = Self {
            window: None,
            render_system: None,
            scene,
            audio,
            params,
            render_config,
            autoplay: args.autoplay,
            start_time: Instant::now(),
        };

        if let Some(path) = &args.audio {
            app.load_track(path)
                .with_context(|| format!("loading {}", path.display()))?;
        }

        Ok(app)
    }

    /// Decode a WAV file and hand it to the audio system
    fn load_track(&mut self, path: &Path) -> spikesphere::Result<()> {
        let Some(audio) = self.audio.as_mut() else {
            warn!("Ignoring {}: no audio output", path.display());
            return Ok(());
        };

        let track = DecodedTrack::open(path)?;
        audio.load(track);
        if self.autoplay {
            audio.play();
        } else {
            info!("Loaded {} (press Space to play)", path.display());
        }
        Ok(())
    }

    fn handle_action(&mut self, action: ControlAction, event_loop: &ActiveEventLoop) {
        match action {
            ControlAction::Quit => event_loop.exit(),
            ControlAction::TogglePlayback => match self.audio.as_mut() {
                Some(audio) => {
                    audio.toggle();
                }
                None => warn!("No audio output"),
            },
            other => {
                controls::apply(other, &mut self.params);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Spikesphere - Audio-Reactive Sphere")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.scene.sphere.mesh,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.scene.camera.set_viewport(size.width, size.height);

        println!("\nSpikesphere is running!");
        println!("{}\n", controls::HELP);

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(action) = controls::action_for_key(key) {
                    // Held keys sweep knobs but must not flicker playback
                    if repeat && matches!(action, ControlAction::TogglePlayback) {
                        return;
                    }
                    self.handle_action(action, event_loop);
                }
            }
            WindowEvent::DroppedFile(path) => {
                if let Err(e) = self.load_track(&path) {
                    error!("{}", e);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.scene.camera.set_viewport(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        let time_s = self.start_time.elapsed().as_secs_f32();

        // Only a loaded track counts as a spectrum source
        let source = self
            .audio
            .as_mut()
            .filter(|audio| audio.has_track())
            .map(|audio| audio as &mut dyn SpectrumSource);

        // Update sphere (rotation, then deform/reset)
        self.scene.tick(time_s, &self.params, source);

        // Upload vertices only when the mesh changed
        if self.scene.sphere.mesh.take_dirty() {
            render_system.update_vertices(&self.scene.sphere.mesh.vertices);
        }

        let uniforms = Uniforms::new(
            self.scene.model_matrix(),
            self.scene.camera.view_proj(),
            self.scene.camera.position(),
            self.params.sphere_color,
            &self.render_config,
        );
        render_system.update_uniforms(&uniforms);

        // Render
        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                render_system.reconfigure();
            }
            Err(e) => error!("Render error: {:?}", e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Spikesphere - Audio-reactive spiky sphere");
    println!("Initializing systems...\n");

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
