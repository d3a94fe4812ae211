//! Dynamic Dodger entry point
//!
//! Opens the window, runs the fixed-step game loop and persists the high
//! score on exit.

use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, anyhow};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use dynamic_dodger::assets::Sprites;
use dynamic_dodger::consts::*;
use dynamic_dodger::platform::{InputState, map_key};
use dynamic_dodger::renderer::{FontAtlas, RenderState, build_frame};
use dynamic_dodger::sim::{GameEvent, GameState, tick};
use dynamic_dodger::{HighScoreFile, Settings};

const WINDOW_TITLE: &str = "Dynamic Dodger";

/// Window plus everything that draws into it
struct Graphics {
    window: Arc<Window>,
    render_state: RenderState,
}

struct App {
    settings: Settings,
    sprites: Sprites,
    font: FontAtlas,
    state: GameState,
    input: InputState,
    graphics: Option<Graphics>,
    accumulator: f32,
    last_frame: Option<Instant>,
    /// Error that stopped the event loop
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, sprites: Sprites, font: FontAtlas, state: GameState) -> Self {
        Self {
            settings,
            sprites,
            font,
            state,
            input: InputState::new(),
            graphics: None,
            accumulator: 0.0,
            last_frame: None,
            fatal: None,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Graphics> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            &self.sprites,
            &self.font,
            self.settings.present_mode(),
        ))?;

        Ok(Graphics {
            window,
            render_state,
        })
    }

    /// Run simulation ticks for the time since the last frame
    fn update(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32())
            .min(MAX_FRAME_TIME);
        self.last_frame = Some(now);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::RunStarted => log::info!("Run started"),
                GameEvent::PowerUpCollected { score } => log::debug!("Power-up collected, score {}", score),
                GameEvent::PlayerHit { score } => log::info!("Game over with score {}", score),
                GameEvent::NewHighScore { score } => log::info!("New high score: {}", score),
            }
        }
    }

    /// Render the current frame
    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        let frame = build_frame(&self.state, &self.font);
        match graphics.render_state.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                graphics.render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                self.fatal = Some(anyhow!("GPU out of memory"));
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                log::info!("Window created: {}x{}", SCREEN_WIDTH, SCREEN_HEIGHT);
                self.graphics = Some(graphics);
            }
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(graphics) = self.graphics.as_mut() {
                    graphics.render_state.resize(size.width, size.height);
                }
            }

            WindowEvent::Focused(false) => self.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        let pressed = event.state == ElementState::Pressed;
                        self.input.key_event(key, pressed, event.repeat);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render(event_loop);
            }

            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dynamic Dodger starting...");

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let sprites = Sprites::load(&settings).context("failed to load sprites")?;
    let font = FontAtlas::new().context("failed to load font")?;
    let high_scores = HighScoreFile::new(settings.high_score_file.clone());
    let high_score = high_scores.load().context("failed to load high score")?;
    log::info!("High score: {}", high_score);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    log::info!("Game initialized with seed: {}", seed);
    let mut state = GameState::new(seed, high_score);
    state.particles_enabled = settings.particles;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, sprites, font, state);
    let run_result = event_loop.run_app(&mut app);

    high_scores
        .save(app.state.high_score)
        .context("failed to save high score")?;

    run_result.context("event loop failed")?;
    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
