use anyhow::{Context, Result};
use egui_wgpu::winit::Painter;
use egui_wgpu::{RendererOptions, WgpuConfiguration, WgpuSetup, WgpuSetupCreateNew};
use egui_winit::State as EguiWinitState;
use panespace_interact::{CursorCommand, InputFrame, InteractionContext, TickOutcome, draw_frame};
use panespace_scene::{Point2, Rect, Vec2};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window};

use super::keymap::{key_name, sample};
use super::renderer::EguiSceneRenderer;
use super::textures::EguiTextures;
use crate::capture::CaptureBackend;
use crate::config::AppConfig;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(245, 245, 245);

pub fn run_gui(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = event_loop
        .create_window(
            Window::default_attributes()
                .with_title("panespace")
                .with_inner_size(LogicalSize::new(800.0, 600.0)),
        )
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = Arc::new(window);

    let egui_ctx = egui::Context::default();
    let mut painter = create_painter(egui_ctx.clone())?;
    pollster::block_on(painter.set_window(egui::ViewportId::ROOT, Some(window.clone())))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    let mut egui_state = EguiWinitState::new(
        egui_ctx.clone(),
        egui::ViewportId::ROOT,
        &event_loop,
        Some(window.scale_factor() as f32),
        window.theme(),
        painter.max_texture_side(),
    );

    let mut app = PanespaceApp::new(&config, egui_ctx.clone())?;

    let clear_color = [
        BACKGROUND.r() as f32 / 255.0,
        BACKGROUND.g() as f32 / 255.0,
        BACKGROUND.b() as f32 / 255.0,
        1.0,
    ];

    #[allow(deprecated)]
    event_loop
        .run(move |event, event_loop| {
            event_loop.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    if matches!(event, WindowEvent::CloseRequested) {
                        event_loop.exit();
                        return;
                    }

                    let response = egui_state.on_window_event(&window, &event);
                    if response.repaint {
                        window.request_redraw();
                    }

                    match event {
                        WindowEvent::Resized(size) => {
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            let size = window.inner_size();
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let raw_input = egui_state.take_egui_input(&window);
                            let mut outcome = TickOutcome::default();
                            let full_output = egui_ctx.run(raw_input, |ctx| {
                                outcome = app.ui(ctx);
                            });

                            egui_state.handle_platform_output(&window, full_output.platform_output);

                            let clipped_primitives = egui_ctx
                                .tessellate(full_output.shapes, full_output.pixels_per_point);
                            let _ = painter.paint_and_update_textures(
                                egui::ViewportId::ROOT,
                                full_output.pixels_per_point,
                                clear_color,
                                &clipped_primitives,
                                &full_output.textures_delta,
                                Vec::new(),
                            );

                            if outcome.quit {
                                info!("quit requested");
                                event_loop.exit();
                                return;
                            }
                            apply_cursor(&window, &outcome, app.viewport_origin);
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(())
}

fn create_painter(ctx: egui::Context) -> Result<Painter> {
    let mut configuration = WgpuConfiguration::default();
    let power_preference = match std::env::var("PANESPACE_POWER_PREF") {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "high" | "high_performance" | "high-performance" => {
                wgpu::PowerPreference::HighPerformance
            }
            "default" => wgpu::PowerPreference::default(),
            _ => wgpu::PowerPreference::LowPower,
        },
        Err(_) => wgpu::PowerPreference::LowPower,
    };
    configuration.wgpu_setup = WgpuSetup::CreateNew(WgpuSetupCreateNew {
        power_preference,
        device_descriptor: Arc::new(|adapter| {
            let required_limits =
                wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
            wgpu::DeviceDescriptor {
                label: Some("panespace-view"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::default(),
            }
        }),
        ..Default::default()
    });

    let painter = pollster::block_on(Painter::new(
        ctx,
        configuration,
        false,
        RendererOptions::default(),
    ));
    Ok(painter)
}

fn apply_cursor(window: &Window, outcome: &TickOutcome, origin: egui::Vec2) {
    match outcome.cursor {
        Some(CursorCommand::Grab) => {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(err) = grabbed {
                warn!(error = %err, "cursor grab unavailable");
            }
            window.set_cursor_visible(false);
        }
        Some(CursorCommand::Release) => {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                debug!(error = %err, "cursor release failed");
            }
            window.set_cursor_visible(true);
        }
        None => {}
    }
    if let Some(pos) = outcome.warp_to {
        let target = LogicalPosition::new((pos.x + origin.x) as f64, (pos.y + origin.y) as f64);
        if let Err(err) = window.set_cursor_position(target) {
            debug!(error = %err, "cursor warp failed");
        }
    }
}

struct PanespaceApp {
    scene: InteractionContext,
    capture: CaptureBackend,
    textures: EguiTextures,
    last_frame: Instant,
    viewport_origin: egui::Vec2,
}

impl PanespaceApp {
    fn new(config: &AppConfig, egui_ctx: egui::Context) -> Result<Self> {
        let mut capture = CaptureBackend::open(config).context("cannot reach the display")?;
        let mut textures = EguiTextures::new(egui_ctx);
        let scene = InteractionContext::setup(
            config.camera(),
            &config.placements(),
            config.interaction,
            &mut capture,
            &mut textures,
        )
        .context("failed to create window proxies")?;
        Ok(Self {
            scene,
            capture,
            textures,
            last_frame: Instant::now(),
            viewport_origin: egui::Vec2::ZERO,
        })
    }

    fn ui(&mut self, ctx: &egui::Context) -> TickOutcome {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.viewport_origin = rect.min.to_vec2();
                let input = self.sample_input(ctx, rect);
                let outcome = self.scene.update(&input, &mut self.capture, &mut self.textures);

                let painter = ui.painter_at(rect);
                let mut renderer = EguiSceneRenderer::new(
                    &painter,
                    &self.textures,
                    *self.scene.camera(),
                    input.viewport,
                    self.viewport_origin,
                );
                draw_frame(&self.scene, &mut renderer, key_name);
                renderer.finish();
                outcome
            })
            .inner
    }

    fn sample_input(&mut self, ctx: &egui::Context, rect: egui::Rect) -> InputFrame {
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        if !dt.is_finite() || dt <= 0.0 {
            dt = 0.016;
        }
        dt = dt.clamp(0.0, 0.1);

        let viewport = Rect::from_min_size(
            Point2::new(0.0, 0.0),
            Vec2::new(rect.width(), rect.height()),
        );
        let cursor = ctx
            .input(|i| i.pointer.latest_pos())
            .map(|pos| Point2::new(pos.x - rect.min.x, pos.y - rect.min.y))
            .unwrap_or_else(|| viewport.center());
        let (pressed, down) = sample(ctx);

        InputFrame {
            viewport,
            cursor,
            dt,
            primary_clicked: ctx.input(|i| i.pointer.primary_clicked()),
            pressed,
            down,
        }
    }
}
