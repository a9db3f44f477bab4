use std::{ffi::CString, num::NonZeroU32, time::Instant};

use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext},
    display::{GetGlDisplay, GlDisplay},
    prelude::GlSurface,
    surface::{Surface as GlutinSurface, SurfaceAttributesBuilder, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use skia_safe::gpu::gl::FramebufferInfo;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowAttributes},
};

use crate::config::AppConfig;
use crate::renderer::Renderer;
use crate::scene::GreetingScene;

/// Frames longer than this advance the scene as if only this much time
/// passed, so a stall does not snap the animations.
const MAX_FRAME_DT: f32 = 0.25;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to initialize renderer: {0}")]
    Init(String),
}

struct Env {
    gl_surface: GlutinSurface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

struct App {
    env: Option<Env>,
    renderer: Option<Renderer>,
    scene: GreetingScene,
    config: AppConfig,
    cursor_pos: (f32, f32),
    scale_factor: f64,
    last_frame: Option<Instant>,
    init_error: Option<String>,
}

impl App {
    fn viewport(&self) -> (f32, f32) {
        match self.env.as_ref() {
            Some(env) => {
                let logical: LogicalSize<f64> = env.window.inner_size().to_logical(self.scale_factor);
                (logical.width as f32, logical.height as f32)
            }
            None => (0.0, 0.0),
        }
    }

    fn handle_resize(&mut self, physical_size: winit::dpi::PhysicalSize<u32>) {
        let (w, h): (u32, u32) = physical_size.into();
        if let (Some(env), Some(renderer)) = (self.env.as_mut(), self.renderer.as_mut()) {
            env.gl_surface.resize(
                &env.gl_context,
                NonZeroU32::new(w.max(1)).unwrap(),
                NonZeroU32::new(h.max(1)).unwrap(),
            );

            renderer.resize((w.max(1), h.max(1)));
            env.window.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = match self.last_frame.replace(now) {
            Some(prev) => (now - prev).as_secs_f32().min(MAX_FRAME_DT),
            None => 0.0,
        };

        let viewport = self.viewport();
        self.scene.advance(dt);
        let frame = self.scene.frame(viewport);

        if let (Some(env), Some(renderer)) = (self.env.as_mut(), self.renderer.as_mut()) {
            renderer.set_scale_factor(self.scale_factor as f32);
            renderer.redraw(&frame);
            env.gl_surface
                .swap_buffers(&env.gl_context)
                .expect("swap_buffers failed");
            // The scene is never at rest (ambient loops), so keep frames coming.
            env.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.env.is_none() {
            match create_env_renderer(event_loop, &self.config) {
                Ok((env, renderer)) => {
                    self.scale_factor = env.window.scale_factor();
                    tracing::info!(
                        width = self.config.width,
                        height = self.config.height,
                        "window ready"
                    );
                    self.env = Some(env);
                    self.renderer = Some(renderer);
                }
                Err(err) => {
                    self.init_error = Some(err);
                    event_loop.exit();
                    return;
                }
            }
        }
        if let Some(env) = self.env.as_ref() {
            env.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(physical_size) => self.handle_resize(physical_size),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                if let Some(env) = self.env.as_ref() {
                    let size = env.window.inner_size();
                    self.handle_resize(size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical: LogicalPosition<f64> = position.to_logical(self.scale_factor);
                self.cursor_pos = (logical.x as f32, logical.y as f32);
                let viewport = self.viewport();
                self.scene.pointer_moved(self.cursor_pos, viewport);
            }

            WindowEvent::CursorLeft { .. } => self.scene.pointer_left(),

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let viewport = self.viewport();
                match state {
                    ElementState::Pressed => self.scene.press(self.cursor_pos, viewport),
                    ElementState::Released => {
                        if let Some(interaction) = self.scene.release(self.cursor_pos, viewport) {
                            tracing::debug!(state = ?interaction, "greeting toggled");
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }
}

fn create_env_renderer(
    event_loop: &winit::event_loop::ActiveEventLoop,
    config: &AppConfig,
) -> Result<(Env, Renderer), String> {
    let window_attributes = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height));

    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_transparency(true);

    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|accum, cfg| {
                    if cfg.num_samples() < accum.num_samples() {
                        cfg
                    } else {
                        accum
                    }
                })
                .unwrap()
        })
        .map_err(|err| format!("failed to build display: {err}"))?;

    let window = window.ok_or_else(|| "could not create window".to_string())?;
    let window_handle = window
        .window_handle()
        .map_err(|err| format!("failed to get window handle: {err}"))?;
    let raw_window_handle = window_handle.as_raw();

    let context_attributes = ContextAttributesBuilder::new().build(Some(raw_window_handle));
    let fallback_context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(None))
        .build(Some(raw_window_handle));

    let not_current_gl_context = unsafe {
        gl_config
            .display()
            .create_context(&gl_config, &context_attributes)
            .unwrap_or_else(|_| {
                gl_config
                    .display()
                    .create_context(&gl_config, &fallback_context_attributes)
                    .expect("failed to create GL/GLES context")
            })
    };

    let (width, height): (u32, u32) = window.inner_size().into();
    let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        NonZeroU32::new(width.max(1)).unwrap(),
        NonZeroU32::new(height.max(1)).unwrap(),
    );

    let gl_surface = unsafe {
        gl_config
            .display()
            .create_window_surface(&gl_config, &attrs)
            .map_err(|err| format!("could not create GL window surface: {err}"))?
    };

    let gl_context = not_current_gl_context
        .make_current(&gl_surface)
        .map_err(|err| format!("could not make GL context current: {err}"))?;

    gl::load_with(|s| {
        gl_config
            .display()
            .get_proc_address(CString::new(s).unwrap().as_c_str())
    });

    let interface = skia_safe::gpu::gl::Interface::new_load_with(|name| {
        if name == "eglGetCurrentDisplay" {
            return std::ptr::null();
        }
        gl_config
            .display()
            .get_proc_address(CString::new(name).unwrap().as_c_str())
    })
    .ok_or_else(|| "could not create Skia GL interface".to_string())?;

    let gr_context = skia_safe::gpu::direct_contexts::make_gl(interface, None)
        .ok_or_else(|| "make_gl failed: could not create Skia direct context".to_string())?;

    let fb_info = {
        let mut fboid: i32 = 0;
        unsafe { gl::GetIntegerv(gl::FRAMEBUFFER_BINDING, &mut fboid) };

        FramebufferInfo {
            fboid: fboid as u32,
            format: skia_safe::gpu::gl::Format::RGBA8.into(),
            ..Default::default()
        }
    };

    let num_samples = gl_config.num_samples() as usize;
    let stencil_size = gl_config.stencil_size() as usize;

    let renderer = Renderer::new(
        (width, height),
        fb_info,
        gr_context,
        num_samples,
        stencil_size,
    );

    // Drop order matters: the window must outlive the Skia DirectContext.
    let env = Env {
        gl_surface,
        gl_context,
        window,
    };

    Ok((env, renderer))
}

pub fn run(config: AppConfig) -> Result<(), BackendError> {
    let event_loop = EventLoop::new()?;

    let mut app = App {
        env: None,
        renderer: None,
        scene: GreetingScene::new(),
        config,
        cursor_pos: (0.0, 0.0),
        scale_factor: 1.0,
        last_frame: None,
        init_error: None,
    };
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.init_error.take() {
        return Err(BackendError::Init(err));
    }
    Ok(())
}
