use std::fs;
use std::path::Path;

use skia_safe::{
    AlphaType, ColorType, EncodedImageFormat, ImageInfo, image::CachingHint, surfaces,
};
use thiserror::Error;

use crate::config::AppConfig;
use crate::renderer::Renderer;
use crate::scene::{self, FrameState, GreetingScene};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("could not create raster surface")]
    Surface,
    #[error("could not read back frame pixels")]
    ReadPixels,
    #[error("could not encode frame as PNG")]
    Encode,
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// A rendered frame, tightly packed RGB.
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Render one resolved frame into an offscreen raster surface and read the
/// pixels back.
pub fn render_frame(frame: &FrameState, size: (u32, u32)) -> Result<RasterFrame, RasterError> {
    let (renderer, dimensions) = draw_offscreen(frame, size)?;
    read_back(renderer, dimensions)
}

fn draw_offscreen(
    frame: &FrameState,
    size: (u32, u32),
) -> Result<(Renderer, (u32, u32)), RasterError> {
    let width = size.0.max(1);
    let height = size.1.max(1);

    let image_info = ImageInfo::new(
        (width as i32, height as i32),
        ColorType::BGRA8888,
        AlphaType::Premul,
        None,
    );
    let surface = surfaces::raster(&image_info, None, None).ok_or(RasterError::Surface)?;

    let mut renderer = Renderer::from_surface(surface, None);
    renderer.redraw(frame);
    Ok((renderer, (width, height)))
}

fn read_back(mut renderer: Renderer, size: (u32, u32)) -> Result<RasterFrame, RasterError> {
    let (width, height) = size;
    let image = renderer.surface_mut().image_snapshot();
    let image_info = ImageInfo::new(
        (width as i32, height as i32),
        ColorType::RGB888x,
        AlphaType::Opaque,
        None,
    );
    let row_bytes = image_info.min_row_bytes();
    let mut pixels = vec![0u8; row_bytes * height as usize];
    let ok = image.read_pixels(
        &image_info,
        pixels.as_mut_slice(),
        row_bytes,
        (0, 0),
        CachingHint::Disallow,
    );
    if !ok {
        return Err(RasterError::ReadPixels);
    }

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for chunk in pixels.chunks_exact(4) {
        rgb.push(chunk[0]);
        rgb.push(chunk[1]);
        rgb.push(chunk[2]);
    }

    Ok(RasterFrame {
        width,
        height,
        data: rgb,
    })
}

/// Build a scene at the requested clock, optionally in the thanked state,
/// and resolve its frame for an offscreen render.
pub fn staged_frame(config: &AppConfig) -> FrameState {
    let viewport = (config.width as f32, config.height as f32);
    let mut greeting = GreetingScene::new();

    if config.interacted {
        let button = scene::layout(viewport).button.center();
        greeting.press(button, viewport);
        greeting.release(button, viewport);
    }

    // Step through the live integrator rather than jumping the clock, so
    // springs and tweens land where a running window would put them.
    let step = 1.0 / 60.0;
    while greeting.clock() + step <= config.at {
        greeting.advance(step);
    }
    let remainder = config.at - greeting.clock();
    if remainder > 0.0 {
        greeting.advance(remainder);
    }

    greeting.frame(viewport)
}

/// Screenshot mode: render one frame and write it as a PNG.
pub fn screenshot(config: &AppConfig, path: &Path) -> Result<(), RasterError> {
    let frame = staged_frame(config);
    let (mut renderer, _) = draw_offscreen(&frame, (config.width, config.height))?;

    let image = renderer.surface_mut().image_snapshot();
    let data = image
        .encode(None, EncodedImageFormat::PNG, None)
        .ok_or(RasterError::Encode)?;
    fs::write(path, data.as_bytes()).map_err(|source| RasterError::Write {
        path: path.display().to_string(),
        source,
    })
}
