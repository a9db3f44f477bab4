use skia_safe::{
    BlurStyle, Color, ColorType, Font, FontMgr, FontStyle, MaskFilter, Matrix, Paint, PaintStyle,
    Point, RRect, Rect, Shader, Surface, TileMode,
    gpu::{self, SurfaceOrigin, backend_render_targets, gl::FramebufferInfo},
};

use crate::icons::{self, Glyph};
use crate::parallax::PERSPECTIVE;
use crate::scene::{AmbientSample, CaptionState, FrameState, BODY, BYLINE, TITLE};
use crate::transform;

const BACKDROP_TOP: Color = Color::new(0xff581c87);
const BACKDROP_BOTTOM: Color = Color::new(0xff831843);
const INK: Color = Color::new(0xff581c87);
const AMBER: Color = Color::new(0xffeab308);

fn create_skia_surface(
    dimensions: (i32, i32),
    fb_info: FramebufferInfo,
    gr_context: &mut skia_safe::gpu::DirectContext,
    num_samples: usize,
    stencil_size: usize,
) -> Surface {
    let backend_render_target =
        backend_render_targets::make_gl(dimensions, num_samples, stencil_size, fb_info);

    gpu::surfaces::wrap_backend_render_target(
        gr_context,
        &backend_render_target,
        SurfaceOrigin::BottomLeft,
        ColorType::RGBA8888,
        None,
        None,
    )
    .expect("Could not create Skia surface")
}

#[derive(Clone, Copy)]
enum SurfaceSource {
    Gl {
        fb_info: FramebufferInfo,
        num_samples: usize,
        stencil_size: usize,
    },
    Raster,
}

struct Fonts {
    title: Font,
    byline: Font,
    body: Font,
    body_small: Font,
    button: Font,
    caption: Font,
}

fn pick_typeface(fm: &FontMgr, families: &[&str], style: FontStyle) -> Option<skia_safe::Typeface> {
    families
        .iter()
        .find_map(|family| fm.match_family_style(*family, style))
}

/// None when the host has no usable fonts at all; the scene then renders
/// without text instead of failing.
fn load_fonts() -> Option<Fonts> {
    let fm = FontMgr::new();
    let sans = pick_typeface(&fm, &["DejaVu Sans", "Sans"], FontStyle::normal())?;
    let serif = pick_typeface(&fm, &["DejaVu Serif", "Serif"], FontStyle::bold())
        .unwrap_or_else(|| sans.clone());
    let sans_bold = pick_typeface(&fm, &["DejaVu Sans", "Sans"], FontStyle::bold())
        .unwrap_or_else(|| sans.clone());
    let sans_italic = pick_typeface(&fm, &["DejaVu Sans", "Sans"], FontStyle::italic())
        .unwrap_or_else(|| sans.clone());

    Some(Fonts {
        title: Font::new(serif, 76.0),
        byline: Font::new(sans_bold.clone(), 13.0),
        body: Font::new(sans.clone(), 22.0),
        body_small: Font::new(sans, 19.0),
        button: Font::new(sans_bold, 19.0),
        caption: Font::new(sans_italic, 14.0),
    })
}

pub struct Renderer {
    surface: Surface,
    gr_context: Option<skia_safe::gpu::DirectContext>,
    source: SurfaceSource,
    scale_factor: f32,
    fonts: Option<Fonts>,
}

impl Renderer {
    pub fn new(
        dimensions: (u32, u32),
        fb_info: FramebufferInfo,
        gr_context: skia_safe::gpu::DirectContext,
        num_samples: usize,
        stencil_size: usize,
    ) -> Self {
        let mut gr_context = gr_context;
        let surface = create_skia_surface(
            (dimensions.0 as i32, dimensions.1 as i32),
            fb_info,
            &mut gr_context,
            num_samples,
            stencil_size,
        );

        let fonts = load_fonts();
        if fonts.is_none() {
            tracing::warn!("no system fonts found; text will not render");
        }

        Self {
            surface,
            gr_context: Some(gr_context),
            source: SurfaceSource::Gl {
                fb_info,
                num_samples,
                stencil_size,
            },
            scale_factor: 1.0,
            fonts,
        }
    }

    pub fn from_surface(
        surface: Surface,
        gr_context: Option<skia_safe::gpu::DirectContext>,
    ) -> Self {
        Self {
            surface,
            gr_context,
            source: SurfaceSource::Raster,
            scale_factor: 1.0,
            fonts: load_fonts(),
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor.max(0.1);
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn resize(&mut self, dimensions: (u32, u32)) {
        if let SurfaceSource::Gl {
            fb_info,
            num_samples,
            stencil_size,
        } = self.source
            && let Some(context) = self.gr_context.as_mut()
        {
            self.surface = create_skia_surface(
                (dimensions.0 as i32, dimensions.1 as i32),
                fb_info,
                context,
                num_samples,
                stencil_size,
            );
        }
    }

    pub fn redraw(&mut self, frame: &FrameState) {
        let canvas = self.surface.canvas();
        canvas.clear(BACKDROP_TOP);

        canvas.save();
        if (self.scale_factor - 1.0).abs() > f32::EPSILON {
            canvas.scale((self.scale_factor, self.scale_factor));
        }

        draw_backdrop(canvas, frame.viewport);
        for sample in &frame.ambient {
            draw_ambient(canvas, sample);
        }
        draw_card(canvas, self.fonts.as_ref(), frame);

        canvas.restore();

        if let Some(gr) = self.gr_context.as_mut() {
            gr.flush_and_submit();
        }
    }
}

fn with_alpha(color: Color, opacity: f32) -> Color {
    let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)) as u8;
    Color::from_argb(alpha, color.r(), color.g(), color.b())
}

fn fill_paint(color: Color) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(color);
    paint
}

fn draw_centered(
    canvas: &skia_safe::Canvas,
    text: &str,
    center_x: f32,
    baseline: f32,
    font: &Font,
    paint: &Paint,
) {
    let (width, _) = font.measure_str(text, Some(paint));
    canvas.draw_str(text, (center_x - width / 2.0, baseline), font, paint);
}

fn draw_backdrop(canvas: &skia_safe::Canvas, viewport: (f32, f32)) {
    let mut paint = Paint::default();
    paint.set_shader(Shader::linear_gradient(
        (
            Point::new(0.0, 0.0),
            Point::new(viewport.0, viewport.1),
        ),
        [BACKDROP_TOP, BACKDROP_BOTTOM].as_slice(),
        None,
        TileMode::Clamp,
        None,
        None,
    ));
    canvas.draw_rect(Rect::from_xywh(0.0, 0.0, viewport.0, viewport.1), &paint);
}

fn draw_ambient(canvas: &skia_safe::Canvas, sample: &AmbientSample) {
    let [a, r, g, b] = sample.color;
    let mut paint = fill_paint(Color::from_argb(a, r, g, b));
    paint.set_mask_filter(MaskFilter::blur(
        BlurStyle::Normal,
        sample.radius / 4.0,
        None,
    ));
    canvas.draw_circle(
        Point::new(sample.center.0, sample.center.1),
        sample.radius,
        &paint,
    );
}

fn draw_card(canvas: &skia_safe::Canvas, fonts: Option<&Fonts>, frame: &FrameState) {
    let card = frame.layout.card;
    let matrix = transform::tilt_matrix(frame.tilt, PERSPECTIVE, card.center());

    canvas.save();
    canvas.concat(&Matrix::new_all(
        matrix[0], matrix[1], matrix[2], matrix[3], matrix[4], matrix[5], matrix[6], matrix[7],
        matrix[8],
    ));

    let card_rect = Rect::from_xywh(card.x, card.y, card.w, card.h);
    let panel = RRect::new_rect_xy(card_rect, 24.0, 24.0);

    // Drop shadow, then the glass panel and its hairline border.
    let mut shadow = fill_paint(Color::from_argb(90, 0, 0, 0));
    shadow.set_mask_filter(MaskFilter::blur(BlurStyle::Normal, 28.0, None));
    canvas.draw_rrect(
        RRect::new_rect_xy(card_rect.with_offset((0.0, 18.0)), 24.0, 24.0),
        &shadow,
    );

    canvas.draw_rrect(panel, &fill_paint(Color::from_argb(20, 255, 255, 255)));
    let mut border = fill_paint(Color::from_argb(36, 255, 255, 255));
    border.set_style(PaintStyle::Stroke);
    border.set_stroke_width(1.5);
    canvas.draw_rrect(panel, &border);

    let center_x = card.x + card.w / 2.0;

    if let Some(fonts) = fonts {
        draw_heading(canvas, fonts, frame, center_x);
        draw_body(canvas, fonts, frame, center_x);
    }
    draw_button(canvas, fonts, frame);
    if let (Some(fonts), Some(caption)) = (fonts, &frame.caption) {
        draw_caption(canvas, fonts, frame, caption, center_x);
    }

    canvas.restore();
}

fn draw_heading(canvas: &skia_safe::Canvas, fonts: &Fonts, frame: &FrameState, center_x: f32) {
    let opacity = frame.heading_opacity;
    if opacity <= 0.0 {
        return;
    }

    canvas.save();
    canvas.translate((0.0, frame.heading_rise));

    let title_paint = fill_paint(with_alpha(Color::WHITE, opacity));
    draw_centered(
        canvas,
        TITLE,
        center_x,
        frame.layout.title_baseline,
        &fonts.title,
        &title_paint,
    );

    let byline_paint = fill_paint(with_alpha(Color::WHITE, 0.9 * opacity));
    let byline_y = frame.layout.byline_baseline;
    draw_centered(canvas, BYLINE, center_x, byline_y, &fonts.byline, &byline_paint);

    // Hairlines flanking the byline.
    let (byline_w, _) = fonts.byline.measure_str(BYLINE, Some(&byline_paint));
    let rule = fill_paint(with_alpha(Color::WHITE, 0.6 * opacity));
    let gap = byline_w / 2.0 + 16.0;
    canvas.draw_rect(
        Rect::from_xywh(center_x - gap - 48.0, byline_y - 5.0, 48.0, 1.0),
        &rule,
    );
    canvas.draw_rect(Rect::from_xywh(center_x + gap, byline_y - 5.0, 48.0, 1.0), &rule);

    canvas.restore();
}

fn draw_body(canvas: &skia_safe::Canvas, fonts: &Fonts, frame: &FrameState, center_x: f32) {
    let opacity = frame.body_opacity;
    if opacity <= 0.0 {
        return;
    }

    let first = fill_paint(with_alpha(Color::WHITE, 0.9 * opacity));
    draw_centered(
        canvas,
        BODY[0],
        center_x,
        frame.layout.body_baselines[0],
        &fonts.body,
        &first,
    );

    let second = fill_paint(with_alpha(Color::WHITE, 0.8 * opacity));
    draw_centered(
        canvas,
        BODY[1],
        center_x,
        frame.layout.body_baselines[1],
        &fonts.body_small,
        &second,
    );
}

fn draw_button(canvas: &skia_safe::Canvas, fonts: Option<&Fonts>, frame: &FrameState) {
    let button = frame.layout.button;
    let (bx, by) = button.center();

    canvas.save();
    // Hover/press feedback scales the pill around its own centre.
    canvas.translate((bx, by));
    canvas.scale((frame.button_scale, frame.button_scale));
    canvas.translate((-bx, -by));

    let pill = RRect::new_rect_xy(
        Rect::from_xywh(button.x, button.y, button.w, button.h),
        button.h / 2.0,
        button.h / 2.0,
    );
    let mut shadow = fill_paint(Color::from_argb(70, 0, 0, 0));
    shadow.set_mask_filter(MaskFilter::blur(BlurStyle::Normal, 10.0, None));
    canvas.draw_rrect(
        RRect::new_rect_xy(
            Rect::from_xywh(button.x, button.y + 6.0, button.w, button.h),
            button.h / 2.0,
            button.h / 2.0,
        ),
        &shadow,
    );
    canvas.draw_rrect(pill, &fill_paint(Color::WHITE));

    let label_paint = fill_paint(INK);
    let glyph_size = 20.0;
    let gap = 10.0;
    let label_w = fonts
        .map(|fonts| fonts.button.measure_str(frame.label, Some(&label_paint)).0)
        .unwrap_or(0.0);
    let content_w = glyph_size + if label_w > 0.0 { gap + label_w } else { 0.0 };
    let content_x = bx - content_w / 2.0;

    draw_glyph(
        canvas,
        frame.glyph,
        (content_x, by - glyph_size / 2.0),
        glyph_size,
        frame.hand_lean_deg,
    );
    if let Some(fonts) = fonts {
        canvas.draw_str(
            frame.label,
            (content_x + glyph_size + gap, by + 7.0),
            &fonts.button,
            &label_paint,
        );
    }

    canvas.restore();
}

fn draw_glyph(
    canvas: &skia_safe::Canvas,
    glyph: Glyph,
    origin: (f32, f32),
    size: f32,
    lean_deg: f32,
) {
    let color = match glyph {
        Glyph::Hand => INK,
        Glyph::Sparkles => AMBER,
    };

    canvas.save();
    canvas.translate(origin);
    canvas.scale((size / icons::GLYPH_BOX, size / icons::GLYPH_BOX));
    if glyph == Glyph::Hand && lean_deg.abs() > 0.01 {
        canvas.rotate(
            lean_deg,
            Some(Point::new(icons::GLYPH_BOX / 2.0, icons::GLYPH_BOX / 2.0)),
        );
    }
    canvas.draw_path(&icons::glyph_path(glyph), &fill_paint(color));
    canvas.restore();
}

fn draw_caption(
    canvas: &skia_safe::Canvas,
    fonts: &Fonts,
    frame: &FrameState,
    caption: &CaptionState,
    center_x: f32,
) {
    if caption.opacity <= 0.0 {
        return;
    }
    let paint = fill_paint(with_alpha(Color::WHITE, 0.8 * caption.opacity));
    draw_centered(
        canvas,
        caption.text,
        center_x,
        frame.layout.caption_baseline + caption.rise,
        &fonts.caption,
        &paint,
    );
}
