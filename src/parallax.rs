use crate::spring::{Spring, SpringConfig};

/// Normalized pointer offset spans [-OFFSET_RANGE, OFFSET_RANGE] per axis.
pub const OFFSET_RANGE: f32 = 20.0;

/// The card never tilts past this many degrees on either axis.
pub const MAX_TILT_DEG: f32 = 5.0;

/// Perspective distance for the projected tilt, in logical units.
pub const PERSPECTIVE: f32 = 1000.0;

/// Tilt of the card, in degrees, after smoothing and range mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
}

/// Raw pointer position → clamped target offset in [-20, 20] per axis.
///
/// A zero-sized viewport (window not yet measured) yields a zero offset, so
/// the card simply sits flat.
pub fn target_offset(pointer: (f32, f32), viewport: (f32, f32)) -> (f32, f32) {
    let (vw, vh) = viewport;
    if vw <= 0.0 || vh <= 0.0 {
        return (0.0, 0.0);
    }

    let scale = OFFSET_RANGE * 2.0;
    let x = ((pointer.0 / vw - 0.5) * scale).clamp(-OFFSET_RANGE, OFFSET_RANGE);
    let y = ((pointer.1 / vh - 0.5) * scale).clamp(-OFFSET_RANGE, OFFSET_RANGE);
    (x, y)
}

/// Linear map of `value` from `domain` to `range`, clamping `value` into
/// the domain first so the output never extrapolates.
pub fn map_range(value: f32, domain: (f32, f32), range: (f32, f32)) -> f32 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    let clamped = value.clamp(d0.min(d1), d0.max(d1));
    let t = (clamped - d0) / (d1 - d0);
    r0 + (r1 - r0) * t
}

/// The pointer-to-tilt pipeline: two independent springs track the clamped
/// target offset, and the smoothed offsets map to bounded rotation angles.
#[derive(Clone, Copy, Debug)]
pub struct Parallax {
    x: Spring,
    y: Spring,
}

impl Parallax {
    pub fn new() -> Self {
        Self {
            x: Spring::new(SpringConfig::PARALLAX, 0.0),
            y: Spring::new(SpringConfig::PARALLAX, 0.0),
        }
    }

    pub fn pointer_moved(&mut self, pointer: (f32, f32), viewport: (f32, f32)) {
        let (tx, ty) = target_offset(pointer, viewport);
        self.x.set_target(tx);
        self.y.set_target(ty);
    }

    /// Ease back to neutral, e.g. when the pointer leaves the window.
    pub fn release(&mut self) {
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    pub fn step(&mut self, dt: f32) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn settled(&self) -> bool {
        self.x.settled() && self.y.settled()
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    /// Smoothed offsets mapped to rotation angles: higher pointer y tilts
    /// the top away (rotate-x 5° → −5°), pointer x tilts directly
    /// (rotate-y −5° → 5°). Both axes are clamped to ±`MAX_TILT_DEG`.
    pub fn tilt(&self) -> Tilt {
        let span = (-OFFSET_RANGE, OFFSET_RANGE);
        let rotate_x = map_range(self.y.value(), span, (MAX_TILT_DEG, -MAX_TILT_DEG));
        let rotate_y = map_range(self.x.value(), span, (-MAX_TILT_DEG, MAX_TILT_DEG));
        Tilt {
            rotate_x_deg: rotate_x.clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
            rotate_y_deg: rotate_y.clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
        }
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new()
    }
}
