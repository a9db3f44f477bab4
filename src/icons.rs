use skia_safe::{Path, PathBuilder, Point};

/// The two button glyphs. Paths live in a 24×24 box; the renderer scales
/// and positions them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Hand,
    Sparkles,
}

pub const GLYPH_BOX: f32 = 24.0;

pub fn glyph_path(glyph: Glyph) -> Path {
    match glyph {
        Glyph::Hand => hand_path(),
        Glyph::Sparkles => sparkles_path(),
    }
}

/// Stylized waving hand: a comb of four rounded fingers over a rounded palm.
fn hand_path() -> Path {
    // (left edge, fingertip y) per finger; all fingers share one width.
    const FINGERS: [(f32, f32); 4] = [(6.8, 5.0), (9.6, 3.6), (12.4, 4.2), (15.2, 6.4)];
    const FINGER_W: f32 = 2.4;
    const PALM_TOP: f32 = 11.0;
    const PALM_BOTTOM: f32 = 20.0;

    let mut path = PathBuilder::new();
    path.move_to(Point::new(FINGERS[0].0, PALM_BOTTOM));
    path.line_to(Point::new(FINGERS[0].0, PALM_TOP));

    for (x, top) in FINGERS {
        let mid = x + FINGER_W / 2.0;
        let right = x + FINGER_W;
        path.line_to(Point::new(x, top + 1.4));
        path.quad_to(Point::new(x, top), Point::new(mid, top));
        path.quad_to(Point::new(right, top), Point::new(right, top + 1.4));
        path.line_to(Point::new(right, PALM_TOP));
    }

    let right = FINGERS[3].0 + FINGER_W;
    path.line_to(Point::new(right, PALM_BOTTOM));
    path.quad_to(Point::new(right, 22.5), Point::new(14.0, 22.5));
    path.line_to(Point::new(10.0, 22.5));
    path.quad_to(Point::new(FINGERS[0].0, 22.5), Point::new(FINGERS[0].0, PALM_BOTTOM));
    path.close();
    path.detach()
}

/// One large four-point star with two satellites.
fn sparkles_path() -> Path {
    let mut path = PathBuilder::new();
    star(&mut path, 11.0, 12.0, 9.0);
    star(&mut path, 20.0, 4.5, 3.0);
    star(&mut path, 20.5, 19.5, 2.2);
    path.detach()
}

fn star(path: &mut PathBuilder, cx: f32, cy: f32, r: f32) {
    // Pinch factor: how far the quad controls sit toward the centre.
    const K: f32 = 0.15;
    path.move_to(Point::new(cx, cy - r));
    path.quad_to(Point::new(cx + r * K, cy - r * K), Point::new(cx + r, cy));
    path.quad_to(Point::new(cx + r * K, cy + r * K), Point::new(cx, cy + r));
    path.quad_to(Point::new(cx - r * K, cy + r * K), Point::new(cx - r, cy));
    path.quad_to(Point::new(cx - r * K, cy - r * K), Point::new(cx, cy - r));
    path.close();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_fit_their_box() {
        for glyph in [Glyph::Hand, Glyph::Sparkles] {
            let bounds = glyph_path(glyph).bounds().clone();
            assert!(bounds.left >= 0.0 && bounds.top >= 0.0, "{glyph:?}: {bounds:?}");
            assert!(
                bounds.right <= GLYPH_BOX && bounds.bottom <= GLYPH_BOX,
                "{glyph:?}: {bounds:?}"
            );
        }
    }

    #[test]
    fn glyphs_are_not_empty() {
        assert!(!glyph_path(Glyph::Hand).is_empty());
        assert!(!glyph_path(Glyph::Sparkles).is_empty());
    }
}
