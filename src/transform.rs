use crate::parallax::Tilt;

/// Row-major 3×3 projective matrix.
pub type Mat3 = [f32; 9];

pub const IDENTITY: Mat3 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Projective matrix for a card tilted by `tilt` degrees, viewed from
/// `perspective` units away, pivoting around `center`.
///
/// Positive rotate-x tips the top edge away from the viewer, positive
/// rotate-y tips the right edge away. The plane rotation collapses to a
/// 3×3 matrix with perspective terms, which is what the canvas consumes.
pub fn tilt_matrix(tilt: Tilt, perspective: f32, center: (f32, f32)) -> Mat3 {
    let rx = tilt.rotate_x_deg.to_radians();
    let ry = tilt.rotate_y_deg.to_radians();
    let inv_d = if perspective > 0.0 {
        1.0 / perspective
    } else {
        0.0
    };

    let projected = [
        ry.cos(),
        0.0,
        0.0,
        0.0,
        rx.cos(),
        0.0,
        ry.sin() * inv_d,
        -rx.sin() * inv_d,
        1.0,
    ];

    let (cx, cy) = center;
    let to_origin = [1.0, 0.0, -cx, 0.0, 1.0, -cy, 0.0, 0.0, 1.0];
    let from_origin = [1.0, 0.0, cx, 0.0, 1.0, cy, 0.0, 0.0, 1.0];

    mul(&from_origin, &mul(&projected, &to_origin))
}

pub fn mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [0.0; 9];
    for row in 0..3 {
        for col in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += a[row * 3 + k] * b[k * 3 + col];
            }
            out[row * 3 + col] = sum;
        }
    }
    out
}

/// Apply the matrix to a point, including the perspective divide.
pub fn apply(m: &Mat3, point: (f32, f32)) -> (f32, f32) {
    let (x, y) = point;
    let w = m[6] * x + m[7] * y + m[8];
    (
        (m[0] * x + m[1] * y + m[2]) / w,
        (m[3] * x + m[4] * y + m[5]) / w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallax::{MAX_TILT_DEG, PERSPECTIVE};

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn zero_tilt_is_identity() {
        let m = tilt_matrix(Tilt::default(), PERSPECTIVE, (640.0, 400.0));
        for (i, (got, want)) in m.iter().zip(IDENTITY.iter()).enumerate() {
            assert!((got - want).abs() < 1e-6, "entry {i}: {got} vs {want}");
        }
    }

    #[test]
    fn pivot_is_a_fixed_point() {
        let center = (640.0, 400.0);
        let tilt = Tilt {
            rotate_x_deg: MAX_TILT_DEG,
            rotate_y_deg: -MAX_TILT_DEG,
        };
        let m = tilt_matrix(tilt, PERSPECTIVE, center);
        assert!(close(apply(&m, center), center));
    }

    #[test]
    fn positive_rotate_x_shrinks_the_top_edge() {
        let center = (640.0, 400.0);
        let tilt = Tilt {
            rotate_x_deg: MAX_TILT_DEG,
            rotate_y_deg: 0.0,
        };
        let m = tilt_matrix(tilt, PERSPECTIVE, center);

        let top_left = apply(&m, (240.0, 100.0));
        let top_right = apply(&m, (1040.0, 100.0));
        let bottom_left = apply(&m, (240.0, 700.0));
        let bottom_right = apply(&m, (1040.0, 700.0));

        let top_width = top_right.0 - top_left.0;
        let bottom_width = bottom_right.0 - bottom_left.0;
        assert!(top_width < bottom_width);
    }

    #[test]
    fn projection_stays_finite_at_full_tilt() {
        let center = (960.0, 540.0);
        let tilt = Tilt {
            rotate_x_deg: MAX_TILT_DEG,
            rotate_y_deg: MAX_TILT_DEG,
        };
        let m = tilt_matrix(tilt, PERSPECTIVE, center);

        for corner in [(0.0, 0.0), (1920.0, 0.0), (0.0, 1080.0), (1920.0, 1080.0)] {
            let (x, y) = apply(&m, corner);
            assert!(x.is_finite() && y.is_finite());
            let w = m[6] * corner.0 + m[7] * corner.1 + m[8];
            assert!(w > 0.5, "perspective divisor too close to zero: {w}");
        }
    }
}
