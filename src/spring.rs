/// Parameters of a damped spring: acceleration toward the target scaled by
/// `stiffness`, velocity bled off by `damping`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringConfig {
    /// Smoothing applied to the pointer-parallax offsets.
    pub const PARALLAX: SpringConfig = SpringConfig {
        stiffness: 50.0,
        damping: 20.0,
    };

    /// Snappier response for button hover/press feedback.
    pub const BUTTON: SpringConfig = SpringConfig {
        stiffness: 400.0,
        damping: 30.0,
    };
}

/// Largest integration step; frames longer than this are split into
/// substeps so a stalled frame cannot destabilize the integrator.
const MAX_STEP: f32 = 1.0 / 120.0;

/// Below these the spring snaps to its target and reports settled.
const REST_DELTA: f32 = 0.001;
const REST_SPEED: f32 = 0.001;

/// A value that follows a moving target with second-order dynamics instead
/// of jumping. Stepped once per frame with the frame's delta time.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Jump straight to `value` with no motion.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance the filter by `dt` seconds and return the new value.
    pub fn step(&mut self, dt: f32) -> f32 {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let accel =
                self.config.stiffness * (self.target - self.value) - self.config.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }

    pub fn settled(&self) -> bool {
        (self.target - self.value).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn spring_converges_to_target() {
        let mut spring = Spring::new(SpringConfig::PARALLAX, 0.0);
        spring.set_target(20.0);
        run(&mut spring, 10.0);

        assert!(spring.settled());
        assert_eq!(spring.value(), 20.0);
    }

    #[test]
    fn spring_at_target_is_settled() {
        let spring = Spring::new(SpringConfig::PARALLAX, 5.0);
        assert!(spring.settled());
        assert_eq!(spring.value(), 5.0);
    }

    #[test]
    fn spring_output_stays_bounded_for_bounded_targets() {
        let mut spring = Spring::new(SpringConfig::PARALLAX, 0.0);
        let targets = [20.0, -20.0, 13.5, -7.25, 20.0, 0.0];
        for (i, target) in targets.iter().enumerate() {
            spring.set_target(*target);
            run(&mut spring, 0.5);
            assert!(
                spring.value().abs() <= 20.0 + 1.0,
                "escaped bounds after target #{i}: {}",
                spring.value()
            );
        }
    }

    #[test]
    fn long_frame_does_not_destabilize() {
        let mut spring = Spring::new(SpringConfig::BUTTON, 1.0);
        spring.set_target(1.05);
        // A two-second stall delivered as a single frame.
        spring.step(2.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 1.05).abs() < 0.01);
    }

    #[test]
    fn snap_to_clears_motion() {
        let mut spring = Spring::new(SpringConfig::PARALLAX, 0.0);
        spring.set_target(20.0);
        spring.step(0.1);
        spring.snap_to(0.0);

        assert!(spring.settled());
        assert_eq!(spring.value(), 0.0);
        assert_eq!(spring.target(), 0.0);
    }
}
