/// Cubic ease-in/ease-out over `t` in [0, 1].
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// An infinitely looping sequence of evenly spaced samples, eased between
/// neighbours. `sample` is phase arithmetic on the clock, so the track has
/// no per-cycle state and any clock value is valid.
#[derive(Clone, Debug)]
pub struct Keyframes {
    samples: Vec<f32>,
    duration: f32,
    delay: f32,
}

impl Keyframes {
    pub fn new(samples: &[f32], duration: f32) -> Self {
        assert!(!samples.is_empty(), "keyframe track needs samples");
        assert!(duration > 0.0, "keyframe cycle must have positive duration");
        Self {
            samples: samples.to_vec(),
            duration,
            delay: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Value at `clock` seconds since mount. Holds the first sample until
    /// the start delay has elapsed.
    pub fn sample(&self, clock: f32) -> f32 {
        if self.samples.len() == 1 || clock < self.delay {
            return self.samples[0];
        }

        let phase = (clock - self.delay).rem_euclid(self.duration) / self.duration;
        let segments = (self.samples.len() - 1) as f32;
        let position = phase * segments;
        let index = (position.floor() as usize).min(self.samples.len() - 2);
        let local = position - index as f32;

        let from = self.samples[index];
        let to = self.samples[index + 1];
        from + (to - from) * ease_in_out(local)
    }

    /// Smallest and largest sample value, the envelope the loop stays in.
    pub fn envelope(&self) -> (f32, f32) {
        let mut lo = self.samples[0];
        let mut hi = self.samples[0];
        for &s in &self.samples {
            lo = lo.min(s);
            hi = hi.max(s);
        }
        (lo, hi)
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// A one-shot value animation: holds `from` through the delay, eases to
/// `to`, then holds `to` forever.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub delay: f32,
    pub duration: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn sample(&self, clock: f32) -> f32 {
        if self.duration <= 0.0 {
            return if clock < self.delay { self.from } else { self.to };
        }
        let t = (clock - self.delay) / self.duration;
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn finished(&self, clock: f32) -> bool {
        clock >= self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        // Outside the domain the curve clamps instead of extrapolating.
        assert_eq!(ease_in_out(-3.0), 0.0);
        assert_eq!(ease_in_out(7.0), 1.0);
    }

    #[test]
    fn keyframes_start_and_close_the_loop() {
        let track = Keyframes::new(&[1.0, 1.2, 1.0], 8.0);
        assert_eq!(track.sample(0.0), 1.0);
        assert!((track.sample(4.0) - 1.2).abs() < 1e-5);
        assert!((track.sample(8.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn keyframes_hold_first_sample_through_delay() {
        let track = Keyframes::new(&[0.0, -30.0, 0.0], 10.0).with_delay(1.0);
        assert_eq!(track.sample(0.0), 0.0);
        assert_eq!(track.sample(0.99), 0.0);
        // Mid-cycle after the delay the track has left its first sample.
        assert!(track.sample(1.0 + 5.0) < -29.0);
    }

    #[test]
    fn keyframes_survive_a_thousand_cycles() {
        let track = Keyframes::new(&[1.0, 1.1, 1.0], 10.0).with_delay(1.0);
        let (lo, hi) = track.envelope();

        for i in 0..=1000 {
            let clock = 1.0 + i as f32 * track.duration();
            let early = track.sample(clock + 2.5);
            let late = track.sample(clock + 7.5);
            assert!(early >= lo - 1e-4 && early <= hi + 1e-4);
            assert!(late >= lo - 1e-4 && late <= hi + 1e-4);
        }

        // Same phase, 1000 cycles apart: no drift.
        let a = track.sample(1.0 + 2.5);
        let b = track.sample(1.0 + 2.5 + 1000.0 * track.duration());
        assert!((a - b).abs() < 1e-2);
    }

    #[test]
    fn tween_clamps_before_and_after() {
        let tween = Tween::new(0.0, 1.0, 0.8).with_delay(0.5);
        assert_eq!(tween.sample(0.0), 0.0);
        assert_eq!(tween.sample(0.5), 0.0);
        assert_eq!(tween.sample(1.3), 1.0);
        assert_eq!(tween.sample(100.0), 1.0);
        assert!(!tween.finished(1.2));
        assert!(tween.finished(1.3));
    }
}
