use crate::animation::{Keyframes, Tween};
use crate::icons::Glyph;
use crate::parallax::{Parallax, Tilt};
use crate::spring::{Spring, SpringConfig};

pub const TITLE: &str = "Warm Welcome";
pub const BYLINE: &str = "BY HARSHITH";
pub const BODY: [&str; 2] = [
    "I'm absolutely delighted you've stopped by.",
    "This is a space designed for connection and creativity.",
];
pub const LABEL_IDLE: &str = "Say Hello";
pub const LABEL_INTERACTED: &str = "Glad you're here!";
pub const CAPTION: &str = "Thanks for saying hi! I hope you have a wonderful day.";

/// Degrees the hand glyph leans while the button is hovered.
pub const HAND_HOVER_DEG: f32 = 12.0;

/// The one piece of interaction state: a two-state toggle, flipped by every
/// button press, never latched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Interacted,
}

impl Interaction {
    pub fn toggle(&mut self) {
        *self = match self {
            Interaction::Idle => Interaction::Interacted,
            Interaction::Interacted => Interaction::Idle,
        };
    }

    pub fn label(self) -> &'static str {
        match self {
            Interaction::Idle => LABEL_IDLE,
            Interaction::Interacted => LABEL_INTERACTED,
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Interaction::Idle => Glyph::Hand,
            Interaction::Interacted => Glyph::Sparkles,
        }
    }

    pub fn caption(self) -> Option<&'static str> {
        match self {
            Interaction::Idle => None,
            Interaction::Interacted => Some(CAPTION),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.x
            && point.0 <= self.x + self.w
            && point.1 >= self.y
            && point.1 <= self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Card and button geometry plus text baselines for a given viewport, in
/// logical pixels. Vertical positions scale with the card so small windows
/// keep everything on the panel.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub card: Rect,
    pub button: Rect,
    pub title_baseline: f32,
    pub byline_baseline: f32,
    pub body_baselines: [f32; 2],
    pub caption_baseline: f32,
}

pub fn layout(viewport: (f32, f32)) -> Layout {
    let (vw, vh) = viewport;
    let card_w = (vw - 48.0).clamp(0.0, 720.0);
    let card_h = (vh - 48.0).clamp(0.0, 520.0);
    let card = Rect {
        x: (vw - card_w) / 2.0,
        y: (vh - card_h) / 2.0,
        w: card_w,
        h: card_h,
    };

    let button_w = 250.0_f32.min(card_w);
    let button_h = 58.0;
    let button = Rect {
        x: card.x + (card.w - button_w) / 2.0,
        y: card.y + card.h * 0.677,
        w: button_w,
        h: button_h,
    };

    Layout {
        card,
        button,
        title_baseline: card.y + card.h * 0.29,
        byline_baseline: card.y + card.h * 0.385,
        body_baselines: [card.y + card.h * 0.523, card.y + card.h * 0.60],
        caption_baseline: card.y + card.h * 0.87,
    }
}

/// An ambient background circle: anchor as viewport fractions, plus
/// looping scale/offset tracks.
pub struct AmbientShape {
    pub anchor: (f32, f32),
    pub radius: f32,
    pub color: [u8; 4],
    scale: Keyframes,
    dx: Keyframes,
    dy: Keyframes,
}

/// One shape resolved at a point in time, ready to draw.
#[derive(Clone, Copy, Debug)]
pub struct AmbientSample {
    pub center: (f32, f32),
    pub radius: f32,
    pub color: [u8; 4],
}

impl AmbientShape {
    pub fn sample(&self, clock: f32, viewport: (f32, f32)) -> AmbientSample {
        AmbientSample {
            center: (
                viewport.0 * self.anchor.0 + self.dx.sample(clock),
                viewport.1 * self.anchor.1 + self.dy.sample(clock),
            ),
            radius: self.radius * self.scale.sample(clock),
            color: self.color,
        }
    }
}

fn ambient_shapes() -> [AmbientShape; 2] {
    [
        AmbientShape {
            anchor: (0.25, 0.25),
            radius: 128.0,
            color: [26, 255, 255, 255],
            scale: Keyframes::new(&[1.0, 1.2, 1.0], 8.0),
            dx: Keyframes::new(&[0.0, 20.0, 0.0], 8.0),
            dy: Keyframes::new(&[0.0, -20.0, 0.0], 8.0),
        },
        AmbientShape {
            anchor: (0.75, 0.75),
            radius: 192.0,
            color: [26, 234, 179, 8],
            scale: Keyframes::new(&[1.0, 1.1, 1.0], 10.0).with_delay(1.0),
            dx: Keyframes::new(&[0.0, -30.0, 0.0], 10.0).with_delay(1.0),
            dy: Keyframes::new(&[0.0, 30.0, 0.0], 10.0).with_delay(1.0),
        },
    ]
}

/// Everything the renderer needs for one frame, fully resolved.
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    pub viewport: (f32, f32),
    pub layout: Layout,
    pub tilt: Tilt,
    pub ambient: [AmbientSample; 2],
    pub heading_opacity: f32,
    pub heading_rise: f32,
    pub body_opacity: f32,
    pub button_scale: f32,
    pub hand_lean_deg: f32,
    pub label: &'static str,
    pub glyph: Glyph,
    pub caption: Option<CaptionState>,
}

#[derive(Clone, Copy, Debug)]
pub struct CaptionState {
    pub text: &'static str,
    pub opacity: f32,
    pub rise: f32,
}

/// The whole view-model. Owned by the event loop; everything in here dies
/// with the window.
pub struct GreetingScene {
    interaction: Interaction,
    clock: f32,
    parallax: Parallax,
    ambient: [AmbientShape; 2],
    heading_fade: Tween,
    heading_rise: Tween,
    body_fade: Tween,
    button_scale: Spring,
    hand_lean: Spring,
    hovered: bool,
    pressed: bool,
    caption_since: Option<f32>,
}

impl GreetingScene {
    pub fn new() -> Self {
        Self {
            interaction: Interaction::default(),
            clock: 0.0,
            parallax: Parallax::new(),
            ambient: ambient_shapes(),
            heading_fade: Tween::new(0.0, 1.0, 0.8),
            heading_rise: Tween::new(20.0, 0.0, 0.8),
            body_fade: Tween::new(0.0, 1.0, 0.8).with_delay(0.5),
            button_scale: Spring::new(SpringConfig::BUTTON, 1.0),
            hand_lean: Spring::new(SpringConfig::BUTTON, 0.0),
            hovered: false,
            pressed: false,
            caption_since: None,
        }
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn pointer_moved(&mut self, pointer: (f32, f32), viewport: (f32, f32)) {
        self.parallax.pointer_moved(pointer, viewport);
        self.hovered = layout(viewport).button.contains(pointer);
        if !self.hovered {
            self.pressed = false;
        }
    }

    pub fn pointer_left(&mut self) {
        self.hovered = false;
        self.pressed = false;
        self.parallax.release();
    }

    /// Left button went down. Arms the toggle if it happened on the button.
    pub fn press(&mut self, pointer: (f32, f32), viewport: (f32, f32)) {
        self.pressed = layout(viewport).button.contains(pointer);
    }

    /// Left button came up; an armed press released on the button flips the
    /// toggle. Returns the new state when it flipped.
    pub fn release(&mut self, pointer: (f32, f32), viewport: (f32, f32)) -> Option<Interaction> {
        let armed = self.pressed;
        self.pressed = false;
        if !(armed && layout(viewport).button.contains(pointer)) {
            return None;
        }

        self.interaction.toggle();
        self.caption_since = match self.interaction {
            Interaction::Interacted => Some(self.clock),
            Interaction::Idle => None,
        };
        Some(self.interaction)
    }

    /// Advance the clock, the parallax springs, and the button feedback
    /// springs by one frame.
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
        self.parallax.step(dt);

        let scale_target = if self.pressed {
            0.95
        } else if self.hovered {
            1.05
        } else {
            1.0
        };
        self.button_scale.set_target(scale_target);
        self.button_scale.step(dt);

        let lean_target = if self.hovered && self.interaction == Interaction::Idle {
            HAND_HOVER_DEG
        } else {
            0.0
        };
        self.hand_lean.set_target(lean_target);
        self.hand_lean.step(dt);
    }

    pub fn frame(&self, viewport: (f32, f32)) -> FrameState {
        let caption = self.interaction.caption().map(|text| {
            let since = self.caption_since.unwrap_or(self.clock);
            let local = self.clock - since;
            CaptionState {
                text,
                opacity: Tween::new(0.0, 1.0, 0.4).sample(local),
                rise: Tween::new(10.0, 0.0, 0.4).sample(local),
            }
        });

        FrameState {
            viewport,
            layout: layout(viewport),
            tilt: self.parallax.tilt(),
            ambient: [
                self.ambient[0].sample(self.clock, viewport),
                self.ambient[1].sample(self.clock, viewport),
            ],
            heading_opacity: self.heading_fade.sample(self.clock),
            heading_rise: self.heading_rise.sample(self.clock),
            body_opacity: self.body_fade.sample(self.clock),
            button_scale: self.button_scale.value(),
            hand_lean_deg: self.hand_lean.value(),
            label: self.interaction.label(),
            glyph: self.interaction.glyph(),
            caption,
        }
    }
}

impl Default for GreetingScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f32, f32) = (1280.0, 800.0);

    fn click(scene: &mut GreetingScene, pointer: (f32, f32)) {
        scene.press(pointer, VIEWPORT);
        scene.release(pointer, VIEWPORT);
    }

    fn button_centre() -> (f32, f32) {
        layout(VIEWPORT).button.center()
    }

    #[test]
    fn layout_keeps_content_on_the_card() {
        for viewport in [(1280.0, 800.0), (640.0, 400.0), (900.0, 700.0)] {
            let l = layout(viewport);
            assert!(l.button.x >= l.card.x, "{viewport:?}");
            assert!(l.button.y + l.button.h <= l.card.y + l.card.h, "{viewport:?}");
            assert!(l.title_baseline > l.card.y);
            assert!(l.caption_baseline < l.card.y + l.card.h);
            assert!(l.caption_baseline > l.button.y + l.button.h);
        }
    }

    #[test]
    fn toggle_flips_both_ways() {
        let mut state = Interaction::default();
        assert_eq!(state, Interaction::Idle);
        state.toggle();
        assert_eq!(state, Interaction::Interacted);
        state.toggle();
        assert_eq!(state, Interaction::Idle);
    }

    #[test]
    fn click_cycles_label() {
        let mut scene = GreetingScene::new();
        assert_eq!(scene.frame(VIEWPORT).label, LABEL_IDLE);

        click(&mut scene, button_centre());
        assert_eq!(scene.frame(VIEWPORT).label, LABEL_INTERACTED);

        click(&mut scene, button_centre());
        assert_eq!(scene.frame(VIEWPORT).label, LABEL_IDLE);
    }

    #[test]
    fn caption_present_iff_interacted() {
        let mut scene = GreetingScene::new();
        assert!(scene.frame(VIEWPORT).caption.is_none());

        click(&mut scene, button_centre());
        let caption = scene.frame(VIEWPORT).caption.expect("caption after toggle");
        assert_eq!(caption.text, CAPTION);

        click(&mut scene, button_centre());
        assert!(scene.frame(VIEWPORT).caption.is_none());
    }

    #[test]
    fn caption_fades_and_slides_in() {
        let mut scene = GreetingScene::new();
        click(&mut scene, button_centre());

        let at_reveal = scene.frame(VIEWPORT).caption.unwrap();
        assert_eq!(at_reveal.opacity, 0.0);
        assert_eq!(at_reveal.rise, 10.0);

        scene.advance(1.0);
        let settled = scene.frame(VIEWPORT).caption.unwrap();
        assert_eq!(settled.opacity, 1.0);
        assert_eq!(settled.rise, 0.0);
    }

    #[test]
    fn click_off_the_button_does_nothing() {
        let mut scene = GreetingScene::new();
        click(&mut scene, (10.0, 10.0));
        assert_eq!(scene.interaction(), Interaction::Idle);
    }

    #[test]
    fn drag_off_the_button_cancels_the_press() {
        let mut scene = GreetingScene::new();
        let on = button_centre();
        scene.press(on, VIEWPORT);
        scene.pointer_moved((10.0, 10.0), VIEWPORT);
        assert!(scene.release(on, VIEWPORT).is_none());
        assert_eq!(scene.interaction(), Interaction::Idle);
    }

    #[test]
    fn glyph_follows_state() {
        let mut scene = GreetingScene::new();
        assert_eq!(scene.frame(VIEWPORT).glyph, Glyph::Hand);
        click(&mut scene, button_centre());
        assert_eq!(scene.frame(VIEWPORT).glyph, Glyph::Sparkles);
    }

    #[test]
    fn intro_tweens_start_hidden_and_settle_visible() {
        let mut scene = GreetingScene::new();
        let first = scene.frame(VIEWPORT);
        assert_eq!(first.heading_opacity, 0.0);
        assert_eq!(first.heading_rise, 20.0);
        assert_eq!(first.body_opacity, 0.0);

        scene.advance(2.0);
        let settled = scene.frame(VIEWPORT);
        assert_eq!(settled.heading_opacity, 1.0);
        assert_eq!(settled.heading_rise, 0.0);
        assert_eq!(settled.body_opacity, 1.0);
    }

    #[test]
    fn hover_leans_the_hand_and_grows_the_button() {
        let mut scene = GreetingScene::new();
        scene.pointer_moved(button_centre(), VIEWPORT);
        for _ in 0..300 {
            scene.advance(1.0 / 60.0);
        }
        let frame = scene.frame(VIEWPORT);
        assert!((frame.button_scale - 1.05).abs() < 0.01);
        assert!((frame.hand_lean_deg - HAND_HOVER_DEG).abs() < 0.1);
    }

    #[test]
    fn ambient_samples_stay_in_envelope_after_many_cycles() {
        let scene = GreetingScene::new();
        for i in 0..2000 {
            let clock = i as f32 * 4.1;
            for shape in &scene.ambient {
                let sample = shape.sample(clock, VIEWPORT);
                assert!(sample.radius >= shape.radius * 0.99);
                assert!(sample.radius <= shape.radius * 1.21);
                let (ax, ay) = (VIEWPORT.0 * shape.anchor.0, VIEWPORT.1 * shape.anchor.1);
                assert!((sample.center.0 - ax).abs() <= 30.0 + 1e-3);
                assert!((sample.center.1 - ay).abs() <= 30.0 + 1e-3);
            }
        }
    }

    #[test]
    fn tilt_in_frame_is_bounded() {
        let mut scene = GreetingScene::new();
        scene.pointer_moved((-9000.0, 9000.0), VIEWPORT);
        for _ in 0..600 {
            scene.advance(1.0 / 60.0);
        }
        let tilt = scene.frame(VIEWPORT).tilt;
        assert!(tilt.rotate_x_deg.abs() <= crate::parallax::MAX_TILT_DEG);
        assert!(tilt.rotate_y_deg.abs() <= crate::parallax::MAX_TILT_DEG);
    }
}
