//! A decorative greeting card rendered in a native window: a glass panel
//! with animated intro text, a pointer-driven parallax tilt, two pulsing
//! background shapes, and a button that toggles the greeting.
//!
//! The animation math (springs, keyframe loops, the perspective tilt) lives
//! in plain modules with no rendering dependencies; the Skia/GL plumbing
//! consumes a fully resolved [`scene::FrameState`] per frame.

pub mod animation;
pub mod backend;
pub mod config;
pub mod icons;
pub mod parallax;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod spring;
pub mod transform;
