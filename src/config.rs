use std::path::PathBuf;

use clap::Parser;

/// Command-line options for the greeting window.
#[derive(Parser, Debug, Clone)]
#[command(name = "warm-welcome")]
#[command(about = "A decorative greeting card in a native window", long_about = None)]
pub struct AppConfig {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "Warm Welcome")]
    pub title: String,

    /// Render a single frame to this PNG and exit instead of opening a window
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,

    /// Scene clock for --screenshot, in seconds
    #[arg(long, default_value_t = 2.5, value_name = "SECONDS")]
    pub at: f32,

    /// Capture the thanked state (with --screenshot)
    #[arg(long)]
    pub interacted: bool,
}

impl AppConfig {
    /// Plain defaults, used by the offscreen rendering checks.
    pub fn for_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: "Warm Welcome".to_string(),
            screenshot: None,
            at: 0.0,
            interacted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_from_empty_args() {
        let config = AppConfig::parse_from(["warm-welcome"]);
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 800);
        assert_eq!(config.title, "Warm Welcome");
        assert!(config.screenshot.is_none());
        assert!(!config.interacted);
    }

    #[test]
    fn screenshot_options_parse() {
        let config = AppConfig::parse_from([
            "warm-welcome",
            "--screenshot",
            "frame.png",
            "--at",
            "4.0",
            "--interacted",
        ]);
        assert_eq!(config.screenshot, Some(PathBuf::from("frame.png")));
        assert_eq!(config.at, 4.0);
        assert!(config.interacted);
    }
}
