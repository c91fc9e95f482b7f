//! Command-line configuration.

use clap::{Parser, ValueEnum};
use whimsy_field::display::DisplayMode;
use whimsy_field::zoom::{DEFAULT_SCALE, InteractionStrategy};

const MIN_ZOOM_SCALE: f32 = 1.0;
const MAX_ZOOM_SCALE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputArg {
    /// Touch on mobile targets, pointer everywhere else
    Auto,
    Pointer,
    Touch,
}

impl InputArg {
    pub fn resolve(self) -> InteractionStrategy {
        match self {
            Self::Pointer => InteractionStrategy::Hover,
            Self::Touch => InteractionStrategy::Touch,
            Self::Auto if cfg!(any(target_os = "android", target_os = "ios")) => {
                InteractionStrategy::Touch
            }
            Self::Auto => InteractionStrategy::Hover,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "whimsy-field", version, about = "A scattered field of objects to step into")]
pub struct Cli {
    /// Interaction strategy for zoom frames and the hint
    #[arg(long, value_enum, default_value_t = InputArg::Auto)]
    pub input: InputArg,

    /// Scale applied while the artifact is zoomed (clamped to 1.0..=4.0)
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub zoom_scale: f32,

    /// Start in hushed mode
    #[arg(long)]
    pub hush: bool,

    /// Initial window width
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 720.0)]
    pub height: f32,
}

/// Resolved settings handed to the app.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub strategy: InteractionStrategy,
    pub zoom_scale: f32,
    pub display_mode: DisplayMode,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        let zoom_scale = if self.zoom_scale.is_finite() {
            self.zoom_scale.clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE)
        } else {
            DEFAULT_SCALE
        };
        if zoom_scale != self.zoom_scale {
            log::warn!("zoom scale {} adjusted to {zoom_scale}", self.zoom_scale);
        }

        Settings {
            strategy: self.input.resolve(),
            zoom_scale,
            display_mode: DisplayMode::from_hushed(self.hush),
        }
    }
}
