use std::time::Duration;

/// Height of a card in the field; the width comes from the layout footprint.
pub const CARD_HEIGHT: f32 = 110.0;

/// Spacing between cards in the stacked list.
pub const STACK_SPACING: f32 = 14.0;

/// Maximum width of the overlay panel.
pub const OVERLAY_MAX_WIDTH: f32 = 640.0;

/// Margin kept between the overlay panel and the field edges.
pub const OVERLAY_MARGIN: f32 = 40.0;

/// Maximum width of the artifact zoom frame.
pub const ZOOM_FRAME_MAX_WIDTH: f32 = 560.0;

/// Frame height as a fraction of its width.
pub const ZOOM_FRAME_ASPECT: f32 = 0.66;

/// How long a card pulses after keyboard/tap focus.
pub const PULSE_DURATION: Duration = Duration::from_millis(220);

/// Radius of the glow that follows the pointer across a card.
pub const CARD_GLOW_RADIUS: f32 = 46.0;
