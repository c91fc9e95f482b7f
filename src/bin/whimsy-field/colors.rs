//! Palette for the field, cards and overlay.

use eframe::egui::Color32;

pub const FIELD_BG: Color32 = Color32::from_rgb(14, 13, 18);

// Cards
pub const CARD_FILL: Color32 = Color32::from_rgb(26, 24, 33);
pub const CARD_STROKE: Color32 = Color32::from_rgb(64, 58, 80);
pub const CARD_FOCUS_STROKE: Color32 = Color32::from_rgb(214, 190, 255);
pub const CARD_GLOW: Color32 = Color32::from_rgba_premultiplied(46, 38, 60, 60);
pub const TITLE_TEXT: Color32 = Color32::from_rgb(236, 232, 244);
pub const META_TEXT: Color32 = Color32::from_rgb(150, 144, 168);

// Weight bar
pub const WEIGHT_TRACK: Color32 = Color32::from_rgb(44, 40, 56);
pub const WEIGHT_FILL: Color32 = Color32::from_rgb(178, 150, 235);

// Overlay
pub const BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 170);
pub const SPARK: Color32 = Color32::from_rgb(255, 214, 120);
pub const FRAME_STROKE: Color32 = Color32::from_rgb(70, 64, 88);
pub const FRAME_ZOOMED_STROKE: Color32 = Color32::from_rgb(214, 190, 255);

/// Multiplier applied to secondary styling while hushed.
pub const HUSH_DIM: f32 = 0.35;
