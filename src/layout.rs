//! Scatter layout for the field of cards.
//!
//! Each card gets its own seeded stream, so positions only depend on the
//! card's index, its weight, and the container size. Heavier cards are pulled
//! toward the center of the container.

use crate::Item;
use crate::noise::SeededNoise;

/// Viewports at or below this width fall back to a stacked list.
pub const STACK_BREAKPOINT: f32 = 720.0;

/// Horizontal and vertical padding kept free along the container edges.
pub const PAD_X: f32 = 20.0;
pub const PAD_Y: f32 = 20.0;

/// Assumed card footprint used to keep cards inside the container.
pub const FOOTPRINT_WIDTH: f32 = 220.0;
pub const FOOTPRINT_HEIGHT: f32 = 110.0;

/// Full jitter span; offsets fall within half of it in either direction.
pub const JITTER_X: f32 = 180.0;
pub const JITTER_Y: f32 = 140.0;

pub const BIAS_MIN: f32 = 0.15;
pub const BIAS_MAX: f32 = 0.92;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Cards are scattered at absolute offsets.
    Scattered,
    /// Narrow viewport: cards follow natural flow, no offsets are produced.
    Stacked,
}

impl LayoutMode {
    pub fn for_viewport(viewport_width: f32) -> Self {
        if viewport_width <= STACK_BREAKPOINT {
            Self::Stacked
        } else {
            Self::Scattered
        }
    }
}

/// Offset of a card inside the field container, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub index: usize,
    pub key: String,
    pub left: f32,
    pub top: f32,
}

/// Clamps like `max(min, min(max, n))`: when the range is empty the lower
/// bound wins instead of panicking.
fn clamp(n: f32, min: f32, max: f32) -> f32 {
    n.min(max).max(min)
}

/// How strongly a card is pulled toward the center, in [`BIAS_MIN`, `BIAS_MAX`].
pub fn center_bias(weight: f32) -> f32 {
    clamp(weight / 100.0, BIAS_MIN, BIAS_MAX)
}

/// Position of the card at `index` with the given `weight`.
fn scatter(index: usize, weight: f32, width: f32, height: f32) -> (f32, f32) {
    let mut rng = SeededNoise::new(SeededNoise::layout_seed(index, width, height));

    let bias = center_bias(weight);
    let x_raw = rng.next_f32();
    let y_raw = rng.next_f32();

    let x_pull = (x_raw - 0.5) * (1.0 - bias);
    let y_pull = (y_raw - 0.5) * (1.0 - bias);

    let x = (0.5 + x_pull) * (width - PAD_X * 2.0) + PAD_X;
    let y = (0.5 + y_pull) * (height - PAD_Y * 2.0) + PAD_Y;

    let jitter_x = (rng.next_f32() - 0.5) * JITTER_X;
    let jitter_y = (rng.next_f32() - 0.5) * JITTER_Y;

    let left = clamp(x + jitter_x, PAD_X, width - PAD_X - FOOTPRINT_WIDTH);
    let top = clamp(y + jitter_y, PAD_Y, height - PAD_Y - FOOTPRINT_HEIGHT);
    (left, top)
}

/// Computes card offsets for a container of `width` x `height`.
///
/// Returns an empty list in [`LayoutMode::Stacked`]; callers lay the cards
/// out in flow instead.
pub fn compute_layout(items: &[Item], width: f32, height: f32, mode: LayoutMode) -> Vec<LayoutResult> {
    if mode == LayoutMode::Stacked {
        return Vec::new();
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (left, top) = scatter(index, item.weight, width, height);
            LayoutResult {
                index,
                key: item.key.clone(),
                left,
                top,
            }
        })
        .collect()
}
