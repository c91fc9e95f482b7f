//! Zoom/pan/drag controller for a framed artifact image.
//!
//! - Hover strategy: entering the frame zooms in, moving eases the image
//!   toward the pointer, leaving resets.
//! - Touch strategy: a tap toggles zoom, then dragging pans.
//!
//! Both strategies pan by dragging once zoomed. Translation is clamped so the
//! scaled image always covers the frame.

use thiserror::Error;

/// Scale applied while zoomed.
pub const DEFAULT_SCALE: f32 = 1.65;

/// Fraction of the remaining distance covered per pointer move while easing.
pub const EASE_FACTOR: f32 = 0.18;

/// How the device interacts with zoom frames. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionStrategy {
    /// Mouse or pen with hover.
    Hover,
    /// Coarse pointer without hover.
    Touch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle of the frame clipping the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Input delivered to a zoom frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Move { position: Point },
    Down { id: PointerId, position: Point },
    Up { id: PointerId },
    Cancel { id: PointerId },
    /// Press and release without a drag.
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPhase {
    Idle,
    Zoomed,
    Dragging,
}

/// Raw controller state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub scale: f32,
    pub translate: Point,
    pub zoomed: bool,
    pub dragging: bool,
    /// Pointer position when the current drag began.
    pub drag_origin: Point,
    /// Translation when the current drag began.
    pub drag_origin_translate: Point,
}

impl ZoomState {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            translate: Point::ZERO,
            zoomed: false,
            dragging: false,
            drag_origin: Point::ZERO,
            drag_origin_translate: Point::ZERO,
        }
    }
}

/// Transform to apply to the image: identity unless zoomed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f32,
    pub translate: Point,
    pub zoomed: bool,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Point::ZERO,
        zoomed: false,
    };
}

#[derive(Error, Debug, PartialEq)]
pub enum CaptureError {
    #[error("pointer {0:?} was never captured")]
    NotCaptured(PointerId),
}

fn clamp(n: f32, min: f32, max: f32) -> f32 {
    n.min(max).max(min)
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    strategy: InteractionStrategy,
    state: ZoomState,
    captured: Option<PointerId>,
}

impl ZoomController {
    pub fn new(strategy: InteractionStrategy, scale: f32) -> Self {
        Self {
            strategy,
            state: ZoomState::new(scale),
            captured: None,
        }
    }

    pub fn strategy(&self) -> InteractionStrategy {
        self.strategy
    }

    pub fn state(&self) -> &ZoomState {
        &self.state
    }

    pub fn phase(&self) -> ZoomPhase {
        match (self.state.zoomed, self.state.dragging) {
            (false, _) => ZoomPhase::Idle,
            (true, false) => ZoomPhase::Zoomed,
            (true, true) => ZoomPhase::Dragging,
        }
    }

    pub fn transform(&self) -> ZoomTransform {
        if !self.state.zoomed {
            return ZoomTransform::IDENTITY;
        }
        ZoomTransform {
            scale: self.state.scale,
            translate: self.state.translate,
            zoomed: true,
        }
    }

    /// Maximum translation on each axis for the given frame.
    pub fn bounds(&self, frame: FrameRect) -> Point {
        Point::new(
            (self.state.scale - 1.0) * frame.width / 2.0,
            (self.state.scale - 1.0) * frame.height / 2.0,
        )
    }

    /// Re-clamps the translation to `frame`, which may have changed size
    /// since the last event.
    pub fn fit(&mut self, frame: FrameRect) -> ZoomTransform {
        let max = self.bounds(frame);
        let clamp_point = |p: Point| {
            Point::new(
                clamp(p.x, -max.x, max.x),
                clamp(p.y, -max.y, max.y),
            )
        };
        self.state.translate = clamp_point(self.state.translate);
        if self.state.dragging {
            self.state.drag_origin_translate = clamp_point(self.state.drag_origin_translate);
        }
        self.transform()
    }

    /// Feeds one event and returns the transform to apply afterwards.
    pub fn handle(&mut self, event: PointerEvent, frame: FrameRect) -> ZoomTransform {
        self.fit(frame);
        match (self.strategy, event) {
            (InteractionStrategy::Hover, PointerEvent::Enter) => self.zoom_on(),
            (InteractionStrategy::Hover, PointerEvent::Leave) => self.reset(),
            (InteractionStrategy::Touch, PointerEvent::Tap) => self.toggle(),
            (InteractionStrategy::Touch, PointerEvent::Enter | PointerEvent::Leave)
            | (InteractionStrategy::Hover, PointerEvent::Tap) => {}
            (_, PointerEvent::Down { id, position }) => self.begin_drag(id, position),
            (_, PointerEvent::Move { position }) => self.pointer_moved(position, frame),
            (_, PointerEvent::Up { id } | PointerEvent::Cancel { id }) => self.end_drag(id),
        }
        self.transform()
    }

    /// Back to identity; used on pointer leave and when the overlay closes.
    pub fn reset(&mut self) {
        self.state.zoomed = false;
        self.state.dragging = false;
        self.state.translate = Point::ZERO;
        if let Some(id) = self.captured {
            self.ignore_release(id);
        }
    }

    fn zoom_on(&mut self) {
        self.state.zoomed = true;
    }

    fn toggle(&mut self) {
        if self.state.zoomed {
            self.reset();
        } else {
            self.zoom_on();
        }
    }

    fn begin_drag(&mut self, id: PointerId, position: Point) {
        if !self.state.zoomed {
            return;
        }
        self.state.dragging = true;
        self.captured = Some(id);
        self.state.drag_origin = position;
        self.state.drag_origin_translate = self.state.translate;
    }

    fn pointer_moved(&mut self, position: Point, frame: FrameRect) {
        if !self.state.zoomed {
            return;
        }

        if self.state.dragging {
            let max = self.bounds(frame);
            let origin = self.state.drag_origin;
            let start = self.state.drag_origin_translate;
            self.state.translate = Point::new(
                clamp(start.x + position.x - origin.x, -max.x, max.x),
                clamp(start.y + position.y - origin.y, -max.y, max.y),
            );
        } else if self.strategy == InteractionStrategy::Hover {
            self.ease_toward(position, frame);
        }
    }

    /// Eases the translation toward the pointer: center maps to zero, edges
    /// map to the bounds.
    fn ease_toward(&mut self, position: Point, frame: FrameRect) {
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return;
        }
        let max = self.bounds(frame);
        let px = (position.x - frame.left) / frame.width;
        let py = (position.y - frame.top) / frame.height;

        let target = Point::new((0.5 - px) * 2.0 * max.x, (0.5 - py) * 2.0 * max.y);
        let current = self.state.translate;

        self.state.translate = Point::new(
            clamp(current.x + (target.x - current.x) * EASE_FACTOR, -max.x, max.x),
            clamp(current.y + (target.y - current.y) * EASE_FACTOR, -max.y, max.y),
        );
    }

    fn end_drag(&mut self, id: PointerId) {
        if !self.state.zoomed {
            return;
        }
        self.state.dragging = false;
        self.ignore_release(id);
    }

    fn release_capture(&mut self, id: PointerId) -> Result<(), CaptureError> {
        if self.captured != Some(id) {
            return Err(CaptureError::NotCaptured(id));
        }
        self.captured = None;
        Ok(())
    }

    fn ignore_release(&mut self, id: PointerId) {
        if let Err(err) = self.release_capture(id) {
            log::debug!("ignoring pointer release: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::SeededNoise;

    const FRAME: FrameRect = FrameRect {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 300.0,
    };

    fn assert_in_bounds(controller: &ZoomController, frame: FrameRect) {
        let max = controller.bounds(frame);
        let t = controller.state().translate;
        assert!(t.x >= -max.x && t.x <= max.x, "x {} outside ±{}", t.x, max.x);
        assert!(t.y >= -max.y && t.y <= max.y, "y {} outside ±{}", t.y, max.y);
    }

    #[test]
    fn test_hover_enter_zooms_and_leave_resets() {
        let mut zoom = ZoomController::new(InteractionStrategy::Hover, DEFAULT_SCALE);
        assert_eq!(zoom.phase(), ZoomPhase::Idle);
        assert_eq!(zoom.transform(), ZoomTransform::IDENTITY);

        let transform = zoom.handle(PointerEvent::Enter, FRAME);
        assert!(transform.zoomed);
        assert_eq!(transform.scale, DEFAULT_SCALE);

        zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        assert_ne!(zoom.state().translate, Point::ZERO);

        let transform = zoom.handle(PointerEvent::Leave, FRAME);
        assert_eq!(transform, ZoomTransform::IDENTITY);
        assert_eq!(zoom.state().translate, Point::ZERO);
        assert_eq!(zoom.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn test_hover_move_eases_toward_target() {
        let mut zoom = ZoomController::new(InteractionStrategy::Hover, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Enter, FRAME);

        // Top-left corner targets the positive bounds.
        zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        let max = zoom.bounds(FRAME);
        let t = zoom.state().translate;
        assert!((t.x - max.x * EASE_FACTOR).abs() < 1e-4);
        assert!((t.y - max.y * EASE_FACTOR).abs() < 1e-4);

        for _ in 0..200 {
            zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        }
        let t = zoom.state().translate;
        assert!((t.x - max.x).abs() < 1e-3);
        assert!((t.y - max.y).abs() < 1e-3);
    }

    #[test]
    fn test_hover_center_targets_zero() {
        let mut zoom = ZoomController::new(InteractionStrategy::Hover, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Enter, FRAME);
        zoom.handle(PointerEvent::Move { position: Point::new(300.0, 200.0) }, FRAME);
        assert_eq!(zoom.state().translate, Point::ZERO);
    }

    #[test]
    fn test_move_before_enter_is_ignored() {
        let mut zoom = ZoomController::new(InteractionStrategy::Hover, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        assert_eq!(zoom.state().translate, Point::ZERO);
    }

    #[test]
    fn test_touch_tap_toggles_and_resets_translate() {
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Enter, FRAME);
        assert_eq!(zoom.phase(), ZoomPhase::Idle);

        zoom.handle(PointerEvent::Tap, FRAME);
        assert_eq!(zoom.phase(), ZoomPhase::Zoomed);

        let id = PointerId(1);
        zoom.handle(PointerEvent::Down { id, position: Point::new(300.0, 200.0) }, FRAME);
        zoom.handle(PointerEvent::Move { position: Point::new(330.0, 180.0) }, FRAME);
        zoom.handle(PointerEvent::Up { id }, FRAME);
        assert_eq!(zoom.state().translate, Point::new(30.0, -20.0));

        let transform = zoom.handle(PointerEvent::Tap, FRAME);
        assert_eq!(transform, ZoomTransform::IDENTITY);
        assert_eq!(zoom.state().translate, Point::ZERO);
    }

    #[test]
    fn test_touch_ignores_hover_easing() {
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Tap, FRAME);
        zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        assert_eq!(zoom.state().translate, Point::ZERO);
    }

    #[test]
    fn test_drag_cycle_and_clamping() {
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Tap, FRAME);

        let id = PointerId(7);
        zoom.handle(PointerEvent::Down { id, position: Point::new(200.0, 200.0) }, FRAME);
        assert_eq!(zoom.phase(), ZoomPhase::Dragging);

        zoom.handle(PointerEvent::Move { position: Point::new(2000.0, -2000.0) }, FRAME);
        let max = zoom.bounds(FRAME);
        assert_eq!(zoom.state().translate, Point::new(max.x, -max.y));

        zoom.handle(PointerEvent::Cancel { id }, FRAME);
        assert_eq!(zoom.phase(), ZoomPhase::Zoomed);
    }

    #[test]
    fn test_drag_starts_from_current_translate() {
        let mut zoom = ZoomController::new(InteractionStrategy::Hover, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Enter, FRAME);
        zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        let before = zoom.state().translate;

        let id = PointerId(2);
        zoom.handle(PointerEvent::Down { id, position: Point::new(150.0, 100.0) }, FRAME);
        assert_eq!(zoom.state().drag_origin_translate, before);
        zoom.handle(PointerEvent::Move { position: Point::new(140.0, 100.0) }, FRAME);
        assert!((zoom.state().translate.x - (before.x - 10.0)).abs() < 1e-4);
        assert!((zoom.state().translate.y - before.y).abs() < 1e-4);
    }

    #[test]
    fn test_down_while_idle_does_not_drag() {
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Down { id: PointerId(1), position: Point::ZERO }, FRAME);
        assert_eq!(zoom.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn test_uncaptured_release_is_tolerated() {
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Tap, FRAME);
        assert_eq!(
            zoom.release_capture(PointerId(99)),
            Err(CaptureError::NotCaptured(PointerId(99)))
        );
        zoom.handle(PointerEvent::Up { id: PointerId(99) }, FRAME);
        assert_eq!(zoom.phase(), ZoomPhase::Zoomed);
    }

    #[test]
    fn test_translate_stays_in_bounds_for_any_sequence() {
        for strategy in [InteractionStrategy::Hover, InteractionStrategy::Touch] {
            let mut zoom = ZoomController::new(strategy, DEFAULT_SCALE);
            let mut rng = SeededNoise::new(2024);
            for _ in 0..5000 {
                let position = Point::new(rng.next_f32() * 1200.0 - 300.0, rng.next_f32() * 900.0 - 200.0);
                let id = PointerId(u64::from(rng.next_u32() % 3));
                let event = match rng.next_u32() % 7 {
                    0 => PointerEvent::Enter,
                    1 => PointerEvent::Leave,
                    2 => PointerEvent::Tap,
                    3 => PointerEvent::Down { id, position },
                    4 => PointerEvent::Up { id },
                    5 => PointerEvent::Cancel { id },
                    _ => PointerEvent::Move { position },
                };
                zoom.handle(event, FRAME);
                assert_in_bounds(&zoom, FRAME);
                if zoom.phase() == ZoomPhase::Idle {
                    assert_eq!(zoom.state().translate, Point::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_shrinking_frame_reclamps_translate() {
        let large = FrameRect {
            left: 0.0,
            top: 0.0,
            width: 560.0,
            height: 370.0,
        };
        let small = FrameRect {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 132.0,
        };
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Tap, large);

        let id = PointerId(1);
        zoom.handle(PointerEvent::Down { id, position: Point::new(280.0, 185.0) }, large);
        zoom.handle(PointerEvent::Move { position: Point::new(2000.0, 2000.0) }, large);
        zoom.handle(PointerEvent::Up { id }, large);
        assert_eq!(zoom.state().translate, zoom.bounds(large));

        let transform = zoom.handle(PointerEvent::Enter, small);
        let max = zoom.bounds(small);
        assert_eq!(transform.translate, max);
        assert_in_bounds(&zoom, small);
    }

    #[test]
    fn test_fit_clamps_without_an_event() {
        let mut zoom = ZoomController::new(InteractionStrategy::Hover, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Enter, FRAME);
        for _ in 0..200 {
            zoom.handle(PointerEvent::Move { position: Point::new(100.0, 50.0) }, FRAME);
        }
        let narrow = FrameRect {
            width: 100.0,
            height: 75.0,
            ..FRAME
        };
        let transform = zoom.fit(narrow);
        assert_in_bounds(&zoom, narrow);
        assert_eq!(transform.translate, zoom.state().translate);
    }

    #[test]
    fn test_fit_mid_drag_keeps_the_drag_anchored_in_bounds() {
        let mut zoom = ZoomController::new(InteractionStrategy::Touch, DEFAULT_SCALE);
        zoom.handle(PointerEvent::Tap, FRAME);
        let id = PointerId(3);
        zoom.handle(PointerEvent::Down { id, position: Point::new(300.0, 200.0) }, FRAME);
        zoom.handle(PointerEvent::Move { position: Point::new(900.0, 900.0) }, FRAME);
        zoom.handle(PointerEvent::Up { id }, FRAME);
        zoom.handle(PointerEvent::Down { id, position: Point::new(300.0, 200.0) }, FRAME);

        let narrow = FrameRect {
            width: 120.0,
            height: 90.0,
            ..FRAME
        };
        zoom.fit(narrow);
        let max = zoom.bounds(narrow);
        assert_eq!(zoom.state().drag_origin_translate, max);

        // Moving back by one point leaves the anchored drag inside the new bounds.
        zoom.handle(PointerEvent::Move { position: Point::new(299.0, 200.0) }, narrow);
        assert!((zoom.state().translate.x - (max.x - 1.0)).abs() < 1e-4);
        assert_in_bounds(&zoom, narrow);
    }

    #[test]
    fn test_translate_stays_in_bounds_while_frame_resizes() {
        for strategy in [InteractionStrategy::Hover, InteractionStrategy::Touch] {
            let mut zoom = ZoomController::new(strategy, DEFAULT_SCALE);
            let mut rng = SeededNoise::new(77);
            for _ in 0..5000 {
                let frame = FrameRect {
                    left: rng.next_f32() * 200.0,
                    top: rng.next_f32() * 200.0,
                    width: 40.0 + rng.next_f32() * 600.0,
                    height: 30.0 + rng.next_f32() * 400.0,
                };
                let position = Point::new(rng.next_f32() * 1200.0 - 300.0, rng.next_f32() * 900.0 - 200.0);
                let id = PointerId(u64::from(rng.next_u32() % 3));
                let event = match rng.next_u32() % 7 {
                    0 => PointerEvent::Enter,
                    1 => PointerEvent::Leave,
                    2 => PointerEvent::Tap,
                    3 => PointerEvent::Down { id, position },
                    4 => PointerEvent::Up { id },
                    5 => PointerEvent::Cancel { id },
                    _ => PointerEvent::Move { position },
                };
                zoom.handle(event, frame);
                assert_in_bounds(&zoom, frame);
            }
        }
    }
}
