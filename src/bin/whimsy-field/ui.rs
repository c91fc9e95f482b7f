//! UI rendering methods for the field, the overlay and the bars around them.

use crate::WhimsyFieldApp;
use crate::assets::AssetLoadState;
use crate::colors;
use crate::constants::{
    CARD_GLOW_RADIUS, CARD_HEIGHT, OVERLAY_MARGIN, OVERLAY_MAX_WIDTH, PULSE_DURATION,
    STACK_SPACING, ZOOM_FRAME_ASPECT, ZOOM_FRAME_MAX_WIDTH,
};
use crate::detail::{Mounted, open_mail};
use eframe::egui;
use std::time::Instant;
use whimsy_field::layout::{FOOTPRINT_WIDTH, LayoutMode};
use whimsy_field::navigation::NavInput;
use whimsy_field::zoom::{InteractionStrategy, ZoomPhase, ZoomTransform};
use whimsy_field::{Block, Item};

/// Pointer position inside `rect` as percentages of its size.
fn card_glow_percent(rect: egui::Rect, pointer: egui::Pos2) -> egui::Vec2 {
    let offset = pointer - rect.min;
    egui::vec2(
        offset.x / rect.width() * 100.0,
        offset.y / rect.height() * 100.0,
    )
}

/// Size of `image` scaled to cover `frame` while keeping its aspect ratio.
fn cover_size(image: egui::Vec2, frame: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return frame;
    }
    image * (frame.x / image.x).max(frame.y / image.y)
}

/// Paints a card; `pulse` fades from 1 to 0 after keyboard/tap focus.
fn paint_card(ui: &egui::Ui, item: &Item, response: &egui::Response, pulse: f32, hushed: bool) {
    let rect = response.rect;
    let painter = ui.painter_at(rect.expand(6.0));
    let dim = |color: egui::Color32| {
        if hushed {
            color.gamma_multiply(colors::HUSH_DIM)
        } else {
            color
        }
    };

    painter.rect_filled(rect, 10.0, colors::CARD_FILL);

    if response.hovered()
        && let Some(pointer) = response.hover_pos()
    {
        let glow = card_glow_percent(rect, pointer);
        let center = rect.min + rect.size() * (glow / 100.0);
        painter
            .with_clip_rect(rect)
            .circle_filled(center, CARD_GLOW_RADIUS, colors::CARD_GLOW);
    }

    let stroke_color = if response.has_focus() {
        colors::CARD_FOCUS_STROKE
    } else {
        colors::CARD_STROKE
    };
    painter.rect_stroke(
        rect,
        10.0,
        egui::Stroke::new(1.0, stroke_color),
        egui::StrokeKind::Inside,
    );
    if pulse > 0.0 {
        painter.rect_stroke(
            rect.expand(4.0 * pulse),
            12.0,
            egui::Stroke::new(2.0, colors::CARD_FOCUS_STROKE.gamma_multiply(pulse)),
            egui::StrokeKind::Outside,
        );
    }

    let left = rect.left() + 16.0;
    painter.text(
        egui::pos2(left, rect.top() + 14.0),
        egui::Align2::LEFT_TOP,
        &item.title,
        egui::FontId::proportional(17.0),
        colors::TITLE_TEXT,
    );
    painter.text(
        egui::pos2(left, rect.top() + 40.0),
        egui::Align2::LEFT_TOP,
        &item.meta,
        egui::FontId::proportional(12.0),
        dim(colors::META_TEXT),
    );

    // Weight row
    let row_y = rect.bottom() - 22.0;
    painter.text(
        egui::pos2(left, row_y),
        egui::Align2::LEFT_CENTER,
        "weight",
        egui::FontId::proportional(10.0),
        dim(colors::META_TEXT),
    );
    let track = egui::Rect::from_min_max(
        egui::pos2(left + 52.0, row_y - 2.0),
        egui::pos2(rect.right() - 16.0, row_y + 2.0),
    );
    painter.rect_filled(track, 2.0, dim(colors::WEIGHT_TRACK));
    let mut fill = track;
    fill.set_width(track.width() * item.weight_fill());
    painter.rect_filled(fill, 2.0, dim(colors::WEIGHT_FILL));
}

/// Small round glyph in front of tags.
fn spark(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), 3.5, colors::SPARK);
}

impl WhimsyFieldApp {
    /// Enter advances through the catalog; Escape closes and resets.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Consumed here so a focused card or button doesn't also react.
        let (enter, escape) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::NONE, egui::Key::Enter),
                i.consume_key(egui::Modifiers::NONE, egui::Key::Escape),
            )
        });

        if escape {
            self.navigate(NavInput::Escape);
        } else if enter {
            self.navigate(NavInput::Advance);
        }
    }

    /// Renders the top bar with the hush/speak toggle.
    pub fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("whimsy cyberspace");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.display_mode.toggle_label()).clicked() {
                        self.display_mode = self.display_mode.toggled();
                        log::debug!("Display mode: {:?}", self.display_mode);
                    }
                });
            });
        });
    }

    /// Renders the bottom hint. On touch it doubles as an advance control.
    pub fn show_hint_bar(&mut self, ctx: &egui::Context) {
        let mut advance = false;

        egui::TopBottomPanel::bottom("hint_bar").show(ctx, |ui| {
            ui.horizontal(|ui| match self.strategy {
                InteractionStrategy::Touch => {
                    let response = ui
                        .add(
                            egui::Label::new("tap to step in · tap again to cycle")
                                .sense(egui::Sense::click()),
                        )
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .on_hover_text("Tap to step in");
                    advance = response.clicked();
                }
                InteractionStrategy::Hover => {
                    ui.label("enter to step in · esc to step out");
                }
            });
        });

        if advance {
            self.navigate(NavInput::Advance);
        }
    }

    /// Renders the field and, on top of it, the overlay when one is open.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(colors::FIELD_BG))
            .show(ctx, |ui| {
                let panel_rect = ui.max_rect();
                self.update_layout(ctx, panel_rect.size());
                self.expire_pulse(ctx);

                if self.catalog.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label("Nothing here yet.");
                    });
                    return;
                }

                match self.layout_mode {
                    LayoutMode::Scattered => self.show_scattered_field(ui, panel_rect),
                    LayoutMode::Stacked => self.show_stacked_field(ui),
                }

                if self.detail.is_some() {
                    self.show_overlay(ctx, panel_rect);
                }
            });
    }

    fn expire_pulse(&mut self, ctx: &egui::Context) {
        if let Some((_, start)) = self.pulse {
            let elapsed = start.elapsed();
            if elapsed >= PULSE_DURATION {
                self.pulse = None;
            } else {
                ctx.request_repaint();
            }
        }
    }

    fn pulse_amount(&self, index: usize, now: Instant) -> f32 {
        match self.pulse {
            Some((pulsing, start)) if pulsing == index => {
                let t = now.duration_since(start).as_secs_f32() / PULSE_DURATION.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Cards at their scattered offsets.
    fn show_scattered_field(&mut self, ui: &mut egui::Ui, panel_rect: egui::Rect) {
        let now = Instant::now();
        let focus = self.focus_card.take();
        let hushed = self.display_mode.is_hushed();
        let mut clicked = None;

        for result in &self.layout {
            let Some(item) = self.catalog.get(result.index) else {
                continue;
            };
            let rect = egui::Rect::from_min_size(
                panel_rect.min + egui::vec2(result.left, result.top),
                egui::vec2(FOOTPRINT_WIDTH, CARD_HEIGHT),
            );
            let response = ui
                .interact(rect, ui.id().with(("card", result.index)), egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if focus == Some(result.index) {
                response.request_focus();
            }
            paint_card(ui, item, &response, self.pulse_amount(result.index, now), hushed);

            if response.clicked() {
                clicked = Some(result.index);
            }
        }

        if let Some(index) = clicked {
            self.navigate(NavInput::Open(index));
        }
    }

    /// Narrow viewport: cards in a plain scrolling list.
    fn show_stacked_field(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        let focus = self.focus_card.take();
        let hushed = self.display_mode.is_hushed();
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(STACK_SPACING);
                for (index, item) in self.catalog.iter().enumerate() {
                    let size = egui::vec2(ui.available_width() - STACK_SPACING, CARD_HEIGHT);
                    let (_, response) = ui.allocate_exact_size(size, egui::Sense::click());
                    let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
                    if focus == Some(index) {
                        response.request_focus();
                        response.scroll_to_me(None);
                    }
                    paint_card(ui, item, &response, self.pulse_amount(index, now), hushed);

                    if response.clicked() {
                        clicked = Some(index);
                    }
                    ui.add_space(STACK_SPACING);
                }
            });

        if let Some(index) = clicked {
            self.navigate(NavInput::Open(index));
        }
    }

    /// Renders the backdrop and the detail panel, then reports what was drawn
    /// back to the detail view.
    fn show_overlay(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let Some(index) = self.detail.as_ref().map(|detail| detail.index) else {
            return;
        };
        let Some(item) = self.catalog.get(index).cloned() else {
            self.navigate(NavInput::Close);
            return;
        };
        let focus_close = self
            .detail
            .as_mut()
            .is_some_and(|detail| std::mem::take(&mut detail.focus_close));

        let mut close = false;
        let mut mounted = Mounted::default();

        egui::Area::new(egui::Id::new("overlay_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(panel_rect.min)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(panel_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(rect, 0.0, colors::BACKDROP);
                if response.clicked() {
                    close = true;
                }
            });

        let width = (panel_rect.width() - OVERLAY_MARGIN * 2.0)
            .min(OVERLAY_MAX_WIDTH)
            .max(200.0);
        let body_height = (panel_rect.height() - OVERLAY_MARGIN * 2.0 - 110.0).max(120.0);

        egui::Area::new(egui::Id::new("overlay_panel"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::CENTER_CENTER)
            .fixed_pos(panel_rect.center())
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .inner_margin(egui::Margin::same(20))
                    .show(ui, |ui| {
                        ui.set_width(width);

                        ui.horizontal(|ui| {
                            ui.heading(item.title.to_uppercase());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let response = ui.button("close");
                                    if focus_close {
                                        response.request_focus();
                                    }
                                    if response.clicked() {
                                        close = true;
                                    }
                                },
                            );
                        });
                        ui.label(egui::RichText::new(&item.overlay_meta).color(colors::META_TEXT));
                        ui.separator();

                        egui::ScrollArea::vertical()
                            .max_height(body_height)
                            .show(ui, |ui| {
                                mounted = self.show_detail_body(ui, &item);
                            });
                    });
            });

        if let Some(detail) = self.detail.as_mut()
            && !detail.is_mounted()
        {
            detail.on_mounted(mounted, self.strategy, self.zoom_scale);
        }

        if close {
            self.navigate(NavInput::Close);
        }
    }

    /// Renders the item's body blocks and returns which interactive elements exist.
    fn show_detail_body(&mut self, ui: &mut egui::Ui, item: &Item) -> Mounted {
        let mut mounted = Mounted::default();

        for block in &item.body {
            match block {
                Block::Tag(text) => {
                    ui.horizontal(|ui| {
                        spark(ui);
                        ui.label(egui::RichText::new(text.to_uppercase()).small().strong());
                    });
                }
                Block::Paragraph(text) => {
                    ui.label(text);
                }
                Block::Emphasis(text) => {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(text).strong());
                    ui.add_space(6.0);
                }
                Block::Small(text) => {
                    ui.label(egui::RichText::new(text).small().weak());
                }
                Block::Callout { heading, lines } => {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.strong(heading);
                        for line in lines {
                            ui.label(egui::RichText::new(format!("• {line}")).small());
                        }
                    });
                }
                Block::Mail { label, address } => {
                    mounted.mail_links += 1;
                    let clicked = ui
                        .horizontal(|ui| {
                            ui.label(egui::RichText::new(label).small());
                            ui.link(address).clicked()
                        })
                        .inner;
                    if clicked && let Err(err) = open_mail(address) {
                        log::warn!("{err}");
                        self.error_toast(err.to_string());
                    }
                }
                Block::Artifact { image_path, alt } => {
                    mounted.zoom_frame = true;
                    self.show_zoom_frame(ui, image_path, alt);
                }
            }
            ui.add_space(4.0);
        }

        mounted
    }

    /// Renders the artifact frame and drives its zoom controller.
    fn show_zoom_frame(&mut self, ui: &mut egui::Ui, image_path: &str, alt: &str) {
        let width = ui.available_width().min(ZOOM_FRAME_MAX_WIDTH);
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(width, width * ZOOM_FRAME_ASPECT),
            egui::Sense::click_and_drag(),
        );

        let texture = self
            .get_texture(image_path)
            .map(|texture| (texture.id(), texture.size_vec2()));
        let failed = matches!(
            self.asset_cache.get(image_path),
            Some(AssetLoadState::Error(_))
        );

        let (transform, phase, strategy) = match self.detail.as_mut() {
            Some(detail) => {
                detail.drive_zoom(ui, &response);
                match detail.zoom() {
                    Some(zoom) => (zoom.transform(), zoom.phase(), zoom.strategy()),
                    None => (ZoomTransform::IDENTITY, ZoomPhase::Idle, self.strategy),
                }
            }
            None => (ZoomTransform::IDENTITY, ZoomPhase::Idle, self.strategy),
        };

        let painter = ui.painter().with_clip_rect(rect);
        painter.rect_filled(rect, 4.0, colors::CARD_FILL);

        match texture {
            Some((texture_id, image_size)) => {
                let size = cover_size(image_size, rect.size()) * transform.scale;
                let center =
                    rect.center() + egui::vec2(transform.translate.x, transform.translate.y);
                painter.image(
                    texture_id,
                    egui::Rect::from_center_size(center, size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                let text = if failed { alt } else { "loading…" };
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(13.0),
                    colors::META_TEXT,
                );
            }
        }

        let stroke_color = if transform.zoomed {
            colors::FRAME_ZOOMED_STROKE
        } else {
            colors::FRAME_STROKE
        };
        ui.painter().rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(1.0, stroke_color),
            egui::StrokeKind::Inside,
        );

        let cursor = match phase {
            ZoomPhase::Idle => egui::CursorIcon::ZoomIn,
            ZoomPhase::Zoomed => egui::CursorIcon::Grab,
            ZoomPhase::Dragging => egui::CursorIcon::Grabbing,
        };
        let hint = match strategy {
            InteractionStrategy::Touch => "Tap to zoom. Drag to pan.",
            InteractionStrategy::Hover => "Hover to zoom. Drag to pan.",
        };
        response.on_hover_cursor(cursor).on_hover_text(hint);
    }
}
