//! Open detail view: per-overlay state and post-render wiring.

use eframe::egui;
use thiserror::Error;
use whimsy_field::zoom::{
    FrameRect, InteractionStrategy, Point, PointerEvent, PointerId, ZoomController,
};

/// egui merges mouse and touch into one pointer.
const PRIMARY_POINTER: PointerId = PointerId(0);

#[derive(Error, Debug)]
pub enum MailError {
    #[error("failed to open mail client for {address}: {source}")]
    Launch {
        address: String,
        source: std::io::Error,
    },
}

/// Hands a `mailto:` link to the platform handler.
pub fn open_mail(address: &str) -> Result<(), MailError> {
    open::that(format!("mailto:{address}")).map_err(|source| MailError::Launch {
        address: address.to_owned(),
        source,
    })
}

/// One frame of egui interaction on the zoom frame, reduced to plain flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameInput {
    pub hovered: bool,
    pub was_hovered: bool,
    pub pointer: Option<Point>,
    pub pointer_moved: bool,
    pub drag_started_at: Option<Point>,
    pub dragged: bool,
    pub drag_stopped: bool,
    pub clicked: bool,
    pub window_focused: bool,
}

impl FrameInput {
    /// Pointer events for this frame, in delivery order.
    pub fn events(&self) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        if self.hovered && !self.was_hovered {
            events.push(PointerEvent::Enter);
        }
        if let Some(position) = self.drag_started_at {
            events.push(PointerEvent::Down {
                id: PRIMARY_POINTER,
                position,
            });
        }
        if self.hovered
            && self.pointer_moved
            && let Some(position) = self.pointer
        {
            events.push(PointerEvent::Move { position });
        }
        if self.drag_stopped {
            events.push(PointerEvent::Up {
                id: PRIMARY_POINTER,
            });
        } else if self.dragged && !self.window_focused {
            events.push(PointerEvent::Cancel {
                id: PRIMARY_POINTER,
            });
        }
        if self.clicked {
            events.push(PointerEvent::Tap);
        }
        if !self.hovered && self.was_hovered {
            events.push(PointerEvent::Leave);
        }
        events
    }
}

/// What the renderer actually drew for the body on a given frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mounted {
    pub zoom_frame: bool,
    pub mail_links: usize,
}

/// State of the overlay while it shows one item.
pub struct DetailView {
    pub index: usize,
    /// Set until the close control has taken focus.
    pub focus_close: bool,
    zoom: Option<ZoomController>,
    mounted: bool,
    frame_hovered: bool,
    last_pointer: Option<egui::Pos2>,
}

impl DetailView {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            focus_close: true,
            zoom: None,
            mounted: false,
            frame_hovered: false,
            last_pointer: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn zoom(&self) -> Option<&ZoomController> {
        self.zoom.as_ref()
    }

    /// Called by the renderer once the body exists. Wires the zoom frame if
    /// one was drawn; does nothing on later calls.
    pub fn on_mounted(&mut self, mounted: Mounted, strategy: InteractionStrategy, scale: f32) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if mounted.zoom_frame {
            self.zoom = Some(ZoomController::new(strategy, scale));
        }
        log::debug!(
            "detail {} mounted: zoom frame {}, {} mail link(s)",
            self.index,
            mounted.zoom_frame,
            mounted.mail_links
        );
    }

    /// Translates this frame's egui response on the zoom frame into pointer
    /// events and feeds them to the controller.
    pub fn drive_zoom(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let Some(zoom) = self.zoom.as_mut() else {
            return;
        };
        let rect = response.rect;
        let frame = FrameRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };

        let pointer = ui.input(|i| i.pointer.latest_pos());
        let input = FrameInput {
            // The frame keeps the pointer until release, so no Leave mid-drag.
            hovered: response.contains_pointer() || response.dragged(),
            was_hovered: self.frame_hovered,
            pointer: pointer.map(|pos| Point::new(pos.x, pos.y)),
            pointer_moved: pointer.is_some() && self.last_pointer != pointer,
            drag_started_at: response
                .drag_started()
                .then(|| response.interact_pointer_pos())
                .flatten()
                .map(|pos| Point::new(pos.x, pos.y)),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
            clicked: response.clicked(),
            window_focused: ui.input(|i| i.focused),
        };

        zoom.fit(frame);
        for event in input.events() {
            zoom.handle(event, frame);
        }
        self.frame_hovered = input.hovered;
        self.last_pointer = pointer;
    }

    /// Drops all zoom state; the overlay is closing.
    pub fn close(&mut self) {
        if let Some(zoom) = self.zoom.as_mut() {
            zoom.reset();
        }
        log::debug!("detail {} closed", self.index);
    }
}
