#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod config;
mod constants;
mod detail;
mod ui;

use assets::{AssetLoadState, artifact_images, load_and_decode_image, load_catalog};
use clap::Parser;
use config::{Cli, Settings};
use detail::DetailView;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;
use whimsy_field::Catalog;
use whimsy_field::debounce::Debouncer;
use whimsy_field::display::DisplayMode;
use whimsy_field::layout::{LayoutMode, LayoutResult, compute_layout};
use whimsy_field::navigation::{NavEffect, NavInput, NavigationState};
use whimsy_field::zoom::InteractionStrategy;

/// Main application state for the field.
pub struct WhimsyFieldApp {
    catalog: Catalog,
    strategy: InteractionStrategy,
    zoom_scale: f32,
    display_mode: DisplayMode,
    navigation: NavigationState,
    detail: Option<DetailView>,
    layout: Vec<LayoutResult>,
    layout_mode: LayoutMode,
    /// Container size the current layout was computed for.
    layout_size: Option<egui::Vec2>,
    /// Container size seen on the latest frame.
    observed_size: Option<egui::Vec2>,
    resize: Debouncer,
    /// Card to focus on the next frame.
    focus_card: Option<usize>,
    pulse: Option<(usize, Instant)>,
    asset_cache: HashMap<String, AssetLoadState>,
    texture_cache: HashMap<String, TextureHandle>,
    toasts: Toasts,
}

impl WhimsyFieldApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let catalog = match load_catalog() {
            Ok(catalog) => {
                log::info!("Loaded {} catalog items", catalog.len());
                catalog
            }
            Err(err) => {
                log::error!("{err}");
                toasts.add(Toast {
                    kind: ToastKind::Error,
                    text: err.to_string().into(),
                    options: ToastOptions::default()
                        .duration_in_seconds(10.0)
                        .show_icon(true),
                    ..Default::default()
                });
                Vec::new()
            }
        };

        let mut asset_cache = HashMap::new();

        // Decode artifact images in the background
        for path in artifact_images(&catalog) {
            let (tx, rx) = mpsc::channel();
            let ctx = cc.egui_ctx.clone();
            let asset_path = path.clone();

            thread::spawn(move || {
                let result = load_and_decode_image(&asset_path);
                let _ = tx.send(result);
                ctx.request_repaint();
            });

            asset_cache.insert(path, AssetLoadState::Loading(rx));
        }

        log::info!(
            "Interaction strategy: {:?}, zoom scale {}",
            settings.strategy,
            settings.zoom_scale
        );

        Self {
            catalog,
            strategy: settings.strategy,
            zoom_scale: settings.zoom_scale,
            display_mode: settings.display_mode,
            navigation: NavigationState::default(),
            detail: None,
            layout: Vec::new(),
            layout_mode: LayoutMode::Scattered,
            layout_size: None,
            observed_size: None,
            resize: Debouncer::default(),
            focus_card: None,
            pulse: None,
            asset_cache,
            texture_cache: HashMap::new(),
            toasts,
        }
    }

    /// Polls all loading images and creates textures for ready ones.
    fn poll_all_assets(&mut self, ctx: &egui::Context) {
        let mut updates: Vec<(String, AssetLoadState)> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for (path, state) in &mut self.asset_cache {
            if let AssetLoadState::Loading(rx) = state {
                match rx.try_recv() {
                    Ok(Ok(decoded)) => {
                        updates.push((path.clone(), AssetLoadState::Ready(decoded)));
                    }
                    Ok(Err(err)) => {
                        let msg = err.to_string();
                        errors.push(msg.clone());
                        updates.push((path.clone(), AssetLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Disconnected) => {
                        let msg = format!("{path}: channel disconnected");
                        errors.push(msg.clone());
                        updates.push((path.clone(), AssetLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Empty) => {}
                }
            }
        }

        for (path, new_state) in updates {
            self.asset_cache.insert(path, new_state);
        }

        for err in errors {
            log::warn!("{err}");
            self.error_toast(err);
        }

        let ready_paths: Vec<_> = self
            .asset_cache
            .iter()
            .filter(|(path, state)| {
                matches!(state, AssetLoadState::Ready(_)) && !self.texture_cache.contains_key(*path)
            })
            .map(|(path, _)| path.clone())
            .collect();

        for path in ready_paths {
            if let Some(AssetLoadState::Ready(decoded)) = self.asset_cache.get(&path) {
                let image = ColorImage::from_rgba_unmultiplied(
                    [decoded.width as usize, decoded.height as usize],
                    &decoded.pixels,
                );
                let texture = ctx.load_texture(&path, image, TextureOptions::LINEAR);
                self.texture_cache.insert(path, texture);
            }
        }
    }

    fn get_texture(&self, path: &str) -> Option<&TextureHandle> {
        self.texture_cache.get(path)
    }

    fn error_toast(&mut self, text: String) {
        self.toasts.add(Toast {
            kind: ToastKind::Error,
            text: text.into(),
            options: ToastOptions::default()
                .duration_in_seconds(8.0)
                .show_icon(true),
            ..Default::default()
        });
    }

    /// Runs one navigation input through the state object and applies its effect.
    fn navigate(&mut self, input: NavInput) {
        let transition = self.navigation.apply(input, self.catalog.len());
        self.navigation = transition.state;
        log::trace!(
            "{input:?} -> cycle {:?}, effect {:?}",
            self.navigation.cycle_index(),
            transition.effect
        );

        match transition.effect {
            Some(NavEffect::Open { index, focus_card }) => {
                if focus_card {
                    self.focus_card = Some(index);
                    self.pulse = Some((index, Instant::now()));
                }
                self.open_detail(index);
            }
            Some(NavEffect::Close) => self.close_detail(),
            None => {}
        }
    }

    fn open_detail(&mut self, index: usize) {
        if let Some(mut previous) = self.detail.take() {
            previous.close();
        }
        if let Some(item) = self.catalog.get(index) {
            log::debug!("Opening {}", item.key);
        }
        self.detail = Some(DetailView::new(index));
    }

    fn close_detail(&mut self) {
        if let Some(mut detail) = self.detail.take() {
            detail.close();
        }
    }

    /// Recomputes the layout immediately for the first size, then only once
    /// resizes have been quiet for the debounce window.
    fn update_layout(&mut self, ctx: &egui::Context, size: egui::Vec2) {
        if self.layout_size.is_none() {
            self.observed_size = Some(size);
            self.rebuild_layout(size);
            return;
        }

        let now = Instant::now();
        if self.observed_size != Some(size) {
            self.observed_size = Some(size);
            self.resize.trigger(now);
        }

        if self.resize.poll(now) {
            self.rebuild_layout(size);
        } else if let Some(remaining) = self.resize.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn rebuild_layout(&mut self, size: egui::Vec2) {
        self.layout_mode = LayoutMode::for_viewport(size.x);
        self.layout = compute_layout(&self.catalog, size.x, size.y, self.layout_mode);
        self.layout_size = Some(size);
        log::debug!(
            "Layout rebuilt for {:.0}x{:.0} ({:?})",
            size.x,
            size.y,
            self.layout_mode
        );
    }
}

impl eframe::App for WhimsyFieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_all_assets(ctx);
        self.handle_keyboard_input(ctx);

        self.show_top_bar(ctx);
        self.show_hint_bar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_title("Whimsy Cyberspace"),
        ..Default::default()
    };

    eframe::run_native(
        "Whimsy Cyberspace",
        options,
        Box::new(move |cc| Ok(Box::new(WhimsyFieldApp::new(cc, settings)))),
    )
}
