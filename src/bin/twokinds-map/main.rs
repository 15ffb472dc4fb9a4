#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod constants;
mod coordinates;
mod overlays;
mod ui;

use assets::{AssetLoadState, load_and_decode_image, load_content};
use constants::WINDOW_SIZE;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::sync::mpsc;
use std::thread;
use twokinds_map::{MapContent, Viewer};

/// Main application state for the map viewer.
pub struct TwoKindsMapApp {
    content: Option<MapContent>,
    viewer: Option<Viewer>,
    image: AssetLoadState,
    texture: Option<TextureHandle>,
    toasts: Toasts,
}

impl TwoKindsMapApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let content = match load_content() {
            Ok(content) => Some(content),
            Err(err) => {
                log::error!("{err}");
                add_error_toast(&mut toasts, err.to_string(), 10.0);
                None
            }
        };

        let mut viewer = None;
        let image = match &content {
            Some(content) => {
                let issues = content.validate();
                for issue in &issues {
                    log::warn!("content: {issue}");
                }
                cc.egui_ctx
                    .send_viewport_cmd(egui::ViewportCommand::Title(content.title.clone()));

                if let Some(issue) = issues.iter().find(|issue| issue.blocks_viewer()) {
                    log::error!("cannot show map: {issue}");
                    add_error_toast(&mut toasts, format!("Cannot show map: {issue}"), 10.0);
                    AssetLoadState::Error(issue.to_string())
                } else {
                    viewer = Some(Viewer::new(content));
                    spawn_image_load(&cc.egui_ctx, &content.image_path)
                }
            }
            None => AssetLoadState::Error("no map content".to_owned()),
        };

        Self {
            content,
            viewer,
            image,
            texture: None,
            toasts,
        }
    }

    /// Polls the background image load and creates the texture once ready.
    fn poll_image(&mut self, ctx: &egui::Context) {
        let AssetLoadState::Loading(rx) = &self.image else {
            return;
        };
        let path = self
            .content
            .as_ref()
            .map(|content| content.image_path.clone())
            .unwrap_or_default();

        match rx.try_recv() {
            Ok(Ok(decoded)) => {
                let image = ColorImage::from_rgba_unmultiplied(
                    [decoded.width as usize, decoded.height as usize],
                    &decoded.pixels,
                );
                self.texture = Some(ctx.load_texture(&path, image, TextureOptions::LINEAR));
                self.image = AssetLoadState::Ready;
                log::info!("loaded {path} ({}x{})", decoded.width, decoded.height);
            }
            Ok(Err(err)) => {
                let msg = err.to_string();
                log::error!("{msg}");
                add_error_toast(&mut self.toasts, msg.clone(), 8.0);
                self.image = AssetLoadState::Error(msg);
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                let msg = format!("{path}: channel disconnected");
                log::error!("{msg}");
                add_error_toast(&mut self.toasts, msg.clone(), 8.0);
                self.image = AssetLoadState::Error(msg);
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }
    }
}

impl eframe::App for TwoKindsMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image(ctx);

        // One animation step per frame, before layout reads the widths.
        if let Some(viewer) = &mut self.viewer {
            viewer.tick();
        }

        self.handle_keyboard_input(ctx);
        self.show_status_bar(ctx);
        self.show_central_panel(ctx);

        if self.viewer.as_ref().is_some_and(Viewer::is_animating) {
            ctx.request_repaint();
        }

        // Show toasts
        self.toasts.show(ctx);
    }
}

/// Decodes the base image on a background thread.
fn spawn_image_load(ctx: &egui::Context, path: &str) -> AssetLoadState {
    let (tx, rx) = mpsc::channel();
    let ctx = ctx.clone();
    let asset_path = path.to_owned();

    thread::spawn(move || {
        let result = load_and_decode_image(&asset_path);
        let _ = tx.send(result);
        ctx.request_repaint();
    });

    AssetLoadState::Loading(rx)
}

fn add_error_toast(toasts: &mut Toasts, text: String, seconds: f64) {
    toasts.add(Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(seconds)
            .show_icon(true),
        ..Default::default()
    });
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Twokinds Map",
        options,
        Box::new(|cc| Ok(Box::new(TwoKindsMapApp::new(cc)))),
    )
}
