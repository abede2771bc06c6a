//! Dashboard principal – App eframe/egui.

use crate::egui_canvas::{EguiCanvas, color32};
use cluster_core::FrameAssembler;
use cluster_core::config::AppConfig;
use cluster_core::override_source::FeedStatus;
use egui::{Align2, Color32, FontId};
use std::time::{Duration, Instant};
use tracing::info;

/// Estado do dashboard.
pub struct ClusterDashboard {
    frame: FrameAssembler,
    started: Instant,
    /// Tamanho lógico do layout
    size: (f32, f32),
    frame_interval: Duration,
    udp_port: Option<u16>,
    is_fullscreen: bool,
    status_ok: Color32,
    status_wait: Color32,
}

impl ClusterDashboard {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &AppConfig, frame: FrameAssembler) -> Self {
        let theme = frame.cluster().theme();
        let status_ok = color32(theme.colors.zone_normal);
        let status_wait = color32(theme.colors.zone_danger);
        info!(
            "Painel '{}' iniciado ({}x{} @ {} fps)",
            theme.name, config.display.width, config.display.height, config.display.fps
        );

        Self {
            frame,
            started: Instant::now(),
            size: (config.display.width as f32, config.display.height as f32),
            frame_interval: config.frame_interval(),
            udp_port: config.network.enabled.then_some(config.network.port),
            is_fullscreen: config.display.fullscreen,
            status_ok,
            status_wait,
        }
    }

    /// Texto e cor da linha de status do override.
    fn status_line(&self, status: &FeedStatus) -> (String, Color32) {
        match (status.last_source, status.since_last) {
            (Some(source), Some(age)) if status.latched => (
                format!(
                    "● UDP {} | {} bytes | {}ms atrás",
                    source,
                    status.last_size,
                    age.as_millis()
                ),
                self.status_ok,
            ),
            _ => (
                format!(
                    "○ Aguardando dados na porta {}...",
                    self.udp_port.unwrap_or_default()
                ),
                self.status_wait,
            ),
        }
    }
}

impl eframe::App for ClusterDashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(self.frame_interval);

        // ── Atalhos de teclado ──
        ctx.input(|i: &egui::InputState| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            if i.key_pressed(egui::Key::F) || i.key_pressed(egui::Key::F11) {
                self.is_fullscreen = !self.is_fullscreen;
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.is_fullscreen));
            }
        });

        let t = self.started.elapsed().as_secs_f64();
        let (w, h) = self.size;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(Color32::BLACK))
            .show(ctx, |ui: &mut egui::Ui| {
                let area = ui.max_rect();
                let painter = ui.painter();
                let mut canvas = EguiCanvas::fit(painter, area, w, h);
                self.frame.tick(t, &mut canvas);

                // ── Status do override ──
                if let Some(status) = self.frame.feed_status() {
                    let (text, color) = self.status_line(&status);
                    painter.text(
                        area.left_top() + egui::vec2(10.0, 6.0),
                        Align2::LEFT_TOP,
                        text,
                        FontId::monospace(12.0),
                        color,
                    );
                }
            });
    }
}
