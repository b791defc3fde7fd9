//! Transient feedback overlay for confirmed actions and failures.

use crate::app::style::{COLOR_ACCENT, COLOR_BG_SECONDARY, COLOR_DANGER, COLOR_TEXT_PRIMARY};
use crate::app::{FolioApp, ToastKind};
use eframe::egui::{self, Align2, CornerRadius, Frame, Margin, RichText, Stroke};
use std::time::Instant;

impl FolioApp {
    /// Draws the feedback queue stacked above the status bar, oldest at the
    /// top. Notices carry the accent stroke, errors the danger stroke, and
    /// each entry fades out over its final second on screen.
    pub(in crate::app) fn render_toasts(&mut self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        let now = Instant::now();

        egui::Area::new(egui::Id::new("feedback_overlay"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_max_width(340.0);
                for toast in &self.toasts {
                    let remaining = toast.expires_at.saturating_duration_since(now);
                    let alpha = remaining.as_secs_f32().clamp(0.0, 1.0);
                    let accent = match toast.kind {
                        ToastKind::Notice => COLOR_ACCENT,
                        ToastKind::Error => COLOR_DANGER,
                    };
                    Frame::new()
                        .fill(COLOR_BG_SECONDARY.gamma_multiply(alpha))
                        .stroke(Stroke::new(1.0, accent.gamma_multiply(alpha)))
                        .corner_radius(CornerRadius::same(4))
                        .inner_margin(Margin::symmetric(10, 6))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(&toast.text)
                                    .color(COLOR_TEXT_PRIMARY.gamma_multiply(alpha)),
                            );
                        });
                    ui.add_space(6.0);
                }
            });
    }
}
