//! Bottom status bar rendering.

use super::super::*;
use crate::app::style::{COLOR_TEXT_SECONDARY, COLOR_UNREAD};
use eframe::egui;
use folio_core::models::RecordKind;

impl FolioApp {
    pub(in crate::app) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(status) = &self.status {
                        ui.label(egui::RichText::new(&status.text).color(egui::Color32::YELLOW));
                        ui.separator();
                    }
                    let unread = self
                        .dash
                        .rows(RecordKind::Submissions)
                        .iter()
                        .filter(|record| {
                            matches!(
                                record,
                                folio_core::models::Record::Submission(s)
                                    if s.status == folio_core::models::SubmissionStatus::Unread
                            )
                        })
                        .count();
                    if unread > 0 {
                        ui.label(
                            egui::RichText::new(format!("{} unread", unread))
                                .small()
                                .color(COLOR_UNREAD),
                        );
                        ui.separator();
                    }
                    ui.label(
                        egui::RichText::new(format!("viewing {}", self.dash.kind().label()))
                            .small()
                            .color(COLOR_TEXT_SECONDARY),
                    );
                });
            });
    }
}
