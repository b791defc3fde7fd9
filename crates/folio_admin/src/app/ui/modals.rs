//! Submission detail, project/post editor, and delete-confirmation modals.

use crate::app::style::{COLOR_DANGER, COLOR_TEXT_SECONDARY};
use crate::app::FolioApp;
use eframe::egui::{self, Align2, RichText, TextEdit};
use folio_core::export::format_timestamp;
use folio_core::models::{RecordKind, RecordStatus, SubmissionStatus};

impl FolioApp {
    pub(in crate::app) fn render_modals(&mut self, ctx: &egui::Context) {
        self.render_submission_detail(ctx);
        self.render_editor(ctx);
        self.render_confirm_delete(ctx);
    }

    fn render_submission_detail(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.detail.clone() else {
            return;
        };
        let mut open = true;
        let mut archive = false;
        egui::Window::new("Submission")
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format_timestamp(submission.created_at))
                        .color(COLOR_TEXT_SECONDARY),
                );
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&submission.name).strong());
                    ui.label(
                        RichText::new(format!("<{}>", submission.email))
                            .color(COLOR_TEXT_SECONDARY),
                    );
                });
                ui.separator();
                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    ui.label(&submission.message);
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if submission.status != SubmissionStatus::Archived
                        && ui.button("Archive").clicked()
                    {
                        archive = true;
                    }
                    ui.label(
                        RichText::new(format!("status: {}", submission.status.as_str()))
                            .color(COLOR_TEXT_SECONDARY),
                    );
                });
            });
        if archive {
            self.set_submission_status(submission.id.clone(), SubmissionStatus::Archived);
        }
        if !open {
            self.detail = None;
        }
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.editor.as_mut() else {
            return;
        };
        let title = match (draft.kind, &draft.id) {
            (RecordKind::Posts, None) => "New post",
            (RecordKind::Posts, Some(_)) => "Edit post",
            (_, None) => "New project",
            (_, Some(_)) => "Edit project",
        };
        let body_label = match draft.kind {
            RecordKind::Posts => "Excerpt",
            _ => "Description",
        };

        let mut open = true;
        let mut save = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .default_width(460.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Title");
                ui.add(TextEdit::singleline(&mut draft.title).desired_width(f32::INFINITY));
                ui.add_space(4.0);
                ui.label(body_label);
                ui.add(
                    TextEdit::multiline(&mut draft.body)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label("Status");
                    for status in RecordStatus::ALL {
                        ui.selectable_value(&mut draft.status, status, status.as_str());
                    }
                });
                ui.add_space(8.0);
                if ui.button("Save").clicked() {
                    save = true;
                }
            });
        if save {
            self.save_editor();
        } else if !open {
            self.editor = None;
        }
    }

    fn render_confirm_delete(&mut self, ctx: &egui::Context) {
        let Some((kind, _)) = self.confirm_delete.clone() else {
            return;
        };
        let mut open = true;
        let mut decided = false;
        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Delete this record from {}? This cannot be undone.",
                    kind.label()
                ));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(RichText::new("Delete").color(COLOR_DANGER))
                        .clicked()
                    {
                        decided = true;
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_delete = None;
                    }
                });
            });
        if decided {
            self.confirm_pending_delete();
        } else if !open {
            self.confirm_delete = None;
        }
    }
}
