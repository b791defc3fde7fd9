//! Dashboard table: tabs, search, sortable columns, pagination.

use crate::app::style::{COLOR_PUBLISHED, COLOR_TEXT_SECONDARY, COLOR_UNREAD};
use crate::app::FolioApp;
use eframe::egui::{self, RichText, TextEdit};
use egui_extras::{Column as TableColumn, TableBuilder};
use folio_core::controller::PAGE_SIZE;
use folio_core::export::format_timestamp;
use folio_core::models::{
    Record, RecordKind, RecordStatus, SortDirection, SortKey, Submission, SubmissionStatus,
};

/// Deferred row action, applied after the table loop releases its borrows.
enum RowAction {
    ViewSubmission(Submission),
    ToggleRead(String, SubmissionStatus),
    Archive(String),
    Edit(Record),
    Delete(RecordKind, String),
}

impl FolioApp {
    pub(in crate::app) fn render_dashboard(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("dash_toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Dashboard");
                ui.separator();
                let mut switch_to = None;
                for kind in RecordKind::ALL {
                    let active = self.dash.kind() == kind;
                    if ui.selectable_label(active, kind.label()).clicked() && !active {
                        switch_to = Some(kind);
                    }
                }
                if let Some(kind) = switch_to {
                    self.switch_kind(kind);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        self.request_refresh();
                    }
                    match self.dash.kind() {
                        RecordKind::Submissions => {
                            if ui.button("Export CSV").clicked() {
                                self.export_submissions();
                            }
                        }
                        RecordKind::Projects | RecordKind::Posts => {
                            if ui.button("New").clicked() {
                                self.open_blank_editor();
                            }
                        }
                    }
                });
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Search");
                let mut search = self.dash.search().to_owned();
                let edited = ui.add(
                    TextEdit::singleline(&mut search)
                        .hint_text("Filter across all fields")
                        .desired_width(260.0),
                );
                if edited.changed() {
                    self.dash.set_search(search);
                }
                if !self.dash.search().is_empty() && ui.button("Clear").clicked() {
                    self.dash.set_search(String::new());
                }
                if self.dash.loading {
                    ui.spinner();
                }
                if let Some(error) = &self.dash.error {
                    ui.label(RichText::new(error).color(COLOR_UNREAD));
                }
            });
            ui.add_space(6.0);
        });

        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let action = self.render_table(ui);
            if let Some(action) = action {
                self.apply_row_action(action);
            }
            ui.add_space(8.0);
            self.render_pagination(ui);
        });

        self.render_modals(ctx);
    }

    fn render_table(&mut self, ui: &mut egui::Ui) -> Option<RowAction> {
        let kind = self.dash.kind();
        let columns = kind.columns();
        let sort = self.dash.sort;
        let rows = self.dash.visible();

        let mut clicked_sort: Option<SortKey> = None;
        let mut action: Option<RowAction> = None;

        let mut builder = TableBuilder::new(ui).striped(true);
        for _ in columns {
            builder = builder.column(TableColumn::remainder().at_least(120.0));
        }
        // Actions column.
        builder = builder.column(TableColumn::auto().at_least(160.0));

        builder
            .header(24.0, |mut header| {
                for column in columns {
                    header.col(|ui| {
                        let marker = if sort.key == column.sort {
                            match sort.direction {
                                SortDirection::Asc => " \u{25B2}",
                                SortDirection::Desc => " \u{25BC}",
                            }
                        } else {
                            ""
                        };
                        let label = format!("{}{}", column.label, marker);
                        if ui
                            .add(egui::Button::new(RichText::new(label).strong()).frame(false))
                            .clicked()
                        {
                            clicked_sort = Some(column.sort);
                        }
                    });
                }
                header.col(|ui| {
                    ui.label(RichText::new("Actions").strong());
                });
            })
            .body(|mut body| {
                for record in &rows {
                    body.row(28.0, |mut row| {
                        match record {
                            Record::Submission(submission) => {
                                render_submission_row(&mut row, submission, &mut action);
                            }
                            other => {
                                render_content_row(&mut row, other, &mut action);
                            }
                        }
                    });
                }
            });

        if rows.is_empty() && !self.dash.loading {
            ui.add_space(12.0);
            ui.label(RichText::new("No records to show.").color(COLOR_TEXT_SECONDARY));
        }

        if let Some(key) = clicked_sort {
            self.dash.toggle_sort(key);
        }
        action
    }

    fn render_pagination(&mut self, ui: &mut egui::Ui) {
        let total = self.dash.total_filtered();
        let pages = self.dash.page_count().max(1);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.dash.has_prev_page(), egui::Button::new("Prev"))
                .clicked()
            {
                let page = self.dash.page - 1;
                self.dash.set_page(page);
            }
            ui.label(format!("Page {} of {}", self.dash.page + 1, pages));
            if ui
                .add_enabled(self.dash.has_next_page(), egui::Button::new("Next"))
                .clicked()
            {
                let page = self.dash.page + 1;
                self.dash.set_page(page);
            }
            ui.separator();
            ui.label(
                RichText::new(format!("{} records, {} per page", total, PAGE_SIZE))
                    .color(COLOR_TEXT_SECONDARY),
            );
        });
    }

    fn apply_row_action(&mut self, action: RowAction) {
        match action {
            RowAction::ViewSubmission(submission) => {
                self.detail = Some(submission);
            }
            RowAction::ToggleRead(id, status) => self.toggle_submission_read(id, status),
            RowAction::Archive(id) => self.set_submission_status(id, SubmissionStatus::Archived),
            RowAction::Edit(record) => self.open_editor_for(&record),
            RowAction::Delete(kind, id) => self.confirm_delete = Some((kind, id)),
        }
    }
}

fn status_text(status: SubmissionStatus) -> RichText {
    match status {
        SubmissionStatus::Unread => RichText::new("unread").color(COLOR_UNREAD).strong(),
        SubmissionStatus::Read => RichText::new("read"),
        SubmissionStatus::Archived => RichText::new("archived").color(COLOR_TEXT_SECONDARY),
    }
}

fn record_status_text(status: RecordStatus) -> RichText {
    match status {
        RecordStatus::Published => RichText::new("published").color(COLOR_PUBLISHED),
        RecordStatus::Draft => RichText::new("draft").color(COLOR_UNREAD),
        RecordStatus::Archived => RichText::new("archived").color(COLOR_TEXT_SECONDARY),
    }
}

fn render_submission_row(
    row: &mut egui_extras::TableRow<'_, '_>,
    submission: &Submission,
    action: &mut Option<RowAction>,
) {
    row.col(|ui| {
        ui.label(format_timestamp(submission.created_at));
    });
    row.col(|ui| {
        ui.label(&submission.name);
    });
    row.col(|ui| {
        ui.label(&submission.email);
    });
    row.col(|ui| {
        ui.label(status_text(submission.status));
    });
    row.col(|ui| {
        if ui.button("View").clicked() {
            *action = Some(RowAction::ViewSubmission(submission.clone()));
        }
        let toggle_label = match submission.status {
            SubmissionStatus::Read => "Mark unread",
            _ => "Mark read",
        };
        if ui.button(toggle_label).clicked() {
            *action = Some(RowAction::ToggleRead(
                submission.id.clone(),
                submission.status,
            ));
        }
        if submission.status != SubmissionStatus::Archived && ui.button("Archive").clicked() {
            *action = Some(RowAction::Archive(submission.id.clone()));
        }
        if ui.button("Delete").clicked() {
            *action = Some(RowAction::Delete(
                RecordKind::Submissions,
                submission.id.clone(),
            ));
        }
    });
}

fn render_content_row(
    row: &mut egui_extras::TableRow<'_, '_>,
    record: &Record,
    action: &mut Option<RowAction>,
) {
    let (title, status) = match record {
        Record::Project(project) => (project.title.as_str(), project.status),
        Record::Post(post) => (post.title.as_str(), post.status),
        Record::Submission(_) => unreachable!("submissions render via their own row"),
    };
    row.col(|ui| {
        let created = record
            .created_at()
            .map(format_timestamp)
            .unwrap_or_default();
        ui.label(created);
    });
    row.col(|ui| {
        ui.label(title);
    });
    row.col(|ui| {
        ui.label(record_status_text(status));
    });
    row.col(|ui| {
        if ui.button("Edit").clicked() {
            *action = Some(RowAction::Edit(record.clone()));
        }
        if let Some(id) = record.id() {
            if ui.button("Delete").clicked() {
                *action = Some(RowAction::Delete(record.kind(), id.to_string()));
            }
        }
    });
}
