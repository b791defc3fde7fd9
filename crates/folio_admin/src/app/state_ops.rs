//! Event application and command dispatch for the app shell.

use super::{EditorDraft, FolioApp, Screen, StatusMessage, ToastKind, ToastMessage, STATUS_TTL,
    TOAST_LIMIT, TOAST_TTL};
use crate::backend::{DashCmd, DashEvent};
use folio_core::export::{export_filename, submissions_to_csv};
use folio_core::models::{Record, RecordKind, SubmissionStatus};
use std::time::Instant;
use tracing::warn;

impl FolioApp {
    /// Drain all pending worker events. Called once per frame before
    /// rendering so the UI always draws the latest confirmed state.
    pub(super) fn drain_backend_events(&mut self) {
        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub(super) fn apply_event(&mut self, event: DashEvent) {
        match event {
            DashEvent::SignedIn => {
                self.signing_in = false;
                self.login_error = None;
                self.login_password.clear();
                self.screen = Screen::Dashboard;
                self.request_refresh();
            }
            DashEvent::SignInFailed { message } => {
                self.signing_in = false;
                self.login_error = Some(message);
            }
            DashEvent::Fetched {
                kind,
                generation,
                records,
            } => {
                self.dash.apply_fetch(kind, generation, Ok(records));
            }
            DashEvent::FetchFailed {
                kind,
                generation,
                message,
            } => {
                if self.dash.apply_fetch(kind, generation, Err(message.clone())) {
                    self.set_error_status(message);
                }
            }
            DashEvent::StatusUpdated { id, status } => {
                if self.dash.merge_status(&id, status) {
                    if let Some(detail) = self.detail.as_mut() {
                        if detail.id == id {
                            detail.status = status;
                        }
                    }
                    self.set_status("Submission updated");
                } else {
                    warn!(%id, "status confirmed for unknown submission");
                }
            }
            DashEvent::RecordDeleted { kind, id } => {
                self.dash.remove(kind, &id);
                self.set_status("Deleted");
            }
            DashEvent::RecordSaved { kind } => {
                self.editor = None;
                self.set_status("Saved");
                // The backend assigns ids and timestamps; refetch rather
                // than guess at them.
                if kind == self.dash.kind() {
                    self.request_refresh();
                }
            }
            DashEvent::MutationFailed { message } => {
                self.set_error_status(message);
            }
        }
    }

    /// Sets the status banner message and mirrors it into the toast queue.
    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        self.push_feedback(ToastKind::Notice, text.into());
    }

    /// Failure variant of [`FolioApp::set_status`]; the toast renders with
    /// the danger accent.
    pub(super) fn set_error_status(&mut self, text: impl Into<String>) {
        self.push_feedback(ToastKind::Error, text.into());
    }

    fn push_feedback(&mut self, kind: ToastKind, text: String) {
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.push_toast(kind, text);
    }

    fn push_toast(&mut self, kind: ToastKind, text: String) {
        let now = Instant::now();
        if let Some(last) = self.toasts.back_mut() {
            if last.text == text {
                last.kind = kind;
                last.expires_at = now + TOAST_TTL;
                return;
            }
        }
        self.toasts.push_back(ToastMessage {
            kind,
            text,
            expires_at: now + TOAST_TTL,
        });
        while self.toasts.len() > TOAST_LIMIT {
            self.toasts.pop_front();
        }
    }

    pub(super) fn expire_feedback(&mut self) {
        let now = Instant::now();
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expires_at <= now)
        {
            self.status = None;
        }
        while self
            .toasts
            .front()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toasts.pop_front();
        }
    }

    pub(super) fn submit_login(&mut self) {
        if self.signing_in {
            return;
        }
        self.signing_in = true;
        self.login_error = None;
        let _ = self.backend.cmd_tx.send(DashCmd::SignIn {
            email: self.login_email.trim().to_string(),
            password: self.login_password.clone(),
        });
    }

    /// Dispatch a fetch for the active kind. The generation token ties the
    /// eventual response back to this request.
    pub(super) fn request_refresh(&mut self) {
        let generation = self.dash.begin_fetch();
        let _ = self.backend.cmd_tx.send(DashCmd::Fetch {
            kind: self.dash.kind(),
            generation,
        });
    }

    pub(super) fn switch_kind(&mut self, kind: RecordKind) {
        if self.dash.set_kind(kind) {
            self.request_refresh();
        }
    }

    pub(super) fn toggle_submission_read(&mut self, id: String, current: SubmissionStatus) {
        let _ = self.backend.cmd_tx.send(DashCmd::UpdateStatus {
            id,
            status: current.toggled_read(),
        });
    }

    pub(super) fn set_submission_status(&mut self, id: String, status: SubmissionStatus) {
        let _ = self
            .backend
            .cmd_tx
            .send(DashCmd::UpdateStatus { id, status });
    }

    pub(super) fn open_editor_for(&mut self, record: &Record) {
        self.editor = EditorDraft::from_record(record);
    }

    pub(super) fn open_blank_editor(&mut self) {
        let kind = self.dash.kind();
        if kind != RecordKind::Submissions {
            self.editor = Some(EditorDraft::blank(kind));
        }
    }

    /// Dispatch the open draft. The modal stays up until the save is
    /// confirmed, so a failure leaves the draft intact for another try.
    pub(super) fn save_editor(&mut self) {
        let Some(draft) = self.editor.as_ref() else {
            return;
        };
        if draft.title.trim().is_empty() {
            self.set_error_status("Title is required");
            return;
        }
        let _ = self.backend.cmd_tx.send(DashCmd::SaveRecord {
            kind: draft.kind,
            id: draft.id.clone(),
            body: draft.payload(),
        });
    }

    pub(super) fn confirm_pending_delete(&mut self) {
        if let Some((kind, id)) = self.confirm_delete.take() {
            let _ = self.backend.cmd_tx.send(DashCmd::DeleteRecord { kind, id });
        }
    }

    /// Write all fetched submissions to a CSV file picked by the user.
    /// The active search and page are ignored on purpose.
    pub(super) fn export_submissions(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(export_filename())
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        let csv = submissions_to_csv(self.dash.all_submissions());
        match std::fs::write(&path, csv) {
            Ok(()) => self.set_status(format!("Exported to {}", path.display())),
            Err(err) => self.set_error_status(format!("Export failed: {}", err)),
        }
    }
}
