//! Native egui application shell for the admin console.

mod state_ops;
mod style;
mod ui;

#[cfg(test)]
mod tests;

use crate::backend::{spawn_backend, BackendHandle};
use eframe::egui;
use folio_core::models::{Record, RecordKind, RecordStatus, Submission};
use folio_core::{Config, DashState};
use folio_gateway::RestGateway;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 560.0];

const STATUS_TTL: Duration = Duration::from_secs(4);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

/// Severity of a queued toast: confirmations get the accent color,
/// failures the danger color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastKind {
    Notice,
    Error,
}

struct ToastMessage {
    kind: ToastKind,
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Dashboard,
}

/// Draft being edited in the project/post modal. `id` is `None` for a new
/// record until the first save round-trips.
struct EditorDraft {
    kind: RecordKind,
    id: Option<String>,
    title: String,
    body: String,
    status: RecordStatus,
}

impl EditorDraft {
    fn blank(kind: RecordKind) -> Self {
        Self {
            kind,
            id: None,
            title: String::new(),
            body: String::new(),
            status: RecordStatus::Draft,
        }
    }

    fn from_record(record: &Record) -> Option<Self> {
        match record {
            Record::Project(project) => Some(Self {
                kind: RecordKind::Projects,
                id: project.id.clone(),
                title: project.title.clone(),
                body: project.description.clone(),
                status: project.status,
            }),
            Record::Post(post) => Some(Self {
                kind: RecordKind::Posts,
                id: post.id.clone(),
                title: post.title.clone(),
                body: post.excerpt.clone(),
                status: post.status,
            }),
            Record::Submission(_) => None,
        }
    }

    /// Request body for insert/update. The free-text field maps to
    /// `description` on projects and `excerpt` on posts.
    fn payload(&self) -> serde_json::Value {
        match self.kind {
            RecordKind::Posts => serde_json::json!({
                "title": self.title,
                "excerpt": self.body,
                "status": self.status,
            }),
            _ => serde_json::json!({
                "title": self.title,
                "description": self.body,
                "status": self.status,
            }),
        }
    }
}

/// Native egui application shell.
///
/// Owns the UI state and communicates with the background worker via
/// channels so the `update` loop never blocks on network I/O.
pub(crate) struct FolioApp {
    backend: BackendHandle,
    screen: Screen,
    login_email: String,
    login_password: String,
    login_error: Option<String>,
    signing_in: bool,
    dash: DashState,
    detail: Option<Submission>,
    editor: Option<EditorDraft>,
    confirm_delete: Option<(RecordKind, String)>,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    style_applied: bool,
}

impl FolioApp {
    pub(crate) fn new() -> Self {
        let config = Config::from_env();
        let gateway = RestGateway::new(config.api_url.clone(), config.api_key.clone());
        Self::with_backend(spawn_backend(Box::new(gateway)))
    }

    fn with_backend(backend: BackendHandle) -> Self {
        Self {
            backend,
            screen: Screen::Login,
            login_email: String::new(),
            login_password: String::new(),
            login_error: None,
            signing_in: false,
            dash: DashState::new(),
            detail: None,
            editor: None,
            confirm_delete: None,
            status: None,
            toasts: VecDeque::new(),
            style_applied: false,
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);
        self.drain_backend_events();
        self.expire_feedback();

        match self.screen {
            Screen::Login => self.render_login(ctx),
            Screen::Dashboard => self.render_dashboard(ctx),
        }
        self.render_toasts(ctx);

        // Keep polling while feedback is on screen or a request is in flight.
        if self.signing_in
            || self.dash.loading
            || self.status.is_some()
            || !self.toasts.is_empty()
        {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
