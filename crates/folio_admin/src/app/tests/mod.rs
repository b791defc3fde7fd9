//! Headless app tests that drive the state machine through backend events.

use super::*;
use crate::backend::{BackendHandle, DashCmd, DashEvent};
use chrono::{TimeZone, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use folio_core::models::{
    Record, RecordKind, RecordStatus, Submission, SubmissionStatus,
};

struct TestHarness {
    app: FolioApp,
    cmd_rx: Receiver<DashCmd>,
    _evt_tx: Sender<DashEvent>,
}

fn make_app() -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let app = FolioApp::with_backend(BackendHandle::from_test_channels(cmd_tx, evt_rx));
    TestHarness {
        app,
        cmd_rx,
        _evt_tx: evt_tx,
    }
}

fn submission(id: &str, status: SubmissionStatus) -> Record {
    Record::Submission(Submission {
        id: id.to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hello".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        status,
    })
}

fn expect_fetch(cmd_rx: &Receiver<DashCmd>) -> (RecordKind, u64) {
    match cmd_rx.try_recv() {
        Ok(DashCmd::Fetch { kind, generation }) => (kind, generation),
        other => panic!("expected a fetch command, got {:?}", other),
    }
}

#[test]
fn app_starts_on_the_login_screen() {
    let harness = make_app();
    assert_eq!(harness.app.screen, Screen::Login);
    assert_eq!(harness.cmd_rx.try_recv().unwrap_err(), TryRecvError::Empty);
}

#[test]
fn signed_in_switches_screen_and_fetches_submissions() {
    let mut harness = make_app();
    harness.app.login_password = "secret".to_string();

    harness.app.apply_event(DashEvent::SignedIn);

    assert_eq!(harness.app.screen, Screen::Dashboard);
    assert!(harness.app.login_password.is_empty());
    let (kind, generation) = expect_fetch(&harness.cmd_rx);
    assert_eq!(kind, RecordKind::Submissions);
    assert_eq!(generation, 1);
}

#[test]
fn sign_in_failure_shows_the_backend_message_verbatim() {
    let mut harness = make_app();
    harness.app.signing_in = true;

    harness.app.apply_event(DashEvent::SignInFailed {
        message: "Invalid login credentials".to_string(),
    });

    assert_eq!(harness.app.screen, Screen::Login);
    assert!(!harness.app.signing_in);
    assert_eq!(
        harness.app.login_error.as_deref(),
        Some("Invalid login credentials")
    );
}

#[test]
fn fetched_event_lands_in_the_matching_generation() {
    let mut harness = make_app();
    harness.app.request_refresh();
    let (_, generation) = expect_fetch(&harness.cmd_rx);

    harness.app.apply_event(DashEvent::Fetched {
        kind: RecordKind::Submissions,
        generation,
        records: vec![submission("sub-1", SubmissionStatus::Unread)],
    });

    assert_eq!(harness.app.dash.rows(RecordKind::Submissions).len(), 1);
    assert!(!harness.app.dash.loading);
}

#[test]
fn stale_fetch_after_tab_switch_is_ignored() {
    let mut harness = make_app();
    harness.app.request_refresh();
    let (_, stale_generation) = expect_fetch(&harness.cmd_rx);

    harness.app.switch_kind(RecordKind::Projects);
    let (kind, _) = expect_fetch(&harness.cmd_rx);
    assert_eq!(kind, RecordKind::Projects);

    harness.app.apply_event(DashEvent::Fetched {
        kind: RecordKind::Submissions,
        generation: stale_generation,
        records: vec![submission("sub-1", SubmissionStatus::Unread)],
    });

    assert!(harness.app.dash.rows(RecordKind::Submissions).is_empty());
}

#[test]
fn fetch_failure_keeps_rows_and_reports_status() {
    let mut harness = make_app();
    harness.app.request_refresh();
    let (_, generation) = expect_fetch(&harness.cmd_rx);
    harness.app.apply_event(DashEvent::Fetched {
        kind: RecordKind::Submissions,
        generation,
        records: vec![submission("sub-1", SubmissionStatus::Unread)],
    });

    harness.app.request_refresh();
    let (_, generation) = expect_fetch(&harness.cmd_rx);
    harness.app.apply_event(DashEvent::FetchFailed {
        kind: RecordKind::Submissions,
        generation,
        message: "Failed to load submissions".to_string(),
    });

    assert_eq!(harness.app.dash.rows(RecordKind::Submissions).len(), 1);
    assert!(harness
        .app
        .status
        .as_ref()
        .is_some_and(|status| status.text == "Failed to load submissions"));
}

#[test]
fn archiving_a_submission_dispatches_the_update_and_merges() {
    let mut harness = make_app();
    harness.app.request_refresh();
    let (_, generation) = expect_fetch(&harness.cmd_rx);
    harness.app.apply_event(DashEvent::Fetched {
        kind: RecordKind::Submissions,
        generation,
        records: vec![submission("sub-1", SubmissionStatus::Read)],
    });

    harness
        .app
        .set_submission_status("sub-1".to_string(), SubmissionStatus::Archived);

    match harness.cmd_rx.try_recv() {
        Ok(DashCmd::UpdateStatus { id, status }) => {
            assert_eq!(id, "sub-1");
            assert_eq!(status, SubmissionStatus::Archived);
        }
        other => panic!("expected a status update, got {:?}", other),
    }

    harness.app.apply_event(DashEvent::StatusUpdated {
        id: "sub-1".to_string(),
        status: SubmissionStatus::Archived,
    });
    let rows = harness.app.dash.rows(RecordKind::Submissions);
    let Record::Submission(row) = &rows[0] else {
        panic!("expected a submission");
    };
    assert_eq!(row.status, SubmissionStatus::Archived);
}

#[test]
fn status_update_merges_into_rows_and_open_detail() {
    let mut harness = make_app();
    harness.app.request_refresh();
    let (_, generation) = expect_fetch(&harness.cmd_rx);
    harness.app.apply_event(DashEvent::Fetched {
        kind: RecordKind::Submissions,
        generation,
        records: vec![submission("sub-1", SubmissionStatus::Unread)],
    });
    let Record::Submission(detail) = submission("sub-1", SubmissionStatus::Unread) else {
        unreachable!();
    };
    harness.app.detail = Some(detail);

    harness.app.apply_event(DashEvent::StatusUpdated {
        id: "sub-1".to_string(),
        status: SubmissionStatus::Read,
    });

    let rows = harness.app.dash.rows(RecordKind::Submissions);
    let Record::Submission(row) = &rows[0] else {
        panic!("expected a submission");
    };
    assert_eq!(row.status, SubmissionStatus::Read);
    assert_eq!(
        harness.app.detail.as_ref().map(|d| d.status),
        Some(SubmissionStatus::Read)
    );
}

#[test]
fn record_saved_refetches_the_active_kind() {
    let mut harness = make_app();
    harness.app.switch_kind(RecordKind::Projects);
    let (_, first_generation) = expect_fetch(&harness.cmd_rx);

    harness
        .app
        .apply_event(DashEvent::RecordSaved {
            kind: RecordKind::Projects,
        });

    let (kind, generation) = expect_fetch(&harness.cmd_rx);
    assert_eq!(kind, RecordKind::Projects);
    assert!(generation > first_generation);
}

#[test]
fn saving_a_draft_without_id_sends_an_insert() {
    let mut harness = make_app();
    harness.app.editor = Some(EditorDraft {
        kind: RecordKind::Posts,
        id: None,
        title: "Shipping".to_string(),
        body: "Notes".to_string(),
        status: RecordStatus::Draft,
    });

    harness.app.save_editor();

    match harness.cmd_rx.try_recv() {
        Ok(DashCmd::SaveRecord { kind, id, body }) => {
            assert_eq!(kind, RecordKind::Posts);
            assert!(id.is_none());
            assert_eq!(body["excerpt"], "Notes");
            assert_eq!(body["status"], "draft");
        }
        other => panic!("expected a save command, got {:?}", other),
    }
    // The modal stays open until the worker confirms.
    assert!(harness.app.editor.is_some());

    harness.app.apply_event(DashEvent::RecordSaved {
        kind: RecordKind::Posts,
    });
    assert!(harness.app.editor.is_none());
}

#[test]
fn blank_title_blocks_the_save_and_keeps_the_draft() {
    let mut harness = make_app();
    harness.app.editor = Some(EditorDraft {
        kind: RecordKind::Projects,
        id: None,
        title: "   ".to_string(),
        body: String::new(),
        status: RecordStatus::Draft,
    });

    harness.app.save_editor();

    assert_eq!(harness.cmd_rx.try_recv().unwrap_err(), TryRecvError::Empty);
    assert!(harness.app.editor.is_some());
    assert!(harness
        .app
        .status
        .as_ref()
        .is_some_and(|status| status.text == "Title is required"));
}

#[test]
fn delete_goes_through_the_confirmation_gate() {
    let mut harness = make_app();
    harness.app.confirm_delete = Some((RecordKind::Posts, "post-1".to_string()));

    harness.app.confirm_pending_delete();

    match harness.cmd_rx.try_recv() {
        Ok(DashCmd::DeleteRecord { kind, id }) => {
            assert_eq!(kind, RecordKind::Posts);
            assert_eq!(id, "post-1");
        }
        other => panic!("expected a delete command, got {:?}", other),
    }
    assert!(harness.app.confirm_delete.is_none());
}

#[test]
fn repeated_status_text_collapses_into_one_toast() {
    let mut harness = make_app();
    harness.app.set_status("Saved");
    harness.app.set_status("Saved");
    assert_eq!(harness.app.toasts.len(), 1);

    harness.app.set_status("Deleted");
    assert_eq!(harness.app.toasts.len(), 2);
}

#[test]
fn toast_severity_tracks_the_event_outcome() {
    let mut harness = make_app();

    harness.app.apply_event(DashEvent::MutationFailed {
        message: "Failed to save project".to_string(),
    });
    assert_eq!(
        harness.app.toasts.back().map(|toast| toast.kind),
        Some(ToastKind::Error)
    );

    harness.app.apply_event(DashEvent::RecordDeleted {
        kind: RecordKind::Posts,
        id: "post-1".to_string(),
    });
    assert_eq!(
        harness.app.toasts.back().map(|toast| toast.kind),
        Some(ToastKind::Notice)
    );
}

#[test]
fn toast_queue_is_capped() {
    let mut harness = make_app();
    for index in 0..(TOAST_LIMIT + 3) {
        harness.app.set_status(format!("message {index}"));
    }
    assert_eq!(harness.app.toasts.len(), TOAST_LIMIT);
}
