//! Protocol types for the admin backend worker.

use folio_core::models::{Record, RecordKind, SubmissionStatus};
use serde_json::Value;

/// Commands issued by the UI thread for the backend worker to execute.
#[derive(Debug)]
pub enum DashCmd {
    /// Exchange credentials for a session.
    SignIn { email: String, password: String },
    /// Fetch every record of one kind. `generation` is echoed back so the
    /// UI can discard responses from before a tab switch.
    Fetch { kind: RecordKind, generation: u64 },
    /// Set a submission's status.
    UpdateStatus {
        id: String,
        status: SubmissionStatus,
    },
    /// Delete a record by id.
    DeleteRecord { kind: RecordKind, id: String },
    /// Insert (`id: None`) or update a project/post from editor fields.
    SaveRecord {
        kind: RecordKind,
        id: Option<String>,
        body: Value,
    },
}

/// Events produced by the backend worker and polled by the UI thread.
#[derive(Debug)]
pub enum DashEvent {
    /// Sign-in succeeded; table requests now carry the session token.
    SignedIn,
    /// Sign-in failed. `message` is the backend's own description, shown
    /// on the login form verbatim.
    SignInFailed { message: String },
    /// Response containing a full fetched set for one kind.
    Fetched {
        kind: RecordKind,
        generation: u64,
        records: Vec<Record>,
    },
    /// A fetch failed; the UI keeps whatever rows it already has.
    FetchFailed {
        kind: RecordKind,
        generation: u64,
        message: String,
    },
    /// A submission status change was confirmed.
    StatusUpdated {
        id: String,
        status: SubmissionStatus,
    },
    /// A delete was confirmed.
    RecordDeleted { kind: RecordKind, id: String },
    /// An insert or update was confirmed; the UI refetches the kind.
    RecordSaved { kind: RecordKind },
    /// A status change, delete, or save failed.
    MutationFailed { message: String },
}
