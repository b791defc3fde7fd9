//! Background worker thread for backend HTTP access.

use crate::backend::{DashCmd, DashEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use folio_core::models::{records_from_json, RecordKind};
use folio_gateway::Gateway;
use std::thread;
use tracing::{error, info};

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<DashCmd>,
    pub evt_rx: Receiver<DashEvent>,
}

impl BackendHandle {
    /// Build a handle around externally owned channels, for tests that
    /// drive the app without a worker thread.
    pub fn from_test_channels(cmd_tx: Sender<DashCmd>, evt_rx: Receiver<DashEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

fn send(evt_tx: &Sender<DashEvent>, event: DashEvent) {
    let _ = evt_tx.send(event);
}

/// Singular noun for user-facing failure messages. The raw gateway error
/// stays in the log; the UI only sees these fixed phrasings.
fn record_noun(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Submissions => "submission",
        RecordKind::Projects => "project",
        RecordKind::Posts => "post",
    }
}

/// Spawn the backend worker thread that performs HTTP access.
///
/// All network I/O stays off the UI thread; the worker replies with
/// [`DashEvent`] values that are polled each frame. Commands run one at a
/// time in arrival order, so a save is always confirmed before the refetch
/// dispatched after it.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(mut gateway: Box<dyn Gateway + Send>) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("folio-admin-backend".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("backend runtime");
            for cmd in cmd_rx.iter() {
                match cmd {
                    DashCmd::SignIn { email, password } => {
                        match runtime.block_on(gateway.sign_in(&email, &password)) {
                            Ok(()) => {
                                info!("signed in");
                                send(&evt_tx, DashEvent::SignedIn);
                            }
                            Err(err) => {
                                error!("sign-in failed: {}", err);
                                send(
                                    &evt_tx,
                                    DashEvent::SignInFailed {
                                        message: err.to_string(),
                                    },
                                );
                            }
                        }
                    }
                    DashCmd::Fetch { kind, generation } => {
                        let result = runtime
                            .block_on(gateway.select_all(kind.table()))
                            .map_err(|err| err.to_string())
                            .and_then(|rows| {
                                records_from_json(kind, rows).map_err(|err| err.to_string())
                            });
                        match result {
                            Ok(records) => send(
                                &evt_tx,
                                DashEvent::Fetched {
                                    kind,
                                    generation,
                                    records,
                                },
                            ),
                            Err(detail) => {
                                error!("fetch {} failed: {}", kind.label(), detail);
                                send(
                                    &evt_tx,
                                    DashEvent::FetchFailed {
                                        kind,
                                        generation,
                                        message: format!("Failed to load {}", kind.label()),
                                    },
                                );
                            }
                        }
                    }
                    DashCmd::UpdateStatus { id, status } => {
                        let body = serde_json::json!({ "status": status });
                        match runtime.block_on(gateway.update(
                            RecordKind::Submissions.table(),
                            &id,
                            &body,
                        )) {
                            Ok(()) => send(&evt_tx, DashEvent::StatusUpdated { id, status }),
                            Err(err) => {
                                error!(%id, "status update failed: {}", err);
                                send(
                                    &evt_tx,
                                    DashEvent::MutationFailed {
                                        message: "Failed to update submission status".to_string(),
                                    },
                                );
                            }
                        }
                    }
                    DashCmd::DeleteRecord { kind, id } => {
                        match runtime.block_on(gateway.delete(kind.table(), &id)) {
                            Ok(()) => send(&evt_tx, DashEvent::RecordDeleted { kind, id }),
                            Err(err) => {
                                error!(%id, "delete from {} failed: {}", kind.table(), err);
                                send(
                                    &evt_tx,
                                    DashEvent::MutationFailed {
                                        message: format!("Failed to delete {}", record_noun(kind)),
                                    },
                                );
                            }
                        }
                    }
                    DashCmd::SaveRecord { kind, id, body } => {
                        let result = match &id {
                            Some(id) => runtime.block_on(gateway.update(kind.table(), id, &body)),
                            None => runtime.block_on(gateway.insert(kind.table(), &body)),
                        };
                        match result {
                            Ok(()) => send(&evt_tx, DashEvent::RecordSaved { kind }),
                            Err(err) => {
                                error!("save to {} failed: {}", kind.table(), err);
                                send(
                                    &evt_tx,
                                    DashEvent::MutationFailed {
                                        message: format!("Failed to save {}", record_noun(kind)),
                                    },
                                );
                            }
                        }
                    }
                }
            }
        })
        .expect("spawn backend worker");

    BackendHandle { cmd_tx, evt_rx }
}
