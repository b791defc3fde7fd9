//! UI surface modules extracted from the main app update loop.

/// Login gate shown before a session exists.
pub(super) mod login;
/// Submission detail, editor, and delete-confirmation modals.
pub(super) mod modals;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Record table with tabs, search, sorting, and pagination.
pub(super) mod table;
/// Transient toast notifications.
pub(super) mod toasts;
