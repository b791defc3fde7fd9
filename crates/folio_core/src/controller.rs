//! Dashboard list-controller state machine.
//!
//! [`DashState`] owns the per-kind fetched sets plus the search/sort/page
//! inputs and derives the visible table slice from them. All mutation goes
//! through named transitions; the UI layer never touches the slots directly.
//! The displayed slice is a pure function of (fetched set, search text, sort
//! config, page index), so re-deriving with the same inputs always
//! reproduces the same rows.

use crate::models::{Record, RecordKind, SortConfig, SortDirection, SortKey, Submission,
    SubmissionStatus};
use tracing::debug;

/// Fixed dashboard page size.
pub const PAGE_SIZE: usize = 10;

/// Mutable dashboard state: active kind, fetched-set slots, and the three
/// derivation inputs (search, sort, page).
#[derive(Debug, Default)]
pub struct DashState {
    kind: ActiveKind,
    submissions: Vec<Record>,
    projects: Vec<Record>,
    posts: Vec<Record>,
    search: String,
    pub sort: SortConfig,
    pub page: usize,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct ActiveKind(RecordKind);

impl Default for ActiveKind {
    fn default() -> Self {
        Self(RecordKind::Submissions)
    }
}

impl DashState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> RecordKind {
        self.kind.0
    }

    /// Switch the active record kind. Resets the page index to zero; the
    /// caller is expected to dispatch a fresh fetch. The other kinds' slots
    /// are left intact but never rendered while inactive.
    ///
    /// # Returns
    /// `true` when the kind actually changed.
    pub fn set_kind(&mut self, kind: RecordKind) -> bool {
        if self.kind.0 == kind {
            return false;
        }
        self.kind = ActiveKind(kind);
        self.page = 0;
        true
    }

    /// Mark a fetch as dispatched and return its generation token. Responses
    /// carrying an older token are discarded by [`DashState::apply_fetch`],
    /// which is what keeps a slow response from landing in the wrong kind's
    /// view after a tab switch.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.generation
    }

    /// Apply a fetch response.
    ///
    /// Success replaces the kind's slot and clears the error flag. Failure
    /// records a kind-specific message and leaves the previous rows in place
    /// so the table keeps showing stale data instead of going blank.
    ///
    /// # Returns
    /// `false` when the response was stale and dropped.
    pub fn apply_fetch(
        &mut self,
        kind: RecordKind,
        generation: u64,
        result: Result<Vec<Record>, String>,
    ) -> bool {
        if generation != self.generation {
            debug!(
                kind = kind.label(),
                generation, "dropping stale fetch response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                *self.slot_mut(kind) = records;
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    /// The current search text. Edits go through [`DashState::set_search`].
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Header click: flip direction when the key is already active,
    /// otherwise sort ascending by the new key.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
    }

    /// The complete, unfiltered fetched set for one kind.
    pub fn rows(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Submissions => &self.submissions,
            RecordKind::Projects => &self.projects,
            RecordKind::Posts => &self.posts,
        }
    }

    fn slot_mut(&mut self, kind: RecordKind) -> &mut Vec<Record> {
        match kind {
            RecordKind::Submissions => &mut self.submissions,
            RecordKind::Projects => &mut self.projects,
            RecordKind::Posts => &mut self.posts,
        }
    }

    /// The full submissions slot as typed records, for CSV export. Ignores
    /// the active search and page on purpose: export always covers the
    /// entire fetched set.
    pub fn all_submissions(&self) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter_map(|record| match record {
                Record::Submission(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    fn filtered_sorted(&self) -> Vec<&Record> {
        let mut rows: Vec<&Record> = if self.search.is_empty() {
            self.rows(self.kind.0).iter().collect()
        } else {
            let needle = self.search.to_lowercase();
            self.rows(self.kind.0)
                .iter()
                .filter(|record| {
                    record
                        .field_strings()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
                })
                .collect()
        };
        let SortConfig { key, direction } = self.sort;
        // Stable sort: rows without the sorted field compare equal, so the
        // fetch order shows through, and toggling twice round-trips.
        rows.sort_by(|a, b| {
            let ord = match (a.sort_value(key), b.sort_value(key)) {
                (Some(av), Some(bv)) => av.cmp(&bv),
                _ => std::cmp::Ordering::Equal,
            };
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        rows
    }

    /// Count of records after the search filter, before pagination.
    pub fn total_filtered(&self) -> usize {
        self.filtered_sorted().len()
    }

    pub fn page_count(&self) -> usize {
        self.total_filtered().div_ceil(PAGE_SIZE)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 0
    }

    pub fn has_next_page(&self) -> bool {
        (self.page + 1) * PAGE_SIZE < self.total_filtered()
    }

    /// The visible table slice: filter, stable sort, then page window.
    /// Recomputed from scratch on every call; no slice is cached across
    /// filter or sort changes.
    pub fn visible(&self) -> Vec<Record> {
        let rows = self.filtered_sorted();
        let start = self.page * PAGE_SIZE;
        rows.into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect()
    }

    /// Patch one submission's status in place after a confirmed update.
    /// No refetch: this is the optimistic local merge.
    ///
    /// # Returns
    /// `true` when a matching submission was found.
    pub fn merge_status(&mut self, id: &str, status: SubmissionStatus) -> bool {
        for record in &mut self.submissions {
            if let Record::Submission(submission) = record {
                if submission.id == id {
                    submission.status = status;
                    return true;
                }
            }
        }
        false
    }

    /// Remove exactly one record by id after a confirmed delete, preserving
    /// the relative order of the rest.
    ///
    /// # Returns
    /// `true` when a matching record was removed.
    pub fn remove(&mut self, kind: RecordKind, id: &str) -> bool {
        let slot = self.slot_mut(kind);
        match slot.iter().position(|record| record.id() == Some(id)) {
            Some(index) => {
                slot.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Post, Project, RecordStatus};
    use chrono::{TimeZone, Utc};

    fn submission(index: usize) -> Record {
        Record::Submission(Submission {
            id: format!("sub-{index:02}"),
            name: format!("Person {index:02}"),
            email: format!("person{index:02}@example.com"),
            message: format!("Message body {index:02}"),
            // Later index = later creation time.
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .unwrap()
                + chrono::Duration::minutes(index as i64),
            status: SubmissionStatus::Unread,
        })
    }

    fn project(id: &str, title: &str) -> Record {
        Record::Project(Project {
            id: Some(id.to_string()),
            title: title.to_string(),
            description: format!("{title} description"),
            created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap()),
            updated_at: None,
            status: RecordStatus::Published,
        })
    }

    fn state_with_submissions(count: usize) -> DashState {
        let mut state = DashState::new();
        let generation = state.begin_fetch();
        // The gateway returns newest-first; mirror that order here.
        let rows: Vec<Record> = (0..count).rev().map(submission).collect();
        assert!(state.apply_fetch(RecordKind::Submissions, generation, Ok(rows)));
        state
    }

    fn visible_ids(state: &DashState) -> Vec<String> {
        state
            .visible()
            .iter()
            .map(|record| record.id().expect("fetched records carry ids").to_string())
            .collect()
    }

    #[test]
    fn default_derivation_is_first_page_newest_first() {
        let state = state_with_submissions(25);
        let ids = visible_ids(&state);
        assert_eq!(ids.len(), PAGE_SIZE);
        assert_eq!(ids[0], "sub-24");
        assert_eq!(ids[9], "sub-15");
    }

    #[test]
    fn unmatched_search_yields_empty_slice_and_zero_total() {
        let mut state = state_with_submissions(5);
        state.set_search("no-such-text-anywhere".to_string());
        assert_eq!(state.total_filtered(), 0);
        assert!(state.visible().is_empty());
    }

    #[test]
    fn clearing_the_search_restores_the_full_set() {
        let mut state = state_with_submissions(3);
        state.set_search("person00".to_string());
        assert_eq!(state.search(), "person00");
        assert_eq!(state.total_filtered(), 1);

        state.set_search(String::new());
        assert_eq!(state.total_filtered(), 3);
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let mut state = state_with_submissions(5);
        state.set_search("PERSON03@EXAMPLE".to_string());
        assert_eq!(state.total_filtered(), 1);
        assert_eq!(visible_ids(&state), vec!["sub-03"]);
    }

    #[test]
    fn sort_toggle_round_trips_to_original_order() {
        let mut state = state_with_submissions(12);
        let original = visible_ids(&state);

        state.toggle_sort(SortKey::Name); // new key: ascending
        let by_name = visible_ids(&state);
        assert_ne!(original, by_name);
        assert_eq!(by_name[0], "sub-00");

        state.toggle_sort(SortKey::CreatedAt); // back to created_at, ascending
        state.toggle_sort(SortKey::CreatedAt); // flipped to descending = default
        assert_eq!(visible_ids(&state), original);
    }

    #[test]
    fn third_page_of_25_has_exactly_five_rows() {
        let mut state = state_with_submissions(25);
        state.set_page(2);
        let ids = visible_ids(&state);
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], "sub-04");
        assert_eq!(ids[4], "sub-00");
        assert!(state.has_prev_page());
        assert!(!state.has_next_page());
        assert_eq!(state.page_count(), 3);
    }

    #[test]
    fn delete_removes_exactly_one_and_preserves_order() {
        let mut state = state_with_submissions(6);
        assert!(state.remove(RecordKind::Submissions, "sub-03"));
        let ids: Vec<&str> = state
            .rows(RecordKind::Submissions)
            .iter()
            .filter_map(Record::id)
            .collect();
        assert_eq!(
            ids,
            vec!["sub-05", "sub-04", "sub-02", "sub-01", "sub-00"]
        );
        assert!(!state.remove(RecordKind::Submissions, "sub-03"));
    }

    #[test]
    fn status_merge_touches_only_the_target() {
        let mut state = state_with_submissions(4);
        let before: Vec<Record> = state.rows(RecordKind::Submissions).to_vec();

        assert!(state.merge_status("sub-02", SubmissionStatus::Read));

        for (index, record) in state.rows(RecordKind::Submissions).iter().enumerate() {
            let Record::Submission(after) = record else {
                panic!("expected submissions");
            };
            let Record::Submission(prior) = &before[index] else {
                panic!("expected submissions");
            };
            if after.id == "sub-02" {
                assert_eq!(after.status, SubmissionStatus::Read);
                assert_eq!(after.name, prior.name);
                assert_eq!(after.message, prior.message);
            } else {
                assert_eq!(after, prior);
            }
        }
    }

    #[test]
    fn kind_switch_resets_page_and_keeps_other_slots() {
        let mut state = state_with_submissions(25);
        state.set_page(2);

        assert!(state.set_kind(RecordKind::Projects));
        assert_eq!(state.page, 0);
        assert!(state.visible().is_empty());

        let generation = state.begin_fetch();
        let rows = vec![project("p-1", "Folio"), project("p-2", "Gateway")];
        assert!(state.apply_fetch(RecordKind::Projects, generation, Ok(rows)));
        assert_eq!(state.visible().len(), 2);

        // The submissions slot survived the switch untouched.
        assert_eq!(state.rows(RecordKind::Submissions).len(), 25);
    }

    #[test]
    fn stale_fetch_response_is_dropped() {
        let mut state = state_with_submissions(3);
        let stale = state.begin_fetch();
        state.set_kind(RecordKind::Projects);
        let current = state.begin_fetch();

        // The submissions response from before the switch arrives late.
        assert!(!state.apply_fetch(
            RecordKind::Submissions,
            stale,
            Ok(vec![submission(99)])
        ));
        assert_eq!(state.rows(RecordKind::Submissions).len(), 3);

        assert!(state.apply_fetch(
            RecordKind::Projects,
            current,
            Ok(vec![project("p-1", "Folio")])
        ));
        assert!(!state.loading);
    }

    #[test]
    fn failed_fetch_keeps_stale_rows_and_sets_error() {
        let mut state = state_with_submissions(3);
        let generation = state.begin_fetch();
        assert!(state.apply_fetch(
            RecordKind::Submissions,
            generation,
            Err("Failed to load submissions".to_string())
        ));
        assert_eq!(state.rows(RecordKind::Submissions).len(), 3);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to load submissions")
        );

        let generation = state.begin_fetch();
        assert!(state.apply_fetch(RecordKind::Submissions, generation, Ok(vec![submission(0)])));
        assert!(state.error.is_none());
    }

    #[test]
    fn sort_key_missing_on_kind_preserves_fetch_order() {
        let mut state = DashState::new();
        state.set_kind(RecordKind::Projects);
        let generation = state.begin_fetch();
        let rows = vec![project("p-2", "Beta"), project("p-1", "Alpha")];
        assert!(state.apply_fetch(RecordKind::Projects, generation, Ok(rows)));

        // Email exists only on submissions; projects sort equal under it.
        state.toggle_sort(SortKey::Email);
        let ids = visible_ids(&state);
        assert_eq!(ids, vec!["p-2", "p-1"]);
    }

    #[test]
    fn posts_slot_behaves_like_projects() {
        let mut state = DashState::new();
        state.set_kind(RecordKind::Posts);
        let generation = state.begin_fetch();
        let rows = vec![Record::Post(Post {
            id: Some("post-1".to_string()),
            title: "Shipping Folio".to_string(),
            excerpt: "Notes from the rewrite".to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()),
            updated_at: None,
            status: RecordStatus::Draft,
        })];
        assert!(state.apply_fetch(RecordKind::Posts, generation, Ok(rows)));
        assert_eq!(state.visible().len(), 1);
        assert!(state.remove(RecordKind::Posts, "post-1"));
        assert!(state.visible().is_empty());
    }
}
