//! Record models shared by the dashboard and the public site.
//!
//! The three record kinds live behind one [`Record`] tagged union so the
//! dashboard renders every kind through the same table/search/sort path; the
//! per-kind column specs map kind to header labels and sort keys.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a contact-form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Unread,
    Read,
    Archived,
}

impl SubmissionStatus {
    /// Stable lowercase form, matching the hosted backend's column values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Archived => "archived",
        }
    }

    /// The read/unread flip used by the dashboard row action.
    pub fn toggled_read(&self) -> Self {
        match self {
            Self::Unread => Self::Read,
            _ => Self::Unread,
        }
    }
}

/// Publication status shared by projects and posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Draft,
    Published,
    Archived,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// All selectable states, in editor display order.
    pub const ALL: [RecordStatus; 3] = [Self::Draft, Self::Published, Self::Archived];
}

/// A contact-form submission. Created only by the public site; the dashboard
/// mutates its status or deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

/// A portfolio project. `id` is `None` only while a draft exists in the
/// editor; the hosted backend assigns it on first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub status: RecordStatus,
}

/// A blog post. Same lifecycle as [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub status: RecordStatus,
}

/// Request payload for inserting a contact submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: SubmissionStatus,
}

/// One of the three managed record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Submissions,
    Projects,
    Posts,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [Self::Submissions, Self::Projects, Self::Posts];

    /// Table name on the hosted backend.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Submissions => "contact_submissions",
            Self::Projects => "projects",
            Self::Posts => "posts",
        }
    }

    /// Human label used for tabs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submissions => "submissions",
            Self::Projects => "projects",
            Self::Posts => "posts",
        }
    }

    /// Sortable table columns for this kind, in display order. The trailing
    /// actions column is rendered by the UI and carries no sort key.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Self::Submissions => &[
                Column {
                    label: "Date",
                    sort: SortKey::CreatedAt,
                },
                Column {
                    label: "Name",
                    sort: SortKey::Name,
                },
                Column {
                    label: "Email",
                    sort: SortKey::Email,
                },
                Column {
                    label: "Status",
                    sort: SortKey::Status,
                },
            ],
            Self::Projects | Self::Posts => &[
                Column {
                    label: "Created",
                    sort: SortKey::CreatedAt,
                },
                Column {
                    label: "Title",
                    sort: SortKey::Title,
                },
                Column {
                    label: "Status",
                    sort: SortKey::Status,
                },
            ],
        }
    }
}

/// A sortable dashboard table column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub sort: SortKey,
}

/// Field selector for sorting. Kinds that lack the selected field compare
/// all rows equal, so the fetch order shows through under the stable sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Name,
    Email,
    Status,
    Title,
}

/// Sort direction for the active sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort key plus direction. Selecting the active key again flips the
/// direction; selecting a new key resets to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// Apply a header click: toggle direction on the active key, otherwise
    /// switch to the new key ascending.
    pub fn toggled(&self, key: SortKey) -> Self {
        if self.key == key {
            let direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            Self { key: self.key, direction }
        } else {
            Self {
                key,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Comparable value extracted from a record field for sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Time(DateTime<Utc>),
    Text(String),
}

/// Tagged union over the three record shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Submission(Submission),
    Project(Project),
    Post(Post),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Submission(_) => RecordKind::Submissions,
            Self::Project(_) => RecordKind::Projects,
            Self::Post(_) => RecordKind::Posts,
        }
    }

    /// Server-assigned identifier; `None` only for unsaved drafts, which
    /// never appear in a fetched set.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Submission(s) => Some(s.id.as_str()),
            Self::Project(p) => p.id.as_deref(),
            Self::Post(p) => p.id.as_deref(),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Submission(s) => Some(s.created_at),
            Self::Project(p) => p.created_at,
            Self::Post(p) => p.created_at,
        }
    }

    /// String form of every field, used by the substring search. Timestamps
    /// render as RFC 3339, matching the wire form they arrived in.
    pub fn field_strings(&self) -> Vec<String> {
        fn ts(value: Option<DateTime<Utc>>) -> String {
            value.map(|t| t.to_rfc3339()).unwrap_or_default()
        }
        match self {
            Self::Submission(s) => vec![
                s.id.clone(),
                s.name.clone(),
                s.email.clone(),
                s.message.clone(),
                s.created_at.to_rfc3339(),
                s.status.as_str().to_string(),
            ],
            Self::Project(p) => vec![
                p.id.clone().unwrap_or_default(),
                p.title.clone(),
                p.description.clone(),
                ts(p.created_at),
                ts(p.updated_at),
                p.status.as_str().to_string(),
            ],
            Self::Post(p) => vec![
                p.id.clone().unwrap_or_default(),
                p.title.clone(),
                p.excerpt.clone(),
                ts(p.created_at),
                ts(p.updated_at),
                p.status.as_str().to_string(),
            ],
        }
    }

    /// Comparable value for the given sort key, or `None` when this record
    /// kind has no such field.
    pub fn sort_value(&self, key: SortKey) -> Option<SortValue> {
        match (self, key) {
            (_, SortKey::CreatedAt) => self.created_at().map(SortValue::Time),
            (Self::Submission(s), SortKey::Name) => Some(SortValue::Text(s.name.clone())),
            (Self::Submission(s), SortKey::Email) => Some(SortValue::Text(s.email.clone())),
            (Self::Submission(s), SortKey::Status) => {
                Some(SortValue::Text(s.status.as_str().to_string()))
            }
            (Self::Project(p), SortKey::Title) => Some(SortValue::Text(p.title.clone())),
            (Self::Project(p), SortKey::Status) => {
                Some(SortValue::Text(p.status.as_str().to_string()))
            }
            (Self::Post(p), SortKey::Title) => Some(SortValue::Text(p.title.clone())),
            (Self::Post(p), SortKey::Status) => {
                Some(SortValue::Text(p.status.as_str().to_string()))
            }
            _ => None,
        }
    }
}

/// Decode raw gateway rows into typed records for one kind.
///
/// # Errors
/// Returns [`AppError::Decode`] when a row does not match the kind's shape.
pub fn records_from_json(
    kind: RecordKind,
    rows: Vec<serde_json::Value>,
) -> Result<Vec<Record>, AppError> {
    rows.into_iter()
        .map(|row| {
            Ok(match kind {
                RecordKind::Submissions => Record::Submission(serde_json::from_value(row)?),
                RecordKind::Projects => Record::Project(serde_json::from_value(row)?),
                RecordKind::Posts => Record::Post(serde_json::from_value(row)?),
            })
        })
        .collect()
}
