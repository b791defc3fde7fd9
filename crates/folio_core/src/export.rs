//! CSV export of contact submissions.
//!
//! Export always covers the entire fetched set, not the filtered or paged
//! view; the dashboard hands over [`DashState::all_submissions`] directly.
//!
//! [`DashState::all_submissions`]: crate::controller::DashState::all_submissions

use crate::models::Submission;
use chrono::{DateTime, Local, Utc};

const HEADER: &str = "Name,Email,Message,Status,Created At";

/// Human-readable timestamp used in exported rows and the dashboard tables,
/// e.g. `Mar 1, 2024, 9:30:00 AM`.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%b %-d, %Y, %-I:%M:%S %p").to_string()
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Render submissions as CSV text. Every cell is quoted, with embedded
/// quotes doubled, so commas and line breaks inside messages survive.
pub fn submissions_to_csv<'a, I>(submissions: I) -> String
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut out = String::from(HEADER);
    out.push('\n');
    for submission in submissions {
        let cells = [
            quote(&submission.name),
            quote(&submission.email),
            quote(&submission.message),
            quote(submission.status.as_str()),
            quote(&format_timestamp(submission.created_at)),
        ];
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Default export filename, dated with the local calendar day:
/// `contact-submissions-YYYY-MM-DD.csv`.
pub fn export_filename() -> String {
    format!(
        "contact-submissions-{}.csv",
        Local::now().format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionStatus;
    use chrono::TimeZone;

    fn submission(name: &str, message: &str) -> Submission {
        Submission {
            id: "sub-1".to_string(),
            name: name.to_string(),
            email: "sender@example.com".to_string(),
            message: message.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            status: SubmissionStatus::Unread,
        }
    }

    #[test]
    fn header_row_matches_expected_columns() {
        let csv = submissions_to_csv([]);
        assert_eq!(csv, "Name,Email,Message,Status,Created At\n");
    }

    #[test]
    fn cells_are_quoted_and_embedded_quotes_doubled() {
        let row = submission("Ada \"The Countess\" Lovelace", "Line one,\nline two");
        let csv = submissions_to_csv([&row]);
        let lines: Vec<&str> = csv.splitn(2, '\n').collect();
        assert_eq!(lines[0], "Name,Email,Message,Status,Created At");
        assert!(lines[1].starts_with("\"Ada \"\"The Countess\"\" Lovelace\","));
        assert!(lines[1].contains("\"Line one,\nline two\""));
        assert!(lines[1].contains("\"unread\""));
    }

    #[test]
    fn timestamp_renders_without_zero_padding() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(time), "Mar 1, 2024, 9:05:00 AM");
    }

    #[test]
    fn export_covers_all_rows_regardless_of_view_state() {
        use crate::controller::DashState;
        use crate::models::{Record, RecordKind};

        let mut state = DashState::new();
        let generation = state.begin_fetch();
        let rows = vec![
            Record::Submission(submission("Ada", "First")),
            Record::Submission(Submission {
                id: "sub-2".to_string(),
                ..submission("Grace", "Second")
            }),
        ];
        assert!(state.apply_fetch(RecordKind::Submissions, generation, Ok(rows)));

        // The search hides one row from the table but not from the export.
        state.set_search("Grace".to_string());
        assert_eq!(state.total_filtered(), 1);

        let csv = submissions_to_csv(state.all_submissions());
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("\"Ada\""));
        assert!(csv.contains("\"Grace\""));
    }

    #[test]
    fn export_filename_carries_the_date() {
        let name = export_filename();
        assert!(name.starts_with("contact-submissions-"));
        assert!(name.ends_with(".csv"));
        // contact-submissions- + YYYY-MM-DD + .csv
        assert_eq!(name.len(), "contact-submissions-".len() + 10 + ".csv".len());
    }
}
