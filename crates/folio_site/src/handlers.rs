//! Public API handlers: published content plus the contact form.

use crate::{error::HttpError, AppState};
use axum::{extract::State, http::StatusCode, Json};
use folio_core::models::{NewSubmission, Post, Project, RecordStatus, SubmissionStatus};
use serde::Deserialize;
use serde_json::json;

/// GET /api/projects — published projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, HttpError> {
    let rows = state.gateway.select_all("projects").await?;
    let projects = rows
        .into_iter()
        .map(serde_json::from_value::<Project>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(folio_core::AppError::from)?;
    Ok(Json(
        projects
            .into_iter()
            .filter(|project| project.status == RecordStatus::Published)
            .collect(),
    ))
}

/// GET /api/posts — published posts, newest first.
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, HttpError> {
    let rows = state.gateway.select_all("posts").await?;
    let posts = rows
        .into_iter()
        .map(serde_json::from_value::<Post>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(folio_core::AppError::from)?;
    Ok(Json(
        posts
            .into_iter()
            .filter(|post| post.status == RecordStatus::Published)
            .collect(),
    ))
}

/// Contact-form request body.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

fn validate_contact(form: &ContactForm) -> Result<NewSubmission, HttpError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(HttpError::validation("name", "Name is required"));
    }
    let email = form.email.trim();
    if email.is_empty() {
        return Err(HttpError::validation("email", "Email is required"));
    }
    if !email_looks_valid(email) {
        return Err(HttpError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    let message = form.message.trim();
    if message.is_empty() {
        return Err(HttpError::validation("message", "Message is required"));
    }
    Ok(NewSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        status: SubmissionStatus::Unread,
    })
}

/// Minimal shape check: one `@`, non-empty local part, a dot in the domain,
/// no whitespace. Real verification is the backend's problem.
fn email_looks_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// POST /api/contact — validate and store a submission as unread.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<serde_json::Value>), HttpError> {
    let submission = validate_contact(&form)?;
    let body = serde_json::to_value(&submission).map_err(folio_core::AppError::from)?;
    state.gateway.insert("contact_submissions", &body).await?;
    tracing::info!(email = %submission.email, "contact submission stored");
    Ok((StatusCode::CREATED, Json(json!({ "ok": true }))))
}
