//! HTTP route handlers.
//!
//! No cross-request state beyond the shared [`AppState`]: each request is
//! handled independently, ordering is delegated to the store's
//! id-descending sort at read time.

use std::path::PathBuf;

use axum::{
    body::Bytes,
    extract::{Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json, RequestExt,
};
use serde::Deserialize;
use tracing::{debug, error, info};

use corkboard_db::{CreateNoteRequest, Database, Error, Note, NoteRepository};

use crate::markdown::render_markdown;
use crate::render::{render_index, RenderedNote};
use crate::upload::{self, UPLOAD_FIELD};

/// Application state shared across handlers.
///
/// Constructed once in main before the server accepts requests and passed
/// explicitly; the pool inside `db` is read-shared and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Static-serving root; uploads land under `<public_dir>/uploads`.
    pub public_dir: PathBuf,
}

/// Error type for handler responses.
pub enum ApiError {
    Database(Error),
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(err) => {
                error!(
                    subsystem = "web",
                    component = "handlers",
                    error = %err,
                    "Request failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, message).into_response()
    }
}

fn html_page(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}

fn to_rendered(notes: &[Note]) -> Vec<RenderedNote> {
    notes
        .iter()
        .map(|n| RenderedNote {
            id: n.id,
            html: render_markdown(&n.description),
        })
        .collect()
}

/// GET / — render the note list, newest first.
///
/// On a read failure the page is still rendered (empty list) with a generic
/// error banner, same policy as the save-failure path.
pub async fn index(State(state): State<AppState>) -> Response {
    match state.db.notes.list().await {
        Ok(notes) => html_page(StatusCode::OK, render_index(&to_rendered(&notes), None)),
        Err(e) => {
            error!(
                subsystem = "web",
                component = "handlers",
                op = "index",
                error = %e,
                "Failed to list notes"
            );
            let page = render_index(&[], Some("Error loading notes. Please try again later."));
            html_page(StatusCode::INTERNAL_SERVER_ERROR, page)
        }
    }
}

/// URL-encoded fallback body for `POST /note` (no file field possible).
#[derive(Debug, Deserialize)]
struct NoteForm {
    #[serde(default)]
    description: String,
}

/// One parsed submission: text plus at most one raw file.
struct Submission {
    description: String,
    image: Option<RawUpload>,
}

struct RawUpload {
    filename: String,
    content_type: String,
    data: Bytes,
}

async fn parse_multipart(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut description = String::new();
    let mut image: Option<RawUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("description") => {
                description = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
            }
            Some(name) if name == UPLOAD_FIELD => {
                // Browsers send an empty file part when no file is chosen.
                let filename = match field.file_name() {
                    Some(f) if !f.is_empty() => f.to_string(),
                    _ => continue,
                };
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                image = Some(RawUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(Submission { description, image })
}

async fn parse_submission(req: Request) -> Result<Submission, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart: Multipart = req
            .extract()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?;
        parse_multipart(multipart).await
    } else {
        let Form(form): Form<NoteForm> = req
            .extract()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Form error: {}", e)))?;
        Ok(Submission {
            description: form.description,
            image: None,
        })
    }
}

/// Append the uploaded image's markdown reference to the description.
fn compose_description(description: &str, image_link: Option<&str>) -> String {
    match image_link {
        Some(link) => format!("{}\n![]({})", description, link),
        None => description.to_string(),
    }
}

/// POST /note — validate the optional upload, persist, redirect.
///
/// Upload validation runs first and short-circuits with 400. An
/// empty-after-trim submission is discarded silently (redirect, no note).
/// A save failure re-renders the index with a generic error at 500.
pub async fn create_note(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, ApiError> {
    let submission = parse_submission(req).await?;

    let stored = match &submission.image {
        Some(file) => Some(
            upload::store_upload(
                &state.public_dir,
                &file.filename,
                &file.content_type,
                &file.data,
            )
            .await?,
        ),
        None => None,
    };

    let description = compose_description(
        &submission.description,
        stored.as_ref().map(|s| s.link.as_str()),
    );

    if description.trim().is_empty() {
        debug!(
            subsystem = "web",
            component = "handlers",
            op = "create_note",
            "Discarding empty note submission"
        );
        return Ok(Redirect::to("/").into_response());
    }

    match state
        .db
        .notes
        .insert(CreateNoteRequest { description })
        .await
    {
        Ok(id) => {
            info!(
                subsystem = "web",
                component = "handlers",
                op = "create_note",
                note_id = id,
                has_image = stored.is_some(),
                "Note created"
            );
            // Redirect-after-post: a refresh re-fetches instead of resubmitting.
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            error!(
                subsystem = "web",
                component = "handlers",
                op = "create_note",
                error = %e,
                "Failed to save note"
            );
            // Best-effort: still show existing notes alongside the error.
            let notes = state.db.notes.list().await.unwrap_or_default();
            let page = render_index(
                &to_rendered(&notes),
                Some("Failed to save note. Please try again."),
            );
            Ok(html_page(StatusCode::INTERNAL_SERVER_ERROR, page))
        }
    }
}

/// GET /healthz — liveness of the store connection.
pub async fn healthz(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").execute(state.db.pool()).await {
        Ok(_) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Err(e) => {
            error!(
                subsystem = "web",
                component = "handlers",
                op = "healthz",
                error = %e,
                "Health check failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_description_without_image() {
        assert_eq!(compose_description("hello", None), "hello");
    }

    #[test]
    fn test_compose_description_appends_image_reference() {
        assert_eq!(
            compose_description("caption", Some("/uploads/image-1700000000000.png")),
            "caption\n![](/uploads/image-1700000000000.png)"
        );
    }

    #[test]
    fn test_image_only_submission_is_not_empty() {
        let composed = compose_description("", Some("/uploads/image-1.png"));
        assert!(!composed.trim().is_empty());
    }

    #[test]
    fn test_whitespace_only_submission_trims_empty() {
        let composed = compose_description("   \n\t", None);
        assert!(composed.trim().is_empty());
    }

    #[test]
    fn test_to_rendered_preserves_order_and_ids() {
        let notes = vec![
            Note {
                id: 9,
                description: "newest".to_string(),
            },
            Note {
                id: 3,
                description: "older".to_string(),
            },
        ];
        let rendered = to_rendered(&notes);
        assert_eq!(rendered[0].id, 9);
        assert!(rendered[0].html.contains("newest"));
        assert_eq!(rendered[1].id, 3);
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err: ApiError = Error::InvalidInput("nope".to_string()).into();
        match err {
            ApiError::BadRequest(msg) => assert_eq!(msg, "nope"),
            _ => panic!("Expected BadRequest"),
        }
    }
}
