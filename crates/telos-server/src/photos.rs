//! Profile-photo blob store.
//!
//! Uploaded images are written to `photo_dir` under a name derived from the
//! SHA-256 of their content, so re-uploading the same image is idempotent and
//! the files never need locking. The public URL is stored on the profile row.

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use sha2::{Digest, Sha256};
use telos_core::{store::PlannerStore, user::User};

use crate::{AppState, error::Error};

/// Media types accepted for profile photos, with their file extensions.
const ACCEPTED: &[(&str, &str)] = &[
  ("image/jpeg", "jpg"),
  ("image/png", "png"),
  ("image/webp", "webp"),
];

fn extension_for(content_type: &str) -> Option<&'static str> {
  ACCEPTED
    .iter()
    .find(|(mime, _)| content_type.starts_with(mime))
    .map(|(_, ext)| *ext)
}

fn content_type_for(name: &str) -> &'static str {
  match name.rsplit('.').next() {
    Some("jpg") => "image/jpeg",
    Some("png") => "image/png",
    Some("webp") => "image/webp",
    _ => "application/octet-stream",
  }
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// `PUT /api/profile/photo` — raw image bytes; `Content-Type` picks the
/// extension. Returns the updated profile row.
pub async fn upload<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Json<User>, Error>
where
  S: PlannerStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default();
  let ext = extension_for(content_type).ok_or_else(|| {
    Error::BadRequest(format!("unsupported photo type: {content_type:?}"))
  })?;
  if body.is_empty() {
    return Err(Error::BadRequest("photo body is empty".into()));
  }

  let hash = Sha256::digest(&body);
  let file_name = format!("{}.{ext}", hex::encode(hash));

  let dir = state.config.photo_dir.clone();
  tokio::fs::create_dir_all(&dir)
    .await
    .map_err(|e| Error::Blob(format!("creating photo dir: {e}")))?;
  tokio::fs::write(dir.join(&file_name), &body)
    .await
    .map_err(|e| Error::Blob(format!("writing photo: {e}")))?;

  let url = format!(
    "{}/photos/{file_name}",
    state.config.base_url.trim_end_matches('/'),
  );

  let user = state
    .store
    .update_profile(state.owner, None, Some(url))
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(user))
}

// ─── Serve ───────────────────────────────────────────────────────────────────

/// `GET /photos/:name` — public; photo links work without credentials.
pub async fn serve<S>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Response, Error>
where
  S: PlannerStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Names are content hashes we minted ourselves; anything else is rejected.
  if name.contains('/') || name.contains("..") {
    return Err(Error::NotFound);
  }

  let path = state.config.photo_dir.join(&name);
  let bytes = tokio::fs::read(&path).await.map_err(|_| Error::NotFound)?;

  Ok(
    (
      StatusCode::OK,
      [
        (header::CONTENT_TYPE, content_type_for(&name)),
        (header::CACHE_CONTROL, "max-age=3600"),
      ],
      bytes,
    )
      .into_response(),
  )
}
