//! HTTP server layer for telos.
//!
//! Wraps the JSON API router from [`telos_api`] with Basic auth, serves the
//! profile-photo blob store, and owns runtime configuration. The process is
//! single-principal: every request is scoped to the configured user.

pub mod auth;
pub mod error;
pub mod photos;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{Request, State},
  middleware::{self, Next},
  response::{IntoResponse, Response},
  routing::{get, put},
};
use serde::Deserialize;
use telos_core::store::PlannerStore;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use auth::AuthConfig;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// External base URL, used to build photo links.
  pub base_url:           String,
  pub store_path:         PathBuf,
  pub photo_dir:          PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  /// UUID of the configured principal; every row is scoped to it.
  pub owner:  Uuid,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store.clone(),
      owner:  self.owner,
      config: self.config.clone(),
      auth:   self.auth.clone(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full server router: the JSON API and the photo upload behind
/// Basic auth under `/api`, photo serving public under `/photos`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PlannerStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let protected = Router::new()
    .route("/profile/photo", put(photos::upload::<S>))
    .with_state(state.clone())
    .merge(telos_api::api_router(state.store.clone(), state.owner))
    .layer(middleware::from_fn_with_state(
      state.clone(),
      require_auth::<S>,
    ));

  let public = Router::new()
    .route("/photos/{name}", get(photos::serve::<S>))
    .with_state(state);

  Router::new()
    .nest("/api", protected)
    .merge(public)
    .layer(TraceLayer::new_for_http())
}

/// Reject the request with 401 unless the Basic credentials check out.
async fn require_auth<S>(
  State(state): State<AppState<S>>,
  req: Request,
  next: Next,
) -> Response
where
  S: PlannerStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  match auth::verify_auth(req.headers(), &state.auth) {
    Ok(()) => next.run(req).await,
    Err(e) => e.into_response(),
  }
}

// ─── Integration tests ───────────────────────────────────────────────────────
