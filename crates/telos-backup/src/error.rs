//! Error types for the telos-backup codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("backup document is not a JSON object")]
  NotAnObject,

  #[error("malformed {section} row: {detail}")]
  MalformedRow {
    section: &'static str,
    detail:  String,
  },

  #[error("legacy {key} entry is not decodable")]
  MalformedLegacyEntry { key: String },

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
