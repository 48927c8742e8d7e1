//! Handlers for `/duties` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/duties` | Body: [`AssignDuty`]; returns 201 + `{"record_id"}` |
//! | `GET`  | `/duties/{name}` | Status plus full timeline; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  duty::{AssignDuty, DutyHistory},
  store::RosterStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ApiError, extract::ApiJson};

#[derive(Debug, Serialize)]
pub struct Assigned {
  pub record_id: Uuid,
}

/// `POST /duties`
pub async fn assign<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<AssignDuty>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let record = store.assign_duty(&body).await.map_err(ApiError::store)?;
  Ok((
    StatusCode::CREATED,
    Json(Assigned {
      record_id: record.record_id,
    }),
  ))
}

/// `GET /duties/{name}`
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<DutyHistory>, ApiError>
where
  S: RosterStore,
{
  let history = store
    .duty_history(&name)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(name))?;
  Ok(Json(history))
}
