//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | Everyone, with current status |
//! | `POST` | `/people` | Body: `{"name":"..."}`; 409 if the name is taken |
//! | `GET`  | `/people/{name}` | 404 if not found |
//! | `PUT`  | `/people/{name}` | Body: `{"name":"<new>"}`; renames |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  person::{Person, PersonStatus},
  store::RosterStore,
};
use serde::Deserialize;

use crate::{error::ApiError, extract::ApiJson};

/// JSON body accepted by `POST /people` and `PUT /people/{name}`.
#[derive(Debug, Deserialize)]
pub struct NameBody {
  pub name: String,
}

/// `GET /people`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PersonStatus>>, ApiError>
where
  S: RosterStore,
{
  let people = store.list_people().await.map_err(ApiError::store)?;
  Ok(Json(people))
}

/// `POST /people`: returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NameBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let person = store
    .create_person(&body.name)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

/// `GET /people/{name}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<PersonStatus>, ApiError>
where
  S: RosterStore,
{
  let person = store
    .get_person(&name)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(name))?;
  Ok(Json(person))
}

/// `PUT /people/{name}`: the body carries the new name.
pub async fn rename<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
  ApiJson(body): ApiJson<NameBody>,
) -> Result<Json<Person>, ApiError>
where
  S: RosterStore,
{
  let person = store
    .rename_person(&name, &body.name)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(person))
}
