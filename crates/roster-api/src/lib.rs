//! JSON HTTP API over a [`RosterStore`].
//!
//! Every handler is generic over the backend; the router is built once with
//! [`api_router`] and served by the binary. Failures are rendered as
//! `{"error_kind": ..., "message": ...}` with a status derived from the
//! [`roster_core::ErrorKind`].

pub mod duties;
pub mod error;
pub mod extract;
pub mod people;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
pub use error::ApiError;
use roster_core::store::RosterStore;

/// Build the roster API router for the given store.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{name}",
      get(people::get_one::<S>).put(people::rename::<S>),
    )
    .route("/duties", post(duties::assign::<S>))
    .route("/duties/{name}", get(duties::history::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
  };
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::api_router;

  async fn store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn send(
    store: &Arc<SqliteStore>,
    method: Method,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(store.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn add_person(store: &Arc<SqliteStore>, name: &str) {
    let (status, _) =
      send(store, Method::POST, "/people", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
  }

  async fn assign(
    store: &Arc<SqliteStore>,
    name: &str,
    title: &str,
    start: &str,
  ) -> (StatusCode, Value) {
    let body = json!({
      "name": name,
      "rank": "Captain",
      "title": title,
      "start_date": start,
    });
    send(store, Method::POST, "/duties", Some(body)).await
  }

  // ── People ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_person_returns_201() {
    let store = store().await;
    let (status, body) = send(
      &store,
      Method::POST,
      "/people",
      Some(json!({ "name": "Jane Doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Jane Doe");
    assert!(body["person_id"].is_string());
  }

  #[tokio::test]
  async fn duplicate_person_is_conflict() {
    let store = store().await;
    add_person(&store, "Jane Doe").await;
    let (status, body) = send(
      &store,
      Method::POST,
      "/people",
      Some(json!({ "name": "jane doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_kind"], "NameConflict");
  }

  #[tokio::test]
  async fn blank_person_name_is_bad_request() {
    let store = store().await;
    let (status, body) =
      send(&store, Method::POST, "/people", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_kind"], "InvalidInput");
  }

  #[tokio::test]
  async fn get_unknown_person_is_404() {
    let store = store().await;
    let (status, body) =
      send(&store, Method::GET, "/people/Nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_kind"], "NotFound");
  }

  #[tokio::test]
  async fn get_person_decodes_path_and_shows_status() {
    let store = store().await;
    add_person(&store, "Teresa Gonzales").await;
    let (status, body) =
      send(&store, Method::GET, "/people/Teresa%20Gonzales", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Teresa Gonzales");
    assert!(body["status"].is_null());

    assign(&store, "Teresa Gonzales", "Pilot", "2024-01-01").await;
    let (_, body) =
      send(&store, Method::GET, "/people/Teresa%20Gonzales", None).await;
    assert_eq!(body["status"]["current_title"], "Pilot");
    assert_eq!(body["status"]["career_start_date"], "2024-01-01");
    assert!(body["status"]["career_end_date"].is_null());
  }

  #[tokio::test]
  async fn rename_person() {
    let store = store().await;
    add_person(&store, "Jane Doe").await;
    let (status, body) = send(
      &store,
      Method::PUT,
      "/people/Jane%20Doe",
      Some(json!({ "name": "Jane Smith" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jane Smith");

    let (status, _) = send(&store, Method::GET, "/people/Jane%20Doe", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn list_people() {
    let store = store().await;
    add_person(&store, "Alice").await;
    add_person(&store, "Bob").await;
    let (status, body) = send(&store, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
  }

  // ── Duties ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn assign_returns_record_id_and_closes_previous() {
    let store = store().await;
    add_person(&store, "Jane Doe").await;

    let (status, body) = assign(&store, "Jane Doe", "Pilot", "2024-01-01").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["record_id"].is_string());

    let (status, _) = assign(&store, "Jane Doe", "Navigator", "2024-03-01").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
      send(&store, Method::GET, "/duties/Jane%20Doe", None).await;
    assert_eq!(status, StatusCode::OK);
    let duties = body["duties"].as_array().unwrap();
    assert_eq!(duties.len(), 2);
    assert_eq!(duties[0]["title"], "Pilot");
    assert_eq!(duties[0]["end_date"], "2024-02-29");
    assert!(duties[1]["end_date"].is_null());
    assert_eq!(body["person"]["status"]["current_title"], "Navigator");
  }

  #[tokio::test]
  async fn assign_to_unknown_person_is_404() {
    let store = store().await;
    let (status, body) = assign(&store, "Nobody", "Pilot", "2024-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_kind"], "NotFound");
  }

  #[tokio::test]
  async fn assign_after_retirement_is_conflict() {
    let store = store().await;
    add_person(&store, "Jane Doe").await;
    assign(&store, "Jane Doe", "Pilot", "2020-01-01").await;
    let (status, _) = assign(&store, "Jane Doe", "RETIRED", "2024-06-01").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
      assign(&store, "Jane Doe", "Navigator", "2025-01-01").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_kind"], "AlreadyRetired");

    let (_, body) = send(&store, Method::GET, "/people/Jane%20Doe", None).await;
    assert_eq!(body["status"]["career_end_date"], "2024-05-31");
  }

  #[tokio::test]
  async fn duplicate_and_overlap_are_conflicts() {
    let store = store().await;
    add_person(&store, "Jane Doe").await;
    assign(&store, "Jane Doe", "Pilot", "2024-01-01").await;

    let (status, body) = assign(&store, "Jane Doe", "Pilot", "2024-01-01").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_kind"], "DuplicateAssignment");

    let (status, body) =
      assign(&store, "Jane Doe", "Navigator", "2023-06-01").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_kind"], "OverlapConflict");
  }

  #[tokio::test]
  async fn history_of_unknown_person_is_404() {
    let store = store().await;
    let (status, _) = send(&store, Method::GET, "/duties/Nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn malformed_date_is_rejected_before_the_store() {
    let store = store().await;
    add_person(&store, "Jane Doe").await;
    let (status, body) = assign(&store, "Jane Doe", "Pilot", "not-a-date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_kind"], "InvalidInput");
    assert!(body["message"].as_str().is_some_and(|m| m.contains("start_date")));

    let (_, body) = send(&store, Method::GET, "/duties/Jane%20Doe", None).await;
    assert_eq!(body["duties"].as_array().map(Vec::len), Some(0));
  }

  #[tokio::test]
  async fn wrongly_typed_body_gets_the_error_shape() {
    let store = store().await;
    let (status, body) =
      send(&store, Method::POST, "/people", Some(json!({ "name": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_kind"], "InvalidInput");
    assert_eq!(body.as_object().map(|o| o.len()), Some(2));
  }
}
