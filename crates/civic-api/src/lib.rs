//! JSON REST API for the civic representative index.
//!
//! Exposes an axum [`Router`] backed by a [`LookupEngine`]. Auth, TLS, static
//! assets and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", civic_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod health;
pub mod localreps;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use civic_core::event::EventSink;
use civic_index::LookupEngine;

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<E>(engine: Arc<LookupEngine<E>>) -> Router<()>
where
  E: EventSink + 'static,
{
  Router::new()
    .route("/", get(health::ping))
    .route("/status", get(health::status))
    .route("/localreps", get(localreps::followed::<E>))
    .route("/localreps/lookup", get(localreps::lookup::<E>))
    .route("/localreps/edit", post(localreps::edit::<E>))
    .with_state(engine)
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::{future::Future, sync::Arc};

  use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
  };
  use civic_core::{
    PublishError,
    event::{FollowPolicy, UserRepUpdate},
  };
  use civic_index::{GeographyIndex, RepresentativeIndex, SubscriptionStore};
  use civic_records::{
    DecodeOptions, OfficialRow, RepresentativeRow, ZipDivisionRow, decode,
  };
  use serde::de::DeserializeOwned;
  use tower::ServiceExt as _;

  use crate::localreps::{AddressResponse, FollowListResponse, UserRepsResponse};

  const ROSTER: &str = "\
id,title,first_name,last_name,state,ocd_id,total_votes,missed_votes,present_votes
D000197,Representative,Diana,DeGette,CO,ocd-division/country:us/state:co/cd:1,100,7,0
B001267,Senator,Michael,Bennet,CO,ocd-division/country:us/state:co,300,15,0
";

  const OFFICIALS: &str = "\
U.S. Senator,Michael F. Bennet,Colorado,ocd-division/country:us/state:co,B001267
U.S. Representative,Diana DeGette,CO-1,ocd-division/country:us/state:co/cd:1,D000197
";

  const ZIPS: &str = "\
80204,ocd-division/country:us/state:co
80204,ocd-division/country:us/state:co/cd:1
";

  fn indexes() -> (Arc<RepresentativeIndex>, Arc<GeographyIndex>) {
    let mut reps = RepresentativeIndex::new();
    let roster: Vec<RepresentativeRow> =
      decode("roster", ROSTER, &DecodeOptions::headed()).unwrap();
    reps.load_representatives(roster);
    let officials: Vec<OfficialRow> =
      decode("officials", OFFICIALS, &DecodeOptions::headerless()).unwrap();
    reps.load_division_groups(officials);

    let mut geo = GeographyIndex::new();
    let zips: Vec<ZipDivisionRow> =
      decode("zips", ZIPS, &DecodeOptions::headerless()).unwrap();
    geo.load_zip_divisions(zips);

    (Arc::new(reps), Arc::new(geo))
  }

  fn app() -> Router {
    let (reps, geo) = indexes();
    api_router(Arc::new(LookupEngine::new(
      reps,
      geo,
      SubscriptionStore::new(FollowPolicy::Idempotent),
    )))
  }

  struct DownSink;

  impl EventSink for DownSink {
    fn publish<'a>(
      &'a self,
      _event: &'a UserRepUpdate,
    ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a {
      async { Err(PublishError::Closed) }
    }
  }

  async fn send(app: Router, method: &str, uri: &str) -> Response {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    app.oneshot(req).await.unwrap()
  }

  async fn json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Health ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn ping_returns_pong() {
    let resp = send(app(), "GET", "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = json(resp).await;
    assert_eq!(body["message"], "pong");
  }

  #[tokio::test]
  async fn status_reports_ready() {
    let body: serde_json::Value = json(send(app(), "GET", "/status").await).await;
    assert_eq!(body["Status"], "Ok");
    assert_eq!(body["msg"], "ready");
  }

  // ── Lookup ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn lookup_returns_representatives_in_division_order() {
    let resp = send(app(), "GET", "/localreps/lookup?address=80204").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: AddressResponse = json(resp).await;
    assert_eq!(body.status, "Ok");
    assert_eq!(body.address, "80204");
    let guids: Vec<&str> =
      body.representatives.iter().map(|r| r.guid.as_str()).collect();
    assert_eq!(guids, vec!["B001267", "D000197"]);
    assert_eq!(body.representatives[1].percent_missed_votes, 7.0);
  }

  #[tokio::test]
  async fn lookup_unknown_address_is_empty_not_an_error() {
    let resp = send(app(), "GET", "/localreps/lookup?address=10001").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: AddressResponse = json(resp).await;
    assert!(body.representatives.is_empty());
  }

  #[tokio::test]
  async fn lookup_without_address_is_rejected() {
    let resp = send(app(), "GET", "/localreps/lookup").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Follows ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn edit_add_then_list_followed() {
    let app = app();
    let resp = send(
      app.clone(),
      "POST",
      "/localreps/edit?user_guid=u1&rep_guid=D000197&editTask=add",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: FollowListResponse = json(resp).await;
    assert_eq!(body.users_rep_list, vec!["D000197"]);

    send(
      app.clone(),
      "POST",
      "/localreps/edit?user_guid=u1&rep_guid=missing&editTask=add",
    )
    .await;

    let resp = send(app, "GET", "/localreps?user_guid=u1").await;
    let body: UserRepsResponse = json(resp).await;
    assert_eq!(body.user_guid, "u1");
    assert_eq!(body.users_rep_list.len(), 1);
    assert_eq!(body.users_rep_list[0].last_name, "DeGette");
  }

  #[tokio::test]
  async fn edit_remove_absent_is_ok() {
    let resp = send(
      app(),
      "POST",
      "/localreps/edit?user_guid=u1&rep_guid=D000197&editTask=remove",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: FollowListResponse = json(resp).await;
    assert!(body.users_rep_list.is_empty());
  }

  #[tokio::test]
  async fn edit_with_unknown_task_is_bad_request() {
    let resp = send(
      app(),
      "POST",
      "/localreps/edit?user_guid=u1&rep_guid=D000197&editTask=toggle",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("toggle"));
  }

  #[tokio::test]
  async fn edit_with_sink_down_is_unavailable_and_not_applied() {
    let (reps, geo) = indexes();
    let engine = Arc::new(LookupEngine::new(
      reps,
      geo,
      SubscriptionStore::new(FollowPolicy::Idempotent).with_sink(Arc::new(DownSink)),
    ));
    let app = api_router(Arc::clone(&engine));

    let resp = send(
      app,
      "POST",
      "/localreps/edit?user_guid=u1&rep_guid=D000197&editTask=add",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(engine.list_follows("u1").await.is_empty());
  }
}
