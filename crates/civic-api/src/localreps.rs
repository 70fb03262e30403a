//! Handlers for `/localreps` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/localreps/lookup` | `?address` — representatives serving an address |
//! | `GET`  | `/localreps` | `?user_guid` — the user's followed representatives |
//! | `POST` | `/localreps/edit` | `?user_guid&rep_guid&editTask=add\|remove` |

use std::{str::FromStr, sync::Arc};

use axum::{
  Json,
  extract::{Query, State},
};
use civic_core::{
  event::{EventSink, FollowAction},
  representative::Representative,
};
use civic_index::LookupEngine;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const OK: &str = "Ok";

// ─── Lookup by address ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddressParams {
  /// Exact-match address key, normally a zip code.
  pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
  #[serde(rename = "Status")]
  pub status:          String,
  pub address:         String,
  pub representatives: Vec<Representative>,
}

/// `GET /localreps/lookup?address=<zip>`
pub async fn lookup<E>(
  State(engine): State<Arc<LookupEngine<E>>>,
  Query(params): Query<AddressParams>,
) -> Json<AddressResponse>
where
  E: EventSink + 'static,
{
  let representatives = engine.resolve_by_address(&params.address);
  Json(AddressResponse {
    status: OK.to_owned(),
    address: params.address,
    representatives,
  })
}

// ─── Followed representatives ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserParams {
  pub user_guid: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRepsResponse {
  #[serde(rename = "Status")]
  pub status:         String,
  pub user_guid:      String,
  pub users_rep_list: Vec<Representative>,
}

/// `GET /localreps?user_guid=<guid>`
pub async fn followed<E>(
  State(engine): State<Arc<LookupEngine<E>>>,
  Query(params): Query<UserParams>,
) -> Json<UserRepsResponse>
where
  E: EventSink + 'static,
{
  let users_rep_list = engine.resolve_by_user(&params.user_guid).await;
  Json(UserRepsResponse {
    status: OK.to_owned(),
    user_guid: params.user_guid,
    users_rep_list,
  })
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EditParams {
  pub user_guid: String,
  pub rep_guid:  String,
  /// `add` or `remove`.
  #[serde(rename = "editTask")]
  pub edit_task: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowListResponse {
  #[serde(rename = "Status")]
  pub status:         String,
  pub user_guid:      String,
  /// Followed representative GUIDs after the edit.
  pub users_rep_list: Vec<String>,
}

/// `POST /localreps/edit?user_guid=<guid>&rep_guid=<guid>&editTask=add|remove`
pub async fn edit<E>(
  State(engine): State<Arc<LookupEngine<E>>>,
  Query(params): Query<EditParams>,
) -> Result<Json<FollowListResponse>, ApiError>
where
  E: EventSink + 'static,
{
  let action = FollowAction::from_str(&params.edit_task).map_err(|_| {
    ApiError::BadRequest(format!(
      "editTask must be `add` or `remove`, got {:?}",
      params.edit_task
    ))
  })?;

  let users_rep_list = match action {
    FollowAction::Add => engine.add_follow(&params.user_guid, &params.rep_guid).await?,
    FollowAction::Remove => {
      engine.remove_follow(&params.user_guid, &params.rep_guid).await?
    }
  };

  Ok(Json(FollowListResponse {
    status: OK.to_owned(),
    user_guid: params.user_guid,
    users_rep_list,
  }))
}
