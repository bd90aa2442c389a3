//!  Nomad Rental Search
//!
//!  Copyright (C) 2026  Nomad Camper Hire
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Submission Endpoint
//!
//! The server-side consumer of the search core. A posted field set is gated
//! by the anti-forgery token, validated, and answered with either the
//! booking-engine redirect URL or the field error map — always JSON, never
//! an exception path.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::booking_url::booking_query_pairs;
use crate::search_params::{RentalSearchParams, coerce_guests, merge_search_query};
use crate::token::TokenStore;
use crate::validation::{Field, RangePolicy};

/// Per-process configuration, one explicit value object — no globals.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Booking-engine search page the redirect URL points at.
    pub base_url: String,
    /// Menu item identifier forwarded to the booking engine.
    pub item_id: String,
    pub max_nights: i64,
    pub token_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nomadcamperhire.com/search-your-van/index.php".to_string(),
            item_id: "613".to_string(),
            max_nights: 120,
            token_ttl: Duration::from_secs(12 * 60 * 60),
        }
    }
}

pub struct AppState {
    pub config: ServerConfig,
    pub tokens: TokenStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let tokens = TokenStore::new(config.token_ttl);
        Self { config, tokens }
    }
}

/// Posted field set, original form names.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub token: String,
    #[serde(default, rename = "pickup-location")]
    pub pickup_location: String,
    #[serde(default, rename = "dropoff-location")]
    pub dropoff_location: String,
    #[serde(default, rename = "pickup-date")]
    pub pickup_date: String,
    #[serde(default, rename = "dropoff-date")]
    pub dropoff_date: String,
    #[serde(default, rename = "pickup-time")]
    pub pickup_time: String,
    #[serde(default, rename = "dropoff-time")]
    pub dropoff_time: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "base-url")]
    pub base_url: String,
    #[serde(default)]
    pub itemid: String,
    /// The page's current query string, carried along so campaign tags
    /// survive onto the redirect.
    #[serde(default)]
    pub querystring: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<Field, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/token", get(issue_token))
        .route("/api/submit", post(handle_submit))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn issue_token(State(state): State<Arc<AppState>>) -> Json<TokenResponse> {
    Json(TokenResponse {
        token: state.tokens.issue(),
    })
}

async fn handle_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> (StatusCode, Json<SubmitResponse>) {
    if !state.tokens.verify(&form.token) {
        tracing::debug!("submission rejected: missing or expired token");
        return (
            StatusCode::BAD_REQUEST,
            Json(SubmitResponse {
                ok: false,
                errors: Some(BTreeMap::new()),
                url: None,
                message: Some("session expired, reload the page".to_string()),
            }),
        );
    }

    let params = RentalSearchParams {
        pickup_location: form.pickup_location,
        different_dropoff: !form.dropoff_location.is_empty(),
        dropoff_location: form.dropoff_location,
        checkin_date: form.pickup_date,
        checkout_date: form.dropoff_date,
        pickup_time: form.pickup_time,
        dropoff_time: form.dropoff_time,
        guests: coerce_guests(&form.guests),
        email: form.email,
    };

    let policy = RangePolicy {
        max_nights: state.config.max_nights,
    };
    let result = params.validate(&policy);
    if !result.ok {
        tracing::debug!(fields = result.errors.len(), "submission failed validation");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmitResponse {
                ok: false,
                errors: Some(result.errors),
                url: None,
                message: None,
            }),
        );
    }

    let base_url = if form.base_url.is_empty() {
        state.config.base_url.clone()
    } else {
        form.base_url
    };
    let item_id = if form.itemid.is_empty() {
        state.config.item_id.clone()
    } else {
        form.itemid
    };

    let Some(pairs) = booking_query_pairs(&item_id, &params) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmitResponse {
                ok: false,
                errors: Some(BTreeMap::new()),
                url: None,
                message: None,
            }),
        );
    };

    let booking_params: BTreeMap<String, String> = pairs.into_iter().collect();
    let query = merge_search_query(&booking_params, &form.querystring);
    let separator = if base_url.contains('?') { '&' } else { '?' };
    let url = format!("{base_url}{separator}{query}");

    tracing::info!(%url, "search submission accepted");
    (
        StatusCode::OK,
        Json(SubmitResponse {
            ok: true,
            errors: None,
            url: Some(url),
            message: None,
        }),
    )
}
