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

//! Submission endpoint contract, driven through the router in-process:
//! token gate first (400, distinct message), field errors as data (422),
//! and the booking-engine redirect with surviving campaign tags (200).
//!
//! Run with:
//!     cargo test --test t_submit_endpoint

#![cfg(feature = "server")]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Days;
use nomad_rental_search::server::{AppState, ServerConfig, router};
use nomad_rental_search::today_utc;
use serde_json::Value;
use tower::ServiceExt;

fn test_app() -> Router {
    let config = ServerConfig {
        max_nights: 30,
        ..ServerConfig::default()
    };
    router(Arc::new(AppState::new(config)))
}

fn future_date(days_ahead: u64) -> String {
    today_utc()
        .checked_add_days(Days::new(days_ahead))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

async fn fetch_token(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_submit(app: &Router, body: String) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/submit")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn valid_form(token: &str) -> String {
    format!(
        "token={token}&pickup-location=berat&pickup-date={}&dropoff-date={}\
         &pickup-time=10:00&dropoff-time=10:00&guests=2",
        future_date(1),
        future_date(4),
    )
}

#[tokio::test]
async fn missing_token_short_circuits_with_session_expired() {
    let app = test_app();
    let response = post_submit(&app, valid_form("bogus")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["ok"], false);
    assert!(json["message"].as_str().unwrap().contains("session expired"));
    assert!(
        json["errors"].as_object().unwrap().is_empty(),
        "token failure must not report field errors"
    );
}

#[tokio::test]
async fn healthz_answers() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reversed_dates_answer_422_with_a_checkout_error() {
    let app = test_app();
    let token = fetch_token(&app).await;
    let form = format!(
        "token={token}&pickup-location=berat&pickup-date={}&dropoff-date={}\
         &pickup-time=10:00&dropoff-time=10:00&guests=2",
        future_date(4),
        future_date(1),
    );

    let response = post_submit(&app, form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = read_json(response).await;
    assert_eq!(json["ok"], false);
    assert!(
        json["errors"]["checkout"]
            .as_str()
            .unwrap()
            .contains("after pickup")
    );
}

#[tokio::test]
async fn several_broken_fields_report_together() {
    let app = test_app();
    let token = fetch_token(&app).await;
    let form = format!(
        "token={token}&pickup-location=atlantis&pickup-date=2024-02-30&dropoff-date={}\
         &pickup-time=10:17&dropoff-time=10:00&guests=2",
        future_date(3),
    );

    let response = post_submit(&app, form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = read_json(response).await;
    let errors = json["errors"].as_object().unwrap();
    assert_eq!(errors["checkin"], "invalid date");
    assert_eq!(errors["pickup"], "invalid pick-up location");
    assert_eq!(errors["pickup_time"], "invalid pick-up time");
}

#[tokio::test]
async fn accepted_submission_answers_with_the_redirect_url() {
    let app = test_app();
    let token = fetch_token(&app).await;
    let form = format!(
        "{}&querystring=utm_source%3Dgoogle%26utm_campaign%3Dbrand%26foo%3Dbar",
        valid_form(&token)
    );

    let response = post_submit(&app, form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["ok"], true);
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("https://nomadcamperhire.com/search-your-van/index.php?"));
    assert!(url.contains("option=com_vikrentcar"));
    assert!(url.contains("task=search"));
    assert!(url.contains("place=3"));
    assert!(url.contains("returnplace=3"));
    assert!(url.contains("search=Search"));
    assert!(url.contains("Itemid=613"));
    assert!(url.contains("utm_source=google"));
    assert!(url.contains("utm_campaign=brand"));
    assert!(!url.contains("foo"), "stale keys must not reach the engine");
}

#[tokio::test]
async fn posted_base_url_and_itemid_override_the_defaults() {
    let app = test_app();
    let token = fetch_token(&app).await;
    let form = format!(
        "{}&base-url=https%3A%2F%2Fexample.com%2Fengine&itemid=99",
        valid_form(&token)
    );

    let response = post_submit(&app, form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("https://example.com/engine?"));
    assert!(url.contains("Itemid=99"));
}

#[tokio::test]
async fn tokens_are_reusable_within_their_lifetime() {
    let app = test_app();
    let token = fetch_token(&app).await;

    let first = post_submit(&app, valid_form(&token)).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_submit(&app, valid_form(&token)).await;
    assert_eq!(second.status(), StatusCode::OK);
}
