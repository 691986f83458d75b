use std::sync::Arc;

use activities_core::{Activity, ActivityRegistry};
use activities_server::{build_router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
const EMAIL: &str = "test.student@mergington.edu";

fn setup() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::seeded());
    let app = build_router(state.clone(), STATIC_DIR);
    (state, app)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn signup_uri(activity: &str, email: &str) -> String {
    format!("/activities/{}/signup?email={}", activity, email)
}

fn unregister_uri(activity: &str, email: &str) -> String {
    format!("/activities/{}/participants?email={}", activity, email)
}

#[tokio::test]
async fn test_get_activities() {
    let (_, app) = setup();

    let (status, body) = send(&app, Method::GET, "/activities").await;

    assert_eq!(status, StatusCode::OK);
    let activities = body.as_object().expect("activities should be a JSON object");
    assert!(activities.contains_key("Chess Club"));
    assert_eq!(activities.len(), 9);
    assert_eq!(
        activities["Chess Club"]["schedule"],
        "Fridays, 3:30 PM - 5:00 PM"
    );
}

#[tokio::test]
async fn test_signup_and_unregister_flow() {
    let (state, app) = setup();
    let activity = "Chess%20Club";

    let (status, body) = send(&app, Method::POST, &signup_uri(activity, EMAIL)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Signed up {} for Chess Club", EMAIL));
    assert!(state.registry.get("Chess Club").unwrap().is_participant(EMAIL));

    let before = state.registry.get("Chess Club").unwrap();
    let (status, body) = send(&app, Method::POST, &signup_uri(activity, EMAIL)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Student is already signed up");
    assert_eq!(state.registry.get("Chess Club").unwrap(), before);

    let (status, body) = send(&app, Method::DELETE, &unregister_uri(activity, EMAIL)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Unregistered {} from Chess Club", EMAIL));
    assert!(!state.registry.get("Chess Club").unwrap().is_participant(EMAIL));

    let (status, body) = send(&app, Method::DELETE, &unregister_uri(activity, EMAIL)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Student is not signed up for this activity");
}

#[tokio::test]
async fn test_unknown_activity_is_not_found() {
    let (_, app) = setup();

    let (status, body) = send(&app, Method::POST, &signup_uri("Knitting", EMAIL)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Activity not found");

    let (status, body) = send(&app, Method::DELETE, &unregister_uri("Knitting", EMAIL)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Activity not found");
}

#[tokio::test]
async fn test_signup_appears_in_listing() {
    let (_, app) = setup();

    let (status, _) = send(&app, Method::POST, &signup_uri("Art%20Club", EMAIL)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/activities").await;
    let participants = body["Art Club"]["participants"].as_array().unwrap();
    assert_eq!(participants.last().unwrap(), EMAIL);
}

#[tokio::test]
async fn test_signup_over_capacity_is_accepted() {
    let state = Arc::new(AppState::new(ActivityRegistry::from_activities([(
        "Tiny Club",
        Activity::new("Only one seat", "Sundays", 1).with_participants(["first@mergington.edu"]),
    )])));
    let app = build_router(state.clone(), STATIC_DIR);

    let (status, _) = send(&app, Method::POST, &signup_uri("Tiny%20Club", EMAIL)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.registry.get("Tiny Club").unwrap().participants.len(), 2);
}

#[tokio::test]
async fn test_missing_email_is_unprocessable() {
    let (state, app) = setup();
    let before = state.registry.list();

    let (status, body) = send(&app, Method::POST, "/activities/Chess%20Club/signup").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("email"));

    let (status, body) = send(&app, Method::DELETE, "/activities/Chess%20Club/participants").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    assert_eq!(state.registry.list(), before);
}

#[tokio::test]
async fn test_root_redirects_to_static_page() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/static/index.html"
    );
}

#[tokio::test]
async fn test_static_page_is_served() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/static/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("activities-list"));
}

#[tokio::test]
async fn test_health() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_page_assets_render_participant_badges() {
    let (_, app) = setup();

    for (uri, needle) in [
        ("/static/app.js", "participant-badge"),
        ("/static/app.js", "function initials"),
        ("/static/app.js", "confirm("),
        ("/static/styles.css", ".participant-badge"),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains(needle), "{} should contain {}", uri, needle);
    }
}
