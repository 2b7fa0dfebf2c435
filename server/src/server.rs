//! Router and handlers for the claim recorder.
//!
//! One endpoint, three methods, mirroring the claim protocol: POST stores
//! a claim, GET lists claims for the admin panel, DELETE removes one. All
//! responses are JSON with a `success` flag; CORS is open to any origin.

use crate::notify::NotificationSink;
use adcrate_core::{AdminDeleteRequest, ClaimSubmission, StoredClaim};
use adcrate_persistence::sqlite::claims;
use axum::{
    extract::{Json, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Shared state for the recorder handlers
#[derive(Clone)]
pub struct RecorderState {
    pub pool: SqlitePool,
    pub admin_key: Arc<String>,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Build the axum router with the CORS policy the claim protocol requires
pub fn build_router(state: RecorderState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/",
            post(handle_submit).get(handle_list).delete(handle_delete),
        )
        .layer(cors)
        .with_state(state)
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "message": message,
        })),
    )
        .into_response()
}

/// Client address as reported by the proxy, falling back to "unknown"
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// POST / — store a new claim
async fn handle_submit(
    State(state): State<RecorderState>,
    headers: HeaderMap,
    Json(body): Json<ClaimSubmission>,
) -> Response {
    let required = [
        ("email", &body.email),
        ("code", &body.code),
        ("reward_type", &body.reward_type),
        ("reward_name", &body.reward_name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return failure(
                StatusCode::BAD_REQUEST,
                &format!("Missing required field: {}", field),
            );
        }
    }

    let claim = StoredClaim {
        id: format!("claim_{}", Uuid::new_v4().simple()),
        email: body.email.trim().to_string(),
        mcname: body.mcname.trim().to_string(),
        code: body.code.trim().to_string(),
        reward_type: body.reward_type.trim().to_string(),
        reward_name: body.reward_name.trim().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        status: "claimed".to_string(),
        ip_address: Some(client_ip(&headers)),
        user_agent: Some(user_agent(&headers)),
        created_at: None,
    };

    if let Err(e) = claims::insert_claim(&state.pool, &claim).await {
        error!("Failed to store claim: {}", e);
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to store claim. Please try again later.",
        );
    }

    let email_sent = state.notifier.notify(&claim);
    info!(
        "Claim stored: {} ({} \"{}\" for {})",
        claim.id, claim.reward_type, claim.reward_name, claim.email
    );

    let message = if email_sent {
        "Reward claimed successfully. Email notification sent."
    } else {
        "Reward claimed successfully"
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": message,
            "claim": claim,
            "email_sent": email_sent,
        })),
    )
        .into_response()
}

/// GET /?admin_key=... — list all claims, newest first
async fn handle_list(
    State(state): State<RecorderState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match params.get("admin_key") {
        Some(key) if key == state.admin_key.as_str() => {}
        Some(_) => {
            warn!("Admin listing rejected: invalid key");
            return failure(StatusCode::UNAUTHORIZED, "Invalid admin key");
        }
        None => {
            return failure(StatusCode::UNAUTHORIZED, "No admin key provided");
        }
    }

    match claims::list_claims(&state.pool).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "data": rows,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list claims: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list claims")
        }
    }
}

/// DELETE / — remove one claim by id
async fn handle_delete(
    State(state): State<RecorderState>,
    Json(body): Json<AdminDeleteRequest>,
) -> Response {
    if body.admin_key != *state.admin_key {
        warn!("Admin deletion rejected: invalid key");
        return failure(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if body.id.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Missing claim ID");
    }

    match claims::delete_claim(&state.pool, &body.id).await {
        Ok(removed) => {
            info!("Claim {} deleted ({} row(s))", body.id, removed);
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "Claim deleted successfully",
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to delete claim {}: {}", body.id, e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete claim")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;
    use adcrate_persistence::Database;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const ADMIN_KEY: &str = "test_admin_key";

    async fn test_router() -> Router {
        let db = Database::connect_in_memory().await.unwrap();
        let state = RecorderState {
            pool: db.pool().clone(),
            admin_key: Arc::new(ADMIN_KEY.to_string()),
            notifier: Arc::new(LogNotifier::new(None)),
        };
        build_router(state)
    }

    fn submission(code: &str) -> serde_json::Value {
        serde_json::json!({
            "email": "player@example.com",
            "mcname": "Steve",
            "code": code,
            "reward_type": "Crate",
            "reward_name": "Stone Crate",
            "timestamp": "2026-08-07T00:00:00.000Z",
        })
    }

    fn post_json(value: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .header("user-agent", "test-agent")
            .body(Body::from(serde_json::to_vec(value).unwrap()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_submit_stores_claim() {
        let app = test_router().await;
        let response = app.oneshot(post_json(&submission("AAAA1111"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["email_sent"], false);
        assert_eq!(body["claim"]["code"], "AAAA1111");
        assert!(body["claim"]["id"]
            .as_str()
            .unwrap()
            .starts_with("claim_"));
        assert_eq!(body["claim"]["user_agent"], "test-agent");
    }

    #[tokio::test]
    async fn test_submit_missing_field_is_rejected() {
        let app = test_router().await;
        let mut incomplete = submission("AAAA1111");
        incomplete["email"] = serde_json::json!("");

        let response = app.oneshot(post_json(&incomplete)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing required field: email");
    }

    #[tokio::test]
    async fn test_admin_list_requires_key() {
        let app = test_router().await;
        app.clone()
            .oneshot(post_json(&submission("AAAA1111")))
            .await
            .unwrap();

        // Wrong key: error status, success:false, no data leaked
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/?admin_key=wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());

        // Missing key behaves the same
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_list_is_newest_first() {
        let app = test_router().await;
        app.clone()
            .oneshot(post_json(&submission("AAAA1111")))
            .await
            .unwrap();
        app.clone()
            .oneshot(post_json(&submission("BBBB2222")))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/?admin_key={}", ADMIN_KEY).as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["code"], "BBBB2222");
        assert_eq!(data[1]["code"], "AAAA1111");
        assert!(data[0]["created_at"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_delete_claim() {
        let app = test_router().await;
        let response = app
            .clone()
            .oneshot(post_json(&submission("AAAA1111")))
            .await
            .unwrap();
        let id = body_json(response).await["claim"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        // Wrong key is rejected
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"admin_key": "wrong", "id": id}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Right key deletes the row
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"admin_key": ADMIN_KEY, "id": id}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/?admin_key={}", ADMIN_KEY).as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_cors_preflight_succeeds() {
        let app = test_router().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/")
                    .header("origin", "https://play.example.com")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let allowed = response
            .headers()
            .get("access-control-allow-methods")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        for method in ["POST", "GET", "DELETE"] {
            assert!(allowed.contains(method));
        }
    }

    #[tokio::test]
    async fn test_recorder_client_roundtrip() {
        use adcrate_core::ClaimSubmission;
        use adcrate_networking::RecorderClient;

        let app = test_router().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = RecorderClient::new(&format!("http://{}/", addr));

        let response = client
            .submit_claim(&ClaimSubmission {
                email: "player@example.com".to_string(),
                mcname: "Steve".to_string(),
                code: "CCCC3333".to_string(),
                reward_type: "Rank".to_string(),
                reward_name: "PRO".to_string(),
                timestamp: "2026-08-07T00:00:00.000Z".to_string(),
            })
            .await
            .unwrap();
        assert!(response.success);
        let stored = response.claim.unwrap();
        assert_eq!(stored.code, "CCCC3333");

        let listed = client.admin_list(ADMIN_KEY).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, stored.id);

        // Wrong admin key surfaces as a transport-level rejection
        assert!(client.admin_list("wrong").await.is_err());

        client.admin_delete(ADMIN_KEY, &stored.id).await.unwrap();
        assert!(client.admin_list(ADMIN_KEY).await.unwrap().is_empty());
    }
}
