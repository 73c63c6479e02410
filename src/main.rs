mod forward;
mod task_api;
mod types;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use task_api::TaskApiClient;
use tracing::{error, info, warn};
use types::SlackEnvelope;

#[derive(Clone)]
struct AppState {
    task_api: Arc<TaskApiClient>,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "obot_slack_relay=info".into()),
        )
        .init();

    // Read configuration
    let access_token =
        std::env::var("OBOT_ACCESS_TOKEN").expect("OBOT_ACCESS_TOKEN must be set");
    let task_api_url = std::env::var("TASK_API_URL").unwrap_or_else(|_| {
        warn!("TASK_API_URL not set - qualifying events will fail to forward");
        String::new()
    });
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8088".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    let state = AppState {
        task_api: Arc::new(TaskApiClient::new(access_token, task_api_url)),
    };

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/slack/events", post(slack_events_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn slack_events_handler(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Response {
    info!("Raw event data: {}", String::from_utf8_lossy(&body));

    let envelope: SlackEnvelope = match serde_json::from_slice(&body) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to parse Slack envelope: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    // URL verification challenge: echo it back, nothing else to do
    if envelope.event_type == "url_verification" {
        let challenge = envelope.challenge.unwrap_or_default();
        info!("Received URL verification challenge: {}", challenge);
        return Json(json!({ "challenge": challenge })).into_response();
    }

    if envelope.event_type == "event_callback" {
        if let Some(event) = envelope.event {
            if forward::qualifies(&event) {
                let request = forward::build_task_request(&event);
                // The downstream call is synchronous: Slack waits on the
                // task API, and any failure surfaces as a 500. Slack's own
                // webhook retry is the only retry mechanism.
                match state.task_api.submit(&request).await {
                    Ok(response_body) => {
                        info!("Response from task API: {}", response_body);
                    }
                    Err(e) => {
                        error!("Failed to forward event to task API: {}", e);
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                }
            }
        }
    }

    // 200 OK for everything else so Slack stops redelivering
    StatusCode::OK.into_response()
}
