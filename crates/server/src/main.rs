use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use competition::Competition;
use shared::{
    domain::{ConnectionId, Question},
    error::{ApiError, ErrorCode},
    protocol::{ClientCommand, LoginRequest},
};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, prepare_catalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let catalog = prepare_catalog(settings.catalog_path.as_deref())?;
    info!(questions = catalog.len(), "question catalog loaded");

    let frontend_origin = frontend_origin(&settings.frontend_url)?;
    let state = AppState {
        competition: Arc::new(Competition::new(catalog)),
        admin: settings.admin_credentials(),
        frontend_origin: frontend_origin.clone(),
    };
    let app = build_router(Arc::new(state)).layer(cors_layer(frontend_origin));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, frontend_url = %settings.frontend_url, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/login", post(login))
        .route("/questions", get(list_questions))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

fn frontend_origin(frontend_url: &str) -> anyhow::Result<HeaderValue> {
    HeaderValue::from_str(frontend_url.trim_end_matches('/'))
        .with_context(|| format!("invalid frontend url '{frontend_url}'"))
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Browsers always send `Origin` on a socket handshake and do not apply CORS
/// to it, so a foreign origin is refused here. Clients without `Origin`
/// (the CLI, scripts) are not browsers and pass.
fn origin_allowed(headers: &HeaderMap, allowed: &HeaderValue) -> bool {
    match headers.get(header::ORIGIN) {
        Some(origin) => origin.as_bytes() == allowed.as_bytes(),
        None => true,
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
        return;
    }
    info!("shutting down");
}

async fn healthz() -> &'static str {
    "ok"
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    if state.admin.matches(&req.username, &req.password) {
        info!(username = %req.username, "controller login accepted");
        return Ok(StatusCode::NO_CONTENT);
    }
    warn!(username = %req.username, "controller login rejected");
    Err((
        StatusCode::UNAUTHORIZED,
        Json(ApiError::new(ErrorCode::Unauthorized, "invalid credentials")),
    ))
}

async fn list_questions(State(state): State<Arc<AppState>>) -> Json<Vec<Question>> {
    Json(state.competition.catalog().questions().to_vec())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    if !origin_allowed(&headers, &state.frontend_origin) {
        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        warn!(%origin, "rejecting socket from foreign origin");
        return StatusCode::FORBIDDEN.into_response();
    }
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: WebSocket) {
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let (connection_id, mut events_rx) = state.competition.connect().await;

    let send_task = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(error) => {
                    error!(%error, event = event.name(), "failed to encode event");
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                if let Some(command) = parse_command(connection_id, &text) {
                    state.competition.apply(command).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.competition.disconnect(connection_id).await;
    send_task.abort();
}

/// Unknown or malformed frames are dropped without telling the client.
fn parse_command(connection_id: ConnectionId, text: &str) -> Option<ClientCommand> {
    match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => {
            debug!(connection = %connection_id, command = command.name(), "command received");
            Some(command)
        }
        Err(error) => {
            debug!(connection = %connection_id, %error, "ignoring unrecognized frame");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
