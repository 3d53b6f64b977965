//! HTTP server for the signup page.
//!
//! Serves the live roster table, validates signup submissions, and
//! streams refresh events. A background task keeps the roster current.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                          |
//! |--------|---------------|--------------------------------------|
//! | GET    | `/health`     | Health check                         |
//! | GET    | `/api/roster` | Current roster table                 |
//! | POST   | `/api/signup` | Validate a signup form               |
//! | GET    | `/api/events` | SSE stream of roster refresh events  |

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::events::{publish_failed, publish_updated, ROSTER_EVENTS};
use super::types::{error_response, RosterResponse, SignupResponse};
use crate::config::Config;
use crate::error::{RosterError, ServerResult};
use crate::models::{SignupForm, Submission};
use crate::roster::{new_store, refresh_roster, RosterStore};
use crate::validation::validate_signup_with_domain;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: RosterStore,
    pub config: Arc<Config>,
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> ServerResult<()> {
    // CORS permissive enough for the page served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let port = config.port;
    let state = AppState {
        store: new_store(),
        config: Arc::new(config),
    };

    if state.config.sources.is_empty() {
        println!("⚠️  No roster sources configured (set ROSTER_URLS); roster stays empty");
    } else {
        tokio::spawn(refresh_loop(
            reqwest::Client::new(),
            state.store.clone(),
            state.config.clone(),
        ));
    }

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/roster", get(get_roster))
        .route("/api/signup", post(post_signup))
        .route("/api/events", get(sse_events))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Rostersync server running on http://localhost:{}", port);
    println!("   GET  /api/roster - Current roster table");
    println!("   POST /api/signup - Validate a signup form");
    println!("   GET  /api/events - SSE roster refresh stream");
    println!("   GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(RosterError::Io)?;
    axum::serve(listener, app).await.map_err(RosterError::Io)?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "rostersync",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "roster": "GET /api/roster",
            "signup": "POST /api/signup",
            "events": "GET /api/events (SSE)"
        }
    }))
}

/// Current roster table, 503 until the first successful refresh
async fn get_roster(
    State(state): State<AppState>,
) -> Result<Json<RosterResponse>, (StatusCode, Json<Value>)> {
    match state.store.read().await.as_ref() {
        Some(snapshot) => Ok(Json(RosterResponse::from(snapshot))),
        None => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(error_response("Roster not loaded yet")),
        )),
    }
}

/// Validate a signup form
async fn post_signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> (StatusCode, Json<SignupResponse>) {
    let errors = validate_signup_with_domain(&form, &state.config.email_domain);

    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SignupResponse::rejected(errors)),
        );
    }

    let submission = Submission::new(form);
    println!(
        "📝 signup accepted: {} <{}> ({})",
        submission.form.name, submission.form.email, submission.id
    );

    (StatusCode::OK, Json(SignupResponse::accepted(submission.id)))
}

/// SSE endpoint for roster refresh events
async fn sse_events() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = ROSTER_EVENTS.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let json = serde_json::to_string(&event).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Keep the roster current: refresh on an interval, with one delayed
/// retry after a failed cycle before resuming the regular cadence.
async fn refresh_loop(client: reqwest::Client, store: RosterStore, config: Arc<Config>) {
    // tokio::time::interval panics on a zero period
    let period = config.refresh_interval.max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;
        if try_refresh(&client, &store, &config).await {
            continue;
        }
        tokio::time::sleep(config.retry_delay).await;
        try_refresh(&client, &store, &config).await;
    }
}

/// Run one refresh cycle, publishing the outcome.
async fn try_refresh(client: &reqwest::Client, store: &RosterStore, config: &Config) -> bool {
    match refresh_roster(client, &config.sources).await {
        Ok(snapshot) => {
            let source = snapshot.source.clone();
            let row_count = snapshot.row_count();
            *store.write().await = Some(snapshot);
            publish_updated(source, row_count);
            true
        }
        Err(e) => {
            publish_failed(e.to_string());
            false
        }
    }
}
