use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::{create_registration, ApiContext, StoreGate};
use shared::{
    error::RegisterFailure,
    protocol::{HealthStatus, RegisterAck, RegistrationPayload},
};
use storage::Storage;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

mod config;

use config::{load_settings, require_database_url};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

const MAX_REGISTRATION_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let database_url = require_database_url(&settings)?;

    // An unreachable store is not fatal. The server keeps serving with a
    // disconnected gate and rejects registrations until the store is back.
    let store = match Storage::new(&database_url).await {
        Ok(storage) => {
            info!(%database_url, "registration store ready");
            StoreGate::Connected(storage)
        }
        Err(error) => {
            error!(
                %database_url,
                %error,
                "failed to open SQLite database; continuing without a usable registration store"
            );
            StoreGate::Disconnected
        }
    };

    let state = AppState {
        api: ApiContext { store },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/register", post(register))
        .layer(RequestBodyLimitLayer::new(MAX_REGISTRATION_BODY_BYTES))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let database = if state.api.store.status().is_connected() {
        "Connected"
    } else {
        "Disconnected"
    };

    Json(HealthStatus {
        status: "Server is running".to_string(),
        database: database.to_string(),
    })
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<RegistrationPayload>,
) -> Result<(StatusCode, Json<RegisterAck>), (StatusCode, Json<RegisterFailure>)> {
    info!(
        mode = registration.participation_mode.as_str(),
        participants = registration.participants.len(),
        "registration received"
    );

    match create_registration(&state.api, registration).await {
        Ok(stored) => {
            info!(registration_id = stored.id, "registration saved");
            Ok((StatusCode::CREATED, Json(RegisterAck::success())))
        }
        Err(failure) => {
            warn!(%failure, "registration rejected");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(failure)))
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
