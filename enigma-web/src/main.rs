#![deny(missing_docs)]
//! An HTTP backend that keeps one Enigma machine per session.

use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use enigma_core::api::{
    CreateRequest, CreateResponse, DEFAULT_SESSION, DefaultResponse, EncodeRequest,
    EncodeResponse, MachineSettings, ResetRequest, STATUS_ERROR, STATUS_SUCCESS, StateResponse,
    StatusResponse, rotor_positions,
};
use enigma_core::{ConfigurationError, EnigmaConfig, EnigmaMachine};
use local_ip_address::local_ip;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::{Value, json};
use sessions::SessionStore;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

mod sessions;

const DEFAULT_PORT: u16 = 5000;

/// Shared application state
#[derive(Default)]
struct AppState {
    sessions: SessionStore,
}

type Reply = (StatusCode, Json<Value>);

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = match env::var("ENIGMA_WEB_PORT") {
        Ok(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                error!("ENIGMA_WEB_PORT '{raw}' is not a port number: {e}");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_PORT,
    };
    let bind = match env::var("ENIGMA_WEB_BIND") {
        Ok(raw) => match raw.parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(e) => {
                error!("ENIGMA_WEB_BIND '{raw}' is not an IP address: {e}");
                std::process::exit(1);
            }
        },
        Err(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    };

    let addr = SocketAddr::new(bind, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    println!("listening on:");
    match local_ip() {
        Ok(my_local_ip) => println!("  - http://{my_local_ip}:{port}/api/enigma"),
        Err(e) => warn!("Could not determine the LAN address: {e}"),
    }
    println!("  - http://127.0.0.1:{port}/api/enigma");

    if let Err(e) = axum::serve(listener, app(Arc::new(AppState::default()))).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/enigma/create", post(create_handler))
        .route("/api/enigma/encode", post(encode_handler))
        .route("/api/enigma/reset", post(reset_handler))
        .route("/api/enigma/state/:session_id", get(state_handler))
        .route("/api/enigma/default", get(default_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

fn reply<T: Serialize>(status: StatusCode, body: &T) -> Reply {
    match serde_json::to_value(body) {
        Ok(value) => (status, Json(value)),
        Err(e) => failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn failure(status: StatusCode, message: &str) -> Reply {
    (
        status,
        Json(json!({ "status": STATUS_ERROR, "message": message })),
    )
}

fn session_or_default(session_id: Option<String>) -> String {
    session_id.unwrap_or_else(|| DEFAULT_SESSION.to_string())
}

/// Unwraps a JSON body, answering 400 in the usual error shape when it does
/// not deserialize.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Reply> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        info!("Rejected request body: {}", rejection.body_text());
        failure(StatusCode::BAD_REQUEST, &rejection.body_text())
    })
}

fn build_machine(settings: &MachineSettings) -> Result<EnigmaMachine, ConfigurationError> {
    EnigmaMachine::new(&EnigmaConfig::try_from(settings)?)
}

/// Creates or replaces the machine of a session.
async fn create_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateRequest>, JsonRejection>,
) -> Reply {
    let payload = match parse_body(body) {
        Ok(payload) => payload,
        Err(reply) => return reply,
    };
    let session_id = session_or_default(payload.session_id);
    match build_machine(&payload.settings) {
        Ok(machine) => {
            state.sessions.create(&session_id, machine);
            reply(
                StatusCode::OK,
                &CreateResponse {
                    status: STATUS_SUCCESS.to_string(),
                    message: "Enigma machine created".to_string(),
                    session_id,
                },
            )
        }
        Err(e) => {
            info!("Rejected settings for session '{session_id}': {e}");
            failure(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

/// Encodes a message on a session's machine.
async fn encode_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EncodeRequest>, JsonRejection>,
) -> Reply {
    let payload = match parse_body(body) {
        Ok(payload) => payload,
        Err(reply) => return reply,
    };
    let session_id = session_or_default(payload.session_id);
    let encoded = state.sessions.encode(&session_id, &payload.message);
    reply(
        StatusCode::OK,
        &EncodeResponse {
            status: STATUS_SUCCESS.to_string(),
            original: payload.message,
            encoded: encoded.text,
            rotor_positions: rotor_positions(&encoded.state),
        },
    )
}

/// Returns a session's machine to its start positions.
async fn reset_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResetRequest>, JsonRejection>,
) -> Reply {
    let payload = match parse_body(body) {
        Ok(payload) => payload,
        Err(reply) => return reply,
    };
    let session_id = session_or_default(payload.session_id);
    if state.sessions.reset(&session_id) {
        reply(
            StatusCode::OK,
            &StatusResponse {
                status: STATUS_SUCCESS.to_string(),
                message: "Enigma machine reset to initial state".to_string(),
            },
        )
    } else {
        failure(StatusCode::NOT_FOUND, "Session not found")
    }
}

async fn state_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Reply {
    match state.sessions.state(&session_id) {
        Some(config) => reply(
            StatusCode::OK,
            &StateResponse {
                status: STATUS_SUCCESS.to_string(),
                session_id,
                config,
            },
        ),
        None => failure(StatusCode::NOT_FOUND, "Session not found"),
    }
}

async fn default_handler() -> Reply {
    reply(
        StatusCode::OK,
        &DefaultResponse {
            status: STATUS_SUCCESS.to_string(),
            settings: MachineSettings::default(),
        },
    )
}
