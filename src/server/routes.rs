use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::data::data_registry::GameData;
use crate::error::ApiError;
use crate::server::api;

pub type AppState = Arc<GameData>;

pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

fn json_response(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse {
            status_code: 200,
            content_type: "application/json",
            body: payload,
        },
        Err(err @ ApiError::UnknownFaction(_)) => error_response(404, &err.to_string()),
        Err(ApiError::UnitNotFound(id)) => {
            tracing::debug!(%id, "squad detail unavailable");
            error_response(404, "Unit Not Found")
        }
        Err(err @ ApiError::Serialize(_)) => {
            tracing::error!(error = %err, "payload failed");
            error_response(500, &err.to_string())
        }
    }
}

pub async fn health(State(data): State<AppState>) -> HttpResponse {
    json_response(api::health_payload(&data))
}

pub async fn factions(State(data): State<AppState>) -> HttpResponse {
    json_response(api::factions_payload(&data))
}

pub async fn faction_squads(State(data): State<AppState>, Path(faction): Path<String>) -> HttpResponse {
    json_response(api::faction_squads_payload(&data, &faction))
}

pub async fn faction_buildings(State(data): State<AppState>, Path(faction): Path<String>) -> HttpResponse {
    json_response(api::faction_buildings_payload(&data, &faction))
}

pub async fn squad(State(data): State<AppState>, Path(id): Path<String>) -> HttpResponse {
    json_response(api::squad_payload(&data, &id))
}

pub async fn weapons(State(data): State<AppState>) -> HttpResponse {
    json_response(api::weapons_payload(&data))
}

pub async fn upgrades(State(data): State<AppState>) -> HttpResponse {
    json_response(api::upgrades_payload(&data))
}

pub async fn diagnostics(State(data): State<AppState>) -> HttpResponse {
    json_response(api::diagnostics_payload(&data))
}

pub async fn not_found() -> HttpResponse {
    error_response(404, "Route not found")
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
