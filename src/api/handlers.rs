use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::{parse, respond};
use crate::error::ServiceError;
use crate::links::{allocate, save};
use crate::state::AppState;

/// POST /shortng — the save operation.
///
/// Sniffs the request source, extracts the save fields, and runs the save
/// orchestration on the blocking pool (the store is synchronous). The
/// response body format follows the source.
pub async fn shorten(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let source = parse::sniff_source(&headers, &body);
    tracing::info!("Request source: {:?}", source);

    let req = match parse::parse_fields(source, &body) {
        Ok(req) => req,
        Err(err) => return respond::error(source, &err),
    };

    let st = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        save::save(
            st.store.as_ref(),
            &st.guard,
            st.clock.as_ref(),
            &st.viewer_url,
            &st.public_url,
            &req,
        )
    })
    .await;

    match result {
        Ok(Ok(saved)) => respond::success(source, &saved),
        Ok(Err(err)) => {
            tracing::warn!("Save rejected: {}", err);
            respond::error(source, &err)
        }
        Err(join_err) => respond::error(
            source,
            &ServiceError::StoreUnavailable(format!("task join: {}", join_err)),
        ),
    }
}

/// GET /short/{filename} — retrieval.
///
/// Serves the stored payload JSON. Never consults the edit guard: reads are
/// always permitted regardless of password or age.
pub async fn get_state(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ServiceError> {
    if !allocate::is_safe_path(&filename) {
        return Err(ServiceError::MalformedInput(format!(
            "invalid filename: \"{}\"",
            filename
        )));
    }

    let store = state.store.clone();
    let name = filename.clone();
    let record = tokio::task::spawn_blocking(move || store.get(&name))
        .await
        .map_err(|e| ServiceError::StoreUnavailable(format!("task join: {}", e)))??;

    match record {
        Some(record) => Ok((
            [(header::CACHE_CONTROL, "public, no-store")],
            Json(record.payload),
        )
            .into_response()),
        None => Err(ServiceError::ReferenceNotFound(filename)),
    }
}

/// Basic health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}
