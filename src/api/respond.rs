//! Per-source response formatting: the same save outcome is rendered as
//! Slack ephemeral JSON, an HTML result page, a `{"link": ...}` JSON body,
//! or plain text, depending on where the request came from.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::api::parse::RequestSource;
use crate::error::ServiceError;
use crate::links::save::SavedLink;
use crate::web;

pub fn success(source: RequestSource, saved: &SavedLink) -> Response {
    match source {
        RequestSource::Slack => Json(json!({
            "text": saved.link,
            "response_type": "ephemeral",
        }))
        .into_response(),
        RequestSource::ApiJson => Json(json!({"link": saved.link})).into_response(),
        RequestSource::ApiPlain => saved.link.clone().into_response(),
        RequestSource::Web => web::result::result_page(saved),
    }
}

pub fn error(source: RequestSource, err: &ServiceError) -> Response {
    let status = err.status();
    match source {
        RequestSource::Slack | RequestSource::ApiJson => (
            status,
            Json(json!({
                "text": err.to_string(),
                "response_type": "ephemeral",
            })),
        )
            .into_response(),
        RequestSource::Web | RequestSource::ApiPlain => {
            (status, err.to_string()).into_response()
        }
    }
}
