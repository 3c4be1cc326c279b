//! Save-request parsing.
//!
//! A save can arrive from four places, sniffed in order:
//! - the Slack bot (`/shortng` command): User-Agent contains "Slackbot",
//!   filename and link arrive together in the `text` form field
//! - our web form: `client=web` form field, separate form elements
//! - a JSON API call: `Content-Type: application/json`
//! - a plain form API call (mostly for testing)

use axum::http::header::{CONTENT_TYPE, USER_AGENT};
use axum::http::HeaderMap;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::links::save::SaveRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    Web,
    Slack,
    ApiPlain,
    ApiJson,
}

#[derive(Debug, Default, Deserialize)]
struct SaveForm {
    text: Option<String>,
    filename: Option<String>,
    title: Option<String>,
    password: Option<String>,
    client: Option<String>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: axum::http::HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Determine where a save request came from. Infallible: an unparseable
/// body is classified as a plain API request and rejected later.
///
/// The web check precedes the JSON check, but only form-encoded bodies are
/// inspected for the `client` field, so a JSON body is never mistaken for
/// the web form.
pub fn sniff_source(headers: &HeaderMap, body: &[u8]) -> RequestSource {
    if header_str(headers, USER_AGENT).contains("Slackbot") {
        return RequestSource::Slack;
    }
    let content_type = header_str(headers, CONTENT_TYPE);
    if content_type.starts_with("application/x-www-form-urlencoded") {
        let form: SaveForm = serde_urlencoded::from_bytes(body).unwrap_or_default();
        if form.client.as_deref() == Some("web") {
            return RequestSource::Web;
        }
    }
    if content_type.starts_with("application/json") {
        RequestSource::ApiJson
    } else {
        RequestSource::ApiPlain
    }
}

/// Extract the save fields for an already-sniffed source.
pub fn parse_fields(source: RequestSource, body: &[u8]) -> Result<SaveRequest, ServiceError> {
    match source {
        RequestSource::Slack => parse_slack(body),
        RequestSource::ApiJson => {
            let form: SaveForm = serde_json::from_slice(body).map_err(|e| {
                ServiceError::MalformedInput(format!("could not parse JSON body: {}", e))
            })?;
            build_request(form)
        }
        RequestSource::Web | RequestSource::ApiPlain => {
            let form: SaveForm = serde_urlencoded::from_bytes(body).map_err(|e| {
                ServiceError::MalformedInput(format!("could not parse form body: {}", e))
            })?;
            build_request(form)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn build_request(form: SaveForm) -> Result<SaveRequest, ServiceError> {
    let text = non_empty(form.text)
        .map(|t| t.trim().to_string())
        .ok_or_else(|| ServiceError::MalformedInput("no link was provided".to_string()))?;
    Ok(SaveRequest {
        text,
        filename: non_empty(form.filename),
        title: non_empty(form.title),
        password: non_empty(form.password),
    })
}

/// Slack sends everything in one `text` field: `[filename] link`, possibly
/// wrapped in backtick "code" formatting. The Slack bot does not support
/// titles or passwords.
fn parse_slack(body: &[u8]) -> Result<SaveRequest, ServiceError> {
    let form: SaveForm = serde_urlencoded::from_bytes(body).map_err(|e| {
        ServiceError::MalformedInput(format!("could not parse form body: {}", e))
    })?;
    let text = form.text.unwrap_or_default();
    let text = text.trim_matches(|c| c == ' ' || c == '`');

    if text.is_empty() {
        return Err(ServiceError::MalformedInput(
            "no link provided; use `/shortng my-filename <link>` or `/shortng <link>`"
                .to_string(),
        ));
    }

    let (filename, link) = match text.split_once(' ') {
        Some((name, rest)) => (Some(name.to_string()), rest.trim().to_string()),
        None => (None, text.to_string()),
    };

    Ok(SaveRequest {
        text: link,
        filename,
        title: None,
        password: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const FILENAME: &str = "test-filename";
    const TITLE: &str = "This is a test title";
    const PASSWORD: &str = "myTestPassword";
    // not a valid viewer link, but enough for testing parsing
    const LINK: &str = "http://neuroglancer.janelia.org";

    fn web_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0 Firefox/68.0"));
        headers
    }

    fn json_headers() -> HeaderMap {
        let mut headers = web_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn slack_headers() -> HeaderMap {
        let mut headers = web_headers();
        headers.insert(USER_AGENT, HeaderValue::from_static("Slackbot"));
        headers
    }

    fn form_body(pairs: &[(&str, &str)]) -> Vec<u8> {
        serde_urlencoded::to_string(pairs).unwrap().into_bytes()
    }

    #[test]
    fn test_parse_web() {
        let body = form_body(&[
            ("filename", FILENAME),
            ("title", TITLE),
            ("password", PASSWORD),
            ("text", LINK),
            ("client", "web"),
        ]);
        let source = sniff_source(&web_headers(), &body);
        assert_eq!(source, RequestSource::Web);

        let req = parse_fields(source, &body).unwrap();
        assert_eq!(req.filename.as_deref(), Some(FILENAME));
        assert_eq!(req.title.as_deref(), Some(TITLE));
        assert_eq!(req.password.as_deref(), Some(PASSWORD));
        assert_eq!(req.text, LINK);
    }

    #[test]
    fn test_parse_web_no_link() {
        let body = form_body(&[("filename", FILENAME), ("client", "web")]);
        assert!(parse_fields(RequestSource::Web, &body).is_err());
    }

    #[test]
    fn test_parse_web_no_filename_title_pwd() {
        let body = form_body(&[("text", LINK), ("client", "web")]);
        let req = parse_fields(sniff_source(&web_headers(), &body), &body).unwrap();
        assert!(req.filename.is_none());
        assert!(req.title.is_none());
        assert!(req.password.is_none());
        assert_eq!(req.text, LINK);
    }

    #[test]
    fn test_parse_slack() {
        let body = form_body(&[("text", &format!("{} {}", FILENAME, LINK))]);
        let source = sniff_source(&slack_headers(), &body);
        assert_eq!(source, RequestSource::Slack);

        let req = parse_fields(source, &body).unwrap();
        assert_eq!(req.filename.as_deref(), Some(FILENAME));
        assert_eq!(req.text, LINK);
        assert!(req.title.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn test_parse_slack_no_filename() {
        let body = form_body(&[("text", LINK)]);
        let req = parse_fields(RequestSource::Slack, &body).unwrap();
        assert!(req.filename.is_none());
        assert_eq!(req.text, LINK);
    }

    #[test]
    fn test_parse_slack_strips_code_formatting() {
        let body = form_body(&[("text", &format!("`{}`", LINK))]);
        let req = parse_fields(RequestSource::Slack, &body).unwrap();
        assert_eq!(req.text, LINK);
    }

    #[test]
    fn test_parse_slack_no_link() {
        let body = form_body(&[("text", "")]);
        assert!(parse_fields(RequestSource::Slack, &body).is_err());
    }

    #[test]
    fn test_parse_api_plain() {
        let body = form_body(&[("text", LINK)]);
        let source = sniff_source(&web_headers(), &body);
        assert_eq!(source, RequestSource::ApiPlain);
        let req = parse_fields(source, &body).unwrap();
        assert_eq!(req.text, LINK);
    }

    #[test]
    fn test_sniff_web_requires_form_content_type() {
        // a form-shaped body under a JSON content type is not the web form
        let body = form_body(&[("text", LINK), ("client", "web")]);
        assert_eq!(sniff_source(&json_headers(), &body), RequestSource::ApiJson);
    }

    #[test]
    fn test_parse_api_json() {
        let body = serde_json::to_vec(&serde_json::json!({
            "filename": FILENAME,
            "title": TITLE,
            "password": PASSWORD,
            "text": LINK,
        }))
        .unwrap();
        let source = sniff_source(&json_headers(), &body);
        assert_eq!(source, RequestSource::ApiJson);

        let req = parse_fields(source, &body).unwrap();
        assert_eq!(req.filename.as_deref(), Some(FILENAME));
        assert_eq!(req.title.as_deref(), Some(TITLE));
        assert_eq!(req.password.as_deref(), Some(PASSWORD));
        assert_eq!(req.text, LINK);
    }

    #[test]
    fn test_parse_api_json_no_link() {
        let body =
            serde_json::to_vec(&serde_json::json!({"filename": FILENAME, "title": TITLE}))
                .unwrap();
        assert!(parse_fields(RequestSource::ApiJson, &body).is_err());
    }
}
