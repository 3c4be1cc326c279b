//! Input classification and normalization.
//!
//! The save endpoint accepts three shapes of `text`, distinguished by
//! sniffing (first match wins):
//! 1. a short link this service previously issued
//!    (`<viewer>#!<public_url>/short/<filename>`)
//! 2. a viewer link carrying a percent-encoded state fragment
//!    (`<viewer>#!%7B...%7D`)
//! 3. raw state JSON

use percent_encoding::percent_decode_str;

use crate::error::ServiceError;
use crate::links::{allocate, LINK_SEPARATOR, STATE_ROUTE_PREFIX};
use crate::store::LinkStore;

/// One submitted `text` input, classified but not yet resolved against
/// storage.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkInput {
    /// Raw state JSON submitted directly.
    RawState(serde_json::Value),
    /// A viewer link with the state percent-encoded after `#!`.
    ViewerLink {
        viewer_base: String,
        state: serde_json::Value,
    },
    /// A short link previously issued by this service, referencing a stored
    /// filename.
    StoredReference {
        viewer_base: String,
        filename: String,
    },
}

/// The canonical result of resolving an input: which viewer to link back to,
/// the state payload itself, and the filename the input already lived under
/// (if it was a previously-issued short link).
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub viewer_base: String,
    pub state: serde_json::Value,
    pub previous_filename: Option<String>,
}

/// Classify input text without touching storage.
pub fn classify(text: &str) -> Result<LinkInput, ServiceError> {
    let text = text.trim();

    if let Some((base, fragment)) = text.split_once(LINK_SEPARATOR) {
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ServiceError::MalformedInput(format!(
                "links must start with http:// or https://, got:\n\n{}",
                text
            )));
        }

        // A fragment that is itself an http(s) URL is a reference to stored
        // state rather than inline state.
        if fragment.starts_with("http://") || fragment.starts_with("https://") {
            let Some((_, filename)) = fragment.split_once(STATE_ROUTE_PREFIX) else {
                return Err(ServiceError::MalformedInput(format!(
                    "the linked state URL is not one issued by this service:\n\n{}",
                    fragment
                )));
            };
            // The extracted filename becomes both a store lookup key and,
            // on re-save, the effective write target, so it gets the same
            // path-safety check as a caller-supplied filename.
            if !allocate::is_safe_path(filename) {
                return Err(ServiceError::MalformedInput(format!(
                    "the linked state URL has an invalid filename: \"{}\"",
                    filename
                )));
            }
            return Ok(LinkInput::StoredReference {
                viewer_base: base.to_string(),
                filename: filename.to_string(),
            });
        }

        let decoded = percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|_| ServiceError::MalformedInput(format!("could not parse link:\n\n{}", text)))?;
        let state = serde_json::from_str(&decoded).map_err(|_| {
            ServiceError::MalformedInput(format!("could not parse link:\n\n{}", text))
        })?;
        return Ok(LinkInput::ViewerLink {
            viewer_base: base.to_string(),
            state,
        });
    }

    if text.starts_with('{') {
        let state = serde_json::from_str(text).map_err(|_| {
            ServiceError::MalformedInput(format!(
                "it appears that JSON was provided instead of a link, \
                 but the JSON could not be parsed:\n{}",
                text
            ))
        })?;
        return Ok(LinkInput::RawState(state));
    }

    Err(ServiceError::MalformedInput(format!(
        "could not parse link:\n\n{}",
        text
    )))
}

/// Classify `text` and normalize it to a canonical payload, fetching the
/// referenced record when the input is a previously-issued short link.
/// Raw state defaults to `default_viewer` as the viewer base.
pub fn resolve(
    store: &dyn LinkStore,
    default_viewer: &str,
    text: &str,
    title: Option<&str>,
) -> Result<Resolved, ServiceError> {
    let mut resolved = match classify(text)? {
        LinkInput::RawState(state) => Resolved {
            viewer_base: default_viewer.to_string(),
            state,
            previous_filename: None,
        },
        LinkInput::ViewerLink { viewer_base, state } => Resolved {
            viewer_base,
            state,
            previous_filename: None,
        },
        LinkInput::StoredReference {
            viewer_base,
            filename,
        } => {
            let record = store
                .get(&filename)?
                .ok_or_else(|| ServiceError::ReferenceNotFound(filename.clone()))?;
            Resolved {
                viewer_base,
                state: record.payload,
                previous_filename: Some(filename),
            }
        }
    };

    if let Some(title) = title {
        merge_title(&mut resolved.state, title);
    }
    Ok(resolved)
}

/// Replace any `title` embedded in the state with the caller's override.
pub fn merge_title(state: &mut serde_json::Value, title: &str) {
    if let Some(obj) = state.as_object_mut() {
        obj.insert(
            "title".to_string(),
            serde_json::Value::String(title.to_string()),
        );
    }
}
