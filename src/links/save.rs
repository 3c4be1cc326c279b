//! End-to-end save orchestration.
//!
//! Resolve the input text, choose the effective filename, check edit
//! authorization, and persist the record with exactly one store put.
//! Any rejection leaves storage untouched.

use crate::clock::Clock;
use crate::error::ServiceError;
use crate::links::guard::EditGuard;
use crate::links::{allocate, password, resolve, LINK_SEPARATOR, STATE_ROUTE_PREFIX};
use crate::store::{LinkStore, StoredLink};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveRequest {
    /// Raw link, state JSON, or previously-issued short link.
    pub text: String,
    pub filename: Option<String>,
    pub title: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedLink {
    /// The externally-visible short link (viewer base + state URL).
    pub link: String,
    pub filename: String,
    /// Direct URL at which the stored state JSON is served.
    pub state_url: String,
}

pub fn save(
    store: &dyn LinkStore,
    guard: &EditGuard,
    clock: &dyn Clock,
    default_viewer: &str,
    public_url: &str,
    req: &SaveRequest,
) -> Result<SavedLink, ServiceError> {
    let resolved = resolve::resolve(store, default_viewer, &req.text, req.title.as_deref())?;

    // Effective filename: explicit, else the filename the input was already
    // stored under (so re-saving a short link overwrites in place), else a
    // fresh timestamp allocation.
    let filename = match req.filename.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(explicit) => allocate::normalize(explicit)?,
        None => match resolved.previous_filename {
            Some(ref previous) => previous.clone(),
            None => allocate::normalize(&allocate::allocate(clock))?,
        },
    };

    let supplied_password = req.password.as_deref().filter(|p| !p.is_empty());

    let existing = store.get(&filename)?;
    guard.authorize(existing.as_ref(), supplied_password)?;

    // An existing hash persists; a password on a previously-open (or new)
    // record protects it from now on.
    let password_hash = match existing.as_ref().and_then(|e| e.password_hash.clone()) {
        Some(hash) => Some(hash),
        None => supplied_password.map(password::hash_password),
    };

    let record = StoredLink {
        filename: filename.clone(),
        payload: resolved.state,
        title: req.title.clone(),
        password_hash,
        last_modified: clock.now(),
    };
    store.put(&record)?;

    let state_url = format!(
        "{}{}{}",
        public_url.trim_end_matches('/'),
        STATE_ROUTE_PREFIX,
        filename
    );
    let link = format!("{}{}{}", resolved.viewer_base, LINK_SEPARATOR, state_url);
    tracing::info!("Completed {}", link);

    Ok(SavedLink {
        link,
        filename,
        state_url,
    })
}
