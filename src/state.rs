use std::sync::Arc;

use crate::clock::Clock;
use crate::links::guard::EditGuard;
use crate::store::LinkStore;

/// Shared application state passed to all handlers via axum State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Link record storage (filesystem-backed in production)
    pub store: Arc<dyn LinkStore>,
    /// Injected time source, shared with the guard
    pub clock: Arc<dyn Clock>,
    /// Edit authorization policy (expiration window + clock)
    pub guard: EditGuard,
    /// Default viewer base URL for raw state submissions
    pub viewer_url: String,
    /// Externally-visible base URL of this server
    pub public_url: String,
}
