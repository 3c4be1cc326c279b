//! The core save/retrieve policy: input resolution, filename allocation,
//! edit authorization, and the save orchestration that ties them together.

pub mod allocate;
pub mod guard;
pub mod password;
pub mod resolve;
pub mod save;

/// Separator between the viewer base URL and the state reference in a link.
pub const LINK_SEPARATOR: &str = "#!";

/// Route prefix under which stored state is served, and by which
/// previously-issued short links are recognized.
pub const STATE_ROUTE_PREFIX: &str = "/short/";
