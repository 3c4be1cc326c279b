//! Filename allocation and normalization.

use crate::clock::Clock;
use crate::error::ServiceError;

/// Produce a filename from the current UTC time at microsecond resolution,
/// e.g. `2026-08-29.153000.123456`.
///
/// Uniqueness is advisory only: the microsecond precision makes an in-process
/// collision extremely unlikely, but a collision is simply treated as a write
/// to an existing filename and goes through the usual authorization check.
pub fn allocate(clock: &dyn Clock) -> String {
    clock.now().format("%Y-%m-%d.%H%M%S.%6f").to_string()
}

/// Normalize a filename: trim, replace spaces with underscores, and append
/// a `.json` suffix if missing. Rejects path escapes (`..`, absolute paths).
pub fn normalize(filename: &str) -> Result<String, ServiceError> {
    let mut name = filename.trim().replace(' ', "_");
    if !name.ends_with(".json") {
        name.push_str(".json");
    }
    if !is_safe_path(&name) {
        return Err(ServiceError::MalformedInput(format!(
            "invalid filename: \"{}\"",
            filename
        )));
    }
    Ok(name)
}

/// A filename is safe when it is relative and every path component is a
/// plain name. Filenames may contain `/` for hierarchical organization.
pub fn is_safe_path(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && name
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != "..")
}
