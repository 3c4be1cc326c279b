//! HTTP request parsing and handlers for the save and retrieve operations.

pub mod handlers;
pub mod parse;
pub mod respond;
