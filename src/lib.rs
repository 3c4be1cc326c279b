//! shortng link-shortener server library.
//! This crate exposes internal modules for integration testing.
//! The binary entry point is in main.rs.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod links;
pub mod routes;
pub mod state;
pub mod store;
pub mod web;
