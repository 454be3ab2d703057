//! Data transfer objects and shared application types.

pub mod api;
pub mod app;
pub mod entry;
pub mod event;
pub mod secret;
pub mod user;
