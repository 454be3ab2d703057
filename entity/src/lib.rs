//! Database entity models for Kontowart.

pub mod kontowart_entry;
pub mod kontowart_extension_history;

pub mod prelude;
