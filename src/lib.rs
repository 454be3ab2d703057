//! Kontowart keeps track of shared subscription accounts: who an account
//! belongs to, when its validity runs out, what the owner owes, and the
//! request-and-approve workflow for extending it.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
