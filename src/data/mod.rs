//! Repository layer over the persistent entry collection.

pub mod entry;
pub mod extension_history;

pub use entry::EntryRepository;
pub use extension_history::ExtensionHistoryRepository;
