pub use super::kontowart_entry::Entity as KontowartEntry;
pub use super::kontowart_extension_history::Entity as KontowartExtensionHistory;
