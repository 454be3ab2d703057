pub mod entry;
pub mod extension;
pub mod util;
