pub mod entry;
pub mod fee;
pub mod retry;
