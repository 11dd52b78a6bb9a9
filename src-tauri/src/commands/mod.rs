//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to `travel-core`.
//! Every command returns the `DomainError` display text on failure.

mod item_cmd;
mod sync_cmd;
mod admin_cmd;
mod settings_cmd;

pub use item_cmd::*;
pub use sync_cmd::*;
pub use admin_cmd::*;
pub use settings_cmd::*;
