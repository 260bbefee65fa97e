//! Application services - Business logic orchestration

pub mod permission_service;
pub mod settings_service;

pub use permission_service::member_has_permission;
pub use settings_service::{SettingsStore, SERVERS_COLLECTION};
