//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: JSON file and in-memory key-value stores
//! - Database: SQLite key-value store
//! - Adapters: Platform integrations (console)

pub mod adapters;
pub mod config;
pub mod database;
pub mod storage;
