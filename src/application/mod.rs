//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Group settings and permission resolution
//! - Errors: Error taxonomy
//! - Messaging: Prefix parsing, dispatching, built-in commands

pub mod errors;
pub mod services;
pub mod messaging;
