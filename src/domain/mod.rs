//! Domain layer - Core business objects and seams
//! 
//! This layer contains:
//! - Entities: Core business objects (Message, GroupSettings, Command, Member, Role)
//! - Traits: Abstractions for infrastructure (ChatClient, KeyValueStore, CommandHandler)

pub mod entities;
pub mod traits;
