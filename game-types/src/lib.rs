pub mod game;
pub mod messages;
pub mod errors;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use errors::*;

pub type PlayerId = uuid::Uuid;
pub type WordId = uuid::Uuid;
