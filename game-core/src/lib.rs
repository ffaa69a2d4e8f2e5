pub mod collaborators;
pub mod engine;
pub mod game_state;
pub mod kids;
pub mod rules;
pub mod scoring;
pub mod scrambler;
pub mod session_registry;
pub mod word_selection;

// Re-export main components
pub use collaborators::*;
pub use engine::*;
pub use game_state::*;
pub use kids::*;
pub use rules::*;
pub use scoring::*;
pub use scrambler::*;
pub use session_registry::*;
pub use word_selection::*;
