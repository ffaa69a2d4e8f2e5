pub mod repositories;

pub use repositories::{ScoreRepository, WordRepository};
