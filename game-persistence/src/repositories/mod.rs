pub mod score_repository;
pub mod word_repository;

pub use score_repository::ScoreRepository;
pub use word_repository::WordRepository;
