//! Character storage adapters.

mod json_character_repository;

pub use json_character_repository::JsonCharacterRepository;
