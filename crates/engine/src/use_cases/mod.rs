//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases load aggregates through ports, run domain rules and persist the result.

pub mod character_sheet;

pub use character_sheet::CharacterSheetUseCases;
