//! Application state and composition.

use std::sync::Arc;

use pathsheet_domain::Ruleset;

use crate::infrastructure::ports::{CharacterRepo, ClockPort};
use crate::use_cases;

/// Main application state.
///
/// Holds the loaded ruleset and all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub ruleset: Arc<Ruleset>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_sheet: use_cases::CharacterSheetUseCases,
}

impl App {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        ruleset: Arc<Ruleset>,
    ) -> Self {
        let character_sheet =
            use_cases::CharacterSheetUseCases::new(character_repo, clock, ruleset.clone());

        Self {
            ruleset,
            use_cases: UseCases { character_sheet },
        }
    }
}
