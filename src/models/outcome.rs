use crate::error::EngineError;

use super::Policy;

/// Successful command effects
#[derive(Debug, Clone, PartialEq)]
pub enum CommandSuccess {
    Favorited { title: String },
    /// `views` is the user's own watch count after the view
    Viewed { title: String, views: u32 },
    Rated {
        title: String,
        grade: f64,
        username: String,
    },
}

/// What a recommendation policy picked
#[derive(Debug, Clone, PartialEq)]
pub enum Pick {
    One(String),
    /// Search returns every match, possibly none
    Many(Vec<String>),
}

/// Result of one request
///
/// The variants keep the message classes apart (command success, error,
/// list, picked identifier, not applicable) so presentation can be decided
/// outside the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done(CommandSuccess),
    Failed(EngineError),
    Listed(Vec<String>),
    Recommended { policy: Policy, pick: Pick },
    NotApplicable(Policy),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failed(_) | Outcome::NotApplicable(_))
    }
}

impl From<Result<CommandSuccess, EngineError>> for Outcome {
    fn from(result: Result<CommandSuccess, EngineError>) -> Self {
        match result {
            Ok(success) => Outcome::Done(success),
            Err(err) => Outcome::Failed(err),
        }
    }
}
