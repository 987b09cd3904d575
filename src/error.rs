/// Errors raised by catalog commands
///
/// Every variant is recoverable: the engine turns it into an error outcome for
/// the offending request and keeps processing the batch.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0} is not seen")]
    NotSeen(String),

    #[error("{0} is already in favourite list")]
    AlreadyFavorite(String),

    #[error("{0} has been already rated")]
    AlreadyRated(String),

    #[error("user {0} does not exist")]
    UserNotFound(String),

    #[error("{0} does not exist")]
    TitleNotFound(String),

    #[error("{title} has no season {season}")]
    SeasonNotFound { title: String, season: u32 },
}

/// Errors from the collaborators around the engine (loading, writing)
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_messages() {
        assert_eq!(
            EngineError::NotSeen("Heat".to_string()).to_string(),
            "Heat is not seen"
        );
        assert_eq!(
            EngineError::AlreadyFavorite("Heat".to_string()).to_string(),
            "Heat is already in favourite list"
        );
        assert_eq!(
            EngineError::AlreadyRated("Heat".to_string()).to_string(),
            "Heat has been already rated"
        );
        assert_eq!(
            EngineError::SeasonNotFound {
                title: "Dark".to_string(),
                season: 4
            }
            .to_string(),
            "Dark has no season 4"
        );
    }

    #[test]
    fn test_app_error_from_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Json(_)));
        assert!(app.to_string().starts_with("JSON error"));
    }
}
