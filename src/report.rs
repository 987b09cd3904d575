use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CommandSuccess, Outcome, Pick};

/// Output line for one request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub id: u64,
    pub message: String,
}

/// Everything one batch produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ResultRecord>,
}

impl RunReport {
    pub fn new(run_id: Uuid, results: Vec<ResultRecord>) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            results,
        }
    }
}

/// Renders an outcome as the legacy message string
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Done(success) => render_success(success),
        Outcome::Failed(err) => format!("error -> {err}"),
        Outcome::Listed(names) => format!("Query result: {}", list(names)),
        Outcome::Recommended {
            policy,
            pick: Pick::Many(names),
        } if names.is_empty() => format!("{policy} cannot be applied!"),
        Outcome::Recommended { policy, pick } => match pick {
            Pick::One(name) => format!("{policy} result: {name}"),
            Pick::Many(names) => format!("{policy} result: {}", list(names)),
        },
        Outcome::NotApplicable(policy) => format!("{policy} cannot be applied!"),
    }
}

fn render_success(success: &CommandSuccess) -> String {
    match success {
        CommandSuccess::Favorited { title } => {
            format!("success -> {title} was added as favourite")
        }
        CommandSuccess::Viewed { title, views } => {
            format!("success -> {title} was viewed with total views of {views}")
        }
        CommandSuccess::Rated {
            title,
            grade,
            username,
        } => format!("success -> {title} was rated with {} by {username}", grade_text(*grade)),
    }
}

/// `[a, b]`, like the legacy list printing
fn list(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

/// Whole grades keep one decimal (`8.0`), others print as-is (`4.5`)
fn grade_text(grade: f64) -> String {
    if grade.fract() == 0.0 && grade.is_finite() {
        format!("{grade:.1}")
    } else {
        grade.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::EngineError, models::Policy};

    #[test]
    fn test_render_command_messages() {
        assert_eq!(
            render(&Outcome::Done(CommandSuccess::Favorited {
                title: "Heat".to_string()
            })),
            "success -> Heat was added as favourite"
        );
        assert_eq!(
            render(&Outcome::Done(CommandSuccess::Viewed {
                title: "Heat".to_string(),
                views: 3
            })),
            "success -> Heat was viewed with total views of 3"
        );
        assert_eq!(
            render(&Outcome::Done(CommandSuccess::Rated {
                title: "Heat".to_string(),
                grade: 8.0,
                username: "bob".to_string()
            })),
            "success -> Heat was rated with 8.0 by bob"
        );
        assert_eq!(
            render(&Outcome::Failed(EngineError::AlreadyRated("Heat".to_string()))),
            "error -> Heat has been already rated"
        );
    }

    #[test]
    fn test_render_query_list() {
        assert_eq!(
            render(&Outcome::Listed(vec!["Heat".to_string(), "Ronin".to_string()])),
            "Query result: [Heat, Ronin]"
        );
        assert_eq!(render(&Outcome::Listed(vec![])), "Query result: []");
    }

    #[test]
    fn test_render_recommendations() {
        assert_eq!(
            render(&Outcome::Recommended {
                policy: Policy::Standard,
                pick: Pick::One("Heat".to_string())
            }),
            "StandardRecommendation result: Heat"
        );
        assert_eq!(
            render(&Outcome::Recommended {
                policy: Policy::Search,
                pick: Pick::Many(vec!["Dark".to_string(), "Heat".to_string()])
            }),
            "SearchRecommendation result: [Dark, Heat]"
        );
        assert_eq!(
            render(&Outcome::Recommended {
                policy: Policy::Search,
                pick: Pick::Many(vec![])
            }),
            "SearchRecommendation cannot be applied!"
        );
        assert_eq!(
            render(&Outcome::NotApplicable(Policy::BestUnseen)),
            "BestRatedUnseenRecommendation cannot be applied!"
        );
    }

    #[test]
    fn test_grade_text() {
        assert_eq!(grade_text(4.5), "4.5");
        assert_eq!(grade_text(10.0), "10.0");
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let report = RunReport::new(
            Uuid::nil(),
            vec![ResultRecord {
                id: 1,
                message: "Query result: []".to_string(),
            }],
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["run_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["results"][0]["id"], 1);
        assert!(value["generated_at"].is_string());
    }
}
