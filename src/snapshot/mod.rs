//! Input snapshot document and its conversion into engine types.
//!
//! The document mirrors the legacy JSON input: catalog sections plus one
//! loosely typed `commands` array. Catalog problems fail the whole load;
//! an action that cannot be turned into a [`Request`] is rejected on its
//! own so the batch can report it and carry on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    catalog::CatalogState,
    error::{AppError, AppResult},
    models::{
        Action, AwardKind, Command, Filters, Movie, Person, Query, Recommendation, Request,
        Season, Series, Tier, User,
    },
};

mod source;

pub use source::{FileSource, SnapshotSource};

#[cfg(test)]
pub use source::MockSnapshotSource;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub actors: Vec<ActorInput>,
    #[serde(default)]
    pub users: Vec<UserInput>,
    #[serde(default)]
    pub movies: Vec<MovieInput>,
    #[serde(default)]
    pub serials: Vec<SerialInput>,
    #[serde(default)]
    pub commands: Vec<ActionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActorInput {
    pub name: String,
    #[serde(default)]
    pub career_description: String,
    #[serde(default)]
    pub filmography: Vec<String>,
    #[serde(default)]
    pub awards: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInput {
    pub username: String,
    pub subscription_type: String,
    #[serde(default)]
    pub history: HashMap<String, u32>,
    #[serde(default)]
    pub favorite_movies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonInput {
    pub current_season: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialInput {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonInput>,
}

/// One entry of the `commands` array; which fields matter depends on `action_type`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionInput {
    pub action_id: u64,
    pub action_type: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub sort_type: Option<String>,
    #[serde(default)]
    pub criteria: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub grade: Option<f64>,
    /// 0 or absent targets a movie
    #[serde(default)]
    pub season_number: Option<u32>,
    /// Positional `[[year], [genre], [words..], [awards..]]`, any slot may be null
    #[serde(default)]
    pub filters: Option<Vec<Option<Vec<Option<String>>>>>,
}

/// An action that could not be converted, kept so its id still gets a record
#[derive(Debug)]
pub struct RejectedAction {
    pub id: u64,
    pub error: AppError,
}

/// Everything a batch needs: the catalog and the ordered request stream
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: CatalogState,
    pub requests: Vec<Result<Request, RejectedAction>>,
}

impl SnapshotDocument {
    pub fn into_snapshot(self) -> AppResult<Snapshot> {
        let people = self.actors.into_iter().map(Person::from).collect();
        let movies = self.movies.into_iter().map(Movie::from).collect();
        let series = self.serials.into_iter().map(Series::from).collect();
        let users = self
            .users
            .into_iter()
            .map(User::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        let requests = self
            .commands
            .into_iter()
            .map(|action| {
                let id = action.action_id;
                Request::try_from(action).map_err(|error| {
                    tracing::warn!(id, error = %error, "Rejected action");
                    RejectedAction { id, error }
                })
            })
            .collect();

        Ok(Snapshot {
            catalog: CatalogState::new(people, movies, series, users),
            requests,
        })
    }
}

impl From<ActorInput> for Person {
    fn from(input: ActorInput) -> Self {
        let mut person =
            Person::new(input.name, input.career_description).with_filmography(input.filmography);
        for (token, count) in input.awards {
            match token.parse::<AwardKind>() {
                Ok(kind) => person = person.with_award(kind, count),
                Err(err) => {
                    tracing::warn!(person = %person.name, error = %err, "Dropping award");
                }
            }
        }
        person
    }
}

impl From<MovieInput> for Movie {
    fn from(input: MovieInput) -> Self {
        Movie::new(input.title, input.year, input.cast, input.genres, input.duration)
    }
}

impl From<SerialInput> for Series {
    fn from(input: SerialInput) -> Self {
        let seasons = input
            .seasons
            .into_iter()
            .map(|s| Season::new(s.current_season, s.duration))
            .collect();
        Series::new(input.title, input.year, input.cast, input.genres, seasons)
    }
}

impl TryFrom<UserInput> for User {
    type Error = AppError;

    fn try_from(input: UserInput) -> AppResult<Self> {
        let tier: Tier = input
            .subscription_type
            .parse()
            .map_err(|e: crate::models::UnknownTier| AppError::InvalidInput(e.to_string()))?;
        Ok(User::with_history(
            input.username,
            tier,
            input.history,
            input.favorite_movies,
        ))
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::InvalidInput(format!("missing {field}")))
}

fn parse_token<T>(value: Option<String>, field: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    required(value, field)?
        .parse()
        .map_err(|e: T::Err| AppError::InvalidInput(e.to_string()))
}

impl TryFrom<ActionInput> for Request {
    type Error = AppError;

    fn try_from(input: ActionInput) -> AppResult<Self> {
        let id = input.action_id;
        let action = match input.action_type.as_str() {
            "command" => Action::Command(command(input)?),
            "query" => Action::Query(query(input)?),
            "recommendation" => Action::Recommendation(Recommendation {
                policy: parse_token(input.kind, "type")?,
                username: required(input.username, "username")?,
                genre: input.genre,
            }),
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown action type: {other}"
                )))
            }
        };
        Ok(Request { id, action })
    }
}

fn command(input: ActionInput) -> AppResult<Command> {
    let username = required(input.username, "username")?;
    let title = required(input.title, "title")?;
    match required(input.kind, "type")?.as_str() {
        "favorite" => Ok(Command::Favorite { username, title }),
        "view" => Ok(Command::View { username, title }),
        "rating" => Ok(Command::Rate {
            username,
            title,
            grade: input
                .grade
                .ok_or_else(|| AppError::InvalidInput("missing grade".to_string()))?,
            season: input.season_number.filter(|n| *n > 0),
        }),
        other => Err(AppError::InvalidInput(format!("unknown command: {other}"))),
    }
}

fn query(input: ActionInput) -> AppResult<Query> {
    Ok(Query {
        object: parse_token(input.object_type, "object_type")?,
        criterion: parse_token(input.criteria, "criteria")?,
        sort: parse_token(input.sort_type, "sort_type")?,
        number: input.number,
        filters: legacy_filters(input.filters.unwrap_or_default())?,
    })
}

/// Non-null strings of one positional slot; an empty slot is absent
fn slot(filters: &[Option<Vec<Option<String>>>], index: usize) -> Option<Vec<String>> {
    let values: Vec<String> = filters
        .get(index)?
        .as_ref()?
        .iter()
        .flatten()
        .cloned()
        .collect();
    (!values.is_empty()).then_some(values)
}

fn legacy_filters(filters: Vec<Option<Vec<Option<String>>>>) -> AppResult<Filters> {
    let year = match slot(&filters, 0).and_then(|v| v.into_iter().next()) {
        Some(raw) => Some(
            raw.trim()
                .parse::<i32>()
                .map_err(|_| AppError::InvalidInput(format!("invalid year filter: {raw}")))?,
        ),
        None => None,
    };

    Ok(Filters {
        year,
        genre: slot(&filters, 1).and_then(|v| v.into_iter().next()),
        words: slot(&filters, 2),
        awards: slot(&filters, 3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Criterion, ObjectKind, Policy, SortOrder, Title};
    use serde_json::json;

    fn document() -> SnapshotDocument {
        serde_json::from_value(json!({
            "actors": [{
                "name": "Al Pacino",
                "career_description": "An American actor.",
                "filmography": ["Heat"],
                "awards": {"BEST_DIRECTOR": 1, "BEST_HAIRCUT": 4}
            }],
            "users": [{
                "username": "bob",
                "subscription_type": "PREMIUM",
                "history": {"Heat": 2},
                "favorite_movies": ["Heat"]
            }],
            "movies": [{
                "title": "Heat",
                "year": 1995,
                "cast": ["Al Pacino"],
                "genres": ["Crime"],
                "duration": 170
            }],
            "serials": [{
                "title": "Dark",
                "year": 2017,
                "cast": [],
                "genres": ["Drama"],
                "seasons": [{"current_season": 1, "duration": 500}]
            }],
            "commands": [
                {"action_id": 1, "action_type": "command", "type": "rating",
                 "username": "bob", "title": "Heat", "grade": 8.0, "season_number": 0},
                {"action_id": 2, "action_type": "query", "object_type": "movies",
                 "sort_type": "desc", "criteria": "longest", "number": 3,
                 "filters": [["1995"], [null], null, null]},
                {"action_id": 3, "action_type": "recommendation", "type": "search",
                 "username": "bob", "genre": "Drama"},
                {"action_id": 4, "action_type": "teleport"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_document_builds_catalog() {
        let snapshot = document().into_snapshot().unwrap();
        let catalog = &snapshot.catalog;

        assert_eq!(catalog.movie("Heat").unwrap().view_count(), 2);
        assert_eq!(catalog.show("Dark").unwrap().duration(), 500);
        assert!(catalog.user("bob").unwrap().is_premium());

        let pacino = &catalog.people()[0];
        assert!(pacino.has_award(AwardKind::BestDirector));
        assert_eq!(pacino.total_awards(), 1);
    }

    #[test]
    fn test_actions_convert_in_order() {
        let snapshot = document().into_snapshot().unwrap();
        let requests = &snapshot.requests;
        assert_eq!(requests.len(), 4);

        let rate = requests[0].as_ref().unwrap();
        assert_eq!(
            rate.action,
            Action::Command(Command::Rate {
                username: "bob".to_string(),
                title: "Heat".to_string(),
                grade: 8.0,
                season: None,
            })
        );

        let Action::Query(query) = &requests[1].as_ref().unwrap().action else {
            panic!("expected a query");
        };
        assert_eq!(query.object, ObjectKind::Movies);
        assert_eq!(query.criterion, Criterion::Longest);
        assert_eq!(query.sort, SortOrder::Desc);
        assert_eq!(query.filters, Filters::default().year(1995));
        assert_eq!(query.number, Some(3));

        let Action::Recommendation(rec) = &requests[2].as_ref().unwrap().action else {
            panic!("expected a recommendation");
        };
        assert_eq!(rec.policy, Policy::Search);
        assert_eq!(rec.genre.as_deref(), Some("Drama"));

        let rejected = requests[3].as_ref().unwrap_err();
        assert_eq!(rejected.id, 4);
    }

    #[test]
    fn test_legacy_filters_slots() {
        let filters = legacy_filters(vec![
            None,
            Some(vec![Some("Drama".to_string())]),
            Some(vec![Some("actor".to_string()), None]),
            Some(vec![Some("BEST_DIRECTOR".to_string())]),
        ])
        .unwrap();
        assert_eq!(
            filters,
            Filters::default()
                .genre("Drama")
                .words(["actor"])
                .awards(["BEST_DIRECTOR"])
        );
        assert_eq!(legacy_filters(vec![]).unwrap(), Filters::default());
    }

    #[test]
    fn test_query_without_number_is_unbounded() {
        let input: ActionInput = serde_json::from_value(json!({
            "action_id": 7, "action_type": "query", "object_type": "actors",
            "sort_type": "asc", "criteria": "filter_description",
            "filters": [null, null, ["actor"], null]
        }))
        .unwrap();
        let Action::Query(query) = Request::try_from(input).unwrap().action else {
            panic!("expected a query");
        };
        assert_eq!(query.number, None);
        assert_eq!(query.filters, Filters::default().words(["actor"]));
    }

    #[test]
    fn test_unparseable_year_rejects_action() {
        let input = ActionInput {
            action_id: 9,
            action_type: "query".to_string(),
            object_type: Some("movies".to_string()),
            criteria: Some("longest".to_string()),
            sort_type: Some("asc".to_string()),
            number: Some(2),
            filters: Some(vec![Some(vec![Some("nineteen".to_string())])]),
            ..ActionInput::default()
        };
        assert!(matches!(
            Request::try_from(input),
            Err(AppError::InvalidInput(msg)) if msg.contains("nineteen")
        ));
    }

    #[test]
    fn test_series_rating_keeps_season() {
        let input = ActionInput {
            action_id: 5,
            action_type: "command".to_string(),
            kind: Some("rating".to_string()),
            username: Some("bob".to_string()),
            title: Some("Dark".to_string()),
            grade: Some(7.5),
            season_number: Some(2),
            ..ActionInput::default()
        };
        let request = Request::try_from(input).unwrap();
        assert!(matches!(
            request.action,
            Action::Command(Command::Rate { season: Some(2), .. })
        ));
    }

    #[test]
    fn test_unknown_subscription_fails_load() {
        let mut doc = document();
        doc.users[0].subscription_type = "GOLD".to_string();
        assert!(matches!(doc.into_snapshot(), Err(AppError::InvalidInput(_))));
    }
}
