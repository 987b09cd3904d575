use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display, str::FromStr};

/// Award categories tracked for people in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwardKind {
    BestScreenplay,
    BestSupportingActor,
    PeopleChoiceAward,
    BestDirector,
    BestPerformance,
}

impl AwardKind {
    pub const ALL: [AwardKind; 5] = [
        AwardKind::BestScreenplay,
        AwardKind::BestSupportingActor,
        AwardKind::PeopleChoiceAward,
        AwardKind::BestDirector,
        AwardKind::BestPerformance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AwardKind::BestScreenplay => "BEST_SCREENPLAY",
            AwardKind::BestSupportingActor => "BEST_SUPPORTING_ACTOR",
            AwardKind::PeopleChoiceAward => "PEOPLE_CHOICE_AWARD",
            AwardKind::BestDirector => "BEST_DIRECTOR",
            AwardKind::BestPerformance => "BEST_PERFORMANCE",
        }
    }
}

impl Display for AwardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for award tokens outside the tracked categories
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown award kind: {0}")]
pub struct UnknownAward(pub String);

impl FromStr for AwardKind {
    type Err = UnknownAward;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AwardKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAward(s.to_string()))
    }
}

/// An actor or other credited person
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub biography: String,
    pub filmography: Vec<String>,
    pub awards: HashMap<AwardKind, u32>,
}

impl Person {
    pub fn new(name: impl Into<String>, biography: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            biography: biography.into(),
            filmography: Vec::new(),
            awards: HashMap::new(),
        }
    }

    pub fn with_award(mut self, kind: AwardKind, count: u32) -> Self {
        self.awards.insert(kind, count);
        self
    }

    pub fn with_filmography(mut self, titles: Vec<String>) -> Self {
        self.filmography = titles;
        self
    }

    /// Sum of the counts of every tracked award
    pub fn total_awards(&self) -> u32 {
        AwardKind::ALL
            .iter()
            .filter_map(|kind| self.awards.get(kind))
            .sum()
    }

    pub fn has_award(&self, kind: AwardKind) -> bool {
        self.awards.contains_key(&kind)
    }
}
