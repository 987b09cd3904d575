use std::{fmt::Display, str::FromStr};

/// A single engine request, tagged with the sequence number of its output record
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: u64,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Command(Command),
    Query(Query),
    Recommendation(Recommendation),
}

/// State-mutating requests
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Favorite {
        username: String,
        title: String,
    },
    View {
        username: String,
        title: String,
    },
    /// Movies ignore `season`; series require it (1-based)
    Rate {
        username: String,
        title: String,
        grade: f64,
        season: Option<u32>,
    },
}

/// Entity collection a query runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Actors,
    Movies,
    Shows,
    Users,
}

/// The metric or predicate a query ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Average,
    Awards,
    FilterDescription,
    Longest,
    MostViewed,
    Favorite,
    Ratings,
    NumRatings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Optional constraints of a query; `None` never restricts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub words: Option<Vec<String>>,
    pub awards: Option<Vec<String>>,
}

impl Filters {
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn words<S: Into<String>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    pub fn awards<S: Into<String>>(mut self, awards: impl IntoIterator<Item = S>) -> Self {
        self.awards = Some(awards.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub object: ObjectKind,
    pub criterion: Criterion,
    pub sort: SortOrder,
    /// Maximum number of results; `None` keeps all, zero or negative yields nothing
    pub number: Option<i64>,
    pub filters: Filters,
}

/// The five recommendation policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Standard,
    Search,
    Popular,
    BestUnseen,
    Favorite,
}

impl Policy {
    /// Display label used in rendered messages
    pub fn label(&self) -> &'static str {
        match self {
            Policy::Standard => "StandardRecommendation",
            Policy::Search => "SearchRecommendation",
            Policy::Popular => "PopularRecommendation",
            Policy::BestUnseen => "BestRatedUnseenRecommendation",
            Policy::Favorite => "FavoriteRecommendation",
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub policy: Policy,
    pub username: String,
    /// Only the search policy reads this
    pub genre: Option<String>,
}

/// Error for unrecognised request tokens
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! token_enum {
    ($ty:ty, $kind:literal, { $($token:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($variant),)+
                    _ => Err(UnknownToken {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

token_enum!(ObjectKind, "object type", {
    "actors" => ObjectKind::Actors,
    "movies" => ObjectKind::Movies,
    "shows" => ObjectKind::Shows,
    "users" => ObjectKind::Users,
});

token_enum!(Criterion, "criteria", {
    "average" => Criterion::Average,
    "awards" => Criterion::Awards,
    "filter_description" => Criterion::FilterDescription,
    "longest" => Criterion::Longest,
    "most_viewed" => Criterion::MostViewed,
    "favorite" => Criterion::Favorite,
    "ratings" => Criterion::Ratings,
    "num_ratings" => Criterion::NumRatings,
});

token_enum!(SortOrder, "sort type", {
    "asc" => SortOrder::Asc,
    "desc" => SortOrder::Desc,
});

token_enum!(Policy, "recommendation type", {
    "standard" => Policy::Standard,
    "search" => Policy::Search,
    "popular" => Policy::Popular,
    "best_unseen" => Policy::BestUnseen,
    "favorite" => Policy::Favorite,
});
