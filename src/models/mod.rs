mod outcome;
mod person;
mod request;
mod title;
mod user;

pub use outcome::{CommandSuccess, Outcome, Pick};
pub use person::{AwardKind, Person, UnknownAward};
pub use request::{
    Action, Command, Criterion, Filters, ObjectKind, Policy, Query, Recommendation, Request,
    SortOrder, UnknownToken,
};
pub use title::{Movie, Season, Series, Title};
pub use user::{Tier, UnknownTier, User};
