use crate::{
    catalog::CatalogState,
    models::{Outcome, Pick, Policy, Recommendation, SortOrder, Title, User},
    services::{
        aggregate::{genre_popularity, Aggregates},
        ranking::Ranking,
    },
};

/// Selects titles for a user according to the requested policy
///
/// Missing users and tier mismatches both come back as
/// [`Outcome::NotApplicable`]; callers cannot tell them apart.
pub fn recommend(catalog: &CatalogState, request: &Recommendation) -> Outcome {
    let policy = request.policy;
    let Some(user) = catalog.user(&request.username) else {
        tracing::debug!(username = %request.username, ?policy, "Recommendation for unknown user");
        return Outcome::NotApplicable(policy);
    };

    if requires_premium(policy) && !user.is_premium() {
        tracing::debug!(username = %user.username(), ?policy, "Policy requires premium tier");
        return Outcome::NotApplicable(policy);
    }

    let pick = match policy {
        Policy::Standard => standard(catalog, user).map(Pick::One),
        Policy::Search => Some(Pick::Many(search(
            catalog,
            user,
            request.genre.as_deref(),
        ))),
        Policy::Popular => popular(catalog, user).map(Pick::One),
        Policy::BestUnseen => best_unseen(catalog, user).map(Pick::One),
        Policy::Favorite => favorite(catalog, user).map(Pick::One),
    };

    match pick {
        Some(pick) => Outcome::Recommended { policy, pick },
        None => Outcome::NotApplicable(policy),
    }
}

fn requires_premium(policy: Policy) -> bool {
    matches!(policy, Policy::Search | Policy::Popular | Policy::Favorite)
}

/// First unseen title in declaration order
pub fn standard(catalog: &CatalogState, user: &User) -> Option<String> {
    catalog
        .titles()
        .find(|t| !user.has_seen(t.name()))
        .map(|t| t.name().to_string())
}

/// Every unseen title of the genre, worst graded first
///
/// Without a genre nothing matches.
pub fn search(catalog: &CatalogState, user: &User, genre: Option<&str>) -> Vec<String> {
    let Some(genre) = genre else {
        return Vec::new();
    };
    let candidates = catalog
        .titles()
        .filter(|t| t.has_genre(genre) && !user.has_seen(t.name()));

    Ranking::by(|t: &&(dyn Title + 'static)| t.average_grade())
        .then_by_name(|t| t.name())
        .sort(candidates)
        .into_iter()
        .map(|t| t.name().to_string())
        .collect()
}

/// First unseen title of the most viewed genre that still has one
pub fn popular(catalog: &CatalogState, user: &User) -> Option<String> {
    let aggregates = Aggregates::collect(catalog);
    genre_popularity(catalog, &aggregates)
        .into_iter()
        .find_map(|(genre, _)| {
            catalog
                .titles()
                .find(|t| t.has_genre(genre) && !user.has_seen(t.name()))
        })
        .map(|t| t.name().to_string())
}

/// Highest graded unseen title; grade ties keep declaration order
pub fn best_unseen(catalog: &CatalogState, user: &User) -> Option<String> {
    Ranking::by(|t: &&(dyn Title + 'static)| t.average_grade())
        .order(SortOrder::Desc)
        .sort(catalog.titles())
        .into_iter()
        .find(|t| !user.has_seen(t.name()))
        .map(|t| t.name().to_string())
}

/// Unseen title favorited by the most users; first encountered wins ties
pub fn favorite(catalog: &CatalogState, user: &User) -> Option<String> {
    let aggregates = Aggregates::collect(catalog);
    let mut best: Option<(&(dyn Title + 'static), u32)> = None;

    for title in catalog.titles().filter(|t| !user.has_seen(t.name())) {
        let count = aggregates.favorites(title.name());
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((title, count));
        }
    }

    best.map(|(title, _)| title.name().to_string())
}
