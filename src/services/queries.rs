use crate::{
    catalog::CatalogState,
    models::{Criterion, ObjectKind, Person, Query, Title, User},
    services::{
        aggregate::{actor_average, Aggregates},
        filter::{person_filters, title_filters},
        ranking::Ranking,
    },
};

/// Runs a query and returns the ranked names
///
/// Object/criterion pairs that do not go together produce an empty list.
pub fn run_query(catalog: &CatalogState, query: &Query) -> Vec<String> {
    let names = match (query.object, query.criterion) {
        (ObjectKind::Actors, Criterion::Average) => actors_by_average(catalog, query),
        (ObjectKind::Actors, Criterion::Awards) => actors_by_awards(catalog, query),
        (ObjectKind::Actors, Criterion::FilterDescription) => actors_by_description(catalog, query),
        (ObjectKind::Movies, criterion) => titles_by(catalog, catalog.movies(), criterion, query),
        (ObjectKind::Shows, criterion) => titles_by(catalog, catalog.series(), criterion, query),
        (ObjectKind::Users, Criterion::NumRatings) => users_by_ratings(catalog, query),
        (object, criterion) => {
            tracing::debug!(?object, ?criterion, "Unsupported query combination");
            Vec::new()
        }
    };

    tracing::debug!(
        object = ?query.object,
        criterion = ?query.criterion,
        results = names.len(),
        "Query completed"
    );
    names
}

fn titles_by<T: Title>(
    catalog: &CatalogState,
    titles: &[T],
    criterion: Criterion,
    query: &Query,
) -> Vec<String> {
    let candidates = title_filters::<T>(&query.filters).apply(titles);
    let aggregates = Aggregates::collect(catalog);

    let ranking = match criterion {
        Criterion::Longest => Ranking::by(|t: &&T| f64::from(t.duration())),
        Criterion::Ratings => Ranking::by(|t: &&T| t.average_grade()),
        Criterion::MostViewed => Ranking::by(|t: &&T| f64::from(aggregates.views(t.name()))),
        Criterion::Favorite => Ranking::by(|t: &&T| f64::from(aggregates.favorites(t.name()))),
        _ => return Vec::new(),
    };

    // collected before `aggregates` drops, the key closures borrow it
    let names = ranking
        .then_by_name(|t| t.name())
        .order(query.sort)
        .positive_only()
        .rank(candidates, query.number)
        .into_iter()
        .map(|t| t.name().to_string())
        .collect();
    names
}

fn actors_by_average(catalog: &CatalogState, query: &Query) -> Vec<String> {
    let candidates = person_filters(&query.filters).apply(catalog.people());
    Ranking::by(|p: &&Person| actor_average(catalog, p))
        .then_by_name(|p| p.name.as_str())
        .order(query.sort)
        .positive_only()
        .rank(candidates, query.number)
        .into_iter()
        .map(|p| p.name.clone())
        .collect()
}

fn actors_by_awards(catalog: &CatalogState, query: &Query) -> Vec<String> {
    let candidates = person_filters(&query.filters).apply(catalog.people());
    Ranking::by(|p: &&Person| f64::from(p.total_awards()))
        .then_by_name(|p| p.name.as_str())
        .order(query.sort)
        .positive_only()
        .rank(candidates, query.number)
        .into_iter()
        .map(|p| p.name.clone())
        .collect()
}

/// Name order only: no metric, nobody is dropped
fn actors_by_description(catalog: &CatalogState, query: &Query) -> Vec<String> {
    let candidates = person_filters(&query.filters).apply(catalog.people());
    Ranking::by_name(|p: &&Person| p.name.as_str())
        .order(query.sort)
        .rank(candidates, query.number)
        .into_iter()
        .map(|p| p.name.clone())
        .collect()
}

fn users_by_ratings(catalog: &CatalogState, query: &Query) -> Vec<String> {
    Ranking::by(|u: &&User| u.rating_count() as f64)
        .then_by_name(|u| u.username())
        .order(query.sort)
        .positive_only()
        .rank(catalog.users(), query.number)
        .into_iter()
        .map(|u| u.username().to_string())
        .collect()
}
