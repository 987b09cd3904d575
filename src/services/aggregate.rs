use std::collections::HashMap;

use crate::{
    catalog::CatalogState,
    models::Person,
};

/// Per-title metrics derived from the current user state
///
/// Built fresh for every request so nothing computed for one query leaks
/// into the next.
#[derive(Debug, Default)]
pub struct Aggregates<'a> {
    views: HashMap<&'a str, u32>,
    favorites: HashMap<&'a str, u32>,
}

impl<'a> Aggregates<'a> {
    pub fn collect(catalog: &'a CatalogState) -> Self {
        let mut views: HashMap<&'a str, u32> = HashMap::new();
        let mut favorites: HashMap<&'a str, u32> = HashMap::new();

        for user in catalog.users() {
            for (title, count) in user.history() {
                let total = views.entry(title.as_str()).or_insert(0);
                *total = total.saturating_add(*count);
            }
            for title in user.favorites() {
                let total = favorites.entry(title.as_str()).or_insert(0);
                *total = total.saturating_add(1);
            }
        }

        tracing::trace!(
            viewed = views.len(),
            favorited = favorites.len(),
            "Aggregated title metrics"
        );

        Self { views, favorites }
    }

    /// Sum of every user's watch count for the title
    pub fn views(&self, title: &str) -> u32 {
        self.views.get(title).copied().unwrap_or(0)
    }

    /// Number of users with the title among their favorites
    pub fn favorites(&self, title: &str) -> u32 {
        self.favorites.get(title).copied().unwrap_or(0)
    }
}

/// Mean grade of the rated titles a person appears in, 0.0 when none are rated
pub fn actor_average(catalog: &CatalogState, person: &Person) -> f64 {
    let grades: Vec<f64> = catalog
        .titles()
        .filter(|t| t.features(&person.name))
        .map(|t| t.average_grade())
        .filter(|grade| *grade > 0.0)
        .collect();

    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().sum::<f64>() / grades.len() as f64
}

/// Total views per genre, each title counting towards all of its genres
///
/// Ordered by views descending, then by genre name.
pub fn genre_popularity<'a>(catalog: &'a CatalogState, aggregates: &Aggregates<'_>) -> Vec<(&'a str, u32)> {
    let mut totals: HashMap<&'a str, u32> = HashMap::new();
    for title in catalog.titles() {
        let views = aggregates.views(title.name());
        for genre in title.genres() {
            let total = totals.entry(genre.as_str()).or_insert(0);
            *total = total.saturating_add(views);
        }
    }

    let mut ranked: Vec<(&'a str, u32)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}
