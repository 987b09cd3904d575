//! Query filters.
//!
//! Each present constraint of a [`Filters`] set becomes one predicate in a
//! [`FilterPipeline`]; an item survives only if every predicate accepts it.
//! Absent constraints add no predicate, so they never restrict anything.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::models::{AwardKind, Filters, Person, Title};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("word pattern is valid"));

/// A single constraint applied to candidates of type `T`
pub trait Predicate<T: ?Sized> {
    fn name(&self) -> &'static str;

    fn matches(&self, item: &T) -> bool;
}

/// Release year must equal the requested year
pub struct YearFilter(pub i32);

impl<T: Title + ?Sized> Predicate<T> for YearFilter {
    fn name(&self) -> &'static str {
        "year"
    }

    fn matches(&self, item: &T) -> bool {
        item.year() == self.0
    }
}

/// Genre list must contain the requested genre exactly
pub struct GenreFilter(pub String);

impl<T: Title + ?Sized> Predicate<T> for GenreFilter {
    fn name(&self) -> &'static str {
        "genre"
    }

    fn matches(&self, item: &T) -> bool {
        item.has_genre(&self.0)
    }
}

/// Every word must appear as a whole token of the biography (case-sensitive)
pub struct WordsFilter(pub Vec<String>);

impl Predicate<Person> for WordsFilter {
    fn name(&self) -> &'static str {
        "words"
    }

    fn matches(&self, person: &Person) -> bool {
        let tokens = tokenize(&person.biography);
        self.0.iter().all(|word| tokens.contains(word.as_str()))
    }
}

/// Person must hold every listed award kind; unknown kinds match nobody
pub struct AwardsFilter(pub Vec<String>);

impl Predicate<Person> for AwardsFilter {
    fn name(&self) -> &'static str {
        "awards"
    }

    fn matches(&self, person: &Person) -> bool {
        self.0.iter().all(|token| {
            token
                .parse::<AwardKind>()
                .is_ok_and(|kind| person.has_award(kind))
        })
    }
}

/// Splits text into word tokens, keeping their case
pub fn tokenize(text: &str) -> HashSet<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Chains predicates with logical AND
pub struct FilterPipeline<T: ?Sized> {
    filters: Vec<Box<dyn Predicate<T>>>,
}

impl<T: ?Sized> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> FilterPipeline<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn add_filter(mut self, filter: impl Predicate<T> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Keeps the candidates accepted by every predicate, preserving order
    pub fn apply<'a, I>(&self, candidates: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut kept: Vec<&'a T> = candidates.into_iter().collect();
        for filter in &self.filters {
            let before = kept.len();
            kept.retain(|item| filter.matches(item));
            tracing::trace!(
                filter = filter.name(),
                before,
                after = kept.len(),
                "Applied filter"
            );
        }
        kept
    }
}

/// Year and genre constraints for title queries
pub fn title_filters<T: Title + ?Sized>(filters: &Filters) -> FilterPipeline<T> {
    let mut pipeline = FilterPipeline::new();
    if let Some(year) = filters.year {
        pipeline = pipeline.add_filter(YearFilter(year));
    }
    if let Some(genre) = &filters.genre {
        pipeline = pipeline.add_filter(GenreFilter(genre.clone()));
    }
    pipeline
}

/// Description-word and award constraints for people queries
pub fn person_filters(filters: &Filters) -> FilterPipeline<Person> {
    let mut pipeline = FilterPipeline::new();
    if let Some(words) = &filters.words {
        pipeline = pipeline.add_filter(WordsFilter(words.clone()));
    }
    if let Some(awards) = &filters.awards {
        pipeline = pipeline.add_filter(AwardsFilter(awards.clone()));
    }
    pipeline
}
