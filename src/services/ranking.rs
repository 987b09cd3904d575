use std::cmp::Ordering;

use crate::models::SortOrder;

type KeyFn<'k, T> = Box<dyn Fn(&T) -> f64 + 'k>;
type NameFn<'k, T> = Box<dyn for<'x> Fn(&'x T) -> &'x str + 'k>;

/// Ordering of query results: a primary key, an optional name tie-break and a direction
///
/// The direction only flips the primary key. Ties on the key are always
/// broken by name ascending, or kept in input order when no name is set.
///
/// ```ignore
/// let ranked = Ranking::by(|m: &&Movie| m.duration() as f64)
///     .then_by_name(|m| m.name())
///     .order(SortOrder::Desc)
///     .positive_only()
///     .rank(movies, Some(10));
/// ```
pub struct Ranking<'k, T> {
    key: KeyFn<'k, T>,
    name: Option<NameFn<'k, T>>,
    order: SortOrder,
    positive_only: bool,
    name_is_primary: bool,
}

impl<'k, T> Ranking<'k, T> {
    pub fn by(key: impl Fn(&T) -> f64 + 'k) -> Self {
        Self {
            key: Box::new(key),
            name: None,
            order: SortOrder::Asc,
            positive_only: false,
            name_is_primary: false,
        }
    }

    /// Orders by name alone; the direction applies to the name
    pub fn by_name(name: impl for<'x> Fn(&'x T) -> &'x str + 'k) -> Self {
        let mut ranking = Self::by(|_| 0.0).then_by_name(name);
        ranking.name_is_primary = true;
        ranking
    }

    pub fn then_by_name(mut self, name: impl for<'x> Fn(&'x T) -> &'x str + 'k) -> Self {
        self.name = Some(Box::new(name));
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Drops items whose key is not strictly positive
    pub fn positive_only(mut self) -> Self {
        self.positive_only = true;
        self
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        let primary = (self.key)(a).total_cmp(&(self.key)(b));
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        let Some(name) = &self.name else {
            return primary;
        };
        let by_name = name(a).cmp(name(b));
        if self.name_is_primary && self.order == SortOrder::Desc {
            return primary.then(by_name.reverse());
        }
        primary.then(by_name)
    }

    /// Orders every eligible item without truncating
    pub fn sort(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut eligible: Vec<T> = items
            .into_iter()
            .filter(|item| !self.positive_only || (self.key)(item) > 0.0)
            .collect();
        // stable, so unnamed ties keep input order
        eligible.sort_by(|a, b| self.compare(a, b));
        eligible
    }

    /// Orders the eligible items and keeps the first `limit`
    ///
    /// No limit keeps everything; a limit of zero or less keeps nothing.
    pub fn rank(&self, items: impl IntoIterator<Item = T>, limit: Option<i64>) -> Vec<T> {
        let Some(limit) = limit else {
            return self.sort(items);
        };
        let limit = match usize::try_from(limit) {
            Ok(0) | Err(_) => return Vec::new(),
            Ok(limit) => limit,
        };
        let mut ranked = self.sort(items);
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: &'static str,
        score: f64,
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { name: "delta", score: 8.0 },
            Entry { name: "alpha", score: 8.0 },
            Entry { name: "charlie", score: 0.0 },
            Entry { name: "bravo", score: 9.5 },
            Entry { name: "echo", score: 3.0 },
        ]
    }

    fn by_score<'k>() -> Ranking<'k, Entry> {
        Ranking::by(|e: &Entry| e.score).then_by_name(|e| e.name)
    }

    fn names(entries: &[Entry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_ascending_with_name_tie_break() {
        let ranked = by_score().sort(entries());
        assert_eq!(names(&ranked), vec!["charlie", "echo", "alpha", "delta", "bravo"]);
    }

    #[test]
    fn test_descending_keeps_names_ascending_on_ties() {
        let ranked = by_score().order(SortOrder::Desc).sort(entries());
        assert_eq!(names(&ranked), vec!["bravo", "alpha", "delta", "echo", "charlie"]);
    }

    #[test]
    fn test_positive_only_drops_zero_keys() {
        let ranked = by_score().positive_only().sort(entries());
        assert!(!names(&ranked).contains(&"charlie"));
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let ranked = by_score().order(SortOrder::Desc).rank(entries(), Some(2));
        assert_eq!(names(&ranked), vec!["bravo", "alpha"]);

        let all = by_score().rank(entries(), Some(50));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_rank_without_limit_keeps_every_eligible_item() {
        let ranked = by_score().order(SortOrder::Desc).rank(entries(), None);
        assert_eq!(names(&ranked), vec!["bravo", "alpha", "delta", "echo", "charlie"]);

        let positive = by_score().positive_only().rank(entries(), None);
        assert_eq!(positive.len(), 4);
    }

    #[test]
    fn test_rank_with_non_positive_limit_is_empty() {
        assert!(by_score().rank(entries(), Some(0)).is_empty());
        assert!(by_score().rank(entries(), Some(-3)).is_empty());
    }

    #[test]
    fn test_by_name_follows_direction() {
        let asc = Ranking::by_name(|e: &Entry| e.name).sort(entries());
        assert_eq!(names(&asc), vec!["alpha", "bravo", "charlie", "delta", "echo"]);

        let desc = Ranking::by_name(|e: &Entry| e.name)
            .order(SortOrder::Desc)
            .rank(entries(), Some(2));
        assert_eq!(names(&desc), vec!["echo", "delta"]);
    }

    #[test]
    fn test_without_name_ties_keep_input_order() {
        let ranked = Ranking::by(|e: &Entry| e.score)
            .order(SortOrder::Desc)
            .sort(entries());
        assert_eq!(names(&ranked), vec!["bravo", "delta", "alpha", "echo", "charlie"]);
    }

    #[test]
    fn test_sorted_output_is_monotonic() {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let ranked = by_score().order(order).sort(entries());
            for pair in ranked.windows(2) {
                match order {
                    SortOrder::Asc => assert!(pair[0].score <= pair[1].score),
                    SortOrder::Desc => assert!(pair[0].score >= pair[1].score),
                }
                if pair[0].score == pair[1].score {
                    assert!(pair[0].name < pair[1].name);
                }
            }
        }
    }
}
