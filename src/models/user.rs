use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::error::EngineError;

/// Subscription level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Standard,
    Premium,
}

/// Error for subscription names outside the known tiers
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown subscription type: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BASIC" | "STANDARD" => Ok(Tier::Standard),
            "PREMIUM" => Ok(Tier::Premium),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// A catalog user with their viewing history, favorites and ratings
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    username: String,
    tier: Tier,
    /// Title name -> number of times watched
    history: HashMap<String, u32>,
    /// Favorite titles in the order they were added
    favorites: Vec<String>,
    rated_movies: HashSet<String>,
    /// Series name -> rated season numbers
    rated_seasons: HashMap<String, HashSet<u32>>,
}

impl User {
    pub fn new(username: impl Into<String>, tier: Tier) -> Self {
        Self {
            username: username.into(),
            tier,
            history: HashMap::new(),
            favorites: Vec::new(),
            rated_movies: HashSet::new(),
            rated_seasons: HashMap::new(),
        }
    }

    /// Builds a user from already-loaded history and favorites
    ///
    /// Favorites that are not in the history are dropped, since only seen
    /// titles can be favorites.
    pub fn with_history(
        username: impl Into<String>,
        tier: Tier,
        history: HashMap<String, u32>,
        favorites: Vec<String>,
    ) -> Self {
        let mut user = Self::new(username, tier);
        user.history = history;
        for title in favorites {
            if user.history.contains_key(&title) && !user.favorites.contains(&title) {
                user.favorites.push(title);
            } else {
                tracing::warn!(
                    username = %user.username,
                    title = %title,
                    "Dropping favorite that is unseen or duplicated"
                );
            }
        }
        user
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn is_premium(&self) -> bool {
        self.tier == Tier::Premium
    }

    pub fn history(&self) -> &HashMap<String, u32> {
        &self.history
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn has_seen(&self, title: &str) -> bool {
        self.history.contains_key(title)
    }

    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorites.iter().any(|f| f == title)
    }

    /// Times this user watched the title, 0 when never
    pub fn views_of(&self, title: &str) -> u32 {
        self.history.get(title).copied().unwrap_or(0)
    }

    /// Number of ratings given: rated movies plus rated seasons
    pub fn rating_count(&self) -> usize {
        self.rated_movies.len() + self.rated_seasons.values().map(HashSet::len).sum::<usize>()
    }

    pub fn has_rated_movie(&self, title: &str) -> bool {
        self.rated_movies.contains(title)
    }

    pub fn has_rated_season(&self, title: &str, season: u32) -> bool {
        self.rated_seasons
            .get(title)
            .is_some_and(|seasons| seasons.contains(&season))
    }

    /// Adds a seen title to the favorites
    pub(crate) fn add_favorite(&mut self, title: &str) -> Result<(), EngineError> {
        if !self.has_seen(title) {
            return Err(EngineError::NotSeen(title.to_string()));
        }
        if self.is_favorite(title) {
            return Err(EngineError::AlreadyFavorite(title.to_string()));
        }
        self.favorites.push(title.to_string());
        Ok(())
    }

    /// Increments the watch count and returns the new count
    pub(crate) fn record_view(&mut self, title: &str) -> u32 {
        let views = self.history.entry(title.to_string()).or_insert(0);
        *views = views.saturating_add(1);
        *views
    }

    pub(crate) fn mark_movie_rated(&mut self, title: &str) -> Result<(), EngineError> {
        if !self.has_seen(title) {
            return Err(EngineError::NotSeen(title.to_string()));
        }
        if !self.rated_movies.insert(title.to_string()) {
            return Err(EngineError::AlreadyRated(title.to_string()));
        }
        Ok(())
    }

    pub(crate) fn mark_season_rated(&mut self, title: &str, season: u32) -> Result<(), EngineError> {
        if !self.has_seen(title) {
            return Err(EngineError::NotSeen(title.to_string()));
        }
        if !self
            .rated_seasons
            .entry(title.to_string())
            .or_default()
            .insert(season)
        {
            return Err(EngineError::AlreadyRated(title.to_string()));
        }
        Ok(())
    }
}
