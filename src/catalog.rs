use crate::{
    error::EngineError,
    models::{CommandSuccess, Movie, Person, Series, Title, User},
};

/// The owned catalog snapshot every request runs against
///
/// Fields are private: queries and recommendations only get shared access,
/// and the command operations below are the only way state changes.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    people: Vec<Person>,
    movies: Vec<Movie>,
    series: Vec<Series>,
    users: Vec<User>,
}

impl CatalogState {
    /// Builds the snapshot and seeds every title's view count from the user histories
    pub fn new(
        people: Vec<Person>,
        mut movies: Vec<Movie>,
        mut series: Vec<Series>,
        users: Vec<User>,
    ) -> Self {
        for user in &users {
            for (title, views) in user.history() {
                if let Some(movie) = movies.iter_mut().find(|m| m.name() == title) {
                    movie.add_views(*views);
                } else if let Some(show) = series.iter_mut().find(|s| s.name() == title) {
                    show.add_views(*views);
                } else {
                    tracing::warn!(
                        username = %user.username(),
                        title = %title,
                        "History references a title missing from the catalog"
                    );
                }
            }
        }

        tracing::debug!(
            people = people.len(),
            movies = movies.len(),
            series = series.len(),
            users = users.len(),
            "Catalog snapshot built"
        );

        Self {
            people,
            movies,
            series,
            users,
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Every title in declaration order, movies before series
    pub fn titles(&self) -> impl Iterator<Item = &(dyn Title + 'static)> {
        self.movies
            .iter()
            .map(|m| m as &(dyn Title + 'static))
            .chain(self.series.iter().map(|s| s as &(dyn Title + 'static)))
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username() == username)
    }

    pub fn movie(&self, name: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.name() == name)
    }

    pub fn show(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn title(&self, name: &str) -> Option<&(dyn Title + 'static)> {
        self.titles().find(|t| t.name() == name)
    }

    fn user_mut(&mut self, username: &str) -> Result<&mut User, EngineError> {
        self.users
            .iter_mut()
            .find(|u| u.username() == username)
            .ok_or_else(|| EngineError::UserNotFound(username.to_string()))
    }

    /// Adds a title the user has already watched to their favorites
    pub fn add_favorite(&mut self, username: &str, title: &str) -> Result<CommandSuccess, EngineError> {
        self.user_mut(username)?.add_favorite(title)?;
        Ok(CommandSuccess::Favorited {
            title: title.to_string(),
        })
    }

    /// Records one more view of a title and mirrors it onto the title's view count
    pub fn record_view(&mut self, username: &str, title: &str) -> Result<CommandSuccess, EngineError> {
        if self.title(title).is_none() {
            return Err(EngineError::TitleNotFound(title.to_string()));
        }
        let views = self.user_mut(username)?.record_view(title);

        if let Some(movie) = self.movies.iter_mut().find(|m| m.name() == title) {
            movie.add_views(1);
        } else if let Some(show) = self.series.iter_mut().find(|s| s.name() == title) {
            show.add_views(1);
        }

        Ok(CommandSuccess::Viewed {
            title: title.to_string(),
            views,
        })
    }

    /// Rates a movie, or one season of a series when `season` is given
    pub fn rate(
        &mut self,
        username: &str,
        title: &str,
        grade: f64,
        season: Option<u32>,
    ) -> Result<CommandSuccess, EngineError> {
        if self.movie(title).is_some() {
            return self.rate_movie(username, title, grade);
        }
        if self.show(title).is_some() {
            // season 0 never exists, so a missing season fails after the seen check
            return self.rate_series(username, title, season.unwrap_or(0), grade);
        }
        Err(EngineError::TitleNotFound(title.to_string()))
    }

    pub fn rate_movie(
        &mut self,
        username: &str,
        title: &str,
        grade: f64,
    ) -> Result<CommandSuccess, EngineError> {
        let index = self
            .movies
            .iter()
            .position(|m| m.name() == title)
            .ok_or_else(|| EngineError::TitleNotFound(title.to_string()))?;

        self.user_mut(username)?.mark_movie_rated(title)?;
        self.movies[index].add_rating(grade);

        Ok(CommandSuccess::Rated {
            title: title.to_string(),
            grade,
            username: username.to_string(),
        })
    }

    pub fn rate_series(
        &mut self,
        username: &str,
        title: &str,
        season: u32,
        grade: f64,
    ) -> Result<CommandSuccess, EngineError> {
        let index = self
            .series
            .iter()
            .position(|s| s.name() == title)
            .ok_or_else(|| EngineError::TitleNotFound(title.to_string()))?;

        let user = self
            .user(username)
            .ok_or_else(|| EngineError::UserNotFound(username.to_string()))?;
        if !user.has_seen(title) {
            return Err(EngineError::NotSeen(title.to_string()));
        }
        if self.series[index].season(season).is_none() {
            return Err(EngineError::SeasonNotFound {
                title: title.to_string(),
                season,
            });
        }

        self.user_mut(username)?.mark_season_rated(title, season)?;
        self.series[index].add_season_rating(season, grade);

        Ok(CommandSuccess::Rated {
            title: title.to_string(),
            grade,
            username: username.to_string(),
        })
    }
}
