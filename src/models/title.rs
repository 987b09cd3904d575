/// Capability shared by every watchable title in the catalog
///
/// Rankings and recommendation policies go through this trait so that movies
/// and series are walked uniformly instead of being matched on by hand.
pub trait Title {
    fn name(&self) -> &str;
    fn year(&self) -> i32;
    fn cast(&self) -> &[String];
    fn genres(&self) -> &[String];

    /// Running time in minutes. Series sum their seasons.
    fn duration(&self) -> u32;

    /// Total views across every user, as last mirrored by a view command
    fn view_count(&self) -> u32;

    /// Average grade, 0.0 when nothing has been rated
    fn average_grade(&self) -> f64;

    fn has_genre(&self, genre: &str) -> bool {
        self.genres().iter().any(|g| g == genre)
    }

    fn features(&self, person: &str) -> bool {
        self.cast().iter().any(|c| c == person)
    }
}

/// Mean of a rating list, 0.0 for an empty list
pub(crate) fn mean(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    name: String,
    year: i32,
    cast: Vec<String>,
    genres: Vec<String>,
    duration: u32,
    views: u32,
    ratings: Vec<f64>,
}

impl Movie {
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: Vec<String>,
        genres: Vec<String>,
        duration: u32,
    ) -> Self {
        Self {
            name: name.into(),
            year,
            cast,
            genres,
            duration,
            views: 0,
            ratings: Vec::new(),
        }
    }

    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    pub(crate) fn add_rating(&mut self, grade: f64) {
        self.ratings.push(grade);
    }

    pub(crate) fn add_views(&mut self, views: u32) {
        self.views = self.views.saturating_add(views);
    }
}

impl Title for Movie {
    fn name(&self) -> &str {
        &self.name
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn cast(&self) -> &[String] {
        &self.cast
    }

    fn genres(&self) -> &[String] {
        &self.genres
    }

    fn duration(&self) -> u32 {
        self.duration
    }

    fn view_count(&self) -> u32 {
        self.views
    }

    fn average_grade(&self) -> f64 {
        mean(&self.ratings)
    }
}

/// One season of a series; ratings are collected per season
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub number: u32,
    pub duration: u32,
    ratings: Vec<f64>,
}

impl Season {
    pub fn new(number: u32, duration: u32) -> Self {
        Self {
            number,
            duration,
            ratings: Vec::new(),
        }
    }

    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    pub fn average_grade(&self) -> f64 {
        mean(&self.ratings)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    year: i32,
    cast: Vec<String>,
    genres: Vec<String>,
    seasons: Vec<Season>,
    views: u32,
}

impl Series {
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: Vec<String>,
        genres: Vec<String>,
        seasons: Vec<Season>,
    ) -> Self {
        Self {
            name: name.into(),
            year,
            cast,
            genres,
            seasons,
            views: 0,
        }
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Looks up a season by its 1-based number
    pub fn season(&self, number: u32) -> Option<&Season> {
        self.index_of(number).map(|i| &self.seasons[i])
    }

    fn index_of(&self, number: u32) -> Option<usize> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        (index < self.seasons.len()).then_some(index)
    }

    /// Returns false when the season number is out of range
    pub(crate) fn add_season_rating(&mut self, number: u32, grade: f64) -> bool {
        match self.index_of(number) {
            Some(index) => {
                self.seasons[index].ratings.push(grade);
                true
            }
            None => false,
        }
    }

    pub(crate) fn add_views(&mut self, views: u32) {
        self.views = self.views.saturating_add(views);
    }
}

impl Title for Series {
    fn name(&self) -> &str {
        &self.name
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn cast(&self) -> &[String] {
        &self.cast
    }

    fn genres(&self) -> &[String] {
        &self.genres
    }

    fn duration(&self) -> u32 {
        self.seasons.iter().map(|s| s.duration).sum()
    }

    fn view_count(&self) -> u32 {
        self.views
    }

    /// Sum of per-season averages over the season count. An unrated season
    /// still counts in the denominator.
    fn average_grade(&self) -> f64 {
        if self.seasons.is_empty() {
            return 0.0;
        }
        let total: f64 = self.seasons.iter().map(Season::average_grade).sum();
        total / self.seasons.len() as f64
    }
}
