use crate::{
    catalog::CatalogState,
    models::{Action, Command, Outcome, Request},
    services::{queries::run_query, recommendations::recommend},
};

/// Executes requests in order against an owned catalog
///
/// Later requests observe every mutation made by earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    catalog: CatalogState,
}

impl Engine {
    pub fn new(catalog: CatalogState) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    #[tracing::instrument(skip(self, request), fields(id = request.id))]
    pub fn execute(&mut self, request: &Request) -> Outcome {
        let outcome = match &request.action {
            Action::Command(command) => self.apply(command),
            Action::Query(query) => Outcome::Listed(run_query(&self.catalog, query)),
            Action::Recommendation(recommendation) => recommend(&self.catalog, recommendation),
        };

        if outcome.is_error() {
            tracing::debug!(?outcome, "Request rejected");
        }
        outcome
    }

    /// Executes every request and pairs each outcome with its request id
    pub fn run<'r>(&mut self, requests: impl IntoIterator<Item = &'r Request>) -> Vec<(u64, Outcome)> {
        let outcomes: Vec<(u64, Outcome)> = requests
            .into_iter()
            .map(|request| (request.id, self.execute(request)))
            .collect();

        tracing::info!(
            requests = outcomes.len(),
            rejected = outcomes.iter().filter(|(_, o)| o.is_error()).count(),
            "Requests executed"
        );
        outcomes
    }

    fn apply(&mut self, command: &Command) -> Outcome {
        let result = match command {
            Command::Favorite { username, title } => self.catalog.add_favorite(username, title),
            Command::View { username, title } => self.catalog.record_view(username, title),
            Command::Rate {
                username,
                title,
                grade,
                season,
            } => self.catalog.rate(username, title, *grade, *season),
        };
        result.into()
    }
}
