// Portfolio session orchestration.
// One PortfolioApp per session owns the client, the cache handle, the loaded
// portfolio, and the filter state; there is no ambient global state.

use std::time::Duration;

use tracing::{debug, warn};

use crate::about::{self, AboutContent};
use crate::cache::{CachePayload, CacheStore};
use crate::error::{FolioError, Result};
use crate::github::{CancelHandle, CancelToken, GitHubClient};
use crate::portfolio::{Portfolio, Repository, normalize};
use crate::state::{FilterState, LanguageFilter, SortKey, apply};

/// Bound on full load-sequence attempts after surfaced errors.
pub const RECOVERY_ATTEMPTS: u32 = 3;
/// Base delay between recovery attempts; grows linearly per attempt.
pub const RECOVERY_DELAY: Duration = Duration::from_secs(3);

pub struct PortfolioApp {
    username: String,
    client: GitHubClient,
    cache: Option<CacheStore>,
    filter: FilterState,
    portfolio: Option<Portfolio>,
    /// Filtered and sorted view over the loaded collection.
    filtered: Vec<Repository>,
    /// Handle for cancelling the outstanding fetch, if any.
    cancel: Option<CancelHandle>,
}

impl PortfolioApp {
    /// Create a session for a username, with the default client and cache
    /// location. Runs uncached when no cache directory is available.
    pub fn new(username: impl Into<String>) -> Result<Self> {
        let client = GitHubClient::from_env()?;
        let cache = CacheStore::new();
        if cache.is_none() {
            warn!("cache directory unavailable; running without cache");
        }
        Ok(Self::with_parts(username, client, cache))
    }

    /// Create a session from explicit parts.
    pub fn with_parts(
        username: impl Into<String>,
        client: GitHubClient,
        cache: Option<CacheStore>,
    ) -> Self {
        Self {
            username: username.into(),
            client,
            cache,
            filter: FilterState::new(),
            portfolio: None,
            filtered: Vec::new(),
            cancel: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.portfolio.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Load the portfolio: from cache when a fresh entry exists, otherwise
    /// by fetching profile and repositories concurrently. Either fetch
    /// failing fails the load; there is no partial success.
    pub async fn load(&mut self) -> Result<()> {
        if let Some(payload) = self.cache.as_ref().and_then(|c| c.read(&self.username)) {
            self.install(normalize(&payload.user, &payload.repos));
            return Ok(());
        }

        let cancel = self.begin_fetch();
        let (user, repos) = tokio::try_join!(
            self.client.get_user(&self.username, &cancel),
            self.client.get_user_repos(&self.username, &cancel),
        )?;
        self.cancel = None;

        let payload = CachePayload { user, repos };
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.write(&self.username, &payload) {
                warn!(error = %err, "failed to write cache entry");
            }
        }

        self.install(normalize(&payload.user, &payload.repos));
        Ok(())
    }

    /// Cancel any outstanding fetch, destroy the cache entry, and reload
    /// from the API.
    pub async fn refresh(&mut self) -> Result<()> {
        if let Some(cache) = &self.cache {
            cache.clear(&self.username);
        }
        self.load().await
    }

    /// Load with bounded recovery: after a surfaced error, the full
    /// sequence is retried with a linearly increasing delay, up to the
    /// attempt bound. Not-found and cancellation are terminal immediately;
    /// exhausting the bound surfaces the last error as terminal.
    pub async fn load_with_recovery(&mut self) -> Result<()> {
        let mut last_error = None;

        for attempt in 1..=RECOVERY_ATTEMPTS {
            match self.load().await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_terminal() => return Err(err),
                Err(err) => {
                    warn!(attempt, error = %err, "load sequence failed");
                    last_error = Some(err);
                    if attempt < RECOVERY_ATTEMPTS {
                        tokio::time::sleep(RECOVERY_DELAY * attempt).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or(FolioError::Cancelled))
    }

    /// Fetch and parse the profile README. Best-effort: any failure yields
    /// the fixed fallback content.
    pub async fn load_about(&mut self) -> AboutContent {
        let cancel = self.begin_fetch();
        let content = match self.client.get_profile_readme(&self.username, &cancel).await {
            Ok(text) => about::about_or_fallback(Some(&text)),
            Err(err) => {
                debug!(error = %err, "profile README unavailable");
                AboutContent::fallback()
            }
        };
        self.cancel = None;
        content
    }

    /// Cancel whatever fetch is outstanding and arm a fresh token.
    fn begin_fetch(&mut self) -> CancelToken {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }
        let (handle, token) = CancelToken::pair();
        self.cancel = Some(handle);
        token
    }

    fn install(&mut self, portfolio: Portfolio) {
        self.portfolio = Some(portfolio);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = match &self.portfolio {
            Some(portfolio) => apply(&portfolio.repositories, &self.filter),
            None => Vec::new(),
        };
    }

    /// Set the free-text query and recompute. Resets pagination.
    pub fn set_query(&mut self, query: &str) {
        self.filter.set_query(query);
        self.recompute();
    }

    /// Clear the free-text query and recompute. Resets pagination.
    pub fn clear_search(&mut self) {
        self.filter.clear_search();
        self.recompute();
    }

    /// Set the language filter and recompute. Resets pagination.
    pub fn set_language(&mut self, language: LanguageFilter) {
        self.filter.set_language(language);
        self.recompute();
    }

    /// Set the sort key and recompute. Resets pagination.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.filter.set_sort(sort);
        self.recompute();
    }

    /// Surface one more page of the filtered collection.
    pub fn load_more(&mut self) {
        self.filter.load_more();
    }

    /// The currently visible repositories.
    pub fn visible_repositories(&self) -> &[Repository] {
        self.filter.visible_slice(&self.filtered)
    }

    /// Total repositories matching the current filter, across all pages.
    pub fn matching_count(&self) -> usize {
        self.filtered.len()
    }

    /// Whether more matching repositories exist beyond the visible set.
    pub fn has_more(&self) -> bool {
        self.visible_repositories().len() < self.filtered.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{RawRepo, RawUser};
    use crate::state::PAGE_SIZE;
    use tempfile::TempDir;

    fn sample_user() -> RawUser {
        RawUser {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            bio: Some("Backend engineer".to_string()),
            location: None,
            followers: 0,
            following: 0,
            public_repos: 20,
            avatar_url: None,
            html_url: "https://github.com/octocat".to_string(),
            blog: None,
            company: None,
            email: None,
            twitter_username: None,
        }
    }

    fn sample_repo(id: u64, name: &str, language: Option<&str>, stars: u64) -> RawRepo {
        RawRepo {
            id,
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            stargazers_count: stars,
            forks_count: 0,
            html_url: format!("https://github.com/octocat/{}", name),
            homepage: None,
            updated_at: Some("2025-09-18T10:00:00Z".to_string()),
            created_at: None,
            topics: vec![],
            private: false,
        }
    }

    fn seeded_app(repos: Vec<RawRepo>) -> (PortfolioApp, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        store
            .write(
                "octocat",
                &CachePayload {
                    user: sample_user(),
                    repos,
                },
            )
            .unwrap();

        let client = GitHubClient::new(None).unwrap();
        let app = PortfolioApp::with_parts("octocat", client, Some(store));
        (app, temp_dir)
    }

    #[tokio::test]
    async fn test_load_serves_cached_payload_without_network() {
        let (mut app, _temp_dir) = seeded_app(vec![
            sample_repo(1, "portfolio-app", Some("Rust"), 3),
            sample_repo(2, "other", Some("Go"), 8),
        ]);

        app.load().await.unwrap();

        let portfolio = app.portfolio().unwrap();
        assert_eq!(portfolio.profile.username, "octocat");
        assert_eq!(portfolio.repositories.len(), 2);
        assert_eq!(portfolio.statistics.total_stars, 11);
    }

    #[tokio::test]
    async fn test_query_filters_visible_repositories() {
        let (mut app, _temp_dir) = seeded_app(vec![
            sample_repo(1, "portfolio-app", Some("Rust"), 3),
            sample_repo(2, "other", Some("Go"), 8),
        ]);
        app.load().await.unwrap();

        app.set_query("port");
        let visible: Vec<&str> = app
            .visible_repositories()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(visible, vec!["portfolio-app"]);
        assert_eq!(app.matching_count(), 1);

        app.clear_search();
        assert_eq!(app.matching_count(), 2);
    }

    #[tokio::test]
    async fn test_pagination_over_loaded_collection() {
        let repos: Vec<RawRepo> = (0..30)
            .map(|i| sample_repo(i, &format!("repo-{:02}", i), None, 0))
            .collect();
        let (mut app, _temp_dir) = seeded_app(repos);
        app.load().await.unwrap();

        assert_eq!(app.visible_repositories().len(), PAGE_SIZE);
        assert!(app.has_more());

        app.load_more();
        assert_eq!(app.visible_repositories().len(), PAGE_SIZE * 2);

        app.load_more();
        assert_eq!(app.visible_repositories().len(), 30);
        assert!(!app.has_more());

        // Any filter change resets the visible window.
        app.set_sort(SortKey::Name);
        assert_eq!(app.visible_repositories().len(), PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_language_filter_on_loaded_collection() {
        let (mut app, _temp_dir) = seeded_app(vec![
            sample_repo(1, "go-repo", Some("Go"), 0),
            sample_repo(2, "rust-repo", Some("Rust"), 0),
            sample_repo(3, "plain", None, 0),
        ]);
        app.load().await.unwrap();

        app.set_language(LanguageFilter::Only("Go".to_string()));
        assert_eq!(app.matching_count(), 1);
        assert_eq!(app.visible_repositories()[0].name, "go-repo");
    }
}
