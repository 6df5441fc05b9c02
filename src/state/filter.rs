// Filter, sort, and pagination over the repository collection.
// apply() is pure; FilterState holds the transient view selection and the
// pagination cursor, which resets whenever the selection changes.

use chrono::{DateTime, Utc};

use crate::portfolio::Repository;

/// Number of repositories surfaced per pagination step.
pub const PAGE_SIZE: usize = 12;

/// Sort key with a total ordering per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending update recency; missing timestamps sort last.
    #[default]
    Updated,
    /// Descending star count, stable ties.
    Stars,
    /// Ascending case-insensitive name.
    Name,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "updated" => Some(SortKey::Updated),
            "stars" => Some(SortKey::Stars),
            "name" => Some(SortKey::Name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Updated => "updated",
            SortKey::Stars => "stars",
            SortKey::Name => "name",
        }
    }
}

/// Language selection: everything, or one exact language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(String),
}

/// Transient filter state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    query: String,
    language: LanguageFilter,
    sort: SortKey,
    page: usize,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn language(&self) -> &LanguageFilter {
        &self.language
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the free-text query. Resets pagination.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.page = 0;
    }

    /// Clear the free-text query. Resets pagination.
    pub fn clear_search(&mut self) {
        self.query.clear();
        self.page = 0;
    }

    /// Set the language filter. Resets pagination.
    pub fn set_language(&mut self, language: LanguageFilter) {
        self.language = language;
        self.page = 0;
    }

    /// Set the sort key. Resets pagination.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 0;
    }

    /// Surface one more page. The only mutation that grows the visible set.
    pub fn load_more(&mut self) {
        self.page += 1;
    }

    /// How many leading elements of the filtered collection are visible.
    pub fn visible_count(&self) -> usize {
        PAGE_SIZE * (self.page + 1)
    }

    /// Leading visible slice of an already filtered and sorted collection.
    pub fn visible_slice<'a>(&self, filtered: &'a [Repository]) -> &'a [Repository] {
        &filtered[..filtered.len().min(self.visible_count())]
    }

    /// Whether a repository passes both predicates. Pure boolean
    /// composition; evaluation order does not affect the result.
    pub fn matches(&self, repo: &Repository) -> bool {
        self.matches_query(repo) && self.matches_language(repo)
    }

    fn matches_query(&self, repo: &Repository) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        repo.name.to_lowercase().contains(&needle)
            || repo
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || repo.topics.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    fn matches_language(&self, repo: &Repository) -> bool {
        match &self.language {
            LanguageFilter::All => true,
            LanguageFilter::Only(language) => repo.language.as_deref() == Some(language.as_str()),
        }
    }
}

/// Filter and sort a collection. Pure: same inputs, same output.
pub fn apply(repos: &[Repository], filter: &FilterState) -> Vec<Repository> {
    let mut matched: Vec<Repository> = repos
        .iter()
        .filter(|repo| filter.matches(repo))
        .cloned()
        .collect();
    sort_repositories(&mut matched, filter.sort);
    matched
}

/// Sort in place by the given key. `sort_by` is stable, so ties keep their
/// relative order.
pub fn sort_repositories(repos: &mut [Repository], key: SortKey) {
    match key {
        SortKey::Stars => repos.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortKey::Name => {
            repos.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::Updated => {
            repos.sort_by(|a, b| update_key(b).cmp(&update_key(a)))
        }
    }
}

fn update_key(repo: &Repository) -> DateTime<Utc> {
    repo.updated_at.unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repo(name: &str, language: Option<&str>, stars: u64, updated: Option<&str>) -> Repository {
        Repository {
            id: 0,
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            stars,
            forks: 0,
            html_url: format!("https://github.com/octocat/{}", name),
            homepage: None,
            updated_at: updated.map(|s| {
                chrono::DateTime::parse_from_rfc3339(s)
                    .unwrap()
                    .with_timezone(&Utc)
            }),
            created_at: None,
            topics: vec![],
            private: false,
        }
    }

    #[test]
    fn test_query_matches_name_substring() {
        let repos = vec![repo("portfolio-app", None, 0, None), repo("other", None, 0, None)];
        let mut filter = FilterState::new();
        filter.set_query("port");

        let result = apply(&repos, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "portfolio-app");
    }

    #[test]
    fn test_query_matches_description_and_topics() {
        let mut with_desc = repo("a", None, 0, None);
        with_desc.description = Some("A Tiny Parser".to_string());
        let mut with_topic = repo("b", None, 0, None);
        with_topic.topics = vec!["parsing".to_string()];
        let neither = repo("c", None, 0, None);

        let repos = vec![with_desc, with_topic, neither];
        let mut filter = FilterState::new();
        filter.set_query("pars");

        let names: Vec<String> = apply(&repos, &filter).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_language_filter_exact_match() {
        let repos = vec![
            repo("go-repo", Some("Go"), 0, None),
            repo("rust-repo", Some("Rust"), 0, None),
            repo("none-repo", None, 0, None),
        ];
        let mut filter = FilterState::new();
        filter.set_language(LanguageFilter::Only("Go".to_string()));

        let result = apply(&repos, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "go-repo");
    }

    #[test]
    fn test_language_filter_is_case_sensitive() {
        let repos = vec![repo("go-repo", Some("Go"), 0, None)];
        let mut filter = FilterState::new();
        filter.set_language(LanguageFilter::Only("go".to_string()));

        assert!(apply(&repos, &filter).is_empty());
    }

    #[test]
    fn test_stars_sort_non_increasing() {
        let repos = vec![
            repo("a", None, 1, None),
            repo("b", None, 9, None),
            repo("c", None, 4, None),
        ];
        let mut filter = FilterState::new();
        filter.set_sort(SortKey::Stars);

        let sorted = apply(&repos, &filter);
        let stars: Vec<u64> = sorted.iter().map(|r| r.stars).collect();
        assert!(stars.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_name_sort_ascending_case_insensitive() {
        let repos = vec![
            repo("banana", None, 0, None),
            repo("Apple", None, 0, None),
            repo("cherry", None, 0, None),
        ];
        let mut filter = FilterState::new();
        filter.set_sort(SortKey::Name);

        let names: Vec<String> = apply(&repos, &filter).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_updated_sort_missing_timestamps_last() {
        let repos = vec![
            repo("no-date", None, 0, None),
            repo("old", None, 0, Some("2020-01-01T00:00:00Z")),
            repo("new", None, 0, Some("2025-09-18T10:00:00Z")),
        ];
        let mut filter = FilterState::new();
        filter.set_sort(SortKey::Updated);

        let names: Vec<String> = apply(&repos, &filter).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["new", "old", "no-date"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let repos = vec![
            repo("portfolio-app", Some("Rust"), 3, Some("2025-01-01T00:00:00Z")),
            repo("other", Some("Go"), 8, None),
        ];
        let mut filter = FilterState::new();
        filter.set_query("o");
        filter.set_sort(SortKey::Stars);

        let first = apply(&repos, &filter);
        let second = apply(&repos, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pagination_grows_and_resets() {
        let repos: Vec<Repository> = (0..30)
            .map(|i| repo(&format!("repo-{:02}", i), None, 0, None))
            .collect();
        let mut filter = FilterState::new();

        let filtered = apply(&repos, &filter);
        assert_eq!(filter.visible_slice(&filtered).len(), PAGE_SIZE);

        filter.load_more();
        assert_eq!(filter.visible_slice(&filtered).len(), PAGE_SIZE * 2);

        filter.load_more();
        // Never exceeds the collection.
        assert_eq!(filter.visible_slice(&filtered).len(), 30);

        filter.set_query("repo");
        assert_eq!(filter.page(), 0, "changing the query resets pagination");

        filter.load_more();
        filter.set_sort(SortKey::Name);
        assert_eq!(filter.page(), 0, "changing the sort resets pagination");

        filter.load_more();
        filter.set_language(LanguageFilter::All);
        assert_eq!(filter.page(), 0, "changing the language resets pagination");
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("stars"), Some(SortKey::Stars));
        assert_eq!(SortKey::parse("name"), Some(SortKey::Name));
        assert_eq!(SortKey::parse("updated"), Some(SortKey::Updated));
        assert_eq!(SortKey::parse("bogus"), None);
    }

    #[test]
    fn test_update_key_uses_epoch_for_missing() {
        let r = repo("no-date", None, 0, None);
        assert_eq!(update_key(&r), Utc.timestamp_opt(0, 0).unwrap());
    }
}
