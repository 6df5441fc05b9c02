// Normalized portfolio data model.
// Stable internal shapes derived from the raw API payloads; optional API
// fields are resolved here so consumers never branch on absence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable profile snapshot, replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub username: String,
    /// Professional title derived from the bio.
    pub title: String,
    pub bio: String,
    pub location: String,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub avatar_url: Option<String>,
    pub html_url: String,
    pub blog: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub twitter_username: Option<String>,
}

/// A public repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub html_url: String,
    pub homepage: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
    pub private: bool,
}

/// Aggregate statistics over the repository collection. Derived in a single
/// pass during normalization; recomputed, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages: BTreeMap<String, usize>,
}

impl Statistics {
    /// Language/count pairs sorted descending by count, ties alphabetical.
    /// Drives the language filter menu.
    pub fn languages_by_count(&self) -> Vec<(&str, usize)> {
        let mut pairs: Vec<(&str, usize)> = self
            .languages
            .iter()
            .map(|(language, count)| (language.as_str(), *count))
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

/// The complete normalized portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
    pub statistics: Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_by_count_sorts_descending() {
        let mut languages = BTreeMap::new();
        languages.insert("Rust".to_string(), 2);
        languages.insert("Go".to_string(), 5);
        languages.insert("C".to_string(), 2);

        let stats = Statistics {
            languages,
            ..Default::default()
        };

        let ranked = stats.languages_by_count();
        assert_eq!(ranked[0], ("Go", 5));
        // Ties keep alphabetical order from the map.
        assert_eq!(ranked[1], ("C", 2));
        assert_eq!(ranked[2], ("Rust", 2));
    }
}
