// GitHub API response types.
// Raw shapes as returned by the REST API; normalized by the portfolio module.

use serde::{Deserialize, Serialize};

/// Public profile of a GitHub user, as returned by `/users/{username}`.
///
/// Timestamps and optional fields are kept raw here; normalization applies
/// fallbacks and parsing so downstream consumers never branch on absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    pub avatar_url: Option<String>,
    pub html_url: String,
    pub blog: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub twitter_username: Option<String>,
}

/// A repository as returned by `/users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub html_url: String,
    pub homepage: Option<String>,
    // Kept as strings; unparsable timestamps must degrade, not fail the fetch.
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub private: bool,
}
