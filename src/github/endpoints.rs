// GitHub API endpoint functions.
// Typed methods over the retry-aware client for the portfolio data sources.

use tracing::debug;

use crate::error::Result;

use super::client::{CancelToken, GITHUB_API_BASE, GitHubClient, RAW_CONTENT_BASE};
use super::types::{RawRepo, RawUser};

/// Server-side page size for the repository list. A single page; users with
/// more public repositories than this see a truncated collection.
pub const REPOS_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Get a user's public profile.
    pub async fn get_user(&self, username: &str, cancel: &CancelToken) -> Result<RawUser> {
        let url = format!("{}/users/{}", GITHUB_API_BASE, username);
        let response = self.fetch_with_retry(&url, cancel).await?;
        let body = response.text().await?;
        let user: RawUser = serde_json::from_str(&body)?;
        Ok(user)
    }

    /// Get a user's public repositories, server-sorted by update recency.
    pub async fn get_user_repos(&self, username: &str, cancel: &CancelToken) -> Result<Vec<RawRepo>> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&direction=desc&per_page={}",
            GITHUB_API_BASE, username, REPOS_PER_PAGE
        );
        let response = self.fetch_with_retry(&url, cancel).await?;
        let body = response.text().await?;
        let repos: Vec<RawRepo> = serde_json::from_str(&body)?;
        debug!(username, count = repos.len(), "fetched repository list");
        Ok(repos)
    }

    /// Get the raw README from the user's profile repository
    /// (`{username}/{username}`), used to populate the about section.
    pub async fn get_profile_readme(&self, username: &str, cancel: &CancelToken) -> Result<String> {
        let url = format!(
            "{}/{}/{}/refs/heads/main/README.md",
            RAW_CONTENT_BASE, username, username
        );
        let response = self.fetch_with_retry(&url, cancel).await?;
        Ok(response.text().await?)
    }
}
