// GitHub API module.
// Provides the retry-aware client and raw response types.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ATTEMPT_TIMEOUT, CancelHandle, CancelToken, GitHubClient, MAX_ATTEMPTS};
pub use endpoints::REPOS_PER_PAGE;
pub use types::{RawRepo, RawUser};
