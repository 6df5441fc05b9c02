//! folio — client for a GitHub user's public portfolio.
//!
//! Fetches a profile and repository list with retry, timeout, and
//! rate-limit-aware backoff, caches the raw payload with a staleness policy,
//! normalizes it into a stable internal shape, and exposes a pure
//! filter/sort/paginate pipeline over the repository collection.

pub mod about;
pub mod app;
pub mod cache;
pub mod error;
pub mod github;
pub mod portfolio;
pub mod state;

pub use app::PortfolioApp;
pub use error::{FolioError, Result};
