// Data normalizer.
// Maps raw API payloads into the internal model: drops private repositories,
// applies fallbacks, parses timestamps, and derives aggregate statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::github::{RawRepo, RawUser};

use super::types::{Portfolio, Profile, Repository, Statistics};

pub const DEFAULT_TITLE: &str = "Developer";
const DEFAULT_BIO: &str = "Developer passionate about technology";
const DEFAULT_LOCATION: &str = "Unknown";

/// Role keywords that mark a bio as carrying a professional title.
/// Order-independent: any hit enables extraction.
const ROLE_KEYWORDS: &[&str] = &[
    "desenvolvedor",
    "developer",
    "engineer",
    "engenheiro",
    "programador",
    "programmer",
    "fullstack",
    "frontend",
    "backend",
];

/// Words collected, in bio order, to assemble the title.
const TITLE_WORDS: &[&str] = &[
    "full",
    "front",
    "back",
    "software",
    "senior",
    "junior",
    "pleno",
    "desenvolvedor",
    "developer",
    "engineer",
    "engenheiro",
    "fullstack",
    "frontend",
    "backend",
];

/// Build a portfolio from the raw user and repository payloads.
///
/// Private repositories are excluded from both the collection and the
/// aggregates; totals and per-language counts are accumulated in the same
/// pass that normalizes each repository.
pub fn normalize(user: &RawUser, repos: &[RawRepo]) -> Portfolio {
    let mut total_stars = 0u64;
    let mut total_forks = 0u64;
    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    let mut repositories = Vec::with_capacity(repos.len());

    for repo in repos {
        if repo.private {
            continue;
        }

        total_stars += repo.stargazers_count;
        total_forks += repo.forks_count;
        if let Some(language) = &repo.language {
            *languages.entry(language.clone()).or_insert(0) += 1;
        }

        repositories.push(Repository {
            id: repo.id,
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            html_url: repo.html_url.clone(),
            homepage: non_empty(repo.homepage.as_deref()),
            updated_at: parse_timestamp(repo.updated_at.as_deref()),
            created_at: parse_timestamp(repo.created_at.as_deref()),
            topics: repo.topics.clone(),
            private: repo.private,
        });
    }

    let statistics = Statistics {
        total_repos: repositories.len(),
        total_stars,
        total_forks,
        languages,
    };

    let profile = Profile {
        name: user.name.clone().unwrap_or_else(|| user.login.clone()),
        username: user.login.clone(),
        title: extract_title(user.bio.as_deref()),
        bio: user
            .bio
            .clone()
            .unwrap_or_else(|| DEFAULT_BIO.to_string()),
        location: user
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        followers: user.followers,
        following: user.following,
        public_repos: user.public_repos,
        avatar_url: user.avatar_url.clone(),
        html_url: user.html_url.clone(),
        blog: non_empty(user.blog.as_deref()),
        company: user.company.clone(),
        email: user.email.clone(),
        twitter_username: user.twitter_username.clone(),
    };

    Portfolio {
        profile,
        repositories,
        statistics,
    }
}

/// Extract a professional title from a bio.
///
/// When any role keyword appears, the bio's title words are collected in
/// their original order and joined; otherwise the fixed fallback applies.
pub fn extract_title(bio: Option<&str>) -> String {
    let Some(bio) = bio else {
        return DEFAULT_TITLE.to_string();
    };

    let lowered = bio.to_lowercase();
    if !ROLE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        return DEFAULT_TITLE.to_string();
    }

    let words: Vec<&str> = bio
        .split_whitespace()
        .filter(|word| TITLE_WORDS.contains(&word.to_lowercase().as_str()))
        .collect();

    if words.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        words.join(" ")
    }
}

/// Find a LinkedIn profile URL in a bio, normalizing a missing scheme.
pub fn extract_profile_link(bio: Option<&str>) -> Option<String> {
    const SITE: &str = "linkedin.com/in/";

    let bio = bio?;
    let site = bio.find(SITE)?;

    let slug = &bio[site + SITE.len()..];
    let slug_len = slug
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .count();
    if slug_len == 0 {
        return None;
    }

    let mut start = site;
    if bio[..start].ends_with("www.") {
        start -= "www.".len();
    }
    for scheme in ["https://", "http://"] {
        if bio[..start].ends_with(scheme) {
            start -= scheme.len();
            break;
        }
    }

    let url = &bio[start..site + SITE.len() + slug_len];
    if url.starts_with("http") {
        Some(url.to_string())
    } else {
        Some(format!("https://{}", url))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value?)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
