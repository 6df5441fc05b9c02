// Cache path utilities.
// One JSON entry per username under the XDG cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// File name for a username's cache entry.
pub fn entry_file_name(username: &str) -> String {
    format!("{}.json", sanitize_name(username))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("octocat"), "octocat");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("a:b"), "a_b");
    }

    #[test]
    fn test_entry_file_name() {
        assert_eq!(entry_file_name("octocat"), "octocat.json");
        assert_eq!(entry_file_name("weird?name"), "weird_name.json");
    }
}
