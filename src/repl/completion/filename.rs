//! File name completion inside string literals

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::FilenameCompleter;

/// Completes paths against the local file system
#[derive(Debug, Clone, Default)]
pub struct PathCompleter {
    /// List dot files even when the prefix does not start with `.`
    show_hidden: bool,
}

impl PathCompleter {
    pub fn new(show_hidden: bool) -> Self {
        Self { show_hidden }
    }

    /// Directory to list for the directory part of the typed text
    fn resolve_dir(dir: &str) -> Option<PathBuf> {
        if dir.is_empty() {
            return Some(PathBuf::from("."));
        }
        if dir == "~/" {
            return dirs::home_dir();
        }
        if let Some(rest) = dir.strip_prefix("~/") {
            return dirs::home_dir().map(|home| home.join(rest));
        }
        Some(PathBuf::from(dir))
    }
}

impl FilenameCompleter for PathCompleter {
    fn complete(&self, text: &str, cursor: usize, candidates: &mut Vec<String>) -> Option<usize> {
        let typed: String = text.chars().take(cursor).collect();

        // a bare `~` means the home directory itself
        let typed = if typed == "~" { "~/".to_string() } else { typed };

        let (dir, file_prefix, offset) = match typed.rfind('/') {
            Some(slash) => (
                &typed[..=slash],
                &typed[slash + 1..],
                typed[..=slash].chars().count(),
            ),
            None => ("", typed.as_str(), 0),
        };

        let path = Self::resolve_dir(dir)?;
        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {}", path.display(), e);
                return None;
            }
        };

        let show_hidden = self.show_hidden || file_prefix.starts_with('.');
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !name.starts_with(file_prefix) || (!show_hidden && name.starts_with('.')) {
                    return None;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                Some(if is_dir { format!("{}/", name) } else { name })
            })
            .collect();

        debug!(dir = %path.display(), file_prefix, matches = names.len(), "Filename completion");

        if names.is_empty() {
            return None;
        }

        names.sort();
        candidates.extend(names);
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("alpha.txt")).unwrap();
        File::create(dir.path().join("alphabet.groovy")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        fs::create_dir(dir.path().join("album")).unwrap();
        dir
    }

    fn root(dir: &TempDir) -> String {
        format!("{}/", dir.path().display())
    }

    #[test]
    fn test_completes_file_prefix() {
        let dir = fixture();
        let text = format!("{}alp", root(&dir));
        let mut candidates = Vec::new();

        let offset = PathCompleter::new(false).complete(&text, text.chars().count(), &mut candidates);

        assert_eq!(offset, Some(root(&dir).chars().count()));
        assert_eq!(candidates, vec!["alpha.txt", "alphabet.groovy"]);
    }

    #[test]
    fn test_directories_get_trailing_slash() {
        let dir = fixture();
        let text = format!("{}al", root(&dir));
        let mut candidates = Vec::new();

        PathCompleter::new(false).complete(&text, text.chars().count(), &mut candidates);

        assert_eq!(candidates, vec!["album/", "alpha.txt", "alphabet.groovy"]);
    }

    #[test]
    fn test_hidden_files() {
        let dir = fixture();
        let text = root(&dir);

        let mut candidates = Vec::new();
        PathCompleter::new(false).complete(&text, text.chars().count(), &mut candidates);
        assert!(!candidates.contains(&".hidden".to_string()));
        assert_eq!(candidates.len(), 3);

        let mut candidates = Vec::new();
        PathCompleter::new(true).complete(&text, text.chars().count(), &mut candidates);
        assert!(candidates.contains(&".hidden".to_string()));

        let dotted = format!("{}.h", root(&dir));
        let mut candidates = Vec::new();
        PathCompleter::new(false).complete(&dotted, dotted.chars().count(), &mut candidates);
        assert_eq!(candidates, vec![".hidden"]);
    }

    #[test]
    fn test_cursor_limits_text() {
        let dir = fixture();
        let text = format!("{}albXXX", root(&dir));
        let cursor = root(&dir).chars().count() + 3;
        let mut candidates = Vec::new();

        PathCompleter::new(false).complete(&text, cursor, &mut candidates);

        assert_eq!(candidates, vec!["album/"]);
    }

    #[test]
    fn test_no_match_or_missing_dir() {
        let dir = fixture();
        let text = format!("{}zzz", root(&dir));
        let mut candidates = Vec::new();
        assert_eq!(
            PathCompleter::new(false).complete(&text, text.chars().count(), &mut candidates),
            None
        );

        let text = format!("{}missing/", root(&dir));
        assert_eq!(
            PathCompleter::new(false).complete(&text, text.chars().count(), &mut candidates),
            None
        );
        assert!(candidates.is_empty());
    }
}
