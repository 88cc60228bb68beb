//! Search-path resolution of import names
use super::error::{ImportError, ImportResult};
use crate::config::compile_time::imports::SOURCE_EXTENSION;
use crate::config::runtime::{env_vars, split_search_path, ImportPreferences};
use std::path::{Path, PathBuf};

/// A located import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub path: PathBuf,
    /// The name was written with the source extension, which is redundant
    pub redundant_extension: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    search_path: Vec<PathBuf>,
    include_path: Vec<PathBuf>,
}

impl ImportResolver {
    /// Configured directories first, then `G_INCLUDE` when enabled
    pub fn new(preferences: &ImportPreferences) -> Self {
        let include_path = if preferences.use_include_env {
            std::env::var(env_vars::INCLUDE)
                .map(|raw| split_search_path(&raw))
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        Self::with_paths(preferences.search_path.clone(), include_path)
    }

    pub fn with_paths(search_path: Vec<PathBuf>, include_path: Vec<PathBuf>) -> Self {
        Self {
            search_path,
            include_path,
        }
    }

    /// Directories in search order
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.search_path
            .iter()
            .chain(self.include_path.iter())
            .map(PathBuf::as_path)
    }

    /// File name searched for: the import name with the source extension
    pub fn file_name(name: &str) -> (String, bool) {
        let suffix = format!(".{}", SOURCE_EXTENSION);
        if name.ends_with(&suffix) {
            (name.to_string(), true)
        } else {
            (format!("{}{}", name, suffix), false)
        }
    }

    pub fn resolve(&self, name: &str) -> ImportResult<ResolvedImport> {
        if name.is_empty() || name.contains('\0') {
            return Err(ImportError::invalid_name(name));
        }

        let (file_name, redundant_extension) = Self::file_name(name);
        let mut searched = Vec::new();
        for dir in self.directories() {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                log_debug!("Import resolved",
                    "name" => name,
                    "path" => candidate.display()
                );
                return Ok(ResolvedImport {
                    path: candidate,
                    redundant_extension,
                });
            }
            searched.push(candidate);
        }

        Err(ImportError::NotFound {
            name: name.to_string(),
            searched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;

    #[test]
    fn test_extension_is_added() {
        assert_eq!(
            ImportResolver::file_name("shapes"),
            ("shapes.g".to_string(), false)
        );
        assert_eq!(
            ImportResolver::file_name("shapes.g"),
            ("shapes.g".to_string(), true)
        );
        assert_eq!(
            ImportResolver::file_name("lib.txt"),
            ("lib.txt.g".to_string(), false)
        );
    }

    #[test]
    fn test_first_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("util.g"), "").unwrap();
        fs::write(first.path().join("util.g"), "").unwrap();

        let resolver = ImportResolver::with_paths(
            vec![first.path().to_path_buf()],
            vec![second.path().to_path_buf()],
        );
        let found = resolver.resolve("util").unwrap();
        assert_eq!(found.path, first.path().join("util.g"));
        assert!(!found.redundant_extension);
    }

    #[test]
    fn test_include_path_searched_last() {
        let empty = tempfile::tempdir().unwrap();
        let include = tempfile::tempdir().unwrap();
        fs::write(include.path().join("base.g"), "class Base {}").unwrap();

        let resolver = ImportResolver::with_paths(
            vec![empty.path().to_path_buf()],
            vec![include.path().to_path_buf()],
        );
        let found = resolver.resolve("base.g").unwrap();
        assert_eq!(found.path, include.path().join("base.g"));
        assert!(found.redundant_extension);
    }

    #[test]
    fn test_not_found_lists_locations() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = ImportResolver::with_paths(vec![dir.path().to_path_buf()], vec![]);
        assert_matches!(
            resolver.resolve("missing"),
            Err(ImportError::NotFound { searched, .. }) if searched == vec![dir.path().join("missing.g")]
        );
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pkg.g")).unwrap();
        let resolver = ImportResolver::with_paths(vec![dir.path().to_path_buf()], vec![]);
        assert!(resolver.resolve("pkg").is_err());
    }

    #[test]
    fn test_invalid_names() {
        let resolver = ImportResolver::default();
        assert_matches!(resolver.resolve(""), Err(ImportError::InvalidName { .. }));
        assert_matches!(resolver.resolve("a\0b"), Err(ImportError::InvalidName { .. }));
    }
}
