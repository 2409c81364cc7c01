//! Project discovery
//!
//! A project is an immediate subdirectory of the projects folder that
//! contains a recognized compose file. Discovery is recomputed on every
//! invocation so the filesystem is always the source of truth.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Recognized compose filenames, in precedence order.
pub const COMPOSE_FILENAMES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Discover projects that contain a valid compose file.
///
/// Scans the immediate children of `root` and maps each project directory
/// to the first matching compose filename. Entries are keyed by directory
/// name, so iteration order is lexicographic. A missing root yields an
/// empty map rather than an error.
pub fn discover_projects(root: &Path) -> BTreeMap<String, PathBuf> {
    let mut projects = BTreeMap::new();

    let Ok(entries) = fs::read_dir(root) else {
        return projects;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        for filename in COMPOSE_FILENAMES {
            let candidate = path.join(filename);
            if candidate.is_file() {
                projects.insert(entry.file_name().to_string_lossy().to_string(), candidate);
                break;
            }
        }
    }

    projects
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_discover_mixed_tree() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        fs::write(root.path().join("a/compose.yaml"), "services: {}\n").unwrap();
        fs::create_dir(root.path().join("b")).unwrap();
        fs::write(root.path().join("b/docker-compose.yml"), "services: {}\n").unwrap();
        fs::create_dir(root.path().join("c")).unwrap();
        fs::write(root.path().join("c/readme.txt"), "not a project\n").unwrap();
        fs::write(root.path().join("stray.yaml"), "services: {}\n").unwrap();

        let projects = discover_projects(root.path());

        assert_eq!(projects.len(), 2);
        assert_eq!(projects["a"], root.path().join("a/compose.yaml"));
        assert_eq!(projects["b"], root.path().join("b/docker-compose.yml"));
        assert!(!projects.contains_key("c"));
        assert!(!projects.contains_key("stray.yaml"));
    }

    #[test]
    fn test_discover_filename_precedence() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("app")).unwrap();
        fs::write(root.path().join("app/docker-compose.yml"), "").unwrap();
        fs::write(root.path().join("app/compose.yaml"), "").unwrap();

        let projects = discover_projects(root.path());

        assert_eq!(projects["app"], root.path().join("app/compose.yaml"));
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("does-not-exist");

        assert!(discover_projects(&gone).is_empty());
    }

    #[test]
    fn test_discover_orders_lexicographically() {
        let root = TempDir::new().unwrap();
        for name in ["zebra", "alpha", "mango"] {
            fs::create_dir(root.path().join(name)).unwrap();
            fs::write(root.path().join(name).join("compose.yml"), "").unwrap();
        }

        let projects = discover_projects(root.path());
        let names: Vec<&String> = projects.keys().collect();

        assert_eq!(names, ["alpha", "mango", "zebra"]);
    }
}
