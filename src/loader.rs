use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{LeagueError, Result};
use crate::registry::TeamRegistry;
use crate::team::Team;

/// Load every `*.json` team record found in `dir`.
///
/// Format: `{"Name": "...", "Attack": 0-10, "Midfield": 0-10, "Defense": 0-10, "HomeFactor": 0-10}`
pub fn load_teams(dir: impl AsRef<Path>) -> Result<TeamRegistry> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| io_error(dir, source))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut registry = TeamRegistry::new();
    for path in &paths {
        let team = read_team(path)?;
        debug!("Loaded {}", team);
        registry.insert(team)?;
    }

    info!("Loaded {} teams from {}", registry.len(), dir.display());
    Ok(registry)
}

/// Read a single team record.
pub fn read_team(path: &Path) -> Result<Team> {
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    serde_json::from_str(&raw).map_err(|source| LeagueError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn io_error(path: &Path, source: std::io::Error) -> LeagueError {
    LeagueError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_team(dir: &Path, file: &str, body: &str) {
        let mut f = File::create(dir.join(file)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_team(
            dir.path(),
            "flamengo.json",
            r#"{"Name": "Flamengo", "Attack": 8.5, "Midfield": 8.0, "Defense": 7.0, "HomeFactor": 9.5}"#,
        );
        write_team(
            dir.path(),
            "cuiaba.json",
            r#"{"Name": "Cuiaba", "Attack": 5.0, "Midfield": 5.5, "Defense": 6.0, "HomeFactor": 6.0}"#,
        );
        write_team(dir.path(), "README.txt", "not a team");

        let registry = load_teams(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        let flamengo = registry.get("Flamengo").unwrap();
        assert_eq!(flamengo.attack, 8.5);
        assert_eq!(flamengo.dynamic.morale, 5.0);
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        write_team(dir.path(), "broken.json", r#"{"Name": "Broken", "Attack": "#);

        let err = load_teams(dir.path()).unwrap_err();
        match err {
            LeagueError::Parse { path, .. } => assert!(path.ends_with("broken.json")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_out_of_range_rating() {
        let dir = tempfile::tempdir().unwrap();
        write_team(
            dir.path(),
            "x.json",
            r#"{"Name": "X", "Attack": 12.0, "Midfield": 5.0, "Defense": 5.0, "HomeFactor": 5.0}"#,
        );
        assert!(matches!(
            load_teams(dir.path()).unwrap_err(),
            LeagueError::InvalidRating { .. }
        ));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_teams(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, LeagueError::Io { .. }));
    }
}
