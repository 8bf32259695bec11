use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Catalog;

/// Load the persisted catalog. Missing or corrupt state starts an empty
/// catalog; neither is fatal.
pub fn load(path: &Path) -> Catalog {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            log::warn!(
                "Catalog {} not readable ({}); starting with an empty catalog",
                path.display(),
                err
            );
            return Catalog::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!(
                "Failed to parse catalog {}: {}; starting with an empty catalog",
                path.display(),
                err
            );
            Catalog::default()
        }
    }
}

/// Persist the catalog. The previous on-disk state, if any, is copied to a
/// sibling `.backup` file before being overwritten, so an interrupted
/// write never loses it. Failures here propagate: silently dropping newly
/// computed work is the one unacceptable outcome.
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
    if path.exists() {
        let backup = backup_path(path);
        std::fs::copy(path, &backup)
            .with_context(|| format!("Failed to back up catalog to {}", backup.display()))?;
        log::info!("Created backup: {}", backup.display());
    }

    let json = serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write catalog to {}", path.display()))?;

    log::info!("Saved catalog to {}", path.display());
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeatureRecord;

    fn sample_catalog() -> Catalog {
        Catalog {
            patterns: vec![FeatureRecord {
                filename: "kick.wav".to_string(),
                path: "audio_files/kick.wav".to_string(),
                rms_mean: 0.25,
                duration: 2.0,
                stereo_balance: -0.1,
                stereo_movement: 0.05,
            }],
        }
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load(&dir.path().join("nope.json"));
        assert!(catalog.patterns.is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load(&path).patterns.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = sample_catalog();

        save(&path, &catalog).unwrap();
        assert_eq!(load(&path), catalog);
    }

    #[test]
    fn save_backs_up_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        save(&path, &Catalog::default()).unwrap();
        // First save has nothing to back up.
        assert!(!path.with_extension("json.backup").exists());

        save(&path, &sample_catalog()).unwrap();

        let backup = dir.path().join("catalog.json.backup");
        assert!(backup.exists());
        let previous: Catalog = serde_json::from_str(&std::fs::read_to_string(backup).unwrap()).unwrap();
        assert!(previous.patterns.is_empty());
    }
}
