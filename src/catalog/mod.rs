pub mod merge;
pub mod store;

use serde::{Deserialize, Serialize};

/// One analyzed audio file, as persisted in the catalog.
///
/// Records are replaced wholesale when a file is reprocessed, never
/// field-patched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Unique key within the catalog.
    pub filename: String,
    /// Relative storage location, derived from the filename.
    pub path: String,
    pub rms_mean: f64,
    pub duration: f64,
    pub stereo_balance: f64,
    pub stereo_movement: f64,
}

/// The persisted collection of per-file records, unique by filename and
/// canonically sorted by filename ascending.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub patterns: Vec<FeatureRecord>,
}

impl Catalog {
    pub fn contains(&self, filename: &str) -> bool {
        self.patterns.iter().any(|p| p.filename == filename)
    }

    pub fn sort_by_filename(&mut self) {
        self.patterns.sort_by(|a, b| a.filename.cmp(&b.filename));
    }
}
