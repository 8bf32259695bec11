use super::{Catalog, FeatureRecord};

/// How freshly computed records are combined with the existing catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeMode {
    /// Append records whose filename is not yet cataloged; keep everything
    /// else untouched.
    MissingOnly,
    /// Replace cataloged records by filename, insert the rest. Entries for
    /// files that have disappeared from disk are retained; the merger
    /// never deletes.
    ForceAll,
}

/// Merge fresh records into a catalog. Pure: no I/O, no logging. Both
/// modes end with the catalog sorted by filename.
pub fn merge(existing: Catalog, fresh: Vec<FeatureRecord>, mode: MergeMode) -> Catalog {
    let mut catalog = existing;

    match mode {
        MergeMode::MissingOnly => {
            for record in fresh {
                if !catalog.contains(&record.filename) {
                    catalog.patterns.push(record);
                }
            }
        }
        MergeMode::ForceAll => {
            for record in fresh {
                match catalog
                    .patterns
                    .iter_mut()
                    .find(|p| p.filename == record.filename)
                {
                    Some(existing) => *existing = record,
                    None => catalog.patterns.push(record),
                }
            }
        }
    }

    catalog.sort_by_filename();
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, rms: f64) -> FeatureRecord {
        FeatureRecord {
            filename: filename.to_string(),
            path: format!("audio_files/{filename}"),
            rms_mean: rms,
            duration: 1.0,
            stereo_balance: 0.0,
            stereo_movement: 0.0,
        }
    }

    fn catalog(records: Vec<FeatureRecord>) -> Catalog {
        Catalog { patterns: records }
    }

    #[test]
    fn missing_only_fills_gaps_and_sorts() {
        let existing = catalog(vec![record("a.wav", 0.1), record("b.wav", 0.2)]);
        let fresh = vec![record("c.wav", 0.3), record("b.wav", 0.9)];

        let merged = merge(existing, fresh, MergeMode::MissingOnly);

        let names: Vec<&str> = merged.patterns.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, ["a.wav", "b.wav", "c.wav"]);
        // b.wav keeps its original record; only c.wav is new.
        assert_eq!(merged.patterns[1].rms_mean, 0.2);
        assert_eq!(merged.patterns[2].rms_mean, 0.3);
    }

    #[test]
    fn missing_only_is_idempotent() {
        let existing = catalog(vec![record("a.wav", 0.1)]);
        let fresh = vec![record("b.wav", 0.2)];

        let once = merge(existing, fresh.clone(), MergeMode::MissingOnly);
        let twice = merge(once.clone(), fresh, MergeMode::MissingOnly);
        assert_eq!(once, twice);
    }

    #[test]
    fn force_all_replaces_and_inserts() {
        let existing = catalog(vec![record("a.wav", 0.1), record("b.wav", 0.2)]);
        let fresh = vec![record("b.wav", 0.9), record("c.wav", 0.3)];

        let merged = merge(existing, fresh, MergeMode::ForceAll);

        let names: Vec<&str> = merged.patterns.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, ["a.wav", "b.wav", "c.wav"]);
        // a.wav untouched, b.wav recomputed, c.wav inserted.
        assert_eq!(merged.patterns[0].rms_mean, 0.1);
        assert_eq!(merged.patterns[1].rms_mean, 0.9);
        assert_eq!(merged.patterns[2].rms_mean, 0.3);
    }

    #[test]
    fn force_all_retains_stale_entries() {
        // "gone.wav" is no longer on disk, so no fresh record exists for
        // it; the merger must keep it anyway.
        let existing = catalog(vec![record("gone.wav", 0.5)]);
        let fresh = vec![record("new.wav", 0.4)];

        let merged = merge(existing, fresh, MergeMode::ForceAll);
        assert!(merged.contains("gone.wav"));
        assert!(merged.contains("new.wav"));
    }

    #[test]
    fn empty_fresh_set_only_sorts() {
        let existing = catalog(vec![record("b.wav", 0.2), record("a.wav", 0.1)]);
        let merged = merge(existing, Vec::new(), MergeMode::MissingOnly);
        let names: Vec<&str> = merged.patterns.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, ["a.wav", "b.wav"]);
    }
}
