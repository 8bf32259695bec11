use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::audio::{analysis, decode};
use crate::catalog::merge::{merge, MergeMode};
use crate::catalog::{store, FeatureRecord};
use crate::library;

/// Run one catalog update: discover files, extract features for the
/// selected set, merge, persist.
///
/// Per-file failures are logged and counted but never abort the run; only
/// a failure to persist the updated catalog is fatal.
pub fn run(audio_dir: &Path, catalog_path: &Path, force_all: bool) -> Result<()> {
    if !audio_dir.exists() {
        log::error!("Audio directory {} not found", audio_dir.display());
        return Ok(());
    }

    let existing = store::load(catalog_path);

    let audio_files = library::list_audio_files(audio_dir)?;
    log::info!("Found {} audio files", audio_files.len());

    if audio_files.is_empty() {
        log::error!("No audio files found in {}", audio_dir.display());
        return Ok(());
    }

    let mode = if force_all {
        MergeMode::ForceAll
    } else {
        MergeMode::MissingOnly
    };

    let selected: Vec<&Path> = match mode {
        MergeMode::ForceAll => {
            log::info!("Reprocessing ALL {} files", audio_files.len());
            audio_files.iter().map(PathBuf::as_path).collect()
        }
        MergeMode::MissingOnly => {
            let missing: Vec<&Path> = audio_files
                .iter()
                .map(PathBuf::as_path)
                .filter(|path| !existing.contains(&file_name(path)))
                .collect();
            log::info!(
                "Processing {} missing files (out of {} total)",
                missing.len(),
                audio_files.len()
            );
            missing
        }
    };

    if selected.is_empty() {
        log::info!("Catalog already up to date; nothing to process");
        return Ok(());
    }

    let pb = ProgressBar::new(selected.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut fresh: Vec<FeatureRecord> = Vec::new();
    let mut errors = 0usize;

    for path in &selected {
        let filename = file_name(path);
        match extract_record(path, &filename, audio_dir) {
            Ok(record) => {
                log::debug!(
                    "{}: RMS={:.6}, Duration={:.2}s, Balance={:.4}, Movement={:.4}",
                    filename,
                    record.rms_mean,
                    record.duration,
                    record.stereo_balance,
                    record.stereo_movement
                );
                fresh.push(record);
            }
            Err(err) => {
                log::error!("Failed to process {}: {:#}", filename, err);
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    log::info!("Processed {} files successfully", fresh.len());
    if errors > 0 {
        log::warn!("Encountered {} errors", errors);
    }

    let updated = merge(existing, fresh, mode);
    store::save(catalog_path, &updated)?;
    log::info!("Catalog now holds {} records", updated.patterns.len());

    Ok(())
}

fn extract_record(path: &Path, filename: &str, audio_dir: &Path) -> Result<FeatureRecord> {
    let audio = decode::decode_audio(path)?;
    let features = analysis::analyze(&audio)?;

    Ok(FeatureRecord {
        filename: filename.to_string(),
        path: format!("{}/{}", audio_dir.display(), filename),
        rms_mean: features.rms_mean,
        duration: features.duration,
        stereo_balance: features.stereo_balance,
        stereo_movement: features.stereo_movement,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
