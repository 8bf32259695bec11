use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Audio container formats the cataloger and the listing endpoint accept,
/// matched case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["flac", "m4a", "mp3", "ogg", "wav"];

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List the audio files in a directory, sorted by filename.
pub fn list_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read audio directory {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio_file(path))
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_extensions_case_insensitively() {
        assert!(is_audio_file(Path::new("loop.wav")));
        assert!(is_audio_file(Path::new("loop.MP3")));
        assert!(is_audio_file(Path::new("loop.Flac")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("noextension")));
    }

    #[test]
    fn lists_only_audio_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.wav", "a.mp3", "c.OGG", "readme.md"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.wav")).unwrap();

        let files = list_audio_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.mp3", "b.wav", "c.OGG"]);
    }
}
