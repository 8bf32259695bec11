use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            catalog: default_catalog(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_audio_dir() -> PathBuf { "audio_files".into() }
fn default_catalog() -> PathBuf { "pattern_metadata.json".into() }
fn default_port() -> u16 { 8000 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.library.audio_dir, PathBuf::from("audio_files"));
        assert_eq!(config.library.catalog, PathBuf::from("pattern_metadata.json"));
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [library]
            audio_dir = "loops"

            [server]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.library.audio_dir, PathBuf::from("loops"));
        assert_eq!(config.library.catalog, PathBuf::from("pattern_metadata.json"));
        assert_eq!(config.server.port, 9000);
    }
}
