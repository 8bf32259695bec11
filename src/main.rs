mod audio;
mod catalog;
mod cli;
mod config;
mod library;
mod scan;
mod server;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect resona.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("resona.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("resona").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("resona").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let mut cfg = config::Config::default();
    if let Some(ref path) = config_path {
        match config::load_config(path) {
            Some(loaded) => {
                log::info!("Loaded config from {}", path.display());
                cfg = loaded;
            }
            None => log::warn!("Failed to load config from {}", path.display()),
        }
    }

    // CLI flags win over config values
    let audio_dir = cli.audio_dir.unwrap_or(cfg.library.audio_dir);
    let catalog_path = cli.catalog.unwrap_or(cfg.library.catalog);
    let port = cli.port.unwrap_or(cfg.server.port);

    if cli.serve {
        log::info!("resona - serving {}", audio_dir.display());
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(server::run(audio_dir, port));
    }

    if cli.parallel {
        log::warn!("--parallel is accepted but not implemented; analyzing sequentially");
    }

    log::info!("resona - audio library feature cataloger");
    log::info!("Library: {}", audio_dir.display());
    log::info!("Catalog: {}", catalog_path.display());

    scan::run(&audio_dir, &catalog_path, cli.all)
}
