use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resona", about = "Acoustic feature cataloger for audio libraries")]
pub struct Cli {
    /// Directory containing the audio library
    #[arg(long)]
    pub audio_dir: Option<PathBuf>,

    /// Catalog file holding the per-file feature records
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Reanalyze every file, not only the ones missing from the catalog
    #[arg(long)]
    pub all: bool,

    /// Accepted for compatibility; analysis always runs sequentially
    #[arg(long)]
    pub parallel: bool,

    /// Serve the library over HTTP instead of scanning
    #[arg(long)]
    pub serve: bool,

    /// HTTP port for --serve
    #[arg(long)]
    pub port: Option<u16>,

    /// Config file path (default: resona.toml, then per-user config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
