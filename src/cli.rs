//! CLI parser
use clap::Parser;
use std::path::PathBuf;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dreamviz",
    about = "Generate a dream visualization using a free AI image service (no API key)"
)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "DREAMVIZ_DEBUG")]
    /// Enable debug logging. Env: DREAMVIZ_DEBUG
    pub debug: bool,

    #[clap(long)]
    /// Dream description text, required unless `--param-file` is given.
    pub dream_text: Option<String>,

    #[clap(long)]
    /// JSON object of emotion weights, eg `{"joy": 0.9, "fear": 0.1}`
    pub emotions: Option<String>,

    #[clap(long)]
    /// JSON list of symbol tags, eg `["water", "stairs"]`
    pub symbols: Option<String>,

    #[clap(long)]
    /// JSON parameter file with `dream_text`, `emotions` and `symbols` keys.
    /// Takes precedence over the other input flags.
    pub param_file: Option<PathBuf>,

    #[clap(long, default_value = DEFAULT_OUTPUT_DIR, env = "DREAMVIZ_OUTPUT_DIR")]
    /// Where generated images are written, defaults to `generated_images`.
    /// Env: DREAMVIZ_OUTPUT_DIR
    pub output_dir: PathBuf,

    #[clap(long, default_value = DEFAULT_BASE_URL, env = "DREAMVIZ_BASE_URL")]
    /// Image generation endpoint, the prompt is appended as a path segment.
    /// Env: DREAMVIZ_BASE_URL
    pub base_url: String,
}
