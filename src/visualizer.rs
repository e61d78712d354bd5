//! Runs a dream through prompt building, generation and saving.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::CliOptions;
use crate::error::DreamError;
use crate::generator::{ImageSource, PollinationsClient};
use crate::imaging::decode_image;
use crate::input::DreamInput;
use crate::progress::{Stage, report};
use crate::prompt::build_prompt;

/// Generates and saves one image for the dream, returning where it landed.
pub fn visualize(
    input: &DreamInput,
    source: &impl ImageSource,
    output_dir: &Path,
) -> Result<PathBuf, DreamError> {
    report(Stage::Generating, "Using Pollinations.ai (free, no API key needed)...");
    let prompt = build_prompt(input);
    report(Stage::Prompt, &prompt);

    let bytes = source.fetch(&prompt)?;
    let image = decode_image(&bytes)?;
    report(Stage::Generated, "Free AI image completed");
    info!("Decoded {}x{} image", image.width(), image.height());

    crate::saver::save_image(&image, output_dir)
}

/// Resolves the CLI input and runs it against the configured image service.
pub fn run(cli: &CliOptions) -> Result<PathBuf, DreamError> {
    let input = DreamInput::from_cli(cli)?;
    let client = PollinationsClient::new(&cli.base_url)?;

    report(
        Stage::Starting,
        "FREE AI dream visualization (no API key required)",
    );
    visualize(&input, &client, &cli.output_dir)
}
