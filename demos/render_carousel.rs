use std::{env, fs};

use anyhow::Context;
use carousel_tools::{markdown::carousel_to_markdown, render_carousel, Carousel, PagePreset};

/// Usage: render_carousel [carousel.json] [output.pdf] [export|publish]
fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info) // Set default level
        .parse_default_env() // Allow RUST_LOG override
        .init();
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "demos/sample_carousel.json".to_string());
    let output = args.next().unwrap_or_else(|| "carousel.pdf".to_string());
    let preset: PagePreset = match args.next() {
        Some(name) => name.parse().map_err(anyhow::Error::msg)?,
        None => PagePreset::Export,
    };

    log::info!("Loading carousel from {}...", input);
    let json_string =
        fs::read_to_string(&input).with_context(|| format!("Failed to read {}", input))?;
    let carousel: Carousel =
        serde_json::from_str(&json_string).context("Failed to deserialize carousel JSON")?;
    log::info!(
        "Carousel '{}' loaded with {} slides (template '{}').",
        carousel.title,
        carousel.slides().len(),
        carousel.template_type
    );
    log::debug!("Outline:\n{}", carousel_to_markdown(&carousel));

    let bytes = render_carousel(&carousel, preset)?;
    fs::write(&output, &bytes).with_context(|| format!("Unable to write {}", output))?;
    log::info!("Wrote {} bytes to {}", bytes.len(), output);
    Ok(())
}
