use std::{env, fs};

use anyhow::Context;
use carousel_tools::{
    markdown::default_caption, render_carousel, Carousel, LinkedInClient, LinkedInConfig,
    LinkedInCredentials, PagePreset,
};

/// Usage: publish_carousel <carousel.json> [caption]
///
/// Needs LINKEDIN_ACCESS_TOKEN and LINKEDIN_AUTHOR_URN (a `.env` file works).
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "demos/sample_carousel.json".to_string());
    let json_string =
        fs::read_to_string(&input).with_context(|| format!("Failed to read {}", input))?;
    let carousel: Carousel =
        serde_json::from_str(&json_string).context("Failed to deserialize carousel JSON")?;
    let caption = args.next().unwrap_or_else(|| default_caption(&carousel));

    let credentials = LinkedInCredentials::from_env()?;
    let client = LinkedInClient::new(LinkedInConfig::from_env());
    let document = render_carousel(&carousel, PagePreset::Publish)?;

    let result = client
        .post_document(
            &credentials.access_token,
            &credentials.author_urn,
            &document,
            &carousel.title,
            &caption,
        )
        .await;

    if result.success {
        log::info!(
            "Published: {}",
            result.post_url.as_deref().unwrap_or("(no url)")
        );
        Ok(())
    } else {
        anyhow::bail!(
            "Publish failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        )
    }
}
