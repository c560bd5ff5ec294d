use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ufc_roster_scout::scrapers::{
    BrowserFetcher, FetcherKind, HttpFetcher, PageFetcher, PaginationWalker, ScoutConfig,
};
use ufc_roster_scout::AthleteRecord;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🥊 UFC Roster Scout");
    info!("==================");

    let config = ScoutConfig::from_env().context("Invalid configuration")?;

    let athletes = match config.fetcher {
        FetcherKind::Browser => crawl(BrowserFetcher::new(&config)?, &config).await?,
        FetcherKind::Http => crawl(HttpFetcher::new(&config)?, &config).await?,
    };

    info!("✅ Scraped {} athletes", athletes.len());

    // Save to main JSON file
    let json = serde_json::to_string_pretty(&athletes)?;
    tokio::fs::write(&config.output_path, json)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    info!("💾 Saved all athletes to {}", config.output_path.display());

    // Save each athlete to a separate file
    tokio::fs::create_dir_all(&config.raw_dir).await?;

    for athlete in &athletes {
        let filename = config.raw_dir.join(format!("{}.json", athlete.slug()));
        let athlete_json = serde_json::to_string_pretty(athlete)?;
        tokio::fs::write(&filename, athlete_json).await?;
    }

    info!(
        "💾 Saved {} individual athlete files to {}",
        athletes.len(),
        config.raw_dir.display()
    );

    Ok(())
}

/// Run the walk and collect every emitted record
async fn crawl<F: PageFetcher + 'static>(fetcher: F, config: &ScoutConfig) -> Result<Vec<AthleteRecord>> {
    let walker = PaginationWalker::new(fetcher, config.site_url.clone(), config.workers);
    let (tx, mut rx) = mpsc::channel::<AthleteRecord>(64);

    let collect = async {
        let mut athletes = Vec::new();
        while let Some(athlete) = rx.recv().await {
            info!(name = ?athlete.athlete.name, stats = athlete.stats().len(), "Collected athlete");
            athletes.push(athlete);
        }
        athletes
    };

    let (summary, mut athletes) = tokio::join!(walker.walk(config.listing_url.clone(), tx), collect);
    let summary = summary.context("Crawl failed")?;

    if summary.failed > 0 {
        warn!("{} pages failed, see log above", summary.failed);
    }

    // Output order is not meaningful; sort for stable files
    athletes.sort_by(|a, b| a.athlete.name.cmp(&b.athlete.name));

    Ok(athletes)
}
