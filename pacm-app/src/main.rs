use anyhow::Result;
use clap::Parser;
use pacm_common::observability::{init_logging, LogConfig, LogFormat};
use pacm_config::RefreshConfigLoader;
use pacm_refresh::{FantocciniPortal, TokenFetcher};
use tracing::info;

use cli::Cli;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig {
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;

    // Configuration is validated in full before the browser session starts.
    let mut loader = RefreshConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if cli.headed {
        loader = loader.with_override("webdriver.headless", false)?;
    }
    if let Some(url) = &cli.webdriver_url {
        loader = loader.with_override("webdriver.url", url.as_str())?;
    }
    if let Some(outfile) = &cli.outfile {
        loader = loader.with_override("outfile", outfile.display().to_string())?;
    }
    if let Some(speed) = cli.speed {
        loader = loader.with_override("webdriver.speed", speed)?;
    }
    let cfg = loader.load()?;

    info!(
        target: "refresh",
        user = %cfg.credentials.user,
        outfile = %cfg.outfile.display(),
        "starting token refresh"
    );

    let portal = FantocciniPortal::new(cfg.portal.clone(), cfg.webdriver.clone());
    let fetcher = TokenFetcher::new(portal, cfg.outfile.clone());
    fetcher.run(&cfg.credentials).await?;

    Ok(())
}
