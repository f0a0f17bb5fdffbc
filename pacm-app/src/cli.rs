use std::path::PathBuf;

use clap::Parser;

/// Refresh the PACM API token: log into the portal, scrape the token out of
/// the token display page, and write it to the configured output file.
///
/// Credentials and the output path come from `NIHMS_USER`, `NIHMS_PASSWORD`
/// and `NIHMS_OUTFILE`; flags below override individual values.
#[derive(Debug, Parser)]
#[command(name = "pacm-refresh-token", version)]
pub struct Cli {
    /// Optional YAML configuration file merged beneath environment values.
    #[arg(long, value_name = "PATH", env = "PACM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run the browser with a visible window.
    #[arg(long)]
    pub headed: bool,

    /// WebDriver service URL (overrides NIHMS_WEBDRIVER__URL).
    #[arg(long, value_name = "URL")]
    pub webdriver_url: Option<String>,

    /// Output file for the token (overrides NIHMS_OUTFILE).
    #[arg(long, value_name = "PATH")]
    pub outfile: Option<PathBuf>,

    /// Interaction speed factor in (0, 1]; 1.0 is full speed.
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f64>,

    /// Emit JSON logs instead of text.
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_headless_text_logs() {
        let cli = Cli::try_parse_from(["pacm-refresh-token"]).unwrap();
        assert!(!cli.headed);
        assert!(!cli.json_logs);
        assert!(cli.webdriver_url.is_none());
        assert!(cli.speed.is_none());
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from([
            "pacm-refresh-token",
            "--headed",
            "--webdriver-url",
            "http://chromedriver:9515",
            "--outfile",
            "/tmp/token",
            "--speed",
            "0.25",
        ])
        .unwrap();
        assert!(cli.headed);
        assert_eq!(
            cli.webdriver_url.as_deref(),
            Some("http://chromedriver:9515")
        );
        assert_eq!(cli.outfile, Some(PathBuf::from("/tmp/token")));
        assert_eq!(cli.speed, Some(0.25));
    }

    #[test]
    fn rejects_non_numeric_speed() {
        assert!(Cli::try_parse_from(["pacm-refresh-token", "--speed", "fast"]).is_err());
    }
}
