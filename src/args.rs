use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "page-sections")]
#[command(about = "Extracts named product sections and images from an HTML page")]
#[command(version)]
pub struct Args {
    /// HTML file to read, or "-" for stdin
    pub input: String,

    /// URL the page was captured from
    #[arg(short, long, default_value = "about:blank", value_parser = parse_url)]
    pub url: Url,

    /// JSON extractor configuration (defaults to the built-in sections)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Leave the DOM snapshot out of the printed record
    #[arg(long)]
    pub no_snapshot: bool,
}

/// Validates the page URL argument
fn parse_url(value: &str) -> Result<Url, String> {
    Url::parse(value).map_err(|e| format!("invalid URL '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_defaults() {
        let args = Args::try_parse_from(["page-sections", "page.html"]).unwrap();
        assert_eq!(args.input, "page.html");
        assert_eq!(args.url.as_str(), "about:blank");
        assert!(args.config.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn test_rejects_invalid_url() {
        let result = Args::try_parse_from(["page-sections", "-", "--url", "not a url"]);
        assert!(result.is_err());
    }
}
