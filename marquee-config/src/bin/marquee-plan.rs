use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use marquee_config::{
    ArtworkConfig, ArtworkConfigSource, PlanRequest, plan_candidates,
    render_plan,
};
use marquee_model::{ImageVariant, MediaItem};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(
    name = "marquee-plan",
    about = "Print the artwork candidates and requests for a library item"
)]
struct Cli {
    /// Item JSON as returned by the media server
    #[arg(long)]
    item: PathBuf,
    /// Artwork config file (TOML or JSON); defaults to the environment
    #[arg(long)]
    config: Option<PathBuf>,
    /// Desired slot width in layout units
    #[arg(long)]
    width: Option<f64>,
    /// Desired slot height in layout units
    #[arg(long)]
    height: Option<f64>,
    /// Explicit variant order, e.g. `--prefer Thumb --prefer Primary`
    #[arg(long = "prefer", value_parser = parse_variant)]
    prefer: Vec<ImageVariant>,
    /// Size with the nominal ratio and request exact pixels
    #[arg(long)]
    enforce_aspect: bool,
    /// Request exact pixel sizes for every variant
    #[arg(long)]
    exact: bool,
    /// Media server base URL, overriding the config
    #[arg(long)]
    server: Option<Url>,
}

fn parse_variant(raw: &str) -> Result<ImageVariant, String> {
    raw.parse::<ImageVariant>().map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (
            ArtworkConfig::load_from_file(path)?,
            ArtworkConfigSource::File(path.clone()),
        ),
        None => ArtworkConfig::load_from_env()?,
    };
    info!(?source, "loaded artwork config");

    if let Some(server) = cli.server.clone() {
        config.server_url = Some(server);
    }

    let raw = fs::read_to_string(&cli.item)
        .with_context(|| format!("failed to read {}", cli.item.display()))?;
    let item: MediaItem = serde_json::from_str(&raw)
        .with_context(|| format!("invalid item json {}", cli.item.display()))?;

    let request = PlanRequest {
        width: cli.width,
        height: cli.height,
        preferred: cli.prefer,
        enforce_aspect: cli.enforce_aspect,
        exact: cli.exact,
    };

    let plans = plan_candidates(&config, Arc::new(item.clone()), &request)?;
    print!("{}", render_plan(&item, &plans));
    Ok(())
}
