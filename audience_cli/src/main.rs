use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use audience_core::{load_sizing_config_from_env, AudienceSession, CommandPayload, SegmentCatalog};
use clap::Parser;
use color_eyre::Result;
use segment_match_client::SegmentMatchClient;
use tracing::{info, warn};

mod runner;

use runner::{run_commands, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Audience builder sizing session", long_about = None)]
struct Cli {
    /// RNG seed for battleground discounts and map overlays. 0 draws from entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Command script to replay. Reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Provider catalog JSON. Uses the builtin catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Base URL of the segment matching service.
    #[arg(long)]
    match_endpoint: Option<String>,
    /// Audience description used to seed segments from the matching service.
    #[arg(long)]
    describe: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (config, metadata) = load_sizing_config_from_env();
    let catalog = match &cli.catalog {
        Some(path) => Arc::new(SegmentCatalog::from_file(path)?),
        None => SegmentCatalog::builtin(),
    };
    info!(
        config = ?metadata.path(),
        segments = catalog.len(),
        seed = cli.seed,
        "audience session ready"
    );

    let mut session = AudienceSession::new(catalog, config, cli.seed);

    if let Some(description) = cli.describe.as_deref() {
        session.apply(CommandPayload::SetDescription {
            description: description.to_string(),
        });
        if let Some(endpoint) = cli.match_endpoint.as_deref() {
            seed_from_matches(&mut session, endpoint, description).await;
        }
    }

    let stdout = io::stdout();
    let stats = match &cli.script {
        Some(path) => run_commands(
            &mut session,
            BufReader::new(File::open(path)?),
            stdout.lock(),
            cli.format,
        )?,
        None => run_commands(&mut session, io::stdin().lock(), stdout.lock(), cli.format)?,
    };

    info!(
        applied = stats.applied,
        rejected = stats.rejected,
        "session finished"
    );
    Ok(())
}

async fn seed_from_matches(session: &mut AudienceSession, endpoint: &str, description: &str) {
    let client = SegmentMatchClient::new(endpoint);
    let matched = client.match_segments_or_empty(description).await;
    if matched.is_empty() {
        info!("no matched segments; keeping current catalog");
        return;
    }
    match SegmentCatalog::from_segments(matched) {
        Ok(catalog) => {
            let estimate = session.replace_catalog(Arc::new(catalog));
            info!(
                segments = session.catalog().len(),
                final_size = estimate.final_size,
                "catalog seeded from matches"
            );
        }
        Err(err) => warn!("Discarding matched segments: {}", err),
    }
}
