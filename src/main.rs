mod config;
mod models;
mod search;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use models::{Property, SearchExport};
use search::{PropertySearchClient, SearchForm, SearchQuery};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "parcel-lookup",
    version,
    about = "Look up land parcel records by district, mandal, village and survey number"
)]
struct Cli {
    /// Base URL of the land-records search API
    #[arg(
        long,
        global = true,
        env = "PARCEL_API_BASE_URL",
        default_value = DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Client-side request timeout in milliseconds
    #[arg(
        long,
        global = true,
        env = "PARCEL_API_TIMEOUT_MS",
        default_value_t = DEFAULT_TIMEOUT_MS
    )]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search property records for one survey number
    Search {
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        mandal: Option<String>,
        #[arg(long)]
        village: Option<String>,
        #[arg(long)]
        survey_no: Option<String>,
        /// Also write the results as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List survey numbers recorded for a village
    Surveys {
        #[arg(long)]
        district: String,
        #[arg(long)]
        mandal: String,
        #[arg(long)]
        village: String,
    },
    /// Check whether the backend and its stores are up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config =
        ClientConfig::new(cli.base_url).with_timeout(Duration::from_millis(cli.timeout_ms));
    let client = PropertySearchClient::with_config(&config)?;
    info!("🏠 Parcel lookup against {}", client.base_url());

    match cli.command {
        Command::Search {
            district,
            mandal,
            village,
            survey_no,
            output,
        } => {
            let mut form = SearchForm::with_fields(district, mandal, village, survey_no);
            form.on_search(&client).await;
            debug!("Search finished in phase {:?}", form.phase());

            if let Some(msg) = form.error_msg() {
                anyhow::bail!("{}", msg);
            }

            info!("✅ Found {} properties", form.results().len());
            for (i, property) in form.results().iter().enumerate() {
                print_property(i + 1, property);
            }

            if let Some(path) = output {
                let query = form.validate()?;
                save_export(&path, &query, form.results()).await?;
                info!("💾 Saved results to {}", path.display());
            }
        }
        Command::Surveys {
            district,
            mandal,
            village,
        } => {
            let surveys = client
                .search_surveys(&district, &mandal, &village)
                .await
                .context("Survey lookup failed")?;

            info!("✅ Found {} survey numbers", surveys.count);
            for survey in &surveys.results {
                println!("{}", or_dash(&survey.survey_no));
            }
        }
        Command::Health => {
            let health = client.health().await.context("Health check failed")?;
            println!("status:        {}", health.status);
            println!("elasticsearch: {}", health.elasticsearch);
            println!("redis:         {}", health.redis);
            if !health.is_ok() {
                anyhow::bail!("backend is degraded");
            }
        }
    }

    Ok(())
}

fn or_dash<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_property(n: usize, property: &Property) {
    println!(
        "{}. Survey {} ({} / {} / {})",
        n,
        property.survey_no,
        or_dash(&property.district_name),
        or_dash(&property.mandal_name),
        or_dash(&property.village_name)
    );
    println!(
        "   Khata: {} (label {})",
        or_dash(&property.khata_id),
        or_dash(&property.khata_label)
    );
    println!(
        "   Pattadar: {}, father/husband: {}",
        or_dash(&property.pattadar_name),
        or_dash(&property.father_or_husband_name)
    );
    println!(
        "   PPB: {}, e-KYC: {}",
        or_dash(&property.ppb_number),
        or_dash(&property.ekyc_status)
    );
    println!(
        "   Extent: {} ac, status: {}, type: {}",
        or_dash(&property.total_extent_ac_gts),
        or_dash(&property.land_status),
        or_dash(&property.land_type)
    );
    println!("   Market value: {} INR", or_dash(&property.market_value_inr));
    println!();
}

async fn save_export(path: &Path, query: &SearchQuery, results: &[Property]) -> Result<()> {
    let export = SearchExport::new(query, results);
    let json = serde_json::to_string_pretty(&export)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
