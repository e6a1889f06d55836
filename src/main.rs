//! Tour-Atlas main entry point
//!
//! Command-line front end over the provider client, statistics, and
//! recommendations. Every command prints JSON on stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tour_atlas::aggregate::RecommendationSubject;
use tour_atlas::client::{Arrange, AreaListQuery, KeywordQuery};
use tour_atlas::config::{config_from_env, load_config};
use tour_atlas::{category_stats, recommend, region_stats, stats_summary, TourApi, TourClient};
use tracing_subscriber::EnvFilter;

/// Tour-Atlas: a resilient tourism data client
///
/// The provider credential is read from TOUR_API_KEY, falling back to
/// PUBLIC_TOUR_API_KEY.
#[derive(Parser, Debug)]
#[command(name = "tour-atlas")]
#[command(version)]
#[command(about = "Query and aggregate tourism content", long_about = None)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// Filters shared by listing and search
#[derive(clap::Args, Debug, Default)]
struct ListArgs {
    /// Region code
    #[arg(long)]
    area: Option<String>,

    /// Sub-region code (requires --area)
    #[arg(long, requires = "area")]
    sigungu: Option<String>,

    /// Content type id (12, 14, 15, 25, 28, 32, 38, 39)
    #[arg(long = "type")]
    content_type: Option<String>,

    /// Result ordering
    #[arg(long, value_enum)]
    arrange: Option<Arrange>,

    /// Page number (1-based)
    #[arg(long)]
    page: Option<u32>,

    /// Rows per page
    #[arg(long)]
    rows: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List region codes, or sub-region codes of a region
    Areas {
        #[arg(long)]
        parent: Option<String>,
    },
    /// List items by region and category
    List(ListArgs),
    /// Search items by keyword
    Search {
        keyword: String,
        #[command(flatten)]
        filters: ListArgs,
    },
    /// Show the common detail record of an item
    Detail { content_id: String },
    /// Show the category-specific detail of an item
    Intro {
        content_id: String,
        content_type_id: String,
    },
    /// List an item's images
    Images { content_id: String },
    /// Show an item's companion-animal policy
    Pet { content_id: String },
    /// Count items per region
    Regions,
    /// Count items per category
    Categories,
    /// Show headline statistics
    Summary,
    /// Recommend items related to an item
    Recommend { content_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => config_from_env().context("resolving configuration")?,
    };
    let client = TourClient::new(config)?;

    match cli.command {
        Command::Areas { parent } => {
            print_json(&client.area_codes(parent.as_deref()).await?)
        }
        Command::List(args) => {
            let query = area_query(args);
            print_json(&client.area_based_list(&query).await?)
        }
        Command::Search { keyword, filters } => {
            let query = keyword_query(keyword, filters);
            print_json(&client.search_keyword(&query).await?)
        }
        Command::Detail { content_id } => {
            let detail = client.detail_common(&content_id).await?;
            print_json(&DetailView::from(&detail))
        }
        Command::Intro {
            content_id,
            content_type_id,
        } => print_json(&client.detail_intro(&content_id, &content_type_id).await?),
        Command::Images { content_id } => print_json(&client.detail_images(&content_id).await?),
        Command::Pet { content_id } => print_json(&client.detail_pet_tour(&content_id).await?),
        Command::Regions => print_json(&region_stats(&client).await?),
        Command::Categories => print_json(&category_stats(&client).await?),
        Command::Summary => print_json(&stats_summary(&client).await?),
        Command::Recommend { content_id } => {
            let detail = client.detail_common(&content_id).await?;
            let subject = RecommendationSubject::from(&detail);
            print_json(&recommend(&client, &subject).await)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tour_atlas=info,warn"),
            1 => EnvFilter::new("tour_atlas=debug,info"),
            2 => EnvFilter::new("tour_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn area_query(args: ListArgs) -> AreaListQuery {
    AreaListQuery {
        area_code: args.area,
        sigungu_code: args.sigungu,
        content_type_id: args.content_type,
        arrange: args.arrange,
        page_no: args.page,
        num_of_rows: args.rows,
        ..AreaListQuery::default()
    }
}

fn keyword_query(keyword: String, args: ListArgs) -> KeywordQuery {
    KeywordQuery {
        keyword,
        area_code: args.area,
        sigungu_code: args.sigungu,
        content_type_id: args.content_type,
        arrange: args.arrange,
        page_no: args.page,
        num_of_rows: args.rows,
    }
}

/// Detail record plus its cleaned-up derived fields
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailView<'a> {
    #[serde(flatten)]
    detail: &'a tour_atlas::models::TourDetail,
    full_address: Option<String>,
    overview_text: Option<String>,
    homepage_url: Option<String>,
}

impl<'a> From<&'a tour_atlas::models::TourDetail> for DetailView<'a> {
    fn from(detail: &'a tour_atlas::models::TourDetail) -> Self {
        Self {
            detail,
            full_address: detail.full_address(),
            overview_text: detail.overview_text(),
            homepage_url: detail.homepage_url(),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
