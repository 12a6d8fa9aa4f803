//! `vnshelf` -- browse catalog releases by month from the terminal.
//!
//! # Environment variables
//!
//! | Variable              | Default                 | Description                     |
//! |-----------------------|-------------------------|---------------------------------|
//! | `CATALOG_API_URL`     | `http://localhost:5000` | Catalog service base URL        |
//! | `CATALOG_ORIGIN_LANG` | `ja`                    | Origin language of listed titles|
//! | `CATALOG_PAGE_SIZE`   | `24`                    | Titles per listing page         |
//! | `CATALOG_FLOOR_YEAR`  | `1985`                  | Earliest navigable year         |
//! | `RUST_LOG`            | `vnshelf_cli=info,...`  | Log filter                      |

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vnshelf_catalog::{CatalogApi, CatalogConfig};
use vnshelf_cli::args::{Cli, Command, DetailArgs, ListArgs};
use vnshelf_cli::render;
use vnshelf_core::temporal::CatalogBounds;
use vnshelf_listing::params::{self, MONTH_PARAM, PAGE_PARAM, YEAR_PARAM};
use vnshelf_listing::{
    ListingController, ListingService, ListingSettings, MemoryParams, ParamStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vnshelf_cli=info,vnshelf_listing=info,vnshelf_catalog=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CatalogConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    let api = CatalogApi::from_config(&config);

    tracing::info!(api_url = %config.api_url, "Starting vnshelf");

    match cli.command {
        Command::List(args) => list(api, &config, args).await,
        Command::Title(args) => show_title(&api, args).await,
        Command::Character(args) => show_character(&api, args).await,
    }
}

async fn list(api: CatalogApi, config: &CatalogConfig, args: ListArgs) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    let address = MemoryParams::new();
    if let Some(year) = &args.year {
        address.set(YEAR_PARAM, year);
    }
    if let Some(month) = &args.month {
        address.set(MONTH_PARAM, month);
    }
    if let Some(page) = args.page {
        address.set(PAGE_PARAM, &page.to_string());
    }
    let selection = params::read_selection(&address, today).context("Invalid date selection")?;

    let settings = ListingSettings {
        bounds: CatalogBounds::for_date(config.floor_year, today),
        origin_language: config.origin_language.clone(),
        page_size: args.page_size.unwrap_or(config.page_size),
    };
    let controller = ListingController::new(settings, selection.date, selection.page);

    let shutdown = CancellationToken::new();
    let (handle, task) =
        ListingService::spawn(controller, Arc::new(api), address, shutdown.clone());

    handle.set_maturity(args.maturity.selection()).await?;
    handle.refresh().await?;

    let settled = tokio::select! {
        result = handle.settled() => Some(result),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            None
        }
    };

    shutdown.cancel();
    task.await.context("Listing service panicked")?;

    if let Some(snapshot) = settled.transpose()? {
        println!("{}", render::listing(&snapshot));
    }
    Ok(())
}

async fn show_title(api: &CatalogApi, args: DetailArgs) -> Result<()> {
    let record = api
        .get_title(&args.id)
        .await
        .with_context(|| format!("Failed to fetch title {}", args.id))?;

    match record {
        Some(record) => println!("{}", render::title(&record, &args.viewer())),
        None => anyhow::bail!("No title with id {}", args.id),
    }
    Ok(())
}

async fn show_character(api: &CatalogApi, args: DetailArgs) -> Result<()> {
    let record = api
        .get_character(&args.id)
        .await
        .with_context(|| format!("Failed to fetch character {}", args.id))?;

    match record {
        Some(record) => println!("{}", render::character(&record, &args.viewer())),
        None => anyhow::bail!("No character with id {}", args.id),
    }
    Ok(())
}
