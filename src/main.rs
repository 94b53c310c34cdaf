use anyhow::{bail, Context, Result};
use biome_tables::{
    emit,
    fetch::{local, sheets, sheets::Auth},
    parse,
};
use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Export the biome composition tables from the balance spreadsheet as Rust
/// source for the worldgen crate.
#[derive(Parser, Debug)]
#[command(name = "biome-tables")]
struct Args {
    /// Spreadsheet id, from the sheet URL (or BIOME_SHEET_ID)
    #[arg(long)]
    sheet_id: Option<String>,

    /// Worksheet tab holding the composition tables
    #[arg(long, default_value = "CompositionTables")]
    worksheet: String,

    /// Sheets API key for link-shared sheets (or SHEETS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// OAuth access token, e.g. `gcloud auth print-access-token`
    /// (or SHEETS_ACCESS_TOKEN)
    #[arg(long)]
    access_token: Option<String>,

    /// Parse a local CSV export instead of calling the Sheets API
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Where to write the generated Rust source
    #[arg(long, default_value = "tbl.rs")]
    out: PathBuf,
}

fn resolve_auth(args: &Args) -> Result<Auth> {
    if let Some(token) = args
        .access_token
        .clone()
        .or_else(|| env::var("SHEETS_ACCESS_TOKEN").ok())
    {
        return Ok(Auth::BearerToken(token));
    }
    if let Some(key) = args
        .api_key
        .clone()
        .or_else(|| env::var("SHEETS_API_KEY").ok())
    {
        return Ok(Auth::ApiKey(key));
    }
    bail!("no Sheets credentials: pass --access-token / --api-key or set SHEETS_ACCESS_TOKEN / SHEETS_API_KEY");
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let args = Args::parse();

    // ─── 2) acquire worksheet rows ───────────────────────────────────
    let rows = match &args.csv {
        Some(path) => {
            info!(path = %path.display(), "reading local CSV export");
            local::read_csv_rows(path)?
        }
        None => {
            let sheet_id = args
                .sheet_id
                .clone()
                .or_else(|| env::var("BIOME_SHEET_ID").ok())
                .context("--sheet-id (or BIOME_SHEET_ID) is required unless --csv is given")?;
            let auth = resolve_auth(&args)?;
            let client = Client::new();
            info!(sheet = %sheet_id, worksheet = %args.worksheet, "fetching worksheet");
            sheets::fetch_rows(&client, &sheet_id, &args.worksheet, &auth).await?
        }
    };
    info!(rows = rows.len(), "worksheet loaded");

    // ─── 3) parse rows into composition tables ───────────────────────
    let (tables, stats) = parse::parse_rows(&rows);
    info!(
        climates = tables.climate_count(),
        entries = stats.entries,
        data_rows = stats.data_rows,
        skipped_rows = stats.skipped_rows,
        skipped_columns = stats.skipped_columns,
        "parsed composition tables"
    );
    if tables.is_empty() {
        bail!("no composition entries found in {} rows", rows.len());
    }

    // ─── 4) render Rust source ───────────────────────────────────────
    let code = emit::render_tables(&tables);
    let banner = format!(
        "// Generated from the {} worksheet at {}; do not edit by hand.\n\n",
        args.worksheet,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    );

    // ─── 5) write output ─────────────────────────────────────────────
    fs::write(&args.out, format!("{}{}", banner, code))
        .await
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!(out = %args.out.display(), bytes = code.len(), "wrote generated tables");

    Ok(())
}
