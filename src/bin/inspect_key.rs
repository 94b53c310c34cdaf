use anyhow::Result;
use biome_tables::fetch::creds::ServiceAccountKey;
use clap::Parser;
use std::path::PathBuf;

/// Decode a service-account key file and print it back out, to check which
/// identity the exporter would authenticate as.
#[derive(Parser, Debug)]
#[command(name = "inspect_key")]
struct Args {
    /// Path to the service-account JSON key file
    #[arg(default_value = ".keys/key_1.json")]
    key_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let key = ServiceAccountKey::load(&args.key_file)?;
    println!("{}", serde_json::to_string_pretty(&key)?);
    Ok(())
}
