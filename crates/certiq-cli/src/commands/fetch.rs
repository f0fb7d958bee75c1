//! Fetch command
//!
//! Usage: certiq fetch --store <DIR> <KEY>

use std::path::PathBuf;

use certiq_core::ExError;
use certiq_store::{DocumentFetcher, FsObjectStore, StoreFetcher};
use clap::Args;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Directory holding `<key>.json` documents
    #[arg(long)]
    pub store: PathBuf,

    /// Document key, e.g. `documents/abc`
    pub key: String,
}

/// Execute fetch command
pub async fn execute(args: FetchArgs) -> anyhow::Result<()> {
    let fetcher = StoreFetcher::new(FsObjectStore::new(args.store));
    let document = fetcher.fetch(&args.key).await.map_err(ExError::from)?;

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
