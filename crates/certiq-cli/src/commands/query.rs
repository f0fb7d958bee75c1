//! Query command
//!
//! Usage: certiq query --store <DIR> --root <ID> --criteria <FILE> [--config <FILE>]
//!
//! Prints one JSON line per visited document, in traversal order.

use std::path::PathBuf;

use anyhow::Context;
use certiq_core::types::RequestContext;
use certiq_core::{Criteria, ExError, QueryConfig};
use certiq_engine::StoreQueryService;
use certiq_store::FsObjectStore;
use clap::Args;

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Directory holding `<key>.json` documents
    #[arg(long)]
    pub store: PathBuf,

    /// Root document id
    #[arg(long)]
    pub root: String,

    /// JSON file with the criteria tree
    #[arg(long)]
    pub criteria: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Key prefix, overrides the configuration
    #[arg(long)]
    pub prefix: Option<String>,

    /// Bypass the document cache even when the configuration enables it
    #[arg(long)]
    pub no_cache: bool,
}

/// Execute query command
pub async fn execute(args: QueryArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => QueryConfig::load(path).map_err(ExError::from)?,
        None => QueryConfig::default(),
    };
    if let Some(prefix) = args.prefix {
        config.key_prefix = prefix;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }

    let text = std::fs::read_to_string(&args.criteria)
        .with_context(|| format!("cannot read criteria file {}", args.criteria.display()))?;
    let criteria: Criteria = serde_json::from_str(&text)
        .with_context(|| format!("invalid criteria in {}", args.criteria.display()))?;

    let service = StoreQueryService::open(FsObjectStore::new(args.store), &config)
        .map_err(ExError::from)?;
    let root_key = service.key_for(&args.root);

    let context = RequestContext::new();
    let result = service
        .load(&root_key, &criteria, &context)
        .await
        .map_err(|e| ExError::from(e).with_context(&context))?;

    result
        .iterator()
        .try_each(|node| async move {
            println!("{}", serde_json::to_string(node)?);
            Ok::<(), serde_json::Error>(())
        })
        .await?;

    Ok(())
}
