//! Holder summary command

use anyhow::Result;

use crate::config::Config;
use crate::report::holder_summary;

use super::fetch_snapshot;

/// Run the holders command
pub async fn run(config: &Config, limit: Option<usize>) -> Result<()> {
    let snapshot = fetch_snapshot(config).await?;
    println!(
        "{}",
        holder_summary(&snapshot, limit.unwrap_or(config.display_limit))
    );
    Ok(())
}
