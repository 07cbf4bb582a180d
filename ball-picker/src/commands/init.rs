//! Config initialization command

use anyhow::Result;
use std::path::Path;

use crate::config::Config;

use super::{print_error, print_success, print_warning};

/// Run the init command
pub async fn run(config_path: &Path, config: &Config, force: bool) -> Result<()> {
    if Config::exists(config_path) && !force {
        print_error("Config already exists at this location");
        println!("Path: {}", config_path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    config.save(config_path)?;

    println!();
    print_success("Config written successfully!");
    println!("Path: {}", config_path.display());

    if config.token_mint.is_empty() {
        println!();
        print_warning("token_mint is empty. Set it before running holders or draw.");
    }

    Ok(())
}
