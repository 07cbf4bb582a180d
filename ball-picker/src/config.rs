//! Picker configuration file.

use anyhow::{bail, Context, Result};
use ball_draw::{DrawConfig, EligibilityRules, TicketUnit, DEFAULT_MAX_RETRIES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration for the lottery picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Solana JSON-RPC endpoint
    #[serde(default = "default_rpc_endpoint")]
    pub rpc_endpoint: String,

    /// Mint address of the lottery token
    #[serde(default)]
    pub token_mint: String,

    /// Whole tokens per ticket (must be positive)
    #[serde(default = "default_ticket_unit")]
    pub ticket_unit: u64,

    /// Maximum tickets drawn before giving up on the excluded wallet
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Wallet that may hold tickets but must never win (e.g. the liquidity pool)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_wallet: Option<String>,

    /// Wallets removed from the population before tickets are allocated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_wallets: Vec<String>,

    /// Holders above this many whole tokens are not eligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_eligible_balance: Option<u64>,

    /// Number of holders listed in the summary table
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_rpc_endpoint() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_ticket_unit() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_display_limit() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_endpoint: default_rpc_endpoint(),
            token_mint: String::new(),
            ticket_unit: default_ticket_unit(),
            max_retries: default_max_retries(),
            excluded_wallet: None,
            excluded_wallets: Vec::new(),
            max_eligible_balance: None,
            display_limit: default_display_limit(),
        }
    }
}

impl Config {
    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Check if config file exists
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Reject configurations that cannot produce a valid draw.
    pub fn validate(&self) -> Result<()> {
        if self.rpc_endpoint.trim().is_empty() {
            bail!("rpc_endpoint must not be empty");
        }
        if self.token_mint.trim().is_empty() {
            bail!("token_mint is not set; edit the config file or pass --mint");
        }
        TicketUnit::new(self.ticket_unit).context("Invalid ticket_unit")?;
        self.draw_config()
            .validate()
            .context("Invalid max_retries")?;
        Ok(())
    }

    /// Settings for the draw itself.
    pub fn draw_config(&self) -> DrawConfig {
        DrawConfig {
            excluded_wallet: self.excluded_wallet.clone(),
            max_retries: self.max_retries,
        }
    }

    /// Pre-draw population rules.
    pub fn eligibility_rules(&self) -> EligibilityRules {
        EligibilityRules {
            excluded_wallets: self.excluded_wallets.clone(),
            max_balance: self.max_eligible_balance,
        }
    }
}

/// Get the default data directory path
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".ball-picker"))
        .context("Could not determine home directory")
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn valid_config() -> Config {
        Config {
            token_mint: "BALLmint1111111111111111111111111111111111".to_string(),
            excluded_wallet: Some("LpWallet".to_string()),
            excluded_wallets: vec!["LpWallet".to_string()],
            max_eligible_balance: Some(40_000_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = valid_config();
        config.save(&path).unwrap();
        assert!(Config::exists(&path));

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("token_mint = \"mint\"").unwrap();
        assert_eq!(config.ticket_unit, 10_000);
        assert_eq!(config.max_retries, 10);
        assert_eq!(config.display_limit, 500);
        assert!(config.excluded_wallet.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ticket_unit() {
        let config = Config {
            ticket_unit: 0,
            ..valid_config()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("ticket unit"));
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let config = Config {
            max_retries: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_mint() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token_mint"));
    }

    #[test]
    fn test_negative_ticket_unit_fails_to_parse() {
        assert!(toml::from_str::<Config>("token_mint = \"m\"\nticket_unit = -5").is_err());
    }

    #[test]
    fn test_derived_settings() {
        let config = valid_config();
        assert!(config.draw_config().excludes("LpWallet"));
        assert_eq!(config.eligibility_rules().max_balance, Some(40_000_000));
    }
}
