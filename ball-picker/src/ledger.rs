//! Token holder snapshots over Solana JSON-RPC.
//!
//! Holders are fetched with a single `getProgramAccounts` call against the
//! SPL Token program, filtered to 165-byte token accounts of the configured
//! mint. Token accounts owned by the same wallet are summed into one holder.

use anyhow::{anyhow, Context, Result};
use ball_draw::{Holder, TokenAmount};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// SPL Token program id
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Size of an SPL token account in bytes
const TOKEN_ACCOUNT_SIZE: u64 = 165;

/// Timeout for RPC requests
const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC request ID counter
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// JSON-RPC 2.0 request
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// A program account returned with `jsonParsed` encoding
#[derive(Debug, Deserialize)]
struct KeyedAccount {
    pubkey: Option<String>,
    account: AccountData,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    data: ParsedData,
}

#[derive(Debug, Deserialize)]
struct ParsedData {
    parsed: ParsedAccount,
}

#[derive(Debug, Deserialize)]
struct ParsedAccount {
    info: TokenAccountInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAccountInfo {
    owner: String,
    token_amount: UiTokenAmount,
}

#[derive(Debug, Deserialize)]
struct UiTokenAmount {
    amount: String,
    decimals: u8,
}

/// Client for the ledger RPC endpoint
#[derive(Debug, Clone)]
pub struct LedgerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl LedgerClient {
    /// Create a client for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The RPC endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: REQUEST_ID.fetch_add(1, Ordering::SeqCst),
        };

        let start = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("RPC call {} to {} failed", method, self.endpoint))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        let json_response: JsonRpcResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Malformed {} response", method))?;

        debug!("{} answered in {} ms", method, start.elapsed().as_millis());

        if let Some(error) = json_response.error {
            return Err(anyhow!("RPC error {}: {}", error.code, error.message));
        }

        json_response
            .result
            .ok_or_else(|| anyhow!("Missing result in RPC response"))
    }

    /// Fetch every wallet holding a positive balance of `mint`
    pub async fn fetch_holders(&self, mint: &str) -> Result<Vec<Holder>> {
        info!("Fetching token holders for mint {}", mint);

        let accounts: Vec<Value> = self
            .call("getProgramAccounts", program_accounts_params(mint))
            .await?;

        let holders = parse_token_accounts(&accounts);
        info!(
            "Found {} holders across {} token accounts",
            holders.len(),
            accounts.len()
        );
        Ok(holders)
    }
}

/// Parameters for `getProgramAccounts` selecting token accounts of `mint`
pub fn program_accounts_params(mint: &str) -> Value {
    json!([
        TOKEN_PROGRAM_ID,
        {
            "encoding": "jsonParsed",
            "filters": [
                { "dataSize": TOKEN_ACCOUNT_SIZE },
                { "memcmp": { "offset": 0, "bytes": mint } }
            ]
        }
    ])
}

/// Turn `getProgramAccounts` results into one holder per owner.
///
/// Malformed accounts and empty balances are skipped. The result is ordered
/// by owner address.
pub fn parse_token_accounts(accounts: &[Value]) -> Vec<Holder> {
    let mut balances: BTreeMap<String, TokenAmount> = BTreeMap::new();

    for value in accounts {
        let account: KeyedAccount = match serde_json::from_value(value.clone()) {
            Ok(account) => account,
            Err(e) => {
                warn!("Skipping unparseable token account: {}", e);
                continue;
            }
        };

        let info = account.account.data.parsed.info;
        let raw: u64 = match info.token_amount.amount.parse() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Skipping token account {} with bad amount {:?}: {}",
                    account.pubkey.as_deref().unwrap_or("?"),
                    info.token_amount.amount,
                    e
                );
                continue;
            }
        };
        if raw == 0 {
            continue;
        }

        let amount = TokenAmount::new(raw, info.token_amount.decimals);
        match balances.get(&info.owner).copied() {
            None => {
                balances.insert(info.owner, amount);
            }
            Some(existing) => match existing.checked_add(amount) {
                Some(total) => {
                    balances.insert(info.owner, total);
                }
                None => warn!(
                    "Skipping token account of {}: balance overflow or decimals mismatch",
                    info.owner
                ),
            },
        }
    }

    balances
        .into_iter()
        .map(|(owner, amount)| Holder::new(owner, amount))
        .collect()
}
