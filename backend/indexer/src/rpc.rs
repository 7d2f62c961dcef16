//! Soroban RPC client — polls `getEvents` and decodes fair-launch events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, LaunchEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// XDR-decoded topic list
    pub topic: Vec<String>,
    /// XDR-decoded event value / data
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

/// Doubling retry delay, capped at [`MAX_BACKOFF_SECS`].
struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Self {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    async fn wait(&mut self, reason: &str) {
        warn!("{reason} (will retry in {}s)", self.secs);
        tokio::time::sleep(Duration::from_secs(self.secs)).await;
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
    }
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventsPage> {
    let mut backoff = Backoff::new();

    loop {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getEvents",
            "params": build_params(contract_id, start_ledger, cursor, limit),
        });

        let resp = match client.post(rpc_url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                backoff.wait(&format!("RPC request failed: {e}")).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            backoff.wait("Rate-limited by RPC").await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            // Invalid request / unknown method will not fix themselves.
            if err.code == -32600 || err.code == -32601 {
                return Err(IndexerError::EventParse(format!(
                    "RPC hard error {}: {}",
                    err.code, err.message
                )));
            }
            backoff
                .wait(&format!("RPC soft error {} {}", err.code, err.message))
                .await;
            continue;
        }

        let result = body.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok(EventsPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`LaunchEvent`] structs. Events from
/// failed contract calls are dropped: the host rolled their effects back.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<LaunchEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<LaunchEvent> {
    let kind = EventKind::from_topic(&extract_scalar(raw.topic.first()?));
    let ledger = raw.ledger.unwrap_or(0) as i64;

    // Without an id the event cannot be deduplicated on restart.
    let event_id = raw.id.clone().or_else(|| raw.paging_token.clone())?;

    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let subject = raw.topic.get(1).map(|t| extract_scalar(t));
    let fields = decode_data(&raw.value, kind);

    Some(LaunchEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        subject,
        actor: fields.actor,
        amount: fields.amount,
        detail: fields.detail,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

#[derive(Debug, Default, PartialEq)]
struct DataFields {
    actor: Option<String>,
    amount: Option<String>,
    detail: Option<String>,
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
/// Every payload is a `#[contracttype]` struct, decoded by the RPC into an
/// object keyed by field name.
fn decode_data(value: &Value, kind: EventKind) -> DataFields {
    let field = |keys: &[&str]| extract_field(value, keys);
    match kind {
        EventKind::Contributed => DataFields {
            actor: field(&["contributor"]),
            amount: field(&["amount"]),
            detail: field(&["total_contributed"]),
        },
        EventKind::ThresholdReached => DataFields {
            actor: None,
            amount: field(&["total_contributed"]),
            detail: value.get("trigger").and_then(extract_enum_tag),
        },
        EventKind::VolumeObserved => DataFields {
            actor: None,
            amount: field(&["settled"]),
            detail: field(&["pool_key"]),
        },
        EventKind::PoolBootstrapped => DataFields {
            actor: None,
            amount: field(&["eth_amount"]),
            detail: field(&["vots_amount"]),
        },
        EventKind::BootstrapFailed => DataFields {
            actor: None,
            amount: field(&["eth_required"]),
            detail: value.get("reason").and_then(extract_enum_tag),
        },
        EventKind::TokensClaimed => DataFields {
            actor: field(&["contributor"]),
            amount: field(&["amount"]),
            detail: None,
        },
        EventKind::WindowExpired => DataFields {
            actor: None,
            amount: field(&["total_contributed"]),
            detail: field(&["end_time"]),
        },
        EventKind::FundsRecovered => DataFields {
            actor: field(&["to"]),
            amount: field(&["amount"]),
            detail: field(&["token"]),
        },
        EventKind::RecoveryCompleted => DataFields {
            actor: field(&["by"]),
            ..DataFields::default()
        },
        EventKind::OwnerChanged => DataFields {
            actor: field(&["owner"]),
            amount: None,
            detail: field(&["previous"]),
        },
        EventKind::Unknown => DataFields::default(),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Unit enum variants are encoded as a single-element vector holding the
/// variant symbol. Accept that, a bare string, or a `{"symbol": …}` wrapper.
fn extract_enum_tag(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(extract_enum_tag),
        Value::Object(map) => map
            .get("symbol")
            .or_else(|| map.get("value"))
            .and_then(extract_enum_tag),
        _ => None,
    }
}

/// Extract the scalar carried by an XDR-decoded topic string.
/// The RPC may return `{"type":"symbol","value":"contrib"}` or just the raw string.
fn extract_scalar(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        match v.get("value") {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
