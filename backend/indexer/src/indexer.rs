//! Long-running background task that polls the Soroban RPC and writes
//! decoded fair-launch events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Poll until `shutdown` is cancelled. The cursor is saved after every
/// poll, so a restart resumes where the last successful poll stopped.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!("Indexer starting — contract: {}", state.config.contract_id);

    let mut cursor = match db::load_cursor(&state.pool).await {
        Ok(cursor) => cursor,
        Err(e) => {
            warn!("Could not read saved cursor, starting fresh: {e}");
            Cursor::default()
        }
    };
    if cursor.last_ledger == 0 {
        cursor.last_ledger = state.config.start_ledger as i64;
    }

    info!("Resuming from ledger {}", cursor.last_ledger);

    loop {
        match poll_once(&state.pool, &state.client, &state.config, &cursor).await {
            Ok(next) => cursor = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }

    info!("Indexer stopped at ledger {}", cursor.last_ledger);
}

/// Perform a single poll iteration and return the cursor to use next.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    cursor: &Cursor,
) -> Result<Cursor> {
    let start_ledger = u32::try_from(cursor.last_ledger).unwrap_or(config.start_ledger);
    let page = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor.last_cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    // While the RPC hands back a pagination cursor we keep paging from it;
    // the ledger only moves forward to the latest one the RPC reported.
    let next = Cursor {
        last_ledger: page
            .latest_ledger
            .map(|l| (l as i64).max(cursor.last_ledger))
            .unwrap_or(cursor.last_ledger),
        last_cursor: page.cursor,
    };

    db::save_cursor(pool, &next).await?;
    Ok(next)
}
