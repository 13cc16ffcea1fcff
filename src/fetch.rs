use anyhow::Result;
use std::time::Instant;
use tracing::info;

use crate::api::{search_phones, RecommendationQuery};
use crate::catalog::Phone;
use crate::ranking::{rank, RankedItem};

/// Fetch recommendations for a query and rank them.
///
/// Called from main.rs for the list/open commands and from the TUI
/// for every search.
pub async fn fetch_and_rank(
    client: &reqwest::Client,
    base_url: &str,
    query: &RecommendationQuery,
) -> Result<Vec<RankedItem<Phone>>> {
    let start = Instant::now();
    let phones = search_phones(client, base_url, query).await?;
    let ranked = rank(&phones);

    info!(
        mode = query.mode.as_str(),
        brand = query.brand.as_deref().unwrap_or("Any"),
        results = ranked.len(),
        elapsed = ?start.elapsed(),
        "fetched recommendations"
    );

    Ok(ranked)
}
