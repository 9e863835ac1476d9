//! Offset page walker

use super::types::{Page, PagedRequest, WalkOptions};
use crate::decode::JsonDecoder;
use crate::envelope::Collector;
use crate::error::{Error, Result};
use crate::http::{Invoker, RequestConfig};
use tracing::{debug, info, warn};

/// Walk a paged endpoint to its last page.
///
/// Pages are fetched one after another, never concurrently. Entries are
/// appended in the order the pages arrive. The walk stops when a page says
/// `isLast`, when the upstream answers with an error envelope (partial entries
/// are kept and `is_complete` stays false), or fails once `max_roundtrips`
/// fetches have been spent without reaching the end.
pub async fn walk_pages<I: Invoker + ?Sized>(
    invoker: &I,
    request: &PagedRequest,
    options: &WalkOptions,
) -> Result<Collector> {
    let decoder = JsonDecoder::new();
    let mut collector = Collector::items(&request.url, request.fixed_query.clone());
    collector.start_index = options.start_at;

    let mut offset = options.start_at;
    let mut total_baseline: Option<u64> = None;
    let mut capacity_baseline: Option<u64> = None;

    while !collector.is_complete {
        if collector.roundtrip_count >= options.max_roundtrips {
            warn!(
                endpoint = %request.url,
                max_roundtrips = options.max_roundtrips,
                "Round-trip budget spent before the last page"
            );
            return Err(Error::RoundtripsExhausted {
                max_roundtrips: options.max_roundtrips,
                items_fetched: collector.item_slice().len(),
            });
        }

        let body = invoker
            .get(&request.url, &RequestConfig::with_query(request.page_query(offset)))
            .await?;
        collector.roundtrip_count += 1;

        let payload = decoder.parse(&body)?;
        if let Some(channel) = decoder.error_channel(&payload) {
            warn!(
                endpoint = %request.url,
                offset,
                messages = ?channel.error_messages,
                "Upstream error envelope, stopping walk"
            );
            collector.absorb(channel);
            break;
        }

        let page = Page::from_value(&payload, request.item_field)?;
        check_baseline("total", &mut total_baseline, page.total)?;
        check_baseline("maxResults", &mut capacity_baseline, page.max_results)?;

        debug!(
            offset,
            received = page.items.len(),
            total = page.total,
            is_last = page.is_last,
            "Fetched page {}",
            collector.roundtrip_count
        );

        let next = options.next_offset(offset, &page);
        collector.is_complete = page.is_last;
        collector.extend_items(page.items);
        offset = next;
    }

    collector.total_count = total_baseline.unwrap_or(0);
    collector.page_capacity = capacity_baseline;

    info!(
        endpoint = %request.url,
        items = collector.item_slice().len(),
        roundtrips = collector.roundtrip_count,
        complete = collector.is_complete,
        "Walk finished"
    );
    Ok(collector)
}

/// Fix the baseline on first sight; any later disagreement is fatal
fn check_baseline(field: &str, baseline: &mut Option<u64>, observed: u64) -> Result<()> {
    match *baseline {
        None => {
            *baseline = Some(observed);
            Ok(())
        }
        Some(expected) if expected == observed => Ok(()),
        Some(expected) => Err(Error::page_mismatch(field, expected, observed)),
    }
}
