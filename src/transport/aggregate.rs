//! Merges arrivals from several stops into ranked per-direction lists.
//!
//! Stops are fetched one at a time in configured order. That order is also
//! the ownership rule for duplicates: once a stop has contributed a
//! (destination, route) pair to a direction, the same pair from any later
//! stop is dropped. Repeats from the same stop are kept, since those are
//! successive services on one route.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::error::{FetchError, TransitError};
use super::types::{ArrivalRecord, DirectionBuckets, StopResponse};
use super::Category;
use crate::config::StopConfig;

/// Something that can report the arrivals due at a provider stop id.
#[async_trait]
pub trait ArrivalSource: Send + Sync {
    async fn fetch(&self, stop_id: &str) -> Result<StopResponse, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Maximum arrivals kept per direction.
    pub result_limit: usize,
    pub deduplicate: bool,
}

impl AggregateOptions {
    pub fn new(result_limit: usize) -> Self {
        Self {
            result_limit,
            deduplicate: true,
        }
    }
}

/// Fetches every stop in `stops` and returns the ranked arrivals by direction.
///
/// # Errors
///
/// Any stop that fails with a provider fault or a transport error aborts the
/// whole category; nothing gathered so far is returned.
#[tracing::instrument(skip(source, stops, options), fields(stops = stops.len()))]
pub async fn aggregate_arrivals<S: ArrivalSource + ?Sized>(
    category: Category,
    source: &S,
    stops: &[StopConfig],
    options: &AggregateOptions,
) -> Result<DirectionBuckets, TransitError> {
    let mut buckets = DirectionBuckets::seeded();
    let mut suppressed = 0usize;

    for stop in stops {
        let arrivals = match source.fetch(&stop.id).await {
            Ok(StopResponse::Arrivals(arrivals)) => arrivals,
            Ok(StopResponse::NoData) => {
                debug!(stop = %stop.name, stop_id = %stop.id, "No data for stop");
                continue;
            }
            Err(FetchError::ProviderFault { code, message }) => {
                warn!(stop = %stop.name, %code, %message, "Provider fault, aborting category");
                return Err(TransitError::ProviderFault {
                    category,
                    stop: stop.name.clone(),
                    code,
                    message,
                });
            }
            Err(e) => {
                warn!(stop = %stop.name, error = %e, "Stop fetch failed, aborting category");
                return Err(TransitError::Fetch {
                    category,
                    stop: stop.name.clone(),
                    source: e,
                });
            }
        };

        debug!(stop = %stop.name, arrivals = arrivals.len(), "Stop fetched");

        for raw in arrivals {
            let record = ArrivalRecord::project(raw, &stop.name);
            let bucket = buckets.bucket_mut(&record.direction);

            if options.deduplicate && bucket.iter().any(|r| r.same_service_elsewhere(&record)) {
                suppressed += 1;
                continue;
            }
            bucket.push(record);
        }
    }

    buckets.rank(options.result_limit);
    info!(kept = buckets.total(), suppressed, "Arrivals aggregated");

    Ok(buckets)
}
