//! Arrival records and the per-direction buckets they are ranked into.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Duetime sentinel for a service arriving now.
pub const DUE: &str = "Due";

/// Directions every result carries, even when nothing is heading that way.
pub const SEEDED_DIRECTIONS: [&str; 2] = ["Inbound", "Outbound"];

/// One arrival as the RTPI provider reports it. Fields we do not display are
/// dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawArrival {
    pub duetime: String,
    pub destination: String,
    pub route: String,
    pub direction: String,
    #[serde(default)]
    pub additionalinformation: Option<String>,
}

/// What a provider returned for a single stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopResponse {
    Arrivals(Vec<RawArrival>),
    /// The provider has nothing scheduled for the stop right now.
    NoData,
}

/// An arrival projected for display and tagged with the stop it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalRecord {
    pub duetime: String,
    pub destination: String,
    pub route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionalinformation: Option<String>,
    pub direction: String,
    pub stop: String,
}

impl ArrivalRecord {
    pub fn project(raw: RawArrival, stop: &str) -> Self {
        Self {
            duetime: raw.duetime,
            destination: raw.destination,
            route: raw.route,
            additionalinformation: raw.additionalinformation,
            direction: raw.direction,
            stop: stop.to_string(),
        }
    }

    /// Minutes until arrival; `"Due"` counts as zero. `None` when the duetime
    /// is not something the provider documents.
    pub fn minutes_until(&self) -> Option<u32> {
        if self.duetime == DUE {
            Some(0)
        } else {
            self.duetime.trim().parse().ok()
        }
    }

    /// Whether `other` is the same service (destination and route) picked up
    /// at a different stop.
    pub fn same_service_elsewhere(&self, other: &ArrivalRecord) -> bool {
        self.destination == other.destination
            && self.route == other.route
            && self.stop != other.stop
    }
}

/// Arrivals grouped by travel direction.
///
/// Direction names are whatever the provider sends; [`SEEDED_DIRECTIONS`] are
/// always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectionBuckets(BTreeMap<String, Vec<ArrivalRecord>>);

impl DirectionBuckets {
    pub fn seeded() -> Self {
        Self(
            SEEDED_DIRECTIONS
                .iter()
                .map(|d| (d.to_string(), Vec::new()))
                .collect(),
        )
    }

    pub fn get(&self, direction: &str) -> Option<&[ArrivalRecord]> {
        self.0.get(direction).map(Vec::as_slice)
    }

    pub fn directions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total arrivals across every direction.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub(crate) fn bucket_mut(&mut self, direction: &str) -> &mut Vec<ArrivalRecord> {
        self.0.entry(direction.to_string()).or_default()
    }

    /// Orders each bucket soonest-first and keeps at most `limit` entries.
    ///
    /// The sort is stable, so equal duetimes keep their insertion order.
    /// Unrecognised duetimes sort last.
    pub(crate) fn rank(&mut self, limit: usize) {
        for bucket in self.0.values_mut() {
            bucket.sort_by_key(|r| r.minutes_until().unwrap_or(u32::MAX));
            bucket.truncate(limit);
        }
    }
}
