// Error taxonomy for the client, the collectors and the registry.

use std::time::Duration;

/// Failure of a single Resource Client call. Transport and authorization
/// failures are treated the same by the collectors: log, skip, continue.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Soft and hard failures inside one collection pass.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Listing a resource kind failed; the kind emits nothing this pass.
    #[error("failed to enumerate {kind}: {source}")]
    Enumeration {
        kind: &'static str,
        #[source]
        source: ClientError,
    },
    /// One item's detail or statistics fetch failed; only that item is skipped.
    #[error("failed to fetch detail for {kind} {id}: {source}")]
    DetailFetch {
        kind: &'static str,
        id: String,
        #[source]
        source: ClientError,
    },
    /// A statistic family had no points; only that family is skipped for the item.
    #[error("{kind} {id}: {family} {source}")]
    EmptySeries {
        kind: &'static str,
        id: String,
        family: &'static str,
        #[source]
        source: EmptySeriesError,
    },
    /// Shared lookup refresh failed; the previous cached value stays in place.
    #[error("failed to refresh {what}: {source}")]
    CacheRefresh {
        what: &'static str,
        #[source]
        source: ClientError,
    },
    /// A required field was absent from an API record; only the affected sample is dropped.
    #[error("{kind} {id} has no {field}")]
    MissingField {
        kind: &'static str,
        id: String,
        field: &'static str,
    },
    #[error("collection pass exceeded {0:?}")]
    Timeout(Duration),
}

/// Aggregation over a series without any points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("series has no samples")]
pub struct EmptySeriesError;

/// A sample whose label values do not line up with its descriptor's label keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("metric {name} expects {expected} label values, got {got}")]
pub struct SampleError {
    pub name: String,
    pub expected: usize,
    pub got: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("descriptor {0} is already registered")]
    DuplicateDescriptor(String),
    #[error("unknown collector {0}")]
    UnknownCollector(String),
}
