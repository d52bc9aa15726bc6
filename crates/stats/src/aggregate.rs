use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use hookline_core::{ConfigRecord, DispatchLog, DispatchStatus, IngestRequest};

/// Summary counters for the console dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Count of captured ingest requests.
    pub total_ingest: usize,
    /// Count of dispatch log entries.
    pub total_dispatch: usize,
    /// Count of dispatch logs with a failed outcome.
    pub failed_dispatch: usize,
    /// Count of webhook configs with `is_active` set.
    pub active_webhooks: usize,
    /// Mean dispatch execution time, rounded to the nearest millisecond.
    /// Zero when there are no dispatch logs.
    pub avg_execution_time_ms: u64,
}

/// Compute dashboard counters from the raw collections.
///
/// Pure function of its inputs. Non-webhook records in `configs` are
/// ignored, so callers can pass a mixed collection.
pub fn aggregate(
    requests: &[IngestRequest],
    logs: &[DispatchLog],
    configs: &[ConfigRecord],
) -> DashboardStats {
    let failed_dispatch = logs
        .iter()
        .filter(|log| log.status == DispatchStatus::Failed)
        .count();

    let active_webhooks = configs
        .iter()
        .filter(|record| record.as_webhook_config().is_some() && record.is_active())
        .count();

    // Guard the empty case so the mean never divides by zero.
    let avg_execution_time_ms = if logs.is_empty() {
        0
    } else {
        let total: u64 = logs.iter().map(|log| log.execution_time_ms).sum();
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mean = (total as f64 / logs.len() as f64).round() as u64;
        mean
    };

    DashboardStats {
        total_ingest: requests.len(),
        total_dispatch: logs.len(),
        failed_dispatch,
        active_webhooks,
        avg_execution_time_ms,
    }
}

/// One hour-of-day bucket in the ingest histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBucket {
    /// Hour-of-day label, `"00:00"` through `"23:00"`.
    pub label: String,
    /// Ingest requests observed in this hour window.
    pub count: usize,
}

/// Ingest volume over the trailing 24 hours ending at `now`.
///
/// Returns exactly 24 buckets ordered oldest hour first. A request lands in
/// the bucket whose hour window contains it; requests 24 hours or older are
/// excluded. Pure function of its inputs and `now`.
pub fn hourly_histogram(requests: &[IngestRequest], now: DateTime<Utc>) -> Vec<HourlyBucket> {
    let mut counts = [0usize; 24];

    for request in requests {
        let age = now - request.received_at;
        if age < Duration::zero() || age >= Duration::hours(24) {
            continue;
        }
        let hours_back = usize::try_from(age.num_hours()).unwrap_or(24).min(23);
        counts[23 - hours_back] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(index, &count)| {
            let bucket_time = now - Duration::hours(i64::try_from(23 - index).unwrap_or(0));
            HourlyBucket {
                label: format!("{:02}:00", bucket_time.hour()),
                count,
            }
        })
        .collect()
}
