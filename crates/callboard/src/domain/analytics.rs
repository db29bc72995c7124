//! Analytics Aggregation - dashboard views over the call record log
//!
//! Computes every analytics view in a single linear pass over a
//! snapshot of the record set. Averages and rates accumulate unrounded
//! and are rounded only at the output boundary.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::entities::CallRecord;
use crate::domain::normalize::{STATUS_FAILED, STATUS_VOICEMAIL};

/// Records returned in the recent-calls view
pub const RECENT_CALLS_LIMIT: usize = 20;

/// Length of the trailing time-series window, in days
pub const TRAILING_WINDOW_DAYS: i64 = 30;

/// Fixed per-call overhead credited as saved time, in seconds
pub const HANDLING_OVERHEAD_SECS: i64 = 120;

/// Headline KPIs over the (optionally country-filtered) record set
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsSummary {
    pub total_calls: i64,
    pub human_needed: i64,
    pub avg_attempts: f64,
    pub avg_duration: f64,
    /// Percentage of records that required human follow-up
    pub handoff_rate: f64,
    pub total_hours_saved: f64,
    pub total_attempts: i64,
    /// Distinct phone numbers contacted
    pub partners_contacted: i64,
    /// Records whose status is not "voicemail"
    pub connected_calls: i64,
}

/// Records created on one day of the trailing window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Mean duration of the records created on one day of the trailing window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyAvgDuration {
    pub date: NaiveDate,
    pub avg_duration: f64,
}

/// Connected calls bucketed by hour of day (0-23)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: i64,
}

/// Connected calls bucketed by day of week (0 = Sunday)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekdayCount {
    pub dow: u32,
    pub count: i64,
}

/// The full analytics response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsReport {
    pub summary: AnalyticsSummary,
    #[schema(value_type = Object)]
    pub status_distribution: HashMap<String, i64>,
    #[schema(value_type = Object)]
    pub sentiment_distribution: HashMap<String, i64>,
    pub calls_over_time: Vec<DailyCount>,
    pub duration_over_time: Vec<DailyAvgDuration>,
    /// Keyed by attempt number, ascending
    #[schema(value_type = Object)]
    pub attempts_distribution: BTreeMap<i32, i64>,
    pub recent_calls: Vec<CallRecord>,
    pub calls_by_hour: Vec<HourlyCount>,
    pub calls_by_dow: Vec<WeekdayCount>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether a record counts toward the temporal (hour / weekday) views
fn is_connected_strict(status: &str) -> bool {
    status != STATUS_VOICEMAIL && status != STATUS_FAILED
}

/// Aggregate every analytics view over `records` in one pass.
///
/// `now` anchors the trailing time-series window; the window includes
/// its lower boundary. An empty record set yields zero totals, 0.0
/// rates, empty distributions, and an empty recent list.
pub fn analyze(records: &[CallRecord], now: DateTime<Utc>) -> AnalyticsReport {
    let window_start = now - Duration::days(TRAILING_WINDOW_DAYS);

    let mut human_needed = 0i64;
    let mut attempt_sum = 0i64;
    let mut duration_sum = 0i64;
    let mut connected_calls = 0i64;
    let mut phones: HashSet<&str> = HashSet::new();

    let mut status_dist: HashMap<String, i64> = HashMap::new();
    let mut sentiment_dist: HashMap<String, i64> = HashMap::new();
    let mut attempts_dist: BTreeMap<i32, i64> = BTreeMap::new();

    // day -> (record count, summed duration)
    let mut daily: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, i64> = BTreeMap::new();
    let mut by_dow: BTreeMap<u32, i64> = BTreeMap::new();

    // Min-heap of (created_at, index) capped at the recent limit, so the
    // pass stays linear instead of sorting the whole set.
    let mut recent: BinaryHeap<Reverse<(DateTime<Utc>, usize)>> =
        BinaryHeap::with_capacity(RECENT_CALLS_LIMIT + 1);

    for (index, record) in records.iter().enumerate() {
        if record.call_human {
            human_needed += 1;
        }
        attempt_sum += i64::from(record.attempt);
        duration_sum += i64::from(record.duration);
        phones.insert(record.phone.as_str());
        if record.status != STATUS_VOICEMAIL {
            connected_calls += 1;
        }

        *status_dist.entry(record.status.clone()).or_insert(0) += 1;
        *sentiment_dist
            .entry(record.sentiment.to_string())
            .or_insert(0) += 1;
        *attempts_dist.entry(record.attempt).or_insert(0) += 1;

        if record.created_at >= window_start {
            let day = daily.entry(record.created_at.date_naive()).or_insert((0, 0));
            day.0 += 1;
            day.1 += i64::from(record.duration);
        }

        if is_connected_strict(&record.status) {
            *by_hour.entry(record.created_at.hour()).or_insert(0) += 1;
            *by_dow
                .entry(record.created_at.weekday().num_days_from_sunday())
                .or_insert(0) += 1;
        }

        recent.push(Reverse((record.created_at, index)));
        if recent.len() > RECENT_CALLS_LIMIT {
            recent.pop();
        }
    }

    let total_calls = records.len() as i64;
    let (avg_attempts, avg_duration, handoff_rate) = if total_calls > 0 {
        let total = total_calls as f64;
        (
            round2(attempt_sum as f64 / total),
            round1(duration_sum as f64 / total),
            round1(human_needed as f64 * 100.0 / total),
        )
    } else {
        (0.0, 0.0, 0.0)
    };
    let total_hours_saved =
        round1((duration_sum + HANDLING_OVERHEAD_SECS * total_calls) as f64 / 3600.0);

    let calls_over_time = daily
        .iter()
        .map(|(date, (count, _))| DailyCount {
            date: *date,
            count: *count,
        })
        .collect();
    let duration_over_time = daily
        .iter()
        .map(|(date, (count, duration))| DailyAvgDuration {
            date: *date,
            avg_duration: round1(*duration as f64 / *count as f64),
        })
        .collect();

    let mut newest: Vec<(DateTime<Utc>, usize)> =
        recent.into_iter().map(|Reverse(entry)| entry).collect();
    newest.sort_unstable_by(|a, b| b.cmp(a));
    let recent_calls = newest
        .into_iter()
        .map(|(_, index)| records[index].clone())
        .collect();

    let calls_by_hour = by_hour
        .into_iter()
        .map(|(hour, count)| HourlyCount { hour, count })
        .collect();
    let calls_by_dow = by_dow
        .into_iter()
        .map(|(dow, count)| WeekdayCount { dow, count })
        .collect();

    AnalyticsReport {
        summary: AnalyticsSummary {
            total_calls,
            human_needed,
            avg_attempts,
            avg_duration,
            handoff_rate,
            total_hours_saved,
            total_attempts: attempt_sum,
            partners_contacted: phones.len() as i64,
            connected_calls,
        },
        status_distribution: status_dist,
        sentiment_distribution: sentiment_dist,
        calls_over_time,
        duration_over_time,
        attempts_distribution: attempts_dist,
        recent_calls,
        calls_by_hour,
        calls_by_dow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize::{country_for, sentiment_for};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn record(
        phone: &str,
        status: &str,
        attempt: i32,
        duration: i32,
        call_human: bool,
        created_at: DateTime<Utc>,
    ) -> CallRecord {
        CallRecord {
            id: Uuid::new_v4(),
            phone: phone.to_string(),
            status: status.to_string(),
            sentiment: sentiment_for(status),
            call_human,
            summary: String::new(),
            attempt,
            duration,
            country: country_for(phone),
            created_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_record_set_yields_zero_defaults() {
        let report = analyze(&[], now());

        assert_eq!(report.summary.total_calls, 0);
        assert_eq!(report.summary.human_needed, 0);
        assert_eq!(report.summary.avg_attempts, 0.0);
        assert_eq!(report.summary.avg_duration, 0.0);
        assert_eq!(report.summary.handoff_rate, 0.0);
        assert_eq!(report.summary.total_hours_saved, 0.0);
        assert_eq!(report.summary.partners_contacted, 0);
        assert_eq!(report.summary.connected_calls, 0);
        assert!(report.status_distribution.is_empty());
        assert!(report.sentiment_distribution.is_empty());
        assert!(report.calls_over_time.is_empty());
        assert!(report.duration_over_time.is_empty());
        assert!(report.attempts_distribution.is_empty());
        assert!(report.recent_calls.is_empty());
        assert!(report.calls_by_hour.is_empty());
        assert!(report.calls_by_dow.is_empty());
    }

    #[test]
    fn handoff_rate_and_hours_saved() {
        // Durations 0, 30, ..., 270; human follow-up on two of ten
        let records: Vec<CallRecord> = (0..10)
            .map(|i| {
                record(
                    &format!("+3460000000{}", i),
                    "success",
                    1,
                    i * 30,
                    i == 2 || i == 5,
                    now(),
                )
            })
            .collect();

        let report = analyze(&records, now());

        assert_eq!(report.summary.total_calls, 10);
        assert_eq!(report.summary.human_needed, 2);
        assert_eq!(report.summary.handoff_rate, 20.0);
        // (1350 + 10 * 120) / 3600 = 0.708..., rounded to one decimal
        assert_eq!(report.summary.total_hours_saved, 0.7);
        assert_eq!(report.summary.avg_duration, 135.0);
    }

    #[test]
    fn summary_counts_and_distributions() {
        let records = vec![
            record("+34600111222", "success", 1, 60, false, now()),
            record("+34600111222", "hang up", 2, 30, false, now()),
            record("+351911222333", "voicemail", 1, 0, false, now()),
            record("+34600333444", "callback requested", 3, 90, true, now()),
        ];

        let report = analyze(&records, now());

        assert_eq!(report.summary.total_calls, 4);
        assert_eq!(report.summary.total_attempts, 7);
        assert_eq!(report.summary.partners_contacted, 3);
        assert_eq!(report.summary.connected_calls, 3);
        assert_eq!(report.summary.avg_attempts, 1.75);

        assert_eq!(report.status_distribution["success"], 1);
        assert_eq!(report.status_distribution["hang up"], 1);
        assert_eq!(report.status_distribution["voicemail"], 1);
        assert_eq!(report.status_distribution["callback requested"], 1);

        assert_eq!(report.sentiment_distribution["satisfied"], 1);
        assert_eq!(report.sentiment_distribution["neutral"], 3);

        assert_eq!(report.attempts_distribution[&1], 2);
        assert_eq!(report.attempts_distribution[&2], 1);
        assert_eq!(report.attempts_distribution[&3], 1);
    }

    #[test]
    fn time_series_is_sparse_and_windowed() {
        let in_window_a = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let in_window_b = Utc.with_ymd_and_hms(2026, 1, 14, 17, 0, 0).unwrap();
        let out_of_window = Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap();

        let records = vec![
            record("+34600111222", "success", 1, 100, false, in_window_a),
            record("+34600111223", "success", 1, 200, false, in_window_a),
            record("+34600111224", "hang up", 1, 45, false, in_window_b),
            record("+34600111225", "success", 1, 500, false, out_of_window),
        ];

        let report = analyze(&records, now());

        // The old record still counts toward totals, only the series drops it
        assert_eq!(report.summary.total_calls, 4);
        assert_eq!(report.calls_over_time.len(), 2);

        assert_eq!(report.calls_over_time[0].date, in_window_a.date_naive());
        assert_eq!(report.calls_over_time[0].count, 2);
        assert_eq!(report.calls_over_time[1].date, in_window_b.date_naive());
        assert_eq!(report.calls_over_time[1].count, 1);

        assert_eq!(report.duration_over_time[0].avg_duration, 150.0);
        assert_eq!(report.duration_over_time[1].avg_duration, 45.0);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let boundary = now() - Duration::days(TRAILING_WINDOW_DAYS);
        let records = vec![record("+34600111222", "success", 1, 60, false, boundary)];

        let report = analyze(&records, now());
        assert_eq!(report.calls_over_time.len(), 1);
        assert_eq!(report.calls_over_time[0].count, 1);
    }

    #[test]
    fn temporal_buckets_skip_voicemail_and_failed() {
        // 2026-01-11 is a Sunday
        let sunday_morning = Utc.with_ymd_and_hms(2026, 1, 11, 9, 30, 0).unwrap();
        let sunday_evening = Utc.with_ymd_and_hms(2026, 1, 11, 19, 0, 0).unwrap();

        let records = vec![
            record("+34600111222", "success", 1, 60, false, sunday_morning),
            record("+34600111223", "hang up", 1, 10, false, sunday_morning),
            record("+34600111224", "voicemail", 1, 0, false, sunday_evening),
            record("+34600111225", "failed", 1, 0, false, sunday_evening),
        ];

        let report = analyze(&records, now());

        assert_eq!(report.calls_by_hour.len(), 1);
        assert_eq!(report.calls_by_hour[0].hour, 9);
        assert_eq!(report.calls_by_hour[0].count, 2);

        assert_eq!(report.calls_by_dow.len(), 1);
        assert_eq!(report.calls_by_dow[0].dow, 0);
        assert_eq!(report.calls_by_dow[0].count, 2);
    }

    #[test]
    fn recent_calls_capped_and_newest_first() {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let records: Vec<CallRecord> = (0..25)
            .map(|i| {
                record(
                    &format!("+34600{:06}", i),
                    "success",
                    1,
                    60,
                    false,
                    base + Duration::hours(i),
                )
            })
            .collect();

        let report = analyze(&records, now());

        assert_eq!(report.recent_calls.len(), RECENT_CALLS_LIMIT);
        assert_eq!(report.recent_calls[0].created_at, base + Duration::hours(24));
        assert_eq!(
            report.recent_calls[RECENT_CALLS_LIMIT - 1].created_at,
            base + Duration::hours(5)
        );
        for pair in report.recent_calls.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn attempts_distribution_serializes_with_numeric_ascending_keys() {
        let records = vec![
            record("+34600111222", "success", 2, 60, false, now()),
            record("+34600111223", "success", 10, 60, false, now()),
            record("+34600111224", "success", 1, 60, false, now()),
        ];

        let report = analyze(&records, now());
        let json = serde_json::to_string(&report.attempts_distribution).unwrap();

        assert_eq!(json, r#"{"1":1,"2":1,"10":1}"#);
    }
}
